//! Interrupt-safe storage for the current signal.

use crate::state::SignalState;
use core::cell::Cell;
use critical_section::Mutex;

/// Holds the current [`SignalState`], shared between the timer interrupt and
/// any other reader.
///
/// Every access goes through a critical section, so a read from the main loop
/// can never observe a torn write from the interrupt. The cell is `Sync` and
/// can live in a `static`:
///
/// ```
/// use traffic_light::{SignalState, StateCell};
///
/// static SIGNAL: StateCell = StateCell::new(SignalState::Red);
///
/// assert_eq!(SIGNAL.get(), SignalState::Red);
/// ```
pub struct StateCell {
    inner: Mutex<Cell<SignalState>>,
}

impl StateCell {
    /// Creates a cell holding `initial`.
    pub const fn new(initial: SignalState) -> Self {
        Self {
            inner: Mutex::new(Cell::new(initial)),
        }
    }

    /// Returns the current state.
    pub fn get(&self) -> SignalState {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    /// Overwrites the current state.
    pub fn set(&self, state: SignalState) {
        critical_section::with(|cs| self.inner.borrow(cs).set(state));
    }

    /// Moves to the next state in one critical section and returns it.
    pub fn advance(&self) -> SignalState {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let next = cell.get().next();
            cell.set(next);
            next
        })
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new(SignalState::default())
    }
}

impl core::fmt::Debug for StateCell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("StateCell").field(&self.get()).finish()
    }
}
