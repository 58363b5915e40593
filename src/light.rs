//! The timer-driven traffic light.
//!
//! [`TrafficLight`] is the scheduler context handed to the repeating timer. It
//! owns the lamps, borrows the shared [`StateCell`], and on every firing
//! advances the signal and shows the new state.

use crate::cell::StateCell;
use crate::lamps::{SignalLamps, apply_outputs};
use crate::state::SignalState;
use crate::timer::{RepeatingTask, TimerAction};

/// Drives a set of lamps through the RED, YELLOW, GREEN cycle.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared state cell
/// * `L` - Lamp implementation type
pub struct TrafficLight<'a, L: SignalLamps> {
    lamps: L,
    signal: &'a StateCell,
    ticks: u32,
}

impl<'a, L: SignalLamps> TrafficLight<'a, L> {
    /// Resets `signal` to RED and shows it on `lamps` right away, so the
    /// visible state matches the logical one before the first tick.
    pub fn new(mut lamps: L, signal: &'a StateCell) -> Self {
        signal.set(SignalState::Red);
        apply_outputs(&mut lamps, SignalState::Red);

        Self {
            lamps,
            signal,
            ticks: 0,
        }
    }

    /// Advances to the next state and updates the lamps.
    ///
    /// Returns the state now shown.
    pub fn tick(&mut self) -> SignalState {
        let state = self.signal.advance();
        apply_outputs(&mut self.lamps, state);
        self.ticks = self.ticks.wrapping_add(1);

        #[cfg(feature = "defmt")]
        defmt::trace!("signal -> {} (tick {})", state, self.ticks);

        state
    }

    /// Current state as stored in the shared cell.
    #[inline]
    pub fn state(&self) -> SignalState {
        self.signal.get()
    }

    /// Number of ticks applied since construction. Wraps on overflow.
    #[inline]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Borrows the lamps.
    pub fn lamps(&self) -> &L {
        &self.lamps
    }

    /// Consumes the light and gives the lamps back.
    pub fn into_lamps(self) -> L {
        self.lamps
    }
}

impl<L: SignalLamps> RepeatingTask for TrafficLight<'_, L> {
    fn on_timer(&mut self) -> TimerAction {
        self.tick();
        TimerAction::Continue
    }
}

impl<L: SignalLamps> core::fmt::Debug for TrafficLight<'_, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrafficLight")
            .field("state", &self.state())
            .field("ticks", &self.ticks)
            .finish()
    }
}
