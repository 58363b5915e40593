//! Signal states and the transition function.

use crate::lamps::Lamp;
use palette::Srgb;

/// The colour currently shown by the traffic light.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalState {
    /// Stop. Initial state after bootstrap.
    #[default]
    Red,
    /// Prepare to go.
    Yellow,
    /// Go.
    Green,
}

impl SignalState {
    /// Every state, in cycle order starting from the initial one.
    pub const ALL: [SignalState; 3] = [SignalState::Red, SignalState::Yellow, SignalState::Green];

    /// Returns the state that follows `self` in the cycle.
    ///
    /// The function is total and the cycle has period three:
    /// `s.next().next().next() == s` for every `s`.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            SignalState::Red => SignalState::Yellow,
            SignalState::Yellow => SignalState::Green,
            SignalState::Green => SignalState::Red,
        }
    }

    /// Returns the state reached after `ticks` transitions from `self`.
    pub const fn advance(self, ticks: u32) -> Self {
        let mut state = self;
        let mut remaining = ticks % 3;
        while remaining > 0 {
            state = state.next();
            remaining -= 1;
        }
        state
    }

    /// The lamp that must be lit while in this state.
    #[inline]
    pub const fn lamp(self) -> Lamp {
        match self {
            SignalState::Red => Lamp::Red,
            SignalState::Yellow => Lamp::Yellow,
            SignalState::Green => Lamp::Green,
        }
    }

    /// Display colour of this state, for RGB renderings of the light.
    #[inline]
    pub fn color(self) -> Srgb {
        self.lamp().color()
    }
}

impl core::fmt::Display for SignalState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            SignalState::Red => "RED",
            SignalState::Yellow => "YELLOW",
            SignalState::Green => "GREEN",
        };
        f.write_str(name)
    }
}
