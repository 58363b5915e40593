//! One-time startup and the process run loop.

use crate::cell::StateCell;
use crate::config::SIGNAL_PERIOD_MS;
use crate::heartbeat::{Heartbeat, LineSink};
use crate::lamps::SignalLamps;
use crate::light::TrafficLight;
use crate::timer::RepeatingTimer;
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;

/// Errors that abort startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError<E> {
    /// The platform refused to register the repeating timer.
    TimerRegistration(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for BootError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BootError::TimerRegistration(e) => {
                write!(f, "failed to register repeating timer: {:?}", e)
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for BootError<E> {}

/// Shows RED on `lamps` and registers the traffic light on `timer`.
///
/// The lamps must already be configured as outputs. On success the returned
/// handle keeps the timer registration alive; on failure nothing has been
/// scheduled and the caller must not enter its main loop.
pub fn bootstrap<'a, L, T>(
    lamps: L,
    signal: &'a StateCell,
    timer: &mut T,
) -> Result<T::Handle, BootError<T::Error>>
where
    L: SignalLamps,
    T: RepeatingTimer<TrafficLight<'a, L>>,
{
    let light = TrafficLight::new(lamps, signal);
    timer
        .start(SIGNAL_PERIOD_MS, light)
        .map_err(BootError::TimerRegistration)
}

/// Bootstraps, then runs the default heartbeat while `keep_running` allows.
///
/// Returns the number of heartbeats emitted. A bootstrap failure returns
/// before the first heartbeat.
pub fn run_while<'a, L, T, D, S, F>(
    lamps: L,
    signal: &'a StateCell,
    timer: &mut T,
    delay: &mut D,
    sink: &mut S,
    keep_running: F,
) -> Result<u32, BootError<T::Error>>
where
    L: SignalLamps,
    T: RepeatingTimer<TrafficLight<'a, L>>,
    D: DelayNs,
    S: LineSink,
    F: FnMut(u32) -> bool,
{
    let _handle = bootstrap(lamps, signal, timer)?;
    Ok(Heartbeat::default().run_while(delay, sink, keep_running))
}

/// Bootstraps, then runs the default heartbeat forever.
///
/// Only returns if startup fails.
pub fn run<'a, L, T, D, S>(
    lamps: L,
    signal: &'a StateCell,
    timer: &mut T,
    delay: &mut D,
    sink: &mut S,
) -> Result<Infallible, BootError<T::Error>>
where
    L: SignalLamps,
    T: RepeatingTimer<TrafficLight<'a, L>>,
    D: DelayNs,
    S: LineSink,
{
    let _handle = bootstrap(lamps, signal, timer)?;
    Heartbeat::default().run(delay, sink)
}
