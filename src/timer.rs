//! Repeating timer abstraction.
//!
//! A [`RepeatingTask`] is invoked by the platform every period until it
//! returns [`TimerAction::Stop`]. A [`RepeatingTimer`] is the platform facility
//! that accepts such a task.

/// What a repeating timer should do after a task has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerAction {
    /// Fire again after another period.
    Continue,
    /// Cancel all future firings.
    Stop,
}

impl TimerAction {
    /// `true` if the timer keeps repeating.
    #[inline]
    pub fn keeps_running(self) -> bool {
        matches!(self, TimerAction::Continue)
    }
}

impl From<bool> for TimerAction {
    fn from(keep_running: bool) -> Self {
        if keep_running {
            TimerAction::Continue
        } else {
            TimerAction::Stop
        }
    }
}

/// Work run from the timer context once per period.
///
/// Implementations must not block. Closures returning a [`TimerAction`]
/// implement this trait.
pub trait RepeatingTask {
    /// Runs one period's work.
    fn on_timer(&mut self) -> TimerAction;
}

impl<F> RepeatingTask for F
where
    F: FnMut() -> TimerAction,
{
    fn on_timer(&mut self) -> TimerAction {
        self()
    }
}

/// Platform facility that runs a task every fixed period.
///
/// The task is moved into the timer and owned by it for as long as it keeps
/// returning [`TimerAction::Continue`].
pub trait RepeatingTimer<T: RepeatingTask> {
    /// Keeps the registration alive. Dropping it may or may not cancel the
    /// timer depending on the platform.
    type Handle;

    /// Registration failure.
    type Error;

    /// Registers `task` to run every `period_ms` milliseconds, first firing one
    /// period from now.
    fn start(&mut self, period_ms: u32, task: T) -> Result<Self::Handle, Self::Error>;
}
