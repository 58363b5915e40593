//! Repeating timer built on RP2040 hardware alarm 0.
//!
//! The alarm is one-shot in hardware. [`on_alarm`] re-arms it from the
//! `TIMER_IRQ_0` handler for as long as the task asks to keep running.

use core::cell::RefCell;
use critical_section::Mutex;
use fugit::MicrosDurationU32;
use rp_pico::hal::pac;
use rp_pico::hal::timer::{Alarm, Alarm0, ScheduleAlarmError};
use traffic_light::{RepeatingTask, RepeatingTimer, TimerAction, TrafficLight};

use crate::lamps::PicoLamps;

/// The task this firmware schedules.
pub type Light = TrafficLight<'static, PicoLamps>;

/// Registration owned by the interrupt handler.
struct Armed {
    alarm: Alarm0,
    period: MicrosDurationU32,
    task: Light,
}

static ARMED: Mutex<RefCell<Option<Armed>>> = Mutex::new(RefCell::new(None));

/// Why the repeating timer could not be started.
#[derive(Debug)]
pub enum AlarmError {
    /// The alarm was already handed to a task.
    AlreadyStarted,
    /// The hardware rejected the first deadline.
    Schedule(ScheduleAlarmError),
}

/// Proof that the alarm is armed. The registration lives until power-off.
#[derive(Debug)]
pub struct AlarmHandle {
    _private: (),
}

/// [`RepeatingTimer`] over alarm 0.
pub struct AlarmTimer {
    alarm: Option<Alarm0>,
}

impl AlarmTimer {
    /// Wraps alarm 0, as returned by `Timer::alarm_0`.
    pub fn new(alarm: Alarm0) -> Self {
        Self { alarm: Some(alarm) }
    }
}

impl RepeatingTimer<Light> for AlarmTimer {
    type Handle = AlarmHandle;
    type Error = AlarmError;

    fn start(&mut self, period_ms: u32, task: Light) -> Result<AlarmHandle, AlarmError> {
        let mut alarm = self.alarm.take().ok_or(AlarmError::AlreadyStarted)?;
        let period = MicrosDurationU32::millis(period_ms);

        alarm.enable_interrupt();
        alarm.schedule(period).map_err(AlarmError::Schedule)?;

        critical_section::with(|cs| {
            ARMED.borrow_ref_mut(cs).replace(Armed {
                alarm,
                period,
                task,
            });
        });

        // SAFETY: the handler only touches state guarded by `ARMED`.
        unsafe { pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0) };

        Ok(AlarmHandle { _private: () })
    }
}

/// Runs the scheduled task. Call from the `TIMER_IRQ_0` handler.
pub fn on_alarm() {
    critical_section::with(|cs| {
        let mut armed = ARMED.borrow_ref_mut(cs);
        let Some(entry) = armed.as_mut() else {
            return;
        };

        entry.alarm.clear_interrupt();
        let action = entry.task.on_timer();
        let rearmed = action == TimerAction::Continue && entry.alarm.schedule(entry.period).is_ok();

        if !rearmed {
            entry.alarm.disable_interrupt();
            *armed = None;
        }
    });
}
