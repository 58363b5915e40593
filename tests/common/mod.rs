//! Shared test infrastructure for traffic-light integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use traffic_light::{
    Lamp, LineSink, RepeatingTask, RepeatingTimer, RgbLed, SignalLamps, SignalState, Srgb,
    StateCell, TimerAction,
};

// ============================================================================
// Mock Lamps
// ============================================================================

/// Mock lamps that record every line write
pub struct MockLamps {
    lines: [bool; 3],
    writes: heapless::Vec<(Lamp, bool), 64>,
    max_asserted: usize,
}

impl MockLamps {
    pub fn new() -> Self {
        Self {
            lines: [false; 3],
            writes: heapless::Vec::new(),
            max_asserted: 0,
        }
    }

    pub fn is_on(&self, lamp: Lamp) -> bool {
        self.lines[lamp.index()]
    }

    /// Lamps currently asserted
    pub fn lit(&self) -> Vec<Lamp> {
        Lamp::ALL.into_iter().filter(|l| self.is_on(*l)).collect()
    }

    pub fn writes(&self) -> &[(Lamp, bool)] {
        &self.writes
    }

    /// Highest number of lines ever asserted at the same time
    pub fn max_asserted(&self) -> usize {
        self.max_asserted
    }
}

impl SignalLamps for MockLamps {
    fn set_lamp(&mut self, lamp: Lamp, on: bool) {
        self.lines[lamp.index()] = on;
        let _ = self.writes.push((lamp, on));
        let asserted = self.lines.iter().filter(|on| **on).count();
        self.max_asserted = self.max_asserted.max(asserted);
    }
}

/// Asserts the lamps show exactly `state`
pub fn assert_shows(lamps: &MockLamps, state: SignalState) {
    assert_eq!(lamps.lit(), vec![state.lamp()], "lamps should show {}", state);
}

// ============================================================================
// Mock Pins
// ============================================================================

/// Output pin whose level can be probed from a clone
#[derive(Clone)]
pub struct MockPin {
    level: Rc<Cell<Option<bool>>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self {
            level: Rc::new(Cell::new(None)),
        }
    }

    /// `None` until the pin is first driven
    pub fn level(&self) -> Option<bool> {
        self.level.get()
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.level.set(Some(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.level.set(Some(true));
        Ok(())
    }
}

/// Output pin that rejects every write
pub struct FaultyPin;

impl ErrorType for FaultyPin {
    type Error = ErrorKind;
}

impl OutputPin for FaultyPin {
    fn set_low(&mut self) -> Result<(), ErrorKind> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), ErrorKind> {
        Err(ErrorKind::Other)
    }
}

// ============================================================================
// Mock RGB LED
// ============================================================================

/// Mock RGB LED that records all color changes
pub struct MockRgbLed {
    current_color: Srgb,
    color_history: heapless::Vec<Srgb, 32>,
}

impl MockRgbLed {
    pub fn new() -> Self {
        Self {
            current_color: Srgb::new(0.0, 0.0, 0.0),
            color_history: heapless::Vec::new(),
        }
    }

    pub fn get_last_color(&self) -> Srgb {
        self.current_color
    }

    pub fn color_history(&self) -> &[Srgb] {
        &self.color_history
    }
}

impl RgbLed for MockRgbLed {
    fn set_color(&mut self, color: Srgb) {
        self.current_color = color;
        let _ = self.color_history.push(color);
    }
}

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}

// ============================================================================
// Simulated Repeating Timer
// ============================================================================

/// Registration state shared between a `SimTimer` and a `SimClock`
pub struct TimerSlot<T> {
    task: Option<T>,
    period_ms: u32,
    firings: u32,
}

impl<T: RepeatingTask> TimerSlot<T> {
    fn new() -> Self {
        Self {
            task: None,
            period_ms: 0,
            firings: 0,
        }
    }

    /// Runs the registered task once, as the interrupt would
    pub fn fire(&mut self) -> Option<TimerAction> {
        let task = self.task.as_mut()?;
        let action = task.on_timer();
        self.firings += 1;
        if action == TimerAction::Stop {
            self.task = None;
        }
        Some(action)
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn firings(&self) -> u32 {
        self.firings
    }

    pub fn task(&self) -> Option<&T> {
        self.task.as_ref()
    }
}

pub type SharedSlot<T> = Rc<RefCell<TimerSlot<T>>>;

/// Returned by a `SimTimer` configured to refuse registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationRefused;

/// Handle for a successful `SimTimer` registration
#[derive(Debug)]
pub struct SimHandle;

/// Repeating timer that only fires when told to (directly or through a `SimClock`)
pub struct SimTimer<T> {
    slot: SharedSlot<T>,
    refuse: bool,
    attempts: u32,
}

impl<T: RepeatingTask> SimTimer<T> {
    pub fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(TimerSlot::new())),
            refuse: false,
            attempts: 0,
        }
    }

    /// A timer whose registration always fails
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new()
        }
    }

    pub fn slot(&self) -> SharedSlot<T> {
        Rc::clone(&self.slot)
    }

    pub fn fire(&self) -> Option<TimerAction> {
        self.slot.borrow_mut().fire()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl<T: RepeatingTask> RepeatingTimer<T> for SimTimer<T> {
    type Handle = SimHandle;
    type Error = RegistrationRefused;

    fn start(&mut self, period_ms: u32, task: T) -> Result<SimHandle, RegistrationRefused> {
        self.attempts += 1;
        if self.refuse {
            return Err(RegistrationRefused);
        }
        let mut slot = self.slot.borrow_mut();
        slot.task = Some(task);
        slot.period_ms = period_ms;
        Ok(SimHandle)
    }
}

// ============================================================================
// Simulated Clock
// ============================================================================

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Blocking delay that advances virtual time and fires the timer at every
/// period boundary it crosses, the way the interrupt preempts a real sleep
pub struct SimClock<T> {
    now_ns: u64,
    timer: Option<SharedSlot<T>>,
    sleeps_ms: Vec<u32>,
}

impl<T: RepeatingTask> SimClock<T> {
    /// A clock with no timer attached
    pub fn new() -> Self {
        Self {
            now_ns: 0,
            timer: None,
            sleeps_ms: Vec::new(),
        }
    }

    /// A clock that drives `timer`, registered at time zero
    pub fn driving(timer: &SimTimer<T>) -> Self {
        Self {
            timer: Some(timer.slot()),
            ..Self::new()
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ns / NANOS_PER_MILLI
    }

    pub fn sleeps_ms(&self) -> &[u32] {
        &self.sleeps_ms
    }

    fn advance_ns(&mut self, ns: u64) {
        let target = self.now_ns + ns;
        if let Some(slot) = &self.timer {
            loop {
                let mut slot = slot.borrow_mut();
                if !slot.is_armed() || slot.period_ms() == 0 {
                    break;
                }
                let next_deadline =
                    u64::from(slot.firings() + 1) * u64::from(slot.period_ms()) * NANOS_PER_MILLI;
                if next_deadline > target {
                    break;
                }
                self.now_ns = next_deadline;
                slot.fire();
            }
        }
        self.now_ns = target;
    }
}

/// Clock for tests that never register a timer
pub type PlainClock = SimClock<fn() -> TimerAction>;

impl<T: RepeatingTask> DelayNs for SimClock<T> {
    fn delay_ns(&mut self, ns: u32) {
        self.advance_ns(u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleeps_ms.push(ms);
        self.advance_ns(u64::from(ms) * NANOS_PER_MILLI);
    }
}

// ============================================================================
// Console Sinks
// ============================================================================

/// Sink that keeps every emitted line
pub struct RecordingSink {
    lines: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl LineSink for RecordingSink {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }
}

/// Sink that also samples the shared signal each time a line is emitted
pub struct ObservingSink<'a> {
    signal: &'a StateCell,
    observed: Vec<(String, SignalState)>,
}

impl<'a> ObservingSink<'a> {
    pub fn new(signal: &'a StateCell) -> Self {
        Self {
            signal,
            observed: Vec::new(),
        }
    }

    pub fn observed(&self) -> &[(String, SignalState)] {
        &self.observed
    }
}

impl LineSink for ObservingSink<'_> {
    fn write_line(&mut self, line: &str) {
        self.observed.push((line.to_owned(), self.signal.get()));
    }
}
