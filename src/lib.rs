#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SignalState`**: The colour shown by the light (`Red`, `Yellow`, `Green`) and its cyclic `next` transition
//! - **`StateCell`**: Interrupt-safe home of the current state, shared by the timer interrupt and the main loop
//! - **`SignalLamps`**: Trait to implement for your lamp hardware
//! - **`apply_outputs`**: Clears every lamp, then lights the one matching a state
//! - **`TrafficLight`**: The scheduler context; advances the state and updates the lamps on every timer firing
//! - **`RepeatingTimer`** / **`RepeatingTask`**: Trait pair binding the light to your platform's repeating timer
//! - **`Heartbeat`**: Independent sleep-then-log main loop
//! - **`bootstrap`** / **`run`**: One-time startup and the process run loop
//!
//! Pin numbers and periods are compile-time constants in [`config`].

pub mod config;
pub mod state;
pub mod lamps;
pub mod cell;
pub mod timer;
pub mod light;
pub mod heartbeat;
pub mod bootstrap;

pub use state::SignalState;
pub use lamps::{
    apply_outputs, GpioLamps, Lamp, Polarity, RgbIndicator, RgbLed, SignalLamps, COLOR_OFF,
};
pub use cell::StateCell;
pub use timer::{RepeatingTask, RepeatingTimer, TimerAction};
pub use light::TrafficLight;
pub use heartbeat::{Heartbeat, LineSink};
pub use bootstrap::{bootstrap, run, run_while, BootError};

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;
