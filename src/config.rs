//! Build-time configuration.
//!
//! Everything here is fixed at compile time. Change a value and rebuild to
//! rewire the lamps or retime the cycle.

/// GPIO number driving the red lamp.
pub const RED_PIN: u8 = 11;

/// GPIO number driving the yellow lamp.
pub const YELLOW_PIN: u8 = 12;

/// GPIO number driving the green lamp.
pub const GREEN_PIN: u8 = 13;

/// How long each signal is shown before the timer advances it.
pub const SIGNAL_PERIOD_MS: u32 = 3_000;

/// Sleep between two heartbeat lines.
pub const HEARTBEAT_PERIOD_MS: u32 = 1_000;

/// Line emitted once per heartbeat period ("1 second passed").
pub const HEARTBEAT_MESSAGE: &str = "Passou 1 segundo.";
