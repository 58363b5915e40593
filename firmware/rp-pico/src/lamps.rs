//! Lamp pins on the Pico.

use rp_pico::hal::gpio::bank0::{Gpio11, Gpio12, Gpio13};
use rp_pico::hal::gpio::{FunctionSioOutput, Pin, PullDown};
use traffic_light::GpioLamps;
use traffic_light::config::{GREEN_PIN, RED_PIN, YELLOW_PIN};

// The pin types below are fixed by the BSP; keep them in step with the config.
const _: () = assert!(RED_PIN == 11 && YELLOW_PIN == 12 && GREEN_PIN == 13);

pub type RedPin = Pin<Gpio11, FunctionSioOutput, PullDown>;
pub type YellowPin = Pin<Gpio12, FunctionSioOutput, PullDown>;
pub type GreenPin = Pin<Gpio13, FunctionSioOutput, PullDown>;

/// The three traffic-light LEDs driven straight from GPIO.
pub type PicoLamps = GpioLamps<RedPin, YellowPin, GreenPin>;
