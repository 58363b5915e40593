//! Lamp outputs.
//!
//! Provides the [`SignalLamps`] trait for hardware abstraction, the
//! [`apply_outputs`] procedure that maps a [`SignalState`] onto the three
//! lamps, and two ready-made backends: [`GpioLamps`] for three discrete LEDs on
//! push-pull pins and [`RgbIndicator`] for a single RGB LED.

use crate::config::{GREEN_PIN, RED_PIN, YELLOW_PIN};
use crate::state::SignalState;
use embedded_hal::digital::{OutputPin, PinState};
use palette::Srgb;

/// Colour rendered when no lamp is lit.
pub const COLOR_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);

/// One of the three physical lamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lamp {
    Red,
    Yellow,
    Green,
}

impl Lamp {
    /// All lamps, top to bottom.
    pub const ALL: [Lamp; 3] = [Lamp::Red, Lamp::Yellow, Lamp::Green];

    /// Position of the lamp in [`Lamp::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Lamp::Red => 0,
            Lamp::Yellow => 1,
            Lamp::Green => 2,
        }
    }

    /// GPIO number the lamp is wired to.
    #[inline]
    pub const fn pin(self) -> u8 {
        match self {
            Lamp::Red => RED_PIN,
            Lamp::Yellow => YELLOW_PIN,
            Lamp::Green => GREEN_PIN,
        }
    }

    /// Colour of the lamp's lens.
    #[inline]
    pub fn color(self) -> Srgb {
        match self {
            Lamp::Red => Srgb::new(1.0, 0.0, 0.0),
            Lamp::Yellow => Srgb::new(1.0, 1.0, 0.0),
            Lamp::Green => Srgb::new(0.0, 1.0, 0.0),
        }
    }
}

/// Trait for abstracting the three lamp output lines.
///
/// Implement this for your hardware to let [`apply_outputs`] and the
/// [`TrafficLight`](crate::TrafficLight) drive it.
pub trait SignalLamps {
    /// Asserts (`on == true`) or deasserts one lamp line.
    ///
    /// This method cannot fail. Handle or discard hardware errors internally.
    fn set_lamp(&mut self, lamp: Lamp, on: bool);
}

impl<T: SignalLamps + ?Sized> SignalLamps for &mut T {
    fn set_lamp(&mut self, lamp: Lamp, on: bool) {
        (**self).set_lamp(lamp, on);
    }
}

/// Shows `state` on `lamps`.
///
/// All three lines are cleared first, then exactly the line mapped to `state`
/// is asserted, so no path through this function leaves two lines asserted.
pub fn apply_outputs<L: SignalLamps + ?Sized>(lamps: &mut L, state: SignalState) {
    for lamp in Lamp::ALL {
        lamps.set_lamp(lamp, false);
    }
    lamps.set_lamp(state.lamp(), true);
}

/// Electrical level that lights a lamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Lamp lights when its pin is driven high.
    #[default]
    ActiveHigh,
    /// Lamp lights when its pin is driven low (common-anode wiring).
    ActiveLow,
}

impl Polarity {
    /// Pin level that realises the logical lamp state `on`.
    #[inline]
    pub fn level(self, on: bool) -> PinState {
        match self {
            Polarity::ActiveHigh => PinState::from(on),
            Polarity::ActiveLow => PinState::from(!on),
        }
    }
}

/// Three discrete LEDs on GPIO output pins.
pub struct GpioLamps<R, Y, G>
where
    R: OutputPin,
    Y: OutputPin,
    G: OutputPin,
{
    red: R,
    yellow: Y,
    green: G,
    polarity: Polarity,
}

impl<R, Y, G> GpioLamps<R, Y, G>
where
    R: OutputPin,
    Y: OutputPin,
    G: OutputPin,
{
    /// Wraps three already configured output pins.
    ///
    /// # Arguments
    /// * `red` - output pin for the red lamp
    /// * `yellow` - output pin for the yellow lamp
    /// * `green` - output pin for the green lamp
    /// * `polarity` - level that lights a lamp on this board
    pub fn new(red: R, yellow: Y, green: G, polarity: Polarity) -> Self {
        Self {
            red,
            yellow,
            green,
            polarity,
        }
    }

    /// Gives the pins back.
    pub fn release(self) -> (R, Y, G) {
        (self.red, self.yellow, self.green)
    }
}

impl<R, Y, G> SignalLamps for GpioLamps<R, Y, G>
where
    R: OutputPin,
    Y: OutputPin,
    G: OutputPin,
{
    fn set_lamp(&mut self, lamp: Lamp, on: bool) {
        let level = self.polarity.level(on);
        // Pin writes are not expected to fail; nothing to recover if they do.
        match lamp {
            Lamp::Red => {
                let _ = self.red.set_state(level);
            }
            Lamp::Yellow => {
                let _ = self.yellow.set_state(level);
            }
            Lamp::Green => {
                let _ = self.green.set_state(level);
            }
        }
    }
}

/// Trait for abstracting RGB LED hardware.
///
/// Color components are in the range 0.0-1.0. Implementations should convert
/// them to their hardware's native format (PWM duty cycles, 8-bit values).
pub trait RgbLed {
    /// Sets the LED to the specified RGB color.
    fn set_color(&mut self, color: Srgb);
}

/// Renders the traffic light on a single RGB LED.
///
/// Tracks the three logical lamp lines and shows the colour of the asserted
/// lamp, or [`COLOR_OFF`] while none is asserted.
pub struct RgbIndicator<L: RgbLed> {
    led: L,
    lit: [bool; 3],
}

impl<L: RgbLed> RgbIndicator<L> {
    /// Creates an indicator with every lamp off.
    pub fn new(mut led: L) -> Self {
        led.set_color(COLOR_OFF);
        Self {
            led,
            lit: [false; 3],
        }
    }

    /// Returns whether `lamp` is currently asserted.
    #[inline]
    pub fn is_lit(&self, lamp: Lamp) -> bool {
        self.lit[lamp.index()]
    }

    /// Colour currently rendered.
    pub fn current_color(&self) -> Srgb {
        Lamp::ALL
            .iter()
            .filter(|lamp| self.is_lit(**lamp))
            .fold(COLOR_OFF, |acc, lamp| {
                let c = lamp.color();
                Srgb::new(
                    (acc.red + c.red).min(1.0),
                    (acc.green + c.green).min(1.0),
                    (acc.blue + c.blue).min(1.0),
                )
            })
    }

    /// Borrows the underlying LED.
    pub fn led(&self) -> &L {
        &self.led
    }
}

impl<L: RgbLed> SignalLamps for RgbIndicator<L> {
    fn set_lamp(&mut self, lamp: Lamp, on: bool) {
        self.lit[lamp.index()] = on;
        let color = self.current_color();
        self.led.set_color(color);
    }
}
