#![no_std]
#![no_main]

use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::pac::interrupt;
use rp_pico::hal::{Clock, Sio, Timer, clocks::init_clocks_and_plls, pac, watchdog::Watchdog};
use rtt_target::{rprintln, rtt_init_print};

use rp_pico_traffic_light::alarm::{self, AlarmTimer};
use rp_pico_traffic_light::console::RttConsole;

use traffic_light::config::{GREEN_PIN, RED_PIN, SIGNAL_PERIOD_MS, YELLOW_PIN};
use traffic_light::{GpioLamps, Polarity, SignalState, StateCell};

/// Current signal, written only from the alarm interrupt.
static SIGNAL: StateCell = StateCell::new(SignalState::Red);

/// Alarm 0 interrupt - fires once per signal period
#[allow(non_snake_case)]
#[interrupt]
fn TIMER_IRQ_0() {
    alarm::on_alarm();
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== RP Pico Traffic Light ===");
    rprintln!("Starting initialization...");

    // Get peripherals
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up watchdog driver
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    rprintln!(
        "System clock configured: {} Hz",
        clocks.system_clock.freq().to_Hz()
    );

    // Set up the Single Cycle IO (for GPIO access)
    let sio = Sio::new(pac.SIO);

    // Set the pins to their default state
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let lamps = GpioLamps::new(
        pins.gpio11.into_push_pull_output(),
        pins.gpio12.into_push_pull_output(),
        pins.gpio13.into_push_pull_output(),
        Polarity::ActiveHigh,
    );

    rprintln!(
        "Lamps configured on GPIO{} (R), GPIO{} (Y), GPIO{} (G)",
        RED_PIN,
        YELLOW_PIN,
        GREEN_PIN
    );

    // Hardware timer: alarm 0 drives the signal, the counter backs the heartbeat delay
    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let mut alarm_timer = AlarmTimer::new(timer.alarm_0().unwrap());
    let mut console = RttConsole;

    rprintln!("=== Hardware Ready ===");
    rprintln!("Signal period: {} ms, starting on RED", SIGNAL_PERIOD_MS);

    match traffic_light::run(lamps, &SIGNAL, &mut alarm_timer, &mut timer, &mut console) {
        Ok(never) => match never {},
        Err(e) => {
            rprintln!("Startup failed: {}", e);
            panic!("startup failed");
        }
    }
}
