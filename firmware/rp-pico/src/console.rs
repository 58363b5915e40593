use rtt_target::rprintln;
use traffic_light::LineSink;

/// Heartbeat console over RTT.
pub struct RttConsole;

impl LineSink for RttConsole {
    fn write_line(&mut self, line: &str) {
        rprintln!("{}", line);
    }
}
