/*
* Counter Loop
*/

use heartbeat::CounterLoop;
use heartbeat::DEFAULT_THRESHOLDS;
use embassy_rp::gpio::Output;

pub fn heartbeat_loop(led: Output<'static>) -> ! {
    log::info!(
        "heartbeat duty {} per mille over {} ticks",
        (DEFAULT_THRESHOLDS.duty_cycle() * 1000.0) as u32,
        DEFAULT_THRESHOLDS.period_ticks()
    );

    CounterLoop::new(led, DEFAULT_THRESHOLDS).run()
}
