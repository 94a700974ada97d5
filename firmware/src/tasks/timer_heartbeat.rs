/*
* Timer Heartbeat Task
*/

// Resources
use crate::resources::Timer0;

// Library
use heartbeat::TimerOverflowHandler;
use heartbeat::DEFAULT_TIMER0_CONFIG;
use heartbeat::INSTRUCTION_CLOCK_HZ;
use heartbeat::TIMER0_DEF_VALUE;
use embassy_rp::gpio::Output;

#[embassy_executor::task]
pub async fn timer_heartbeat_task(led: Output<'static>) {
    let mut timer = Timer0::new(INSTRUCTION_CLOCK_HZ);
    let mut handler = TimerOverflowHandler::new(led, TIMER0_DEF_VALUE);

    handler.start(&mut timer, &DEFAULT_TIMER0_CONFIG);
    if let Some(period_ns) = DEFAULT_TIMER0_CONFIG.overflow_period_ns(INSTRUCTION_CLOCK_HZ) {
        log::info!("timer heartbeat every {} us", period_ns / 1000);
    }

    loop {
        timer.wait_overflow().await;
        handler.on_interrupt(&mut timer);
    }
}
