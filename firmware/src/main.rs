#![no_std]
#![no_main]

// Mod
mod tasks;
mod resources;

// Resources
use crate::resources::Irqs;
use crate::resources::AssignedResources;
use crate::resources::LedResources;
use crate::resources::EXECUTOR_LOW;
use crate::resources::LOGGER_IRQ_PRIORITY;
#[cfg(feature = "timer-heartbeat")]
use crate::resources::EXECUTOR_HIGH;
#[cfg(feature = "timer-heartbeat")]
use crate::resources::TIMER_IRQ_PRIORITY;

// Tasks
use crate::tasks::counter_loop::heartbeat_loop;
use crate::tasks::logger::usb_logger_task;
#[cfg(feature = "timer-heartbeat")]
use crate::tasks::timer_heartbeat::timer_heartbeat_task;

// Library
use defmt_rtt as _;
use panic_probe as _;

use cortex_m_rt::entry;
use embassy_rp::gpio::Level;
use embassy_rp::gpio::Output;
use embassy_rp::interrupt;
use embassy_rp::interrupt::InterruptExt;
use embassy_rp::usb::Driver;

#[cfg(feature = "timer-heartbeat")]
#[interrupt]
unsafe fn SWI_IRQ_1() {
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

#[interrupt]
unsafe fn SWI_IRQ_0() {
    unsafe { EXECUTOR_LOW.on_interrupt() }
}

#[entry]
fn main() -> ! {
    let ph = embassy_rp::init(Default::default());
    let p = split_resources!(ph);
    let usb_driver = Driver::new(ph.USB, Irqs);

    defmt::info!("heartbeat firmware up");

    interrupt::SWI_IRQ_0.set_priority(LOGGER_IRQ_PRIORITY);
    let spawner_low = EXECUTOR_LOW.start(interrupt::SWI_IRQ_0);
    spawner_low.must_spawn(usb_logger_task(usb_driver));

    let heartbeat_led = Output::new(p.led.Heartbeat_LED_PIN, Level::Low);

    #[cfg(feature = "timer-heartbeat")]
    {
        let timer_led = Output::new(p.led.Timer_LED_PIN, Level::Low);

        interrupt::SWI_IRQ_1.set_priority(TIMER_IRQ_PRIORITY);
        let spawner_high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
        spawner_high.must_spawn(timer_heartbeat_task(timer_led));
    }

    // Thread mode from here on; the interrupt executors preempt this loop.
    heartbeat_loop(heartbeat_led)
}
