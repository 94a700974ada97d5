/* 
* Resources Hub
*/

/* --------------------------- Library -------------------------- */
use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals;
use embassy_rp::usb::InterruptHandler as UsbInterruptHandler;
use embassy_rp::interrupt::Priority;
use embassy_executor::InterruptExecutor;
use log::LevelFilter;

/* --------------------------- Declare Modules -------------------------- */
pub mod gpio_list;
pub mod config;
#[cfg(feature = "timer-heartbeat")]
pub mod timer0;

pub use gpio_list::*;
pub use config::*;
#[cfg(feature = "timer-heartbeat")]
pub use timer0::*;
