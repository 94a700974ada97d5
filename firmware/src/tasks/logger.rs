/*
* Logger Task
*/

// Resources
use crate::resources::LOG_BUFFER_SIZE;
use crate::resources::LOG_LEVEL;

// Library
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;

#[embassy_executor::task]
pub async fn usb_logger_task(driver: Driver<'static, USB>) {
    embassy_usb_logger::run!(LOG_BUFFER_SIZE, LOG_LEVEL, driver);
}
