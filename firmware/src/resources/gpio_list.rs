/*
    Resource Allocation Module
*/

use super::*;

assign_resources! {
    led: LedResources {
        // LED_1, driven by the busy-wait counter loop
        Heartbeat_LED_PIN: PIN_25,
        // LED_2, driven by the Timer0 overflow handler
        Timer_LED_PIN: PIN_15,
    },
}

bind_interrupts!(pub struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<peripherals::USB>;
});
