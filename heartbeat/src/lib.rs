/*
* Heartbeat Core
*
*  - Counter loop: busy-wait tick counter driving the primary LED
*  - Overflow handler: timer interrupt toggling the secondary LED
*/

#![cfg_attr(not(test), no_std)]

/* --------------------------- Declare Modules -------------------------- */
pub mod config;
pub mod counter;
pub mod hal;
pub mod overflow;
pub mod sim;

pub use config::*;
pub use counter::CounterLoop;
pub use counter::HeartbeatCounter;
pub use counter::Phase;
pub use counter::Step;
pub use hal::CountdownTimer;
pub use hal::Level;
pub use hal::Prescale;
pub use hal::TimerMode;
pub use overflow::TimerOverflowHandler;
