pub mod counter_loop;
pub mod logger;
#[cfg(feature = "timer-heartbeat")]
pub mod timer_heartbeat;
