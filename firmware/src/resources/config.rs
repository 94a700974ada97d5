/*
*  Default Firmware Config
*
*  - Thread mode: counter loop, never yields
*  - SWI_IRQ_1 executor: Timer0 overflow heartbeat
*  - SWI_IRQ_0 executor: USB logger
*/

use super::*;

/* --------------------------- Interrupt Priorities -------------------------- */
#[cfg(feature = "timer-heartbeat")]
pub const TIMER_IRQ_PRIORITY: Priority = Priority::P1;
pub const LOGGER_IRQ_PRIORITY: Priority = Priority::P3;

/* --------------------------- USB Logger -------------------------- */
pub const LOG_BUFFER_SIZE: usize = 1024;
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/* --------------------------- Interrupt Executors -------------------------- */
#[cfg(feature = "timer-heartbeat")]
pub static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
pub static EXECUTOR_LOW: InterruptExecutor = InterruptExecutor::new();
