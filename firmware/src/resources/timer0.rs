/*
*  Timer0 Emulation
*
*  The RP2040 has no PIC-style Timer0, so the register contract is kept on top
*  of embassy-time deadlines:
*   - a countdown write restarts the countdown from the written value
*   - without a reload the next overflow comes after a full counter wrap
*   - the overflow flag stays set until cleared
*/

use heartbeat::CountdownTimer;
use heartbeat::Prescale;
use heartbeat::TimerMode;
use embassy_time::Duration;
use embassy_time::Instant;
use embassy_time::Timer;

/* --------------------------- Code -------------------------- */
pub struct Timer0 {
    instruction_hz: u32,
    config: Option<(Prescale, TimerMode)>,
    deadline: Option<Instant>,
    overflow: bool,
}

impl Timer0 {
    pub const fn new(instruction_hz: u32) -> Self {
        Self {
            instruction_hz,
            config: None,
            deadline: None,
            overflow: false,
        }
    }

    fn counts_to_duration(&self, prescale: Prescale, counts: u32) -> Duration {
        let cycles = counts as u64 * prescale.divisor() as u64;
        Duration::from_micros(cycles * 1_000_000 / self.instruction_hz as u64)
    }

    /// Waits for the next wrap and raises the overflow flag.
    pub async fn wait_overflow(&mut self) {
        let (Some((prescale, mode)), Some(deadline)) = (self.config, self.deadline) else {
            // never started
            core::future::pending::<()>().await;
            return;
        };

        Timer::at(deadline).await;

        self.overflow = true;
        self.deadline = Some(deadline + self.counts_to_duration(prescale, mode.wrap()));
    }
}

impl CountdownTimer for Timer0 {
    fn configure(&mut self, prescale: Prescale, mode: TimerMode) {
        self.config = Some((prescale, mode));
    }

    fn write_countdown(&mut self, value: u16) {
        if let Some((prescale, mode)) = self.config {
            let value = value & mode.max_count();
            let remaining = mode.wrap() - value as u32;
            self.deadline = Some(Instant::now() + self.counts_to_duration(prescale, remaining));
        }
    }

    fn overflow_pending(&self) -> bool {
        self.overflow
    }

    fn clear_overflow(&mut self) {
        self.overflow = false;
    }
}
