/*
*  Timer Overflow Handler
*
*  Second heartbeat, paced by the timer instead of the busy loop.
*  Shares nothing with the counter loop.
*/

use core::convert::Infallible;
use embedded_hal_1::digital::OutputPin;

use crate::config::TimerConfig;
use crate::hal::drive;
use crate::hal::CountdownTimer;
use crate::hal::Level;

/* --------------------------- Code -------------------------- */
pub struct TimerOverflowHandler<P> {
    pin: P,
    level: Level,
    reload: u16,
    overflows: u32,
}

impl<P> TimerOverflowHandler<P>
where
    P: OutputPin<Error = Infallible>,
{
    /// `pin` is assumed to start LOW.
    pub fn new(pin: P, reload: u16) -> Self {
        Self {
            pin,
            level: Level::Low,
            reload,
            overflows: 0,
        }
    }

    /// One-time timer setup: mode and prescale, first countdown, stale flag cleared.
    pub fn start<T: CountdownTimer>(&self, timer: &mut T, config: &TimerConfig) {
        timer.configure(config.prescale, config.mode);
        timer.write_countdown(self.reload);
        timer.clear_overflow();

        log::debug!(
            "timer heartbeat prescale={:?} mode={:?} reload={:#x}",
            config.prescale,
            config.mode,
            self.reload
        );
    }

    /// Interrupt entry. Returns `false` without side effects when no overflow is pending.
    pub fn on_interrupt<T: CountdownTimer>(&mut self, timer: &mut T) -> bool {
        if !timer.overflow_pending() {
            return false;
        }

        self.level = !self.level;
        drive(&mut self.pin, self.level);

        // Must be cleared or the interrupt fires again on return.
        timer.clear_overflow();
        // No auto-reload in hardware.
        timer.write_countdown(self.reload);

        self.overflows = self.overflows.wrapping_add(1);
        log::trace!("timer led {:?}", self.level);

        true
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn overflows(&self) -> u32 {
        self.overflows
    }

    pub fn reload(&self) -> u16 {
        self.reload
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIMER0_CONFIG;
    use crate::config::TIMER0_DEF_VALUE;
    use crate::hal::Prescale;
    use crate::hal::TimerMode;
    use crate::sim::SimPin;
    use crate::sim::SimTimer;

    fn started() -> (TimerOverflowHandler<SimPin>, SimTimer) {
        let handler = TimerOverflowHandler::new(SimPin::new(), TIMER0_DEF_VALUE);
        let mut timer = SimTimer::new();
        handler.start(&mut timer, &DEFAULT_TIMER0_CONFIG);
        (handler, timer)
    }

    #[test]
    fn start_follows_register_contract() {
        let (_, timer) = started();
        assert_eq!(timer.config(), Some((Prescale::Div256, TimerMode::SixteenBit)));
        assert_eq!(timer.counter(), TIMER0_DEF_VALUE);
        assert!(!timer.overflow_pending());
    }

    #[test]
    fn spurious_interrupt_is_ignored() {
        let (mut handler, mut timer) = started();
        timer.advance(10);

        assert!(!handler.on_interrupt(&mut timer));
        assert_eq!(handler.level(), Level::Low);
        assert_eq!(handler.pin().writes(), 0);
        assert_eq!(timer.reloads(), 1);
    }

    #[test]
    fn toggle_parity() {
        let (mut handler, mut timer) = started();
        let period = DEFAULT_TIMER0_CONFIG.cycles_per_overflow();

        for n in 1..=9u32 {
            timer.advance(period);
            assert!(handler.on_interrupt(&mut timer));
            let expected = if n % 2 == 0 { Level::Low } else { Level::High };
            assert_eq!(handler.level(), expected);
            assert_eq!(handler.pin().level(), expected);
        }
        assert_eq!(handler.overflows(), 9);
    }

    #[test]
    fn service_clears_flag_and_reloads() {
        let (mut handler, mut timer) = started();

        timer.advance(DEFAULT_TIMER0_CONFIG.cycles_per_overflow());
        assert!(timer.overflow_pending());
        assert_eq!(timer.counter(), 0);

        handler.on_interrupt(&mut timer);
        assert!(!timer.overflow_pending());
        assert_eq!(timer.counter(), TIMER0_DEF_VALUE);
        assert_eq!(timer.reloads(), 2);
    }
}
