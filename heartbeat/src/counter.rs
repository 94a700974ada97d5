/*
*  Heartbeat Counter Loop
*
*  Blink pattern derived from a free-running tick counter, no timer involved.
*  The tick must advance by exactly one per iteration: a skipped value would
*  miss a threshold and corrupt the pattern.
*/

use core::convert::Infallible;
use embedded_hal_1::digital::OutputPin;

use crate::config::Thresholds;
use crate::hal::drive;
use crate::hal::Level;

/* --------------------------- Phase & Step -------------------------- */
/// Where a tick value sits relative to the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    BelowOn,
    AtOn,
    Between,
    AtOff,
    AfterOff,
    AtReset,
}

/// Branch taken by one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    SwitchOn,
    SwitchOff,
    Reset,
    Advance,
}

impl Step {
    /// Level the iteration writes to the pin, if any.
    pub fn level(self) -> Option<Level> {
        match self {
            Step::SwitchOn => Some(Level::High),
            Step::SwitchOff => Some(Level::Low),
            Step::Reset | Step::Advance => None,
        }
    }
}

/* --------------------------- Counter -------------------------- */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeartbeatCounter {
    tick: u32,
    thresholds: Thresholds,
}

impl HeartbeatCounter {
    pub const fn new() -> Self {
        Self::with_thresholds(crate::config::DEFAULT_THRESHOLDS)
    }

    pub const fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { tick: 0, thresholds }
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn phase(&self) -> Phase {
        self.thresholds.phase_of(self.tick)
    }

    pub fn step(&mut self) -> Step {
        if self.tick == self.thresholds.on() {
            self.tick += 1;
            Step::SwitchOn
        } else if self.tick == self.thresholds.off() {
            self.tick += 1;
            Step::SwitchOff
        } else if self.tick == self.thresholds.reset() {
            self.tick = 0;
            Step::Reset
        } else {
            self.tick += 1;
            Step::Advance
        }
    }
}

impl Default for HeartbeatCounter {
    fn default() -> Self {
        Self::new()
    }
}

/* --------------------------- Counter Loop -------------------------- */
pub struct CounterLoop<P> {
    counter: HeartbeatCounter,
    pin: P,
    level: Level,
}

impl<P> CounterLoop<P>
where
    P: OutputPin<Error = Infallible>,
{
    /// `pin` is assumed to start LOW.
    pub fn new(pin: P, thresholds: Thresholds) -> Self {
        Self {
            counter: HeartbeatCounter::with_thresholds(thresholds),
            pin,
            level: Level::Low,
        }
    }

    /// Runs one iteration of the loop body.
    pub fn poll(&mut self) -> Step {
        let step = self.counter.step();

        if let Some(level) = step.level() {
            drive(&mut self.pin, level);
            self.level = level;
            log::trace!("heartbeat led {:?}", level);
        }

        step
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn counter(&self) -> &HeartbeatCounter {
        &self.counter
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn run(mut self) -> ! {
        log::debug!(
            "heartbeat loop on={:#x} off={:#x} reset={:#x}",
            self.counter.thresholds().on(),
            self.counter.thresholds().off(),
            self.counter.thresholds().reset()
        );

        loop {
            self.poll();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::T_OFF;
    use crate::config::T_ON;
    use crate::config::T_RESET;
    use crate::sim::SimPin;

    fn run_for(lp: &mut CounterLoop<SimPin>, iterations: u32) {
        for _ in 0..iterations {
            lp.poll();
        }
    }

    #[test]
    fn branches_are_exclusive() {
        let mut counter = HeartbeatCounter::new();
        let mut on = 0;
        let mut off = 0;
        let mut reset = 0;

        for expected_tick in 0..=T_RESET {
            assert_eq!(counter.tick(), expected_tick);
            match counter.step() {
                Step::SwitchOn => on += 1,
                Step::SwitchOff => off += 1,
                Step::Reset => reset += 1,
                Step::Advance => {}
            }
        }

        assert_eq!((on, off, reset), (1, 1, 1));
    }

    #[test]
    fn cycle_closes_after_reset_plus_one() {
        let mut counter = HeartbeatCounter::new();
        for _ in 0..T_RESET {
            counter.step();
            assert_ne!(counter.tick(), 0);
        }
        assert_eq!(counter.phase(), Phase::AtReset);
        assert_eq!(counter.step(), Step::Reset);
        assert_eq!(counter.tick(), 0);
    }

    #[test]
    fn tick_never_exceeds_reset() {
        let t = Thresholds::new(3, 6, 10).unwrap();
        let mut counter = HeartbeatCounter::with_thresholds(t);
        for _ in 0..100 {
            counter.step();
            assert!(counter.tick() <= t.reset());
        }
    }

    #[test]
    fn variant_scenario() {
        let mut lp = CounterLoop::new(SimPin::new(), Thresholds::default());

        run_for(&mut lp, T_ON + 1);
        assert_eq!(lp.level(), Level::High);
        assert!(lp.pin().is_high());

        run_for(&mut lp, T_OFF - T_ON);
        assert_eq!(lp.level(), Level::Low);
        assert!(!lp.pin().is_high());

        run_for(&mut lp, T_RESET - T_OFF);
        assert_eq!(lp.counter().tick(), 0);
        assert_eq!(lp.level(), Level::Low);
        assert_eq!(lp.pin().writes(), 2);
    }

    #[test]
    fn pin_level_tracks_window() {
        let t = Thresholds::new(4, 9, 15).unwrap();
        let mut lp = CounterLoop::new(SimPin::new(), t);

        // second cycle, so the steady state applies to every tick
        run_for(&mut lp, t.period_ticks());
        for _ in 0..t.period_ticks() {
            let observed = lp.counter().tick();
            lp.poll();
            assert_eq!(lp.level(), t.level_after(observed), "tick {}", observed);
            assert_eq!(lp.pin().level(), lp.level());
        }
    }

    #[test]
    fn reset_leaves_pin_alone() {
        let t = Thresholds::new(1, 2, 3).unwrap();
        let mut lp = CounterLoop::new(SimPin::new(), t);
        run_for(&mut lp, 3);
        let writes = lp.pin().writes();
        assert_eq!(lp.poll(), Step::Reset);
        assert_eq!(lp.pin().writes(), writes);
    }
}
