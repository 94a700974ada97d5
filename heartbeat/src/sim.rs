/*
*  Host Simulation
*
*  Fake pin and Timer0 plus a harness that interleaves counter loop
*  iterations with overflow interrupts, the way the MCU preempts the main loop.
*/

use core::convert::Infallible;
use embedded_hal_1::digital::ErrorType;
use embedded_hal_1::digital::OutputPin;

use crate::config::Thresholds;
use crate::config::TimerConfig;
use crate::counter::CounterLoop;
use crate::counter::Step;
use crate::hal::CountdownTimer;
use crate::hal::Level;
use crate::hal::Prescale;
use crate::hal::TimerMode;
use crate::overflow::TimerOverflowHandler;

/* --------------------------- Pin -------------------------- */
/// Output latch that remembers its level and how often it was written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimPin {
    level: Level,
    writes: u32,
    rising_edges: u32,
}

impl SimPin {
    pub const fn new() -> Self {
        Self {
            level: Level::Low,
            writes: 0,
            rising_edges: 0,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn is_high(&self) -> bool {
        self.level.is_high()
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }

    pub fn rising_edges(&self) -> u32 {
        self.rising_edges
    }

    fn write(&mut self, level: Level) {
        if level == Level::High && self.level == Level::Low {
            self.rising_edges += 1;
        }
        self.level = level;
        self.writes += 1;
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(Level::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(Level::High);
        Ok(())
    }
}

/* --------------------------- Timer -------------------------- */
/// Up-counting timer with prescaler, overflow flag and no auto-reload.
/// Stays stopped until configured.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimTimer {
    config: Option<(Prescale, TimerMode)>,
    counter: u16,
    prescaler: u32,
    overflow: bool,
    reloads: u32,
}

impl SimTimer {
    pub const fn new() -> Self {
        Self {
            config: None,
            counter: 0,
            prescaler: 0,
            overflow: false,
            reloads: 0,
        }
    }

    pub fn config(&self) -> Option<(Prescale, TimerMode)> {
        self.config
    }

    /// Current counter register value.
    pub fn counter(&self) -> u16 {
        self.counter
    }

    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    /// Feeds `cycles` instruction cycles into the prescaler.
    pub fn advance(&mut self, cycles: u32) {
        let Some((prescale, mode)) = self.config else {
            return;
        };

        let total = self.prescaler as u64 + cycles as u64;
        let divisor = prescale.divisor() as u64;
        let mut counts = total / divisor;
        self.prescaler = (total % divisor) as u32;

        let wrap = mode.wrap() as u64;
        let to_wrap = wrap - self.counter as u64;
        if counts >= to_wrap {
            counts -= to_wrap;
            self.overflow = true;
            self.counter = (counts % wrap) as u16;
        } else {
            self.counter += counts as u16;
        }
    }
}

impl CountdownTimer for SimTimer {
    fn configure(&mut self, prescale: Prescale, mode: TimerMode) {
        self.config = Some((prescale, mode));
        self.prescaler = 0;
    }

    fn write_countdown(&mut self, value: u16) {
        let max = self.config.map_or(u16::MAX, |(_, mode)| mode.max_count());
        self.counter = value & max;
        // a counter write also clears the prescaler
        self.prescaler = 0;
        self.reloads += 1;
    }

    fn overflow_pending(&self) -> bool {
        self.overflow
    }

    fn clear_overflow(&mut self) {
        self.overflow = false;
    }
}

/* --------------------------- Harness -------------------------- */
/// Runs the counter loop and, for the second variant, services timer
/// overflows between iterations.
pub struct Harness {
    counter_loop: CounterLoop<SimPin>,
    overflow_handler: Option<TimerOverflowHandler<SimPin>>,
    timer: SimTimer,
    cycles_per_iteration: u32,
    iterations: u64,
}

impl Harness {
    /// First variant: busy loop only.
    pub fn counter_only(thresholds: Thresholds, cycles_per_iteration: u32) -> Self {
        Self {
            counter_loop: CounterLoop::new(SimPin::new(), thresholds),
            overflow_handler: None,
            timer: SimTimer::new(),
            cycles_per_iteration,
            iterations: 0,
        }
    }

    /// Second variant: busy loop plus timer overflow heartbeat.
    pub fn with_timer(thresholds: Thresholds, timer_config: TimerConfig, cycles_per_iteration: u32) -> Self {
        let mut timer = SimTimer::new();
        let handler = TimerOverflowHandler::new(SimPin::new(), timer_config.reload);
        handler.start(&mut timer, &timer_config);

        Self {
            counter_loop: CounterLoop::new(SimPin::new(), thresholds),
            overflow_handler: Some(handler),
            timer,
            cycles_per_iteration,
            iterations: 0,
        }
    }

    pub fn step(&mut self) -> Step {
        let step = self.counter_loop.poll();
        self.iterations += 1;

        self.timer.advance(self.cycles_per_iteration);
        if let Some(handler) = self.overflow_handler.as_mut() {
            if self.timer.overflow_pending() {
                handler.on_interrupt(&mut self.timer);
            }
        }

        step
    }

    pub fn run(&mut self, iterations: u32) {
        for _ in 0..iterations {
            self.step();
        }
    }

    pub fn counter_loop(&self) -> &CounterLoop<SimPin> {
        &self.counter_loop
    }

    pub fn overflow_handler(&self) -> Option<&TimerOverflowHandler<SimPin>> {
        self.overflow_handler.as_ref()
    }

    pub fn timer(&self) -> &SimTimer {
        &self.timer
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}
