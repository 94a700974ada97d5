/*
*  Default Heartbeat Config
*
*  - Core clock 16 MHz internal oscillator with PLL x4 = 64 MHz
*  - Instruction clock = core clock / 4
*  - Timer0: 16-bit, internal instruction clock, prescale 1:256, reload 0xF000
*/

use core::fmt;

use crate::hal::Level;
use crate::hal::Prescale;
use crate::hal::TimerMode;
use crate::counter::Phase;

/* --------------------------- Clock -------------------------- */
pub const MCU_FREQ: u32 = 64_000_000;
pub const INSTRUCTION_CLOCK_HZ: u32 = MCU_FREQ / 4;

/* --------------------------- Counter Loop Thresholds -------------------------- */
pub const T_ON: u32 = 0x17FF;
pub const T_OFF: u32 = 0x8FFF;
pub const T_RESET: u32 = 0x4FFFF;

pub const DEFAULT_THRESHOLDS: Thresholds = Thresholds {
    on: T_ON,
    off: T_OFF,
    reset: T_RESET,
};

/* --------------------------- Timer0 -------------------------- */
pub const TIMER0_DEF_VALUE: u16 = 0xF000;
pub const TIMER0_PRESCALE: Prescale = Prescale::Div256;
pub const TIMER0_MODE: TimerMode = TimerMode::SixteenBit;

pub const DEFAULT_TIMER0_CONFIG: TimerConfig = TimerConfig {
    prescale: TIMER0_PRESCALE,
    mode: TIMER0_MODE,
    reload: TIMER0_DEF_VALUE,
};

/* --------------------------- Errors -------------------------- */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    OnNotBeforeOff { on: u32, off: u32 },
    OffNotBeforeReset { off: u32, reset: u32 },
    ResetAtCounterLimit { reset: u32 },
    ReloadOutOfRange { reload: u16, max: u16 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OnNotBeforeOff { on, off } => {
                write!(f, "on threshold {:#x} must be below off threshold {:#x}", on, off)
            }
            ConfigError::OffNotBeforeReset { off, reset } => {
                write!(f, "off threshold {:#x} must be below reset threshold {:#x}", off, reset)
            }
            ConfigError::ResetAtCounterLimit { reset } => {
                write!(f, "reset threshold {:#x} leaves no room for a full cycle count", reset)
            }
            ConfigError::ReloadOutOfRange { reload, max } => {
                write!(f, "reload value {:#x} exceeds timer maximum {:#x}", reload, max)
            }
        }
    }
}

/* --------------------------- Thresholds -------------------------- */
/// The three literal tick values of the counter loop, ordered `on < off < reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    on: u32,
    off: u32,
    reset: u32,
}

impl Thresholds {
    pub const fn new(on: u32, off: u32, reset: u32) -> Result<Self, ConfigError> {
        if on >= off {
            return Err(ConfigError::OnNotBeforeOff { on, off });
        }
        if off >= reset {
            return Err(ConfigError::OffNotBeforeReset { off, reset });
        }
        // the cycle length is reset + 1 iterations
        if reset == u32::MAX {
            return Err(ConfigError::ResetAtCounterLimit { reset });
        }
        Ok(Self { on, off, reset })
    }

    pub const fn on(&self) -> u32 {
        self.on
    }

    pub const fn off(&self) -> u32 {
        self.off
    }

    pub const fn reset(&self) -> u32 {
        self.reset
    }

    pub fn phase_of(&self, tick: u32) -> Phase {
        if tick < self.on {
            Phase::BelowOn
        } else if tick == self.on {
            Phase::AtOn
        } else if tick < self.off {
            Phase::Between
        } else if tick == self.off {
            Phase::AtOff
        } else if tick < self.reset {
            Phase::AfterOff
        } else {
            Phase::AtReset
        }
    }

    /// Iterations in one full cycle, the reset iteration included.
    pub const fn period_ticks(&self) -> u32 {
        self.reset + 1
    }

    pub const fn high_ticks(&self) -> u32 {
        self.off - self.on
    }

    pub fn duty_cycle(&self) -> f32 {
        self.high_ticks() as f32 / self.period_ticks() as f32
    }

    /// Steady-state pin level right after the iteration that observed `tick`.
    pub fn level_after(&self, tick: u32) -> Level {
        Level::from(tick >= self.on && tick < self.off)
    }

    /// Blink period of the busy-wait loop for a given loop body cost.
    /// `None` for a zero clock or a period that does not fit in `u64` nanoseconds.
    pub fn busy_loop_period_ns(&self, cycles_per_iteration: u32, instruction_hz: u32) -> Option<u64> {
        cycles_to_ns(self.period_ticks() as u64 * cycles_per_iteration as u64, instruction_hz)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        DEFAULT_THRESHOLDS
    }
}

/* --------------------------- Timer Config -------------------------- */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    pub prescale: Prescale,
    pub mode: TimerMode,
    pub reload: u16,
}

impl TimerConfig {
    pub const fn new(prescale: Prescale, mode: TimerMode, reload: u16) -> Result<Self, ConfigError> {
        let max = mode.max_count();
        if reload > max {
            return Err(ConfigError::ReloadOutOfRange { reload, max });
        }
        Ok(Self { prescale, mode, reload })
    }

    /// Counter increments from `reload` to the wrap.
    pub const fn counts_per_overflow(&self) -> u32 {
        self.mode.wrap() - self.reload as u32
    }

    pub const fn cycles_per_overflow(&self) -> u32 {
        self.counts_per_overflow() * self.prescale.divisor()
    }

    /// `None` for a zero clock.
    pub fn overflow_period_ns(&self, instruction_hz: u32) -> Option<u64> {
        cycles_to_ns(self.cycles_per_overflow() as u64, instruction_hz)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        DEFAULT_TIMER0_CONFIG
    }
}

fn cycles_to_ns(cycles: u64, hz: u32) -> Option<u64> {
    cycles.checked_mul(1_000_000_000)?.checked_div(hz as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Thresholds::new(T_ON, T_OFF, T_RESET), Ok(DEFAULT_THRESHOLDS));
        assert_eq!(
            TimerConfig::new(TIMER0_PRESCALE, TIMER0_MODE, TIMER0_DEF_VALUE),
            Ok(DEFAULT_TIMER0_CONFIG)
        );
    }

    #[test]
    fn rejects_unordered_thresholds() {
        assert_eq!(
            Thresholds::new(10, 10, 20),
            Err(ConfigError::OnNotBeforeOff { on: 10, off: 10 })
        );
        assert_eq!(
            Thresholds::new(1, 30, 20),
            Err(ConfigError::OffNotBeforeReset { off: 30, reset: 20 })
        );
    }

    #[test]
    fn rejects_reload_wider_than_timer() {
        assert_eq!(
            TimerConfig::new(Prescale::Div1, TimerMode::EightBit, 0x100),
            Err(ConfigError::ReloadOutOfRange { reload: 0x100, max: 0xFF })
        );
    }

    #[test]
    fn error_message() {
        let err = Thresholds::new(5, 2, 9).unwrap_err();
        assert_eq!(err.to_string(), "on threshold 0x5 must be below off threshold 0x2");
    }

    #[test]
    fn phases_cover_every_region() {
        let t = Thresholds::new(2, 5, 8).unwrap();
        let phases: Vec<Phase> = (0..=8).map(|tick| t.phase_of(tick)).collect();
        assert_eq!(
            phases,
            [
                Phase::BelowOn,
                Phase::BelowOn,
                Phase::AtOn,
                Phase::Between,
                Phase::Between,
                Phase::AtOff,
                Phase::AfterOff,
                Phase::AfterOff,
                Phase::AtReset,
            ]
        );
    }

    #[test]
    fn duty_cycle_from_literals() {
        let t = DEFAULT_THRESHOLDS;
        assert_eq!(t.period_ticks(), 0x50000);
        assert_eq!(t.high_ticks(), 0x7800);
        assert!((t.duty_cycle() - 0x7800 as f32 / 0x50000 as f32).abs() < f32::EPSILON);
    }

    #[test]
    fn timer0_overflow_period() {
        let cfg = DEFAULT_TIMER0_CONFIG;
        assert_eq!(cfg.counts_per_overflow(), 0x1000);
        assert_eq!(cfg.cycles_per_overflow(), 0x1000 * 256);
        // 1_048_576 cycles at 16 MHz
        assert_eq!(cfg.overflow_period_ns(INSTRUCTION_CLOCK_HZ), Some(65_536_000));
    }

    #[test]
    fn busy_loop_period_scales_with_body_cost() {
        let t = Thresholds::new(1, 2, 9).unwrap();
        assert_eq!(t.busy_loop_period_ns(4, 1_000_000), Some(40_000));
    }

    #[test]
    fn zero_clock_has_no_period() {
        assert_eq!(DEFAULT_TIMER0_CONFIG.overflow_period_ns(0), None);
        assert_eq!(DEFAULT_THRESHOLDS.busy_loop_period_ns(4, 0), None);
    }

    #[test]
    fn huge_loop_body_has_no_period() {
        let t = Thresholds::new(0, 1, u32::MAX - 1).unwrap();
        assert_eq!(t.busy_loop_period_ns(u32::MAX, 1), None);
    }

    #[test]
    fn rejects_reset_at_counter_limit() {
        assert_eq!(
            Thresholds::new(0, 1, u32::MAX),
            Err(ConfigError::ResetAtCounterLimit { reset: u32::MAX })
        );

        let widest = Thresholds::new(0, 1, u32::MAX - 1).unwrap();
        assert_eq!(widest.period_ticks(), u32::MAX);
        assert!(widest.duty_cycle() > 0.0);
    }
}
