/*
    Hardware Abstraction
*/

use core::convert::Infallible;
use core::ops::Not;
use embedded_hal_1::digital::OutputPin;
use embedded_hal_1::digital::PinState;

/* --------------------------- Pin Level -------------------------- */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

/// Writes `level` to a pin whose writes cannot fail.
pub fn drive<P>(pin: &mut P, level: Level)
where
    P: OutputPin<Error = Infallible>,
{
    pin.set_state(level.into()).unwrap_or_else(|e| match e {})
}

/* --------------------------- Timer Peripheral -------------------------- */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescale {
    Div1,
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
    Div256,
}

impl Prescale {
    pub const fn divisor(self) -> u32 {
        match self {
            Prescale::Div1 => 1,
            Prescale::Div2 => 2,
            Prescale::Div4 => 4,
            Prescale::Div8 => 8,
            Prescale::Div16 => 16,
            Prescale::Div32 => 32,
            Prescale::Div64 => 64,
            Prescale::Div128 => 128,
            Prescale::Div256 => 256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerMode {
    EightBit,
    SixteenBit,
}

impl TimerMode {
    /// Number of counts between two overflows when counting from zero.
    pub const fn wrap(self) -> u32 {
        match self {
            TimerMode::EightBit => 0x100,
            TimerMode::SixteenBit => 0x1_0000,
        }
    }

    pub const fn max_count(self) -> u16 {
        (self.wrap() - 1) as u16
    }
}

/// Up-counting timer that raises an overflow flag on wrap and does not reload itself.
///
/// Contract: `configure` once, then on every overflow `clear_overflow` and
/// `write_countdown` again.
pub trait CountdownTimer {
    fn configure(&mut self, prescale: Prescale, mode: TimerMode);
    fn write_countdown(&mut self, value: u16);
    fn overflow_pending(&self) -> bool;
    fn clear_overflow(&mut self);
}
