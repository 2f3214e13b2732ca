//! Analog range finder

use super::SonarController;
use crate::Error;
use crate::interface::{Board, PinMode};
use crate::math::round_half_up;

/// Range finder with an analog voltage output, one ADC pin
///
/// Readings are scaled `Vcc/512` per inch on a 10-bit converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogSonar {
    pin: u8,
}

impl AnalogSonar {
    /// Create the controller
    #[must_use]
    pub const fn new(pin: u8) -> Self {
        Self { pin }
    }

    /// ADC pin
    #[must_use]
    pub const fn pin(&self) -> u8 {
        self.pin
    }
}

impl<B: Board> SonarController<B> for AnalogSonar {
    fn initialize(&mut self, board: &mut B, _now_ms: u64) -> Result<(), Error<B::Error>> {
        board.pin_mode(self.pin, PinMode::Analog)?;
        Ok(())
    }

    fn read(&mut self, board: &mut B, _now_ms: u64) -> Result<Option<i32>, Error<B::Error>> {
        Ok(Some(i32::from(board.analog_read(self.pin)?)))
    }

    fn to_cm(&self, raw: i32) -> Option<f64> {
        Some(round_half_up(f64::from(raw) / 2.0) * 2.54)
    }
}
