//! SRF10 / SRF08 / SRF02 ranging IC over I2C
//!
//! Ranging runs as a cycle driven by [`read`](SonarController::read): a trigger
//! starts a measurement, the result is fetched once [`SETTLE_MS`] have elapsed and
//! the next measurement is triggered right away. A result whose re-trigger fails is
//! held and delivered by the next read that manages to trigger.
//! [`stop`](SonarController::stop) breaks the cycle until
//! [`resume`](SonarController::resume).

use super::SonarController;
use crate::Error;
use crate::interface::{Board, I2cConfig, RegisterBus};
use crate::math::int16;
use crate::registers::srf10::{
    ADDRESS, RANGE_MICROSECONDS, RESULT_HIGH, SETTLE_MS, STARTUP_GAIN, STARTUP_RANGE, Srf10,
};

/// Speed of sound, m/s
const SPEED_OF_SOUND: f64 = 343.2;

/// Ranging cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ranging {
    /// No measurement in flight
    Stopped,
    /// Measurement triggered at `triggered_at_ms`
    Settling {
        /// Timestamp of the trigger
        triggered_at_ms: u64,
    },
}

/// Devantech ranging IC reporting echo time in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Srf10Sonar {
    address: u8,
    ranging: Ranging,
    held: Option<i32>,
}

impl Srf10Sonar {
    /// Create the controller, defaulting to address 0x70
    #[must_use]
    pub fn new(address: Option<u8>) -> Self {
        Self {
            address: address.unwrap_or(ADDRESS),
            ranging: Ranging::Stopped,
            held: None,
        }
    }

    /// I2C address
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Current cycle phase
    #[must_use]
    pub const fn ranging(&self) -> Ranging {
        self.ranging
    }

    fn trigger<B: Board>(&mut self, board: &mut B, now_ms: u64) -> Result<(), Error<B::Error>> {
        Srf10::new(RegisterBus::new(board, self.address))
            .ranging_command()
            .write(|w| {
                w.set_command(RANGE_MICROSECONDS);
            })?;
        self.ranging = Ranging::Settling {
            triggered_at_ms: now_ms,
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("SRF10 {=u8:#x} triggered at {=u64} ms", self.address, now_ms);

        Ok(())
    }
}

impl<B: Board> SonarController<B> for Srf10Sonar {
    fn initialize(&mut self, board: &mut B, now_ms: u64) -> Result<(), Error<B::Error>> {
        board.i2c_config(I2cConfig {
            address: Some(self.address),
        })?;

        let mut device = Srf10::new(RegisterBus::new(board, self.address));
        device.gain().write(|w| {
            w.set_gain(STARTUP_GAIN);
        })?;
        device.max_range().write(|w| {
            w.set_range(STARTUP_RANGE);
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("SRF10 ready at {=u8:#x}", self.address);

        self.trigger(board, now_ms)
    }

    fn read(&mut self, board: &mut B, now_ms: u64) -> Result<Option<i32>, Error<B::Error>> {
        let Ranging::Settling { triggered_at_ms } = self.ranging else {
            return Ok(None);
        };
        if self.held.is_none() {
            if now_ms.saturating_sub(triggered_at_ms) < SETTLE_MS {
                return Ok(None);
            }

            board.i2c_write(self.address, &[RESULT_HIGH])?;
            let mut buffer = [0u8; 2];
            board.i2c_read_once(self.address, &mut buffer)?;
            self.held = Some(i32::from(int16(buffer[0], buffer[1])));
        }

        self.trigger(board, now_ms)?;
        Ok(self.held.take())
    }

    fn stop(&mut self) {
        self.ranging = Ranging::Stopped;
        self.held = None;
    }

    fn resume(&mut self, board: &mut B, now_ms: u64) -> Result<(), Error<B::Error>> {
        match self.ranging {
            Ranging::Stopped => self.trigger(board, now_ms),
            Ranging::Settling { .. } => Ok(()),
        }
    }

    fn to_cm(&self, raw: i32) -> Option<f64> {
        Some(((f64::from(raw) / 2.0) * SPEED_OF_SOUND / 10.0) / 1000.0)
    }
}
