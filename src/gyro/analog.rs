//! Analog rate gyro, one ADC pin per axis

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use super::GyroController;
use crate::Error;
use crate::interface::{Board, PinMode};
use crate::math::truncate;
use crate::pipeline::{Axis, AxisSample};

/// Millivolts per ADC count of a 5 V, 10-bit converter
pub const DEFAULT_RESOLUTION: f64 = 4.88;

/// Analog rate gyro (LPR5150AL, LPY503AL and similar)
///
/// Pins map to axes in order: x, y and optionally z.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogGyro {
    pins: Vec<u8, 3>,
    sensitivity: f64,
    resolution: f64,
}

impl AnalogGyro {
    /// Create the controller
    ///
    /// `sensitivity` is in mV per degree per second, `resolution` in mV per ADC count
    /// (defaults to [`DEFAULT_RESOLUTION`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPin`] unless both the x and y pins are given and
    /// [`Error::InvalidConfig`] for more than three pins.
    pub fn new<E>(
        pins: &[u8],
        sensitivity: f64,
        resolution: Option<f64>,
    ) -> Result<Self, Error<E>> {
        if pins.len() < 2 {
            return Err(Error::MissingPin);
        }
        let pins = Vec::from_slice(pins).map_err(|()| Error::<E>::InvalidConfig)?;

        Ok(Self {
            pins,
            sensitivity,
            resolution: resolution.unwrap_or(DEFAULT_RESOLUTION),
        })
    }

    /// Pins in axis order
    #[must_use]
    pub fn pins(&self) -> &[u8] {
        &self.pins
    }

    /// Degrees per second per normalized count
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.resolution / self.sensitivity
    }

    const fn normalize(raw: i32) -> i32 {
        raw >> 2
    }
}

impl<B: Board> GyroController<B> for AnalogGyro {
    fn initialize<D: DelayNs>(
        &mut self,
        board: &mut B,
        _delay: &mut D,
    ) -> Result<(), Error<B::Error>> {
        for &pin in &self.pins {
            board.pin_mode(pin, PinMode::Analog)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Analog gyro on {} pins", self.pins.len());

        Ok(())
    }

    fn read(&mut self, board: &mut B) -> Result<Option<AxisSample>, Error<B::Error>> {
        let mut sample = AxisSample::default();
        for (index, &pin) in self.pins.iter().enumerate() {
            if let Some(axis) = Axis::from_index(index) {
                sample.set(axis, i32::from(board.analog_read(pin)?));
            }
        }
        Ok(Some(sample))
    }

    fn to_normal(&self, raw: i32) -> Option<f64> {
        Some(f64::from(Self::normalize(raw)))
    }

    fn to_degrees_per_second(&self, raw: i32, center: i32) -> Option<f64> {
        let delta = Self::normalize(raw) - Self::normalize(center);
        Some(f64::from(truncate(f64::from(delta) * self.scale())))
    }
}
