//! L3GD20H gyro over I2C

use embedded_hal::delay::DelayNs;

use super::GyroController;
use crate::Error;
use crate::interface::{Board, I2cConfig, RegisterBus};
use crate::math::int16_le;
use crate::pipeline::AxisSample;
use crate::registers::l3gd20h::{
    ADDRESS_SA0_HIGH, AUTO_INCREMENT, L3gd20h, OUT_X_L, SENSITIVITY_245DPS,
};

/// L3GD20H gyroscope at ±245 dps, 200 Hz output data rate
///
/// Provides no `to_normal`; normalized axis values fall back to the caller override
/// or the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct L3gd20hGyro {
    address: u8,
}

impl L3gd20hGyro {
    /// Create the controller, defaulting to address 0x6B
    #[must_use]
    pub fn new(address: Option<u8>) -> Self {
        Self {
            address: address.unwrap_or(ADDRESS_SA0_HIGH),
        }
    }

    /// I2C address
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }
}

impl<B: Board> GyroController<B> for L3gd20hGyro {
    fn initialize<D: DelayNs>(
        &mut self,
        board: &mut B,
        _delay: &mut D,
    ) -> Result<(), Error<B::Error>> {
        board.i2c_config(I2cConfig {
            address: Some(self.address),
        })?;

        let mut device = L3gd20h::new(RegisterBus::new(board, self.address));

        device.low_odr().write(|w| {
            w.set_low_odr(false);
        })?;
        // ±245 dps, continuous update, little-endian
        device.ctrl_reg_4().write(|w| {
            w.set_fs(0);
        })?;
        // 0x6F: 200 Hz ODR, 50 Hz bandwidth, normal mode, all axes
        device.ctrl_reg_1().write(|w| {
            w.set_dr(0b01);
            w.set_bw(0b10);
            w.set_pd(true);
            w.set_zen(true);
            w.set_yen(true);
            w.set_xen(true);
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("L3GD20H gyro ready at {=u8:#x}", self.address);

        Ok(())
    }

    fn read(&mut self, board: &mut B) -> Result<Option<AxisSample>, Error<B::Error>> {
        let mut buffer = [0u8; 6];
        board.i2c_read_register(self.address, OUT_X_L | AUTO_INCREMENT, &mut buffer)?;

        Ok(Some(AxisSample::xyz(
            i32::from(int16_le(buffer[0], buffer[1])),
            i32::from(int16_le(buffer[2], buffer[3])),
            i32::from(int16_le(buffer[4], buffer[5])),
        )))
    }

    fn to_degrees_per_second(&self, raw: i32, _center: i32) -> Option<f64> {
        Some(f64::from(raw) * SENSITIVITY_245DPS)
    }
}
