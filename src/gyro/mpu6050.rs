//! MPU-6050 gyro over I2C

use embedded_hal::delay::DelayNs;

use super::GyroController;
use crate::Error;
use crate::interface::{Board, I2cConfig, RegisterBus};
use crate::math::int16;
use crate::pipeline::AxisSample;
use crate::registers::mpu6050::{ADDRESS_AD0_LOW, GYRO_XOUT_H, Mpu6050, SENSITIVITY_250DPS};

/// MPU-6050 gyroscope at ±250 dps
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mpu6050Gyro {
    address: u8,
    sensitivity: f64,
}

impl Mpu6050Gyro {
    /// Create the controller, defaulting to address 0x68 and 131 LSB/dps
    #[must_use]
    pub fn new(address: Option<u8>, sensitivity: Option<f64>) -> Self {
        Self {
            address: address.unwrap_or(ADDRESS_AD0_LOW),
            sensitivity: sensitivity.unwrap_or(SENSITIVITY_250DPS),
        }
    }

    /// I2C address
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }
}

impl<B: Board> GyroController<B> for Mpu6050Gyro {
    fn initialize<D: DelayNs>(
        &mut self,
        board: &mut B,
        _delay: &mut D,
    ) -> Result<(), Error<B::Error>> {
        board.i2c_config(I2cConfig {
            address: Some(self.address),
        })?;

        let mut device = Mpu6050::new(RegisterBus::new(board, self.address));

        // Wake up on the internal oscillator
        device.pwr_mgmt_1().write(|w| {
            w.set_sleep(false);
            w.set_clksel(0);
        })?;
        device.gyro_config().write(|w| {
            w.set_fs_sel(0);
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("MPU6050 gyro ready at {=u8:#x}", self.address);

        Ok(())
    }

    fn read(&mut self, board: &mut B) -> Result<Option<AxisSample>, Error<B::Error>> {
        let mut buffer = [0u8; 6];
        board.i2c_read_register(self.address, GYRO_XOUT_H, &mut buffer)?;

        Ok(Some(AxisSample::xyz(
            i32::from(int16(buffer[0], buffer[1])),
            i32::from(int16(buffer[2], buffer[3])),
            i32::from(int16(buffer[4], buffer[5])),
        )))
    }

    fn to_normal(&self, raw: i32) -> Option<f64> {
        Some(f64::from((raw >> 11) + 127))
    }

    fn to_degrees_per_second(&self, raw: i32, center: i32) -> Option<f64> {
        Some(f64::from(raw - center) / self.sensitivity)
    }
}
