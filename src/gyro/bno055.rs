//! BNO055 gyro over I2C, in gyro-only fusion mode

use embedded_hal::delay::DelayNs;

use super::GyroController;
use crate::Error;
use crate::interface::{Board, I2cConfig, RegisterBus};
use crate::math::int16_le;
use crate::pipeline::AxisSample;
use crate::registers::bno055::{
    ADDRESS_COM3_LOW, ANY_TO_CONFIG_MS, Bno055, CONFIG_TO_ANY_MS, GYR_DATA_X_LSB,
    MODE_CONFIG, MODE_GYRO_ONLY, SENSITIVITY_DPS,
};

/// BNO055 gyroscope reporting degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bno055Gyro {
    address: u8,
}

impl Bno055Gyro {
    /// Create the controller, defaulting to address 0x28
    #[must_use]
    pub fn new(address: Option<u8>) -> Self {
        Self {
            address: address.unwrap_or(ADDRESS_COM3_LOW),
        }
    }

    /// I2C address
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }
}

impl<B: Board> GyroController<B> for Bno055Gyro {
    fn initialize<D: DelayNs>(
        &mut self,
        board: &mut B,
        delay: &mut D,
    ) -> Result<(), Error<B::Error>> {
        board.i2c_config(I2cConfig {
            address: Some(self.address),
        })?;

        let mut device = Bno055::new(RegisterBus::new(board, self.address));

        device.page_id().write(|w| {
            w.set_page(0);
        })?;

        // Units can only change in CONFIG mode
        device.opr_mode().write(|w| {
            w.set_operation_mode(MODE_CONFIG);
        })?;
        delay.delay_ms(ANY_TO_CONFIG_MS);

        device.unit_sel().write(|w| {
            w.set_gyr_unit(false);
        })?;

        device.opr_mode().write(|w| {
            w.set_operation_mode(MODE_GYRO_ONLY);
        })?;
        delay.delay_ms(CONFIG_TO_ANY_MS);

        #[cfg(feature = "defmt")]
        defmt::debug!("BNO055 gyro ready at {=u8:#x}", self.address);

        Ok(())
    }

    fn read(&mut self, board: &mut B) -> Result<Option<AxisSample>, Error<B::Error>> {
        let mut buffer = [0u8; 6];
        board.i2c_read_register(self.address, GYR_DATA_X_LSB, &mut buffer)?;

        Ok(Some(AxisSample::xyz(
            i32::from(int16_le(buffer[0], buffer[1])),
            i32::from(int16_le(buffer[2], buffer[3])),
            i32::from(int16_le(buffer[4], buffer[5])),
        )))
    }

    fn to_normal(&self, raw: i32) -> Option<f64> {
        Some(f64::from(raw))
    }

    fn to_degrees_per_second(&self, raw: i32, _center: i32) -> Option<f64> {
        Some(f64::from(raw) / SENSITIVITY_DPS)
    }
}
