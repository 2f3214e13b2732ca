//! MPU-6050 6-axis IMU, gyroscope registers only
//!
//! Default full scale is ±250 dps at 131 LSB/(°/s). Output registers are big-endian.

/// I2C address with AD0 low (default)
pub const ADDRESS_AD0_LOW: u8 = 0x68;

/// First gyroscope output register (`GYRO_XOUT_H`)
pub const GYRO_XOUT_H: u8 = 0x43;

/// Sensitivity at ±250 dps, in LSB/(°/s)
pub const SENSITIVITY_250DPS: f64 = 131.0;

device_driver::create_device!(
    device_name: Mpu6050,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// GYRO_CONFIG (0x1B) - full scale range and self-test
        register GyroConfig {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full scale select (0 = ±250 dps ... 3 = ±2000 dps)
            fs_sel: uint = 3..5,
            /// Z axis self-test
            zg_st: bool = 5,
            /// Y axis self-test
            yg_st: bool = 6,
            /// X axis self-test
            xg_st: bool = 7,
        },

        /// PWR_MGMT_1 (0x6B) - clock source and sleep
        register PwrMgmt1 {
            const ADDRESS = 0x6B;
            const SIZE_BITS = 8;

            /// Clock source (0 = internal 8 MHz)
            clksel: uint = 0..3,
            /// Temperature sensor disable
            temp_dis: bool = 3,
            reserved_4: uint = 4..5,
            /// Cycle between sleep and single samples
            cycle: bool = 5,
            /// Sleep mode
            sleep: bool = 6,
            /// Device reset
            device_reset: bool = 7,
        }
    }
);
