//! BNO055 absolute orientation sensor, gyroscope path only
//!
//! Register page 0. Output registers are little-endian; in dps units the gyro
//! LSB is 1/16 °/s.

/// I2C address with COM3 low (default)
pub const ADDRESS_COM3_LOW: u8 = 0x28;

/// First gyroscope output register (`GYR_DATA_X_LSB`)
pub const GYR_DATA_X_LSB: u8 = 0x14;

/// LSB per °/s in dps units
pub const SENSITIVITY_DPS: f64 = 16.0;

/// `OPR_MODE` value for configuration mode
pub const MODE_CONFIG: u8 = 0x00;
/// `OPR_MODE` value for gyroscope-only mode
pub const MODE_GYRO_ONLY: u8 = 0x03;

/// Switching out of config mode takes 7 ms
pub const CONFIG_TO_ANY_MS: u32 = 7;
/// Switching into config mode takes 19 ms
pub const ANY_TO_CONFIG_MS: u32 = 19;

device_driver::create_device!(
    device_name: Bno055,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// PAGE_ID (0x07)
        register PageId {
            const ADDRESS = 0x07;
            const SIZE_BITS = 8;

            /// Register map page
            page: uint = 0..8,
        },

        /// UNIT_SEL (0x3B) - output units
        register UnitSel {
            const ADDRESS = 0x3B;
            const SIZE_BITS = 8;

            /// Acceleration unit (0 = m/s², 1 = mg)
            acc_unit: bool = 0,
            /// Angular rate unit (0 = dps, 1 = rps)
            gyr_unit: bool = 1,
            /// Euler angle unit (0 = degrees, 1 = radians)
            eul_unit: bool = 2,
            reserved_3: uint = 3..4,
            /// Temperature unit (0 = °C, 1 = °F)
            temp_unit: bool = 4,
            reserved_6_5: uint = 5..7,
            /// Orientation convention (0 = Windows, 1 = Android)
            ori_android: bool = 7,
        },

        /// OPR_MODE (0x3D) - operation mode
        register OprMode {
            const ADDRESS = 0x3D;
            const SIZE_BITS = 8;

            /// Operation mode
            operation_mode: uint = 0..4,
            reserved_7_4: uint = 4..8,
        }
    }
);
