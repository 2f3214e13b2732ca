//! L3GD20H 3-axis gyroscope (Pololu breakout layout)
//!
//! SA0 is pulled high on the Pololu boards, giving 0x6B; 0x6A with SA0 low.
//! Output registers are little-endian (`BLE = 0`).

/// I2C address with SA0 high (default)
pub const ADDRESS_SA0_HIGH: u8 = 0x6B;
/// I2C address with SA0 low
pub const ADDRESS_SA0_LOW: u8 = 0x6A;

/// First output register (`OUT_X_L`)
pub const OUT_X_L: u8 = 0x28;
/// Sub-address auto-increment flag for multi-byte reads
pub const AUTO_INCREMENT: u8 = 1 << 7;

/// Sensitivity at ±245 dps full scale, in dps per LSB
pub const SENSITIVITY_245DPS: f64 = 8.75 / 1000.0;

device_driver::create_device!(
    device_name: L3gd20h,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// CTRL_REG1 (0x20) - data rate, bandwidth, power mode, axis enables
        register CtrlReg1 {
            const ADDRESS = 0x20;
            const SIZE_BITS = 8;

            /// X axis enable
            xen: bool = 0,
            /// Y axis enable
            yen: bool = 1,
            /// Z axis enable
            zen: bool = 2,
            /// Power mode (0 = power down, 1 = normal)
            pd: bool = 3,
            /// Bandwidth selection
            bw: uint = 4..6,
            /// Output data rate selection
            dr: uint = 6..8,
        },

        /// CTRL_REG4 (0x23) - block data update, endianness, full scale
        register CtrlReg4 {
            const ADDRESS = 0x23;
            const SIZE_BITS = 8;

            /// SPI mode (0 = 4 wire, 1 = 3 wire)
            sim: bool = 0,
            /// Self-test enable
            st: uint = 1..3,
            /// Level sensitive latch enable
            imp_en: bool = 3,
            /// Full scale (00 = 245 dps, 01 = 500 dps, 1x = 2000 dps)
            fs: uint = 4..6,
            /// Endianness (0 = LSB at lower address)
            ble: bool = 6,
            /// Block data update (0 = continuous)
            bdu: bool = 7,
        },

        /// LOW_ODR (0x39) - low speed output data rate
        register LowOdr {
            const ADDRESS = 0x39;
            const SIZE_BITS = 8;

            /// Low speed ODR enable
            low_odr: bool = 0,
            reserved_1: uint = 1..2,
            /// Software reset
            sw_res: bool = 2,
            /// I2C disable (SPI only)
            i2c_dis: bool = 3,
            reserved_4: uint = 4..5,
            /// DRDY/INT2 active level
            drdy_hl: bool = 5,
            reserved_7_6: uint = 6..8,
        }
    }
);
