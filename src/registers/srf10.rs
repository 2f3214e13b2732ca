//! SRF10 ultrasonic range finder (register compatible with SRF02 and SRF08)
//!
//! Writing a ranging command to register 0 starts a measurement; the result is
//! available from registers 2-3 (big-endian) once the ranging time has elapsed.

/// Default I2C address (0xE0 in 8-bit notation)
pub const ADDRESS: u8 = 0x70;

/// Ranging command: result in microseconds
pub const RANGE_MICROSECONDS: u8 = 0x52;

/// First result register
pub const RESULT_HIGH: u8 = 0x02;

/// Time from ranging command to valid result
pub const SETTLE_MS: u64 = 65;

/// Default analog gain setting written at startup
pub const STARTUP_GAIN: u8 = 16;
/// Default range register value written at startup
pub const STARTUP_RANGE: u8 = 255;

device_driver::create_device!(
    device_name: Srf10,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// Command register (0x00, write)
        register RangingCommand {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Ranging or address-change command
            command: uint = 0..8,
        },

        /// Max gain register (0x01, write)
        register Gain {
            const ADDRESS = 0x01;
            const SIZE_BITS = 8;

            /// Analog gain limit
            gain: uint = 0..8,
        },

        /// Range register (0x02, write)
        register MaxRange {
            const ADDRESS = 0x02;
            const SIZE_BITS = 8;

            /// Ranging distance limit, 43 mm per step
            range: uint = 0..8,
        }
    }
);
