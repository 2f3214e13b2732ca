#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod calibration;
pub mod event;
pub mod gyro;
pub mod interface;
pub mod math;
pub mod pipeline;
pub mod registers;
pub mod sonar;
pub mod ticker;

// Re-export main types
pub use calibration::{CalibrationState, Calibrator};
pub use event::{Event, Events};
pub use gyro::{
    BuiltinGyro, Gyro, GyroController, GyroKind, GyroOptions, Rate, Rotation, TK_1X, TK_4X,
};
pub use interface::{AnalogInput, Board, HalBoard, HalBoardError, I2cConfig, PinMode, RegisterBus};
pub use pipeline::{Axis, AxisSample, Channel, DEFAULT_SAMPLE_SIZE, WINDOW_SIZE};
pub use sonar::{BuiltinSonar, DistanceUnit, Sonar, SonarController, SonarKind, SonarOptions};
pub use ticker::Ticker;

/// Sensor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Transport error reported by the [`Board`]
    Bus(E),
    /// An analog gyro was configured without a sensitivity
    MissingSensitivity,
    /// An analog controller was configured without its required pins
    MissingPin,
    /// Invalid configuration parameter (zero sample size, zero frequency, too many pins)
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
