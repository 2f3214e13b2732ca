//! Gyro controller registry

use embedded_hal::delay::DelayNs;

use super::GyroOptions;
use super::analog::AnalogGyro;
use super::bno055::Bno055Gyro;
use super::l3gd20h::L3gd20hGyro;
use super::mpu6050::Mpu6050Gyro;
use crate::Error;
use crate::interface::Board;
use crate::pipeline::AxisSample;

/// Acquisition and conversion bundle behind a [`Gyro`](super::Gyro)
///
/// Conversions returning `None` are "not provided": the gyro falls back to the
/// caller override or identity.
pub trait GyroController<B: Board> {
    /// Configure the transport and the part
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transport fails.
    fn initialize<D: DelayNs>(&mut self, board: &mut B, delay: &mut D)
    -> Result<(), Error<B::Error>>;

    /// Acquire one raw sample batch, `None` if nothing is available
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transport fails.
    fn read(&mut self, board: &mut B) -> Result<Option<AxisSample>, Error<B::Error>>;

    /// Normalized axis value of a smoothed raw value
    fn to_normal(&self, raw: i32) -> Option<f64> {
        let _ = raw;
        None
    }

    /// Angular rate of a smoothed raw value against its zero reference
    fn to_degrees_per_second(&self, raw: i32, center: i32) -> Option<f64> {
        let _ = (raw, center);
        None
    }
}

/// Built-in gyro controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroKind {
    /// Analog rate gyro on one pin per axis
    #[default]
    Analog,
    /// InvenSense MPU-6050 over I2C
    Mpu6050,
    /// Bosch BNO055 over I2C
    Bno055,
    /// ST L3GD20H over I2C
    L3gd20h,
}

const NAMES: [(&str, GyroKind); 5] = [
    ("ANALOG", GyroKind::Analog),
    ("MPU6050", GyroKind::Mpu6050),
    ("MPU-6050", GyroKind::Mpu6050),
    ("BNO055", GyroKind::Bno055),
    ("L3GD20H", GyroKind::L3gd20h),
];

impl GyroKind {
    /// Look up a controller by name or alias, ignoring case
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|&(_, kind)| kind)
    }

    /// Resolve an optional name, falling back to [`GyroKind::Analog`]
    #[must_use]
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            None => Self::default(),
            Some(name) => Self::from_name(name).unwrap_or_else(|| {
                #[cfg(feature = "defmt")]
                defmt::debug!("Unknown gyro controller {=str}, using ANALOG", name);
                Self::default()
            }),
        }
    }

    /// Canonical name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Analog => "ANALOG",
            Self::Mpu6050 => "MPU6050",
            Self::Bno055 => "BNO055",
            Self::L3gd20h => "L3GD20H",
        }
    }
}

/// Any built-in controller, selected by name at runtime
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuiltinGyro {
    /// See [`AnalogGyro`]
    Analog(AnalogGyro),
    /// See [`Mpu6050Gyro`]
    Mpu6050(Mpu6050Gyro),
    /// See [`Bno055Gyro`]
    Bno055(Bno055Gyro),
    /// See [`L3gd20hGyro`]
    L3gd20h(L3gd20hGyro),
}

impl BuiltinGyro {
    /// Build the controller named by `options.controller`
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSensitivity`] for an analog gyro without sensitivity
    /// - [`Error::MissingPin`] / [`Error::InvalidConfig`] for an analog pin list
    ///   shorter than x and y or longer than three
    pub fn from_options<E>(options: &GyroOptions<'_>) -> Result<Self, Error<E>> {
        let controller = match GyroKind::resolve(options.controller) {
            GyroKind::Analog => Self::Analog(AnalogGyro::new::<E>(
                options.pins,
                options.sensitivity.ok_or(Error::<E>::MissingSensitivity)?,
                options.resolution,
            )?),
            GyroKind::Mpu6050 => Self::Mpu6050(Mpu6050Gyro::new(
                options.address,
                options.sensitivity,
            )),
            GyroKind::Bno055 => Self::Bno055(Bno055Gyro::new(options.address)),
            GyroKind::L3gd20h => Self::L3gd20h(L3gd20hGyro::new(options.address)),
        };
        Ok(controller)
    }

    /// Which built-in controller this is
    #[must_use]
    pub const fn kind(&self) -> GyroKind {
        match self {
            Self::Analog(_) => GyroKind::Analog,
            Self::Mpu6050(_) => GyroKind::Mpu6050,
            Self::Bno055(_) => GyroKind::Bno055,
            Self::L3gd20h(_) => GyroKind::L3gd20h,
        }
    }
}

impl<B: Board> GyroController<B> for BuiltinGyro {
    fn initialize<D: DelayNs>(
        &mut self,
        board: &mut B,
        delay: &mut D,
    ) -> Result<(), Error<B::Error>> {
        match self {
            Self::Analog(c) => c.initialize(board, delay),
            Self::Mpu6050(c) => c.initialize(board, delay),
            Self::Bno055(c) => c.initialize(board, delay),
            Self::L3gd20h(c) => c.initialize(board, delay),
        }
    }

    fn read(&mut self, board: &mut B) -> Result<Option<AxisSample>, Error<B::Error>> {
        match self {
            Self::Analog(c) => c.read(board),
            Self::Mpu6050(c) => c.read(board),
            Self::Bno055(c) => c.read(board),
            Self::L3gd20h(c) => c.read(board),
        }
    }

    fn to_normal(&self, raw: i32) -> Option<f64> {
        match self {
            Self::Analog(c) => GyroController::<B>::to_normal(c, raw),
            Self::Mpu6050(c) => GyroController::<B>::to_normal(c, raw),
            Self::Bno055(c) => GyroController::<B>::to_normal(c, raw),
            Self::L3gd20h(c) => GyroController::<B>::to_normal(c, raw),
        }
    }

    fn to_degrees_per_second(&self, raw: i32, center: i32) -> Option<f64> {
        match self {
            Self::Analog(c) => GyroController::<B>::to_degrees_per_second(c, raw, center),
            Self::Mpu6050(c) => GyroController::<B>::to_degrees_per_second(c, raw, center),
            Self::Bno055(c) => GyroController::<B>::to_degrees_per_second(c, raw, center),
            Self::L3gd20h(c) => GyroController::<B>::to_degrees_per_second(c, raw, center),
        }
    }
}
