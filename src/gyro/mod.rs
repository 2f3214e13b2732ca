//! Rate gyroscope
//!
//! A [`Gyro`] owns its [`Board`] and a [`GyroController`]. Each
//! [`update`](Gyro::update) acquires one raw batch, runs it through the per-axis
//! rolling average and the startup [`Calibrator`], integrates angles once
//! calibrated and returns the [`Events`] the batch produced. Readings are computed
//! on demand from the pipeline state.
//!
//! # Example
//!
//! ```ignore
//! let mut gyro = Gyro::new(board, &mut delay, GyroOptions {
//!     controller: Some("MPU6050"),
//!     ..Default::default()
//! })?;
//!
//! while !gyro.update()?.data() {}
//! let yaw = gyro.yaw();
//! ```

mod analog;
mod bno055;
mod controller;
mod l3gd20h;
mod mpu6050;

use embedded_hal::delay::DelayNs;

pub use analog::{AnalogGyro, DEFAULT_RESOLUTION};
pub use bno055::Bno055Gyro;
pub use controller::{BuiltinGyro, GyroController, GyroKind};
pub use l3gd20h::L3gd20hGyro;
pub use mpu6050::Mpu6050Gyro;

use crate::Error;
use crate::calibration::Calibrator;
use crate::event::{Event, Events};
use crate::interface::Board;
use crate::math::to_precision;
use crate::pipeline::{Axis, AxisSample, Channel, DEFAULT_SAMPLE_SIZE};

/// Sensitivity of 4x-amplified Tinkerkit gyro outputs, mV/dps
pub const TK_4X: f64 = 0.67;
/// Sensitivity of 1x Tinkerkit gyro outputs, mV/dps
pub const TK_1X: f64 = 0.167;

/// Gyro options
///
/// Build with struct update syntax over [`Default`].
#[derive(Debug, Clone, Copy)]
pub struct GyroOptions<'a> {
    /// Controller name or alias, case-insensitive; `None` or unknown selects `ANALOG`
    pub controller: Option<&'a str>,
    /// Analog pins in x, y, z order
    pub pins: &'a [u8],
    /// mV/dps for analog parts, LSB/dps for the MPU-6050
    pub sensitivity: Option<f64>,
    /// mV per ADC count for analog parts
    pub resolution: Option<f64>,
    /// I2C address override
    pub address: Option<u8>,
    /// Startup samples collected per axis before calibrating
    pub sample_size: u16,
    /// Normalized value override, takes precedence over the controller
    pub to_normal: Option<fn(i32) -> f64>,
    /// Rate override `(raw, center)`, takes precedence over the controller
    pub to_degrees_per_second: Option<fn(i32, i32) -> f64>,
}

impl Default for GyroOptions<'_> {
    fn default() -> Self {
        Self {
            controller: None,
            pins: &[],
            sensitivity: None,
            resolution: None,
            address: None,
            sample_size: DEFAULT_SAMPLE_SIZE,
            to_normal: None,
            to_degrees_per_second: None,
        }
    }
}

/// Angular rate per axis in degrees per second, 2 significant digits
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rate {
    /// X axis rate
    pub x: f64,
    /// Y axis rate
    pub y: f64,
    /// Z axis rate, `None` on 2-axis parts
    pub z: Option<f64>,
}

/// Rate and integrated angle about one axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rotation {
    /// Degrees per second
    pub rate: f64,
    /// Integrated angle, `None` when the axis is absent
    pub angle: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
struct AxisState {
    channel: Channel,
    center: i32,
    angle: f64,
}

/// Rate gyroscope over any [`GyroController`]
pub struct Gyro<B, C = BuiltinGyro> {
    board: B,
    controller: C,
    axes: [AxisState; 3],
    calibrator: Calibrator,
    to_normal: Option<fn(i32) -> f64>,
    to_degrees_per_second: Option<fn(i32, i32) -> f64>,
}

impl<B: Board> Gyro<B, BuiltinGyro> {
    /// Create a gyro with the built-in controller named in `options`
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSensitivity`] for an analog gyro without sensitivity
    /// - [`Error::MissingPin`] for an analog gyro without both x and y pins
    /// - [`Error::InvalidConfig`] for a zero sample size or more than three pins
    /// - [`Error::Bus`] if controller initialization fails
    pub fn new<D: DelayNs>(
        board: B,
        delay: &mut D,
        options: GyroOptions<'_>,
    ) -> Result<Self, Error<B::Error>> {
        let controller = BuiltinGyro::from_options::<B::Error>(&options)?;
        Self::with_controller(board, delay, controller, options)
    }
}

impl<B: Board, C: GyroController<B>> Gyro<B, C> {
    /// Create a gyro around a custom controller
    ///
    /// Only `sample_size` and the conversion overrides of `options` apply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero sample size and [`Error::Bus`] if
    /// controller initialization fails.
    pub fn with_controller<D: DelayNs>(
        mut board: B,
        delay: &mut D,
        mut controller: C,
        options: GyroOptions<'_>,
    ) -> Result<Self, Error<B::Error>> {
        if options.sample_size == 0 {
            return Err(Error::InvalidConfig);
        }

        controller.initialize(&mut board, delay)?;

        Ok(Self {
            board,
            controller,
            axes: [AxisState::default(); 3],
            calibrator: Calibrator::new(options.sample_size),
            to_normal: options.to_normal,
            to_degrees_per_second: options.to_degrees_per_second,
        })
    }

    /// Acquire one batch from the controller and process it
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails; the pipeline is left untouched.
    pub fn update(&mut self) -> Result<Events, Error<B::Error>> {
        match self.controller.read(&mut self.board)? {
            Some(sample) => Ok(self.handle_sample(sample)),
            None => Ok(Events::NONE),
        }
    }

    /// Process a raw batch delivered outside [`update`](Self::update)
    ///
    /// Axes missing from `sample` keep their state.
    pub fn handle_sample(&mut self, sample: AxisSample) -> Events {
        let mut changed = false;
        for (axis, raw) in sample.iter() {
            changed |= self.axes[axis.index()].channel.push(raw);
            self.calibrator.accept(axis, raw);
        }

        if let Some(centers) = self.calibrator.resolve(self.has_z()) {
            for (state, center) in self.axes.iter_mut().zip(centers) {
                state.center = center;
            }
        }

        if !self.calibrator.is_calibrated() {
            return Events::NONE;
        }

        let rate = self.rate();
        self.axes[Axis::X.index()].angle += rate.x / 100.0;
        self.axes[Axis::Y.index()].angle += rate.y / 100.0;
        self.axes[Axis::Z.index()].angle += rate.z.unwrap_or(0.0) / 100.0;

        let mut events = Events::from(Event::Data);
        if changed {
            events.insert(Event::Change);
        }
        events
    }

    fn has_z(&self) -> bool {
        self.axes[Axis::Z.index()].channel.has_value()
    }

    fn normal(&self, axis: Axis) -> f64 {
        let raw = self.axes[axis.index()].channel.value();
        match self.to_normal {
            Some(convert) => convert(raw),
            None => self
                .controller
                .to_normal(raw)
                .unwrap_or_else(|| f64::from(raw)),
        }
    }

    fn degrees_per_second(&self, axis: Axis) -> f64 {
        let state = &self.axes[axis.index()];
        let raw = state.channel.value();
        match self.to_degrees_per_second {
            Some(convert) => convert(raw, state.center),
            None => self
                .controller
                .to_degrees_per_second(raw, state.center)
                .unwrap_or_else(|| f64::from(raw)),
        }
    }

    /// Normalized x axis value, 4 significant digits
    #[must_use]
    pub fn x(&self) -> f64 {
        to_precision(self.normal(Axis::X), 4)
    }

    /// Normalized y axis value, 4 significant digits
    #[must_use]
    pub fn y(&self) -> f64 {
        to_precision(self.normal(Axis::Y), 4)
    }

    /// Normalized z axis value, `None` until a z sample arrives
    #[must_use]
    pub fn z(&self) -> Option<f64> {
        self.has_z().then(|| to_precision(self.normal(Axis::Z), 4))
    }

    /// Angular rate of every axis
    #[must_use]
    pub fn rate(&self) -> Rate {
        Rate {
            x: to_precision(self.degrees_per_second(Axis::X), 2),
            y: to_precision(self.degrees_per_second(Axis::Y), 2),
            z: self
                .has_z()
                .then(|| to_precision(self.degrees_per_second(Axis::Z), 2)),
        }
    }

    /// Integrated angle of `axis`, 2 significant digits
    #[must_use]
    pub fn angle(&self, axis: Axis) -> f64 {
        to_precision(self.axes[axis.index()].angle, 2)
    }

    /// Rotation about the y axis
    #[must_use]
    pub fn pitch(&self) -> Rotation {
        Rotation {
            rate: self.rate().y,
            angle: Some(self.angle(Axis::Y)),
        }
    }

    /// Rotation about the x axis
    #[must_use]
    pub fn roll(&self) -> Rotation {
        Rotation {
            rate: self.rate().x,
            angle: Some(self.angle(Axis::X)),
        }
    }

    /// Rotation about the z axis
    ///
    /// The rate reads 0 and the angle `None` on 2-axis parts.
    #[must_use]
    pub fn yaw(&self) -> Rotation {
        Rotation {
            rate: self.rate().z.unwrap_or(0.0),
            angle: self.has_z().then(|| self.angle(Axis::Z)),
        }
    }
}

impl<B, C> Gyro<B, C> {
    /// Whether the zero references are resolved
    #[must_use]
    pub const fn is_calibrated(&self) -> bool {
        self.calibrator.is_calibrated()
    }

    /// Force the calibrated flag
    ///
    /// `true` keeps the current zero references; `false` restarts collection like
    /// [`recalibrate`](Self::recalibrate).
    pub fn set_calibrated(&mut self, calibrated: bool) {
        self.calibrator.set_calibrated(calibrated);
    }

    /// Collect a fresh set of startup samples
    ///
    /// Zero references and angles are kept until the new calibration resolves.
    pub fn recalibrate(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Gyro recalibrating");

        self.calibrator.recalibrate();
    }

    /// Zero reference of `axis` (0 before calibration and for absent axes)
    #[must_use]
    pub const fn center(&self, axis: Axis) -> i32 {
        self.axes[axis.index()].center
    }

    /// Smoothed raw value of `axis`
    #[must_use]
    pub const fn raw(&self, axis: Axis) -> i32 {
        self.axes[axis.index()].channel.value()
    }

    /// Startup samples per axis
    #[must_use]
    pub const fn sample_size(&self) -> u16 {
        self.calibrator.sample_size()
    }

    /// The calibration state machine
    #[must_use]
    pub const fn calibrator(&self) -> &Calibrator {
        &self.calibrator
    }

    /// The controller
    #[must_use]
    pub const fn controller(&self) -> &C {
        &self.controller
    }

    /// Consume the gyro and return the board
    pub fn release(self) -> B {
        self.board
    }
}
