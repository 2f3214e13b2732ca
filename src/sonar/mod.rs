//! Range finder
//!
//! A [`Sonar`] owns its [`Board`] and a [`SonarController`]. Each
//! [`update`](Sonar::update) takes the caller's monotonic clock, records whatever
//! settled reading the controller delivers and ticks the `Data` throttle.
//! [`stop`](Sonar::stop) halts both until [`start`](Sonar::start).

mod analog;
mod controller;
mod srf10;

use core::ops::RangeInclusive;

pub use analog::AnalogSonar;
pub use controller::{BuiltinSonar, SonarController, SonarKind};
pub use srf10::{Ranging, Srf10Sonar};

use crate::Error;
use crate::event::{Event, Events};
use crate::interface::Board;
use crate::math::{round_half_up, to_precision};
use crate::pipeline::Channel;
use crate::ticker::Ticker;

/// Default `Data` throttle period, ms
pub const DEFAULT_FREQ_MS: u64 = 25;

/// Inches per centimeter, as reported by [`Sonar::inches`]
const INCHES_PER_CM: f64 = 0.39;

/// Sonar options
#[derive(Debug, Clone, Copy)]
pub struct SonarOptions<'a> {
    /// Controller name or alias, case-insensitive; `None` or unknown selects `DEFAULT`
    pub controller: Option<&'a str>,
    /// Analog pin
    pub pin: Option<u8>,
    /// I2C address override
    pub address: Option<u8>,
    /// `Data` throttle period, ms
    pub freq: u64,
    /// Centimeter conversion override, takes precedence over the controller
    pub to_cm: Option<fn(i32) -> f64>,
}

impl Default for SonarOptions<'_> {
    fn default() -> Self {
        Self {
            controller: None,
            pin: None,
            address: None,
            freq: DEFAULT_FREQ_MS,
            to_cm: None,
        }
    }
}

/// Unit selector for [`Sonar::within`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceUnit {
    /// Raw controller reading
    Raw,
    /// [`Sonar::centimeters`]
    #[default]
    Centimeters,
    /// [`Sonar::inches`]
    Inches,
}

/// Range finder over any [`SonarController`]
pub struct Sonar<B, C = BuiltinSonar> {
    board: B,
    controller: C,
    channel: Channel,
    ticker: Ticker,
    running: bool,
    to_cm: Option<fn(i32) -> f64>,
}

impl<B: Board> Sonar<B, BuiltinSonar> {
    /// Create a sonar with the built-in controller named in `options`
    ///
    /// # Errors
    ///
    /// - [`Error::MissingPin`] for an analog sonar without a pin
    /// - [`Error::InvalidConfig`] for a zero `freq`
    /// - [`Error::Bus`] if controller initialization fails
    pub fn new(board: B, options: SonarOptions<'_>, now_ms: u64) -> Result<Self, Error<B::Error>> {
        let controller = BuiltinSonar::from_options::<B::Error>(&options)?;
        Self::with_controller(board, controller, options, now_ms)
    }
}

impl<B: Board, C: SonarController<B>> Sonar<B, C> {
    /// Create a sonar around a custom controller
    ///
    /// Only `freq` and `to_cm` of `options` apply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero `freq` and [`Error::Bus`] if
    /// controller initialization fails.
    pub fn with_controller(
        mut board: B,
        mut controller: C,
        options: SonarOptions<'_>,
        now_ms: u64,
    ) -> Result<Self, Error<B::Error>> {
        if options.freq == 0 {
            return Err(Error::InvalidConfig);
        }

        controller.initialize(&mut board, now_ms)?;

        Ok(Self {
            board,
            controller,
            channel: Channel::new(),
            ticker: Ticker::every(now_ms, options.freq),
            running: true,
            to_cm: options.to_cm,
        })
    }

    /// Advance acquisition and the throttle to `now_ms`
    ///
    /// Returns no events while stopped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the controller read fails; the last reading is kept.
    pub fn update(&mut self, now_ms: u64) -> Result<Events, Error<B::Error>> {
        let mut events = Events::NONE;
        if !self.running {
            return Ok(events);
        }

        if let Some(raw) = self.controller.read(&mut self.board, now_ms)? {
            if self.channel.set(raw) {
                events.insert(Event::Change);
            }
        }
        if self.ticker.poll(now_ms) {
            events.insert(Event::Data);
        }
        Ok(events)
    }

    /// Halt acquisition and `Data` ticks
    pub fn stop(&mut self) {
        if self.running {
            #[cfg(feature = "defmt")]
            defmt::debug!("Sonar stopped");

            self.controller.stop();
            self.running = false;
        }
    }

    /// Resume acquisition after [`stop`](Self::stop)
    ///
    /// The throttle restarts a full period after `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if restarting the controller fails.
    pub fn start(&mut self, now_ms: u64) -> Result<(), Error<B::Error>> {
        if !self.running {
            self.controller.resume(&mut self.board, now_ms)?;
            self.ticker.reset(now_ms);
            self.running = true;
        }
        Ok(())
    }

    fn raw_cm(&self) -> f64 {
        let raw = self.channel.value();
        match self.to_cm {
            Some(convert) => convert(raw),
            None => self
                .controller
                .to_cm(raw)
                .unwrap_or_else(|| f64::from(raw)),
        }
    }

    /// Distance in centimeters, 4 significant digits
    #[must_use]
    pub fn centimeters(&self) -> f64 {
        to_precision(self.raw_cm(), 4)
    }

    /// Alias of [`centimeters`](Self::centimeters)
    #[must_use]
    pub fn cm(&self) -> f64 {
        self.centimeters()
    }

    /// Distance in whole inches, `round(cm * 0.39)`
    #[must_use]
    pub fn inches(&self) -> f64 {
        round_half_up(self.centimeters() * INCHES_PER_CM)
    }

    /// Alias of [`inches`](Self::inches)
    #[must_use]
    pub fn inch(&self) -> f64 {
        self.inches()
    }

    /// The current reading in `unit`, if it lies within `range`
    #[must_use]
    pub fn within(&self, range: RangeInclusive<f64>, unit: DistanceUnit) -> Option<f64> {
        let reading = match unit {
            DistanceUnit::Raw => f64::from(self.value()),
            DistanceUnit::Centimeters => self.centimeters(),
            DistanceUnit::Inches => self.inches(),
        };
        range.contains(&reading).then_some(reading)
    }
}

impl<B, C> Sonar<B, C> {
    /// Latest raw reading
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.channel.value()
    }

    /// Whether any reading has arrived
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.channel.has_value()
    }

    /// `Data` throttle period, ms
    #[must_use]
    pub const fn freq(&self) -> u64 {
        self.ticker.period_ms()
    }

    /// Whether acquisition is running
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The controller
    #[must_use]
    pub const fn controller(&self) -> &C {
        &self.controller
    }

    /// Consume the sonar and return the board
    pub fn release(self) -> B {
        self.board
    }
}
