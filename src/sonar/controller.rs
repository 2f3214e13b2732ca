//! Sonar controller registry

use super::SonarOptions;
use super::analog::AnalogSonar;
use super::srf10::Srf10Sonar;
use crate::Error;
use crate::interface::Board;

/// Acquisition and conversion bundle behind a [`Sonar`](super::Sonar)
///
/// Timing is driven by the caller's monotonic millisecond clock.
pub trait SonarController<B: Board> {
    /// Configure the transport and the part, starting acquisition at `now_ms`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transport fails.
    fn initialize(&mut self, board: &mut B, now_ms: u64) -> Result<(), Error<B::Error>>;

    /// Deliver a settled raw reading, `None` while a measurement is pending
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transport fails.
    fn read(&mut self, board: &mut B, now_ms: u64) -> Result<Option<i32>, Error<B::Error>>;

    /// Halt acquisition
    fn stop(&mut self) {}

    /// Restart acquisition halted by [`stop`](Self::stop)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transport fails.
    fn resume(&mut self, board: &mut B, now_ms: u64) -> Result<(), Error<B::Error>> {
        let _ = (board, now_ms);
        Ok(())
    }

    /// Centimeters of a raw reading
    fn to_cm(&self, raw: i32) -> Option<f64> {
        let _ = raw;
        None
    }
}

/// Built-in sonar controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SonarKind {
    /// Analog output range finder (Maxbotix LV-EZ and similar)
    #[default]
    Analog,
    /// Devantech SRF10 / SRF08 / SRF02 over I2C
    Srf10,
}

const NAMES: [(&str, SonarKind); 4] = [
    ("DEFAULT", SonarKind::Analog),
    ("SRF10", SonarKind::Srf10),
    ("SRF08", SonarKind::Srf10),
    ("SRF02", SonarKind::Srf10),
];

impl SonarKind {
    /// Look up a controller by name or alias, ignoring case
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|&(_, kind)| kind)
    }

    /// Resolve an optional name, falling back to [`SonarKind::Analog`]
    #[must_use]
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            None => Self::default(),
            Some(name) => Self::from_name(name).unwrap_or_else(|| {
                #[cfg(feature = "defmt")]
                defmt::debug!("Unknown sonar controller {=str}, using DEFAULT", name);
                Self::default()
            }),
        }
    }

    /// Canonical name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Analog => "DEFAULT",
            Self::Srf10 => "SRF10",
        }
    }
}

/// Any built-in controller, selected by name at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuiltinSonar {
    /// See [`AnalogSonar`]
    Analog(AnalogSonar),
    /// See [`Srf10Sonar`]
    Srf10(Srf10Sonar),
}

impl BuiltinSonar {
    /// Build the controller named by `options.controller`
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPin`] for an analog sonar without a pin.
    pub fn from_options<E>(options: &SonarOptions<'_>) -> Result<Self, Error<E>> {
        let controller = match SonarKind::resolve(options.controller) {
            SonarKind::Analog => Self::Analog(AnalogSonar::new(
                options.pin.ok_or(Error::<E>::MissingPin)?,
            )),
            SonarKind::Srf10 => Self::Srf10(Srf10Sonar::new(options.address)),
        };
        Ok(controller)
    }

    /// Which built-in controller this is
    #[must_use]
    pub const fn kind(&self) -> SonarKind {
        match self {
            Self::Analog(_) => SonarKind::Analog,
            Self::Srf10(_) => SonarKind::Srf10,
        }
    }
}

impl<B: Board> SonarController<B> for BuiltinSonar {
    fn initialize(&mut self, board: &mut B, now_ms: u64) -> Result<(), Error<B::Error>> {
        match self {
            Self::Analog(c) => c.initialize(board, now_ms),
            Self::Srf10(c) => c.initialize(board, now_ms),
        }
    }

    fn read(&mut self, board: &mut B, now_ms: u64) -> Result<Option<i32>, Error<B::Error>> {
        match self {
            Self::Analog(c) => c.read(board, now_ms),
            Self::Srf10(c) => c.read(board, now_ms),
        }
    }

    fn stop(&mut self) {
        match self {
            Self::Analog(c) => SonarController::<B>::stop(c),
            Self::Srf10(c) => SonarController::<B>::stop(c),
        }
    }

    fn resume(&mut self, board: &mut B, now_ms: u64) -> Result<(), Error<B::Error>> {
        match self {
            Self::Analog(c) => c.resume(board, now_ms),
            Self::Srf10(c) => c.resume(board, now_ms),
        }
    }

    fn to_cm(&self, raw: i32) -> Option<f64> {
        match self {
            Self::Analog(c) => SonarController::<B>::to_cm(c, raw),
            Self::Srf10(c) => SonarController::<B>::to_cm(c, raw),
        }
    }
}
