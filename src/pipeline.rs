//! Sample pipeline
//!
//! Per-axis (or per-channel) state fed by controllers: a fixed 5-sample rolling
//! window with its integer average, the previous average for change detection, and
//! the startup calibration accumulator.

use crate::math::{floor_average, sum};

/// Length of the rolling average window
pub const WINDOW_SIZE: usize = 5;

/// Default number of startup samples collected per axis before calibration resolves
pub const DEFAULT_SAMPLE_SIZE: u16 = 100;

/// Tracked axis of a multi-axis sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis (roll)
    X = 0,
    /// Y axis (pitch)
    Y = 1,
    /// Z axis (yaw), absent on 2-axis parts
    Z = 2,
}

impl Axis {
    /// All axes in delivery order
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Axis for a position in a pin or register list
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }

    /// Position of this axis in per-axis arrays
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One raw sample batch handed from a controller to the pipeline
///
/// Axes a controller does not produce are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample {
    /// Raw X sample
    pub x: Option<i32>,
    /// Raw Y sample
    pub y: Option<i32>,
    /// Raw Z sample
    pub z: Option<i32>,
}

impl AxisSample {
    /// Batch carrying all three axes
    #[must_use]
    pub const fn xyz(x: i32, y: i32, z: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// Batch from a 2-axis part
    #[must_use]
    pub const fn xy(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: None,
        }
    }

    /// Raw value of one axis
    #[must_use]
    pub const fn get(&self, axis: Axis) -> Option<i32> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Set the raw value of one axis
    pub fn set(&mut self, axis: Axis, raw: i32) {
        match axis {
            Axis::X => self.x = Some(raw),
            Axis::Y => self.y = Some(raw),
            Axis::Z => self.z = Some(raw),
        }
    }

    /// Present axes with their raw values, in x, y, z order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, i32)> + '_ {
        Axis::ALL
            .into_iter()
            .filter_map(|axis| self.get(axis).map(|raw| (axis, raw)))
    }
}

/// Rolling-average state of one tracked dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    buffer: [i32; WINDOW_SIZE],
    value: i32,
    previous: i32,
    has_value: bool,
}

impl Default for Channel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel {
    /// Create an empty channel (zero-filled window, no value yet)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0; WINDOW_SIZE],
            value: 0,
            previous: 0,
            has_value: false,
        }
    }

    /// Push a raw sample through the rolling window
    ///
    /// Evicts the oldest sample, appends `raw` and recomputes the smoothed value as
    /// `floor(sum(window) / 5)`. Returns `true` when the smoothed value differs from
    /// the one before this push.
    pub fn push(&mut self, raw: i32) -> bool {
        self.previous = self.value;
        self.buffer.rotate_left(1);
        self.buffer[WINDOW_SIZE - 1] = raw;
        self.has_value = true;

        #[allow(clippy::cast_possible_truncation)]
        let window = WINDOW_SIZE as u32;
        self.value = floor_average(sum(&self.buffer), window);

        self.previous != self.value
    }

    /// Record a settled reading directly, bypassing the window
    ///
    /// Used by distance channels, whose sources already deliver one measurement per
    /// ranging cycle. Returns `true` when the reading differs from the prior one.
    pub fn set(&mut self, raw: i32) -> bool {
        self.previous = self.value;
        self.value = raw;
        self.has_value = true;

        self.previous != self.value
    }

    /// Current smoothed value
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Smoothed value before the latest update
    #[must_use]
    pub const fn previous(&self) -> i32 {
        self.previous
    }

    /// Whether any sample has been accepted yet
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.has_value
    }

    /// The rolling window, oldest sample first
    #[must_use]
    pub const fn window(&self) -> &[i32; WINDOW_SIZE] {
        &self.buffer
    }
}

/// Startup calibration accumulator of one axis
///
/// Keeps the running sum and count of the raw samples collected while calibrating.
/// Never holds more than its threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Accumulator {
    total: i64,
    len: u16,
}

impl Accumulator {
    /// Create an empty accumulator
    #[must_use]
    pub const fn new() -> Self {
        Self { total: 0, len: 0 }
    }

    /// Add a raw sample unless `threshold` samples are already held
    ///
    /// Returns `true` if the sample was taken.
    pub fn push(&mut self, raw: i32, threshold: u16) -> bool {
        if self.len >= threshold {
            return false;
        }
        self.total += i64::from(raw);
        self.len += 1;
        true
    }

    /// Number of collected samples
    #[must_use]
    pub const fn len(&self) -> u16 {
        self.len
    }

    /// Whether no sample has been collected
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether exactly `threshold` samples are held
    #[must_use]
    pub const fn is_full(&self, threshold: u16) -> bool {
        self.len == threshold
    }

    /// Zero reference: `floor(sum / threshold)`
    #[must_use]
    pub fn center(&self, threshold: u16) -> i32 {
        floor_average(self.total, u32::from(threshold))
    }

    /// Drop all collected samples
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
