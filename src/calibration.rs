//! Startup calibration state machine
//!
//! A gyro starts in [`CalibrationState::Collecting`]: every raw sample of every axis
//! is absorbed into that axis's [`Accumulator`] until it holds `sample_size` samples.
//! The moment all required axes are full (x and y always, z only if the controller
//! produces it) the zero reference of each axis resolves to the floor average of its
//! samples, the accumulators empty and the state becomes
//! [`CalibrationState::Calibrated`]. Nothing downstream of the pipeline (angle
//! integration, events) runs before that transition.

use crate::pipeline::{Accumulator, Axis};

/// Calibration phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationState {
    /// Absorbing startup samples, no output
    Collecting,
    /// Zero references resolved
    Calibrated,
}

/// Per-axis calibration bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibrator {
    state: CalibrationState,
    sample_size: u16,
    accumulators: [Accumulator; 3],
}

impl Calibrator {
    /// Create a calibrator that collects `sample_size` samples per axis
    #[must_use]
    pub const fn new(sample_size: u16) -> Self {
        Self {
            state: CalibrationState::Collecting,
            sample_size,
            accumulators: [Accumulator::new(); 3],
        }
    }

    /// Current phase
    #[must_use]
    pub const fn state(&self) -> CalibrationState {
        self.state
    }

    /// Whether zero references are resolved
    #[must_use]
    pub const fn is_calibrated(&self) -> bool {
        matches!(self.state, CalibrationState::Calibrated)
    }

    /// Samples required per axis
    #[must_use]
    pub const fn sample_size(&self) -> u16 {
        self.sample_size
    }

    /// Samples collected so far for `axis`
    #[must_use]
    pub const fn collected(&self, axis: Axis) -> u16 {
        self.accumulators[axis.index()].len()
    }

    /// Absorb a raw sample while collecting
    ///
    /// Ignored once calibrated or once the axis already holds `sample_size` samples.
    pub fn accept(&mut self, axis: Axis, raw: i32) {
        if self.is_calibrated() {
            return;
        }
        self.accumulators[axis.index()].push(raw, self.sample_size);
    }

    /// Attempt the `Collecting -> Calibrated` transition
    ///
    /// `z_required` tells whether the controller produces a z axis. Returns the
    /// resolved zero references (x, y, z order) exactly once per collecting phase, at
    /// the call where the last required axis is full. Axes that are not required
    /// resolve to 0.
    pub fn resolve(&mut self, z_required: bool) -> Option<[i32; 3]> {
        if self.is_calibrated() {
            return None;
        }

        let full = |axis: Axis| self.accumulators[axis.index()].is_full(self.sample_size);
        if !(full(Axis::X) && full(Axis::Y) && (!z_required || full(Axis::Z))) {
            return None;
        }

        let mut centers = [0; 3];
        for axis in Axis::ALL {
            let accumulator = &mut self.accumulators[axis.index()];
            if axis != Axis::Z || z_required {
                centers[axis.index()] = accumulator.center(self.sample_size);
            }
            accumulator.clear();
        }
        self.state = CalibrationState::Calibrated;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Calibrated after {} samples per axis: centers x={} y={} z={}",
            self.sample_size,
            centers[0],
            centers[1],
            centers[2]
        );

        Some(centers)
    }

    /// Return to `Collecting` with empty accumulators
    pub fn recalibrate(&mut self) {
        self.state = CalibrationState::Collecting;
        for accumulator in &mut self.accumulators {
            accumulator.clear();
        }
    }

    /// Force the calibrated flag
    ///
    /// Clearing it behaves like [`recalibrate`](Self::recalibrate). Setting it keeps
    /// whatever zero references the owner currently holds.
    pub fn set_calibrated(&mut self, calibrated: bool) {
        if calibrated {
            self.state = CalibrationState::Calibrated;
        } else {
            self.recalibrate();
        }
    }
}
