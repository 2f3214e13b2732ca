//! Unit tests for conversion precedence: option, then controller, then identity

use crate::common::{MockBoard, MockDelay, MockError, assert_float_eq, create_mock_gyro};
use embedded_hal::delay::DelayNs;
use sensor_pipeline::{
    AxisSample, Error, Events, Gyro, GyroController, GyroOptions, TK_1X,
};

/// Controller replaying fixed batches, with no conversions of its own
struct ScriptedGyro {
    samples: Vec<AxisSample>,
    index: usize,
}

impl ScriptedGyro {
    fn new(samples: Vec<AxisSample>) -> Self {
        Self { samples, index: 0 }
    }
}

impl GyroController<MockBoard> for ScriptedGyro {
    fn initialize<D: DelayNs>(
        &mut self,
        _board: &mut MockBoard,
        _delay: &mut D,
    ) -> Result<(), Error<MockError>> {
        Ok(())
    }

    fn read(&mut self, _board: &mut MockBoard) -> Result<Option<AxisSample>, Error<MockError>> {
        let sample = self.samples.get(self.index).copied();
        self.index += 1;
        Ok(sample)
    }
}

fn doubled(raw: i32) -> f64 {
    f64::from(raw) * 2.0
}

fn offset_rate(raw: i32, center: i32) -> f64 {
    f64::from(raw - center) + 0.25
}

fn scripted(samples: Vec<AxisSample>, options: GyroOptions<'_>) -> Gyro<MockBoard, ScriptedGyro> {
    Gyro::with_controller(
        MockBoard::new(),
        &mut MockDelay::default(),
        ScriptedGyro::new(samples),
        options,
    )
    .unwrap()
}

#[test]
fn test_identity_without_controller_conversions() {
    let mut gyro = scripted(
        vec![AxisSample::xy(50, 10); 6],
        GyroOptions {
            sample_size: 5,
            ..GyroOptions::default()
        },
    );
    for _ in 0..6 {
        gyro.update().unwrap();
    }

    assert_float_eq(gyro.x(), 50.0, 1e-12);
    assert_float_eq(gyro.y(), 10.0, 1e-12);
    // Identity rate is the smoothed raw value, not its offset from center
    assert_float_eq(gyro.rate().x, 50.0, 1e-12);
}

#[test]
fn test_option_overrides_take_precedence() {
    let mut gyro = scripted(
        vec![AxisSample::xy(50, 10); 6],
        GyroOptions {
            sample_size: 5,
            to_normal: Some(doubled),
            to_degrees_per_second: Some(offset_rate),
            ..GyroOptions::default()
        },
    );
    for _ in 0..6 {
        gyro.update().unwrap();
    }

    assert_float_eq(gyro.x(), 100.0, 1e-12);
    assert_float_eq(gyro.rate().x, 0.25, 1e-12);
}

#[test]
fn test_option_overrides_builtin_controller() {
    let (mut gyro, board) = create_mock_gyro(GyroOptions {
        pins: &[0, 1],
        sensitivity: Some(TK_1X),
        sample_size: 1,
        to_normal: Some(doubled),
        ..GyroOptions::default()
    });
    board.set_analog(0, 500);
    board.set_analog(1, 500);
    gyro.update().unwrap();

    // 500 / 5 = 100, doubled instead of shifted
    assert_float_eq(gyro.x(), 200.0, 1e-12);
    // Rate still comes from the controller: (25 - 125) * 29.22 -> -2922 -> -2900
    assert_float_eq(gyro.rate().x, -2900.0, 1e-9);
}

#[test]
fn test_controller_without_data_produces_no_events() {
    let mut gyro = scripted(Vec::new(), GyroOptions::default());
    gyro.set_calibrated(true);
    assert_eq!(gyro.update().unwrap(), Events::NONE);
}

#[test]
fn test_with_controller_rejects_zero_sample_size() {
    let result = Gyro::with_controller(
        MockBoard::new(),
        &mut MockDelay::default(),
        ScriptedGyro::new(Vec::new()),
        GyroOptions {
            sample_size: 0,
            ..GyroOptions::default()
        },
    );
    assert!(matches!(result, Err(Error::InvalidConfig)));
}
