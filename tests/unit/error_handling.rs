//! Unit tests for error handling and recovery

use crate::common::{
    MockBoard, MockDelay, MockError, create_analog_gyro, create_mock_gyro, create_mock_sonar,
};
use sensor_pipeline::{Axis, Error, Gyro, GyroOptions, Sonar, SonarOptions, TK_1X};

#[test]
fn test_gyro_read_failure_basic() {
    let (mut gyro, board) = create_analog_gyro(TK_1X, 5, false, 512);

    // Inject a read failure
    board.fail_next_read();

    let result = gyro.update();
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
}

#[test]
fn test_gyro_failed_read_leaves_pipeline_untouched() {
    let (mut gyro, board) = create_analog_gyro(TK_1X, 5, false, 500);
    gyro.update().unwrap();
    gyro.update().unwrap();
    assert_eq!(gyro.raw(Axis::X), 200);
    assert_eq!(gyro.calibrator().collected(Axis::X), 2);

    board.fail_next_read();
    assert!(gyro.update().is_err());
    assert_eq!(gyro.raw(Axis::X), 200);
    assert_eq!(gyro.calibrator().collected(Axis::X), 2);
    assert_eq!(gyro.calibrator().collected(Axis::Y), 2);

    // Subsequent reads work (error was only for one operation)
    gyro.update().unwrap();
    assert_eq!(gyro.raw(Axis::X), 300);
}

#[test]
fn test_i2c_gyro_read_failure() {
    let (mut gyro, board) = create_mock_gyro(GyroOptions {
        controller: Some("MPU6050"),
        ..GyroOptions::default()
    });
    board.fail_next_read();
    assert!(matches!(
        gyro.update(),
        Err(Error::Bus(MockError::Communication))
    ));
    assert!(gyro.update().is_ok());
}

#[test]
fn test_gyro_initialization_failure() {
    let board = MockBoard::new();
    board.fail_next_write();

    let result = Gyro::new(
        board.clone(),
        &mut MockDelay::default(),
        GyroOptions {
            controller: Some("L3GD20H"),
            ..GyroOptions::default()
        },
    );
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    // Failed on the first register write
    assert!(board.writes_to(0x6B).is_empty());
}

#[test]
fn test_sonar_initialization_failure() {
    let board = MockBoard::new();
    board.fail_next_write();

    let result = Sonar::new(
        board,
        SonarOptions {
            controller: Some("SRF02"),
            ..SonarOptions::default()
        },
        0,
    );
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
}

#[test]
fn test_srf10_read_failure_retries_on_next_update() {
    let (mut sonar, board) = create_mock_sonar(SonarOptions {
        controller: Some("SRF10"),
        ..SonarOptions::default()
    });
    board.set_read_once(0x70, vec![0x00, 0xC8]);

    board.fail_next_read();
    assert!(matches!(
        sonar.update(65),
        Err(Error::Bus(MockError::Communication))
    ));
    assert!(!sonar.has_value());

    // Measurement is still pending, so the next update fetches it
    assert!(sonar.update(66).unwrap().change());
    assert_eq!(sonar.value(), 200);
}

#[test]
fn test_analog_sonar_read_failure() {
    let (mut sonar, board) = create_mock_sonar(SonarOptions {
        pin: Some(2),
        ..SonarOptions::default()
    });
    board.set_analog(2, 40);
    sonar.update(1).unwrap();

    board.fail_next_read();
    assert!(sonar.update(2).is_err());
    assert_eq!(sonar.value(), 40);
}

#[test]
fn test_srf10_failed_retrigger_keeps_measurement() {
    let (mut sonar, board) = create_mock_sonar(SonarOptions {
        controller: Some("SRF10"),
        ..SonarOptions::default()
    });
    board.set_read_once(0x70, vec![0x00, 0xC8]);
    board.clear_operations();

    // Result pointer write passes, the re-trigger fails
    board.fail_write_after(1);
    assert!(matches!(
        sonar.update(65),
        Err(Error::Bus(MockError::Communication))
    ));
    assert!(!sonar.has_value());
    assert_eq!(board.read_count(), 1);

    // Next update only re-triggers and delivers the held result
    board.clear_operations();
    assert!(sonar.update(66).unwrap().change());
    assert_eq!(sonar.value(), 200);
    assert_eq!(board.read_count(), 0);
    assert_eq!(board.writes_to(0x70), vec![vec![0x00, 0x52]]);
}

#[test]
fn test_single_pin_analog_gyro_is_rejected() {
    let board = MockBoard::new();
    let result = Gyro::new(
        board.clone(),
        &mut MockDelay::default(),
        GyroOptions {
            pins: &[0],
            sensitivity: Some(TK_1X),
            sample_size: 5,
            ..GyroOptions::default()
        },
    );
    assert!(matches!(result, Err(Error::MissingPin)));
    assert!(board.operations().is_empty());
}
