//! Unit tests for the gyro sample pipeline, angle integration and events

use crate::common::{assert_float_eq, create_analog_gyro, run_updates};
use sensor_pipeline::{Axis, Events, TK_1X};

#[test]
fn test_smoothed_value_is_floor_average_of_last_five() {
    let (mut gyro, board) = create_analog_gyro(TK_1X, 100, false, 0);
    board.set_analog_sequence(0, vec![10, 20, 30, 40, 50, 60, 3]);

    let expected = [2, 6, 12, 20, 30, 40, 36];
    for (i, &value) in expected.iter().enumerate() {
        gyro.update().unwrap();
        assert_eq!(gyro.raw(Axis::X), value, "update {i}");
    }
}

#[test]
fn test_no_events_while_collecting() {
    let (mut gyro, _board) = create_analog_gyro(TK_1X, 3, false, 512);

    assert_eq!(gyro.update().unwrap(), Events::NONE);
    assert_eq!(gyro.update().unwrap(), Events::NONE);
    assert!(!gyro.is_calibrated());

    // The batch that completes calibration is already reported
    let events = gyro.update().unwrap();
    assert!(gyro.is_calibrated());
    assert!(events.data());
    assert!(events.change());
}

#[test]
fn test_steady_signal_reports_data_without_change() {
    let (mut gyro, _board) = create_analog_gyro(TK_1X, 5, false, 512);
    run_updates(&mut gyro, 10);

    let events = gyro.update().unwrap();
    assert!(events.data());
    assert!(!events.change());
}

#[test]
fn test_stable_at_center_reads_zero_rate() {
    let (mut gyro, _board) = create_analog_gyro(TK_1X, 100, false, 512);
    run_updates(&mut gyro, 100);

    assert!(gyro.is_calibrated());
    assert_eq!(gyro.center(Axis::X), 512);
    assert_eq!(gyro.center(Axis::Y), 512);

    run_updates(&mut gyro, 20);
    let rate = gyro.rate();
    assert_float_eq(rate.x, 0.0, 1e-12);
    assert_float_eq(rate.y, 0.0, 1e-12);
    assert_eq!(gyro.roll().angle, Some(0.0));
    assert_eq!(gyro.pitch().angle, Some(0.0));
}

#[test]
fn test_angle_integrates_rounded_rate() {
    let (mut gyro, board) = create_analog_gyro(TK_1X, 5, false, 512);
    run_updates(&mut gyro, 5);
    assert!(gyro.is_calibrated());

    // Window becomes [512, 512, 512, 512, 612] -> 532; (133 - 128) * 29.22 -> 146
    board.set_analog(0, 612);
    let events = gyro.update().unwrap();
    assert!(events.change());
    assert_eq!(gyro.raw(Axis::X), 532);
    assert_float_eq(gyro.rate().x, 150.0, 1e-9);
    assert_float_eq(gyro.roll().angle.unwrap(), 1.5, 1e-9);

    // [512, 512, 512, 612, 612] -> 552; 10 * 29.22 -> 292 -> 290
    gyro.update().unwrap();
    assert_float_eq(gyro.roll().rate, 290.0, 1e-9);
    assert_float_eq(gyro.roll().angle.unwrap(), 4.4, 1e-9);

    // Y never moved
    assert_float_eq(gyro.pitch().angle.unwrap(), 0.0, 1e-12);
}

#[test]
fn test_two_axis_part_has_no_z() {
    let (mut gyro, _board) = create_analog_gyro(TK_1X, 5, false, 512);
    run_updates(&mut gyro, 8);

    assert_eq!(gyro.z(), None);
    assert_eq!(gyro.rate().z, None);

    let yaw = gyro.yaw();
    assert_float_eq(yaw.rate, 0.0, 1e-12);
    assert_eq!(yaw.angle, None);

    // Pitch and roll are always reported
    assert!(gyro.pitch().angle.is_some());
    assert!(gyro.roll().angle.is_some());
}

#[test]
fn test_three_axis_part_reports_z() {
    let (mut gyro, _board) = create_analog_gyro(TK_1X, 5, true, 512);
    run_updates(&mut gyro, 8);

    assert!(gyro.is_calibrated());
    assert_eq!(gyro.center(Axis::Z), 512);
    assert_eq!(gyro.z(), Some(128.0));
    assert_eq!(gyro.rate().z, Some(0.0));
    assert_eq!(gyro.yaw().angle, Some(0.0));
}

#[test]
fn test_normalized_values_use_four_digits() {
    let (mut gyro, _board) = create_analog_gyro(TK_1X, 5, false, 1023);
    run_updates(&mut gyro, 5);

    // 1023 >> 2
    assert_float_eq(gyro.x(), 255.0, 1e-12);
    assert_float_eq(gyro.y(), 255.0, 1e-12);
}

#[test]
fn test_change_when_only_y_moves() {
    let (mut gyro, board) = create_analog_gyro(TK_1X, 5, false, 512);
    run_updates(&mut gyro, 10);
    assert!(gyro.is_calibrated());

    board.set_analog(1, 612);
    let events = gyro.update().unwrap();
    assert!(events.data());
    assert!(events.change());
    assert_eq!(gyro.raw(Axis::X), 512);
    assert_eq!(gyro.raw(Axis::Y), 532);

    // Let the y window fill, then hold it steady
    run_updates(&mut gyro, 4);
    assert_eq!(gyro.raw(Axis::Y), 612);
    let events = gyro.update().unwrap();
    assert!(events.data());
    assert!(!events.change());
}
