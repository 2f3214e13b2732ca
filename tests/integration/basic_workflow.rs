//! Integration tests for basic workflow scenarios

use crate::common::{MockDelay, assert_float_eq, create_mock_gyro, create_mock_sonar};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation as I2cOperation};
use sensor_pipeline::{
    AnalogInput, Axis, Error, Gyro, GyroOptions, HalBoard, HalBoardError, Sonar, SonarOptions,
};
use std::collections::HashMap;

/// In-memory I2C bus: a register pointer and register file per device address
#[derive(Debug, Default)]
struct FakeBus {
    registers: HashMap<(u8, u8), u8>,
    pointers: HashMap<u8, u8>,
    writes: Vec<(u8, Vec<u8>)>,
}

impl ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [I2cOperation<'_>],
    ) -> Result<(), Self::Error> {
        for operation in operations {
            match operation {
                I2cOperation::Write(bytes) => {
                    self.writes.push((address, bytes.to_vec()));
                    if let Some((&register, data)) = bytes.split_first() {
                        let register = register & 0x7F;
                        self.pointers.insert(address, register);
                        for (i, &value) in data.iter().enumerate() {
                            self.registers.insert((address, register + i as u8), value);
                        }
                    }
                }
                I2cOperation::Read(buffer) => {
                    let start = self.pointers.get(&address).copied().unwrap_or(0);
                    for (i, slot) in buffer.iter_mut().enumerate() {
                        *slot = self
                            .registers
                            .get(&(address, start + i as u8))
                            .copied()
                            .unwrap_or(0);
                    }
                }
            }
        }
        Ok(())
    }
}

/// ADC with fixed readings per pin
#[derive(Debug, Default)]
struct FakeAdc {
    values: HashMap<u8, u16>,
    configured: Vec<u8>,
}

impl AnalogInput for FakeAdc {
    type Error = ();

    fn configure(&mut self, pin: u8) -> Result<(), Self::Error> {
        self.configured.push(pin);
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<u16, Self::Error> {
        self.values.get(&pin).copied().ok_or(())
    }
}

#[test]
fn test_complete_gyro_workflow() {
    let (mut gyro, board) = create_mock_gyro(GyroOptions {
        controller: Some("MPU6050"),
        sample_size: 10,
        ..GyroOptions::default()
    });

    // Still, slightly biased
    board.set_samples_be(0x68, 0x43, [-40, 25, 131]);
    for _ in 0..10 {
        gyro.update().unwrap();
    }
    assert!(gyro.is_calibrated());
    assert_eq!(gyro.center(Axis::Z), 131);

    // Steady rotation of +10 dps about z once the window fills
    board.set_samples_be(0x68, 0x43, [-40, 25, 131 + 1310]);
    for _ in 0..5 {
        gyro.update().unwrap();
    }
    assert_float_eq(gyro.yaw().rate, 10.0, 1e-9);
    let before = gyro.yaw().angle.unwrap();

    for _ in 0..10 {
        let events = gyro.update().unwrap();
        assert!(events.data());
        assert!(!events.change());
    }
    // 10 batches at 10 dps, 0.1 degree each
    assert_float_eq(gyro.yaw().angle.unwrap() - before, 1.0, 0.06);
    assert_float_eq(gyro.roll().rate, 0.0, 1e-12);

    // Release hands the board back
    let board = gyro.release();
    assert!(!board.operations().is_empty());
}

#[test]
fn test_complete_sonar_workflow() {
    let (mut sonar, board) = create_mock_sonar(SonarOptions {
        pin: Some(1),
        freq: 50,
        ..SonarOptions::default()
    });
    board.set_analog_sequence(1, vec![100, 100, 120, 120, 120]);

    let mut data = 0;
    let mut changes = 0;
    for now in (10..=250).step_by(10) {
        let events = sonar.update(now).unwrap();
        data += usize::from(events.data());
        changes += usize::from(events.change());
    }
    assert_eq!(data, 5);
    assert_eq!(changes, 2);
    // round(60) * 2.54
    assert_float_eq(sonar.cm(), 152.4, 1e-9);

    sonar.stop();
    assert!(sonar.update(300).unwrap().is_empty());
    let _board = sonar.release();
}

#[test]
fn test_hal_board_with_i2c_gyro() {
    let mut bus = FakeBus::default();
    // L3GD20H output registers, little-endian x = 800
    bus.registers.insert((0x6B, 0x28), 0x20);
    bus.registers.insert((0x6B, 0x29), 0x03);

    let board = HalBoard::new(bus, FakeAdc::default());
    let mut gyro = Gyro::new(
        board,
        &mut MockDelay::default(),
        GyroOptions {
            controller: Some("L3GD20H"),
            sample_size: 1,
            ..GyroOptions::default()
        },
    )
    .unwrap();

    assert!(gyro.update().unwrap().data());
    // 160 * 0.00875
    assert_float_eq(gyro.rate().x, 1.4, 1e-9);

    let (bus, _adc) = gyro.release().release();
    assert_eq!(bus.writes[0], (0x6B, vec![0x39, 0x00]));
    assert_eq!(bus.writes[2], (0x6B, vec![0x20, 0x6F]));
}

#[test]
fn test_hal_board_with_analog_sonar() {
    let mut adc = FakeAdc::default();
    adc.values.insert(0, 100);

    let board = HalBoard::new(FakeBus::default(), adc);
    let mut sonar = Sonar::new(
        board,
        SonarOptions {
            pin: Some(0),
            ..SonarOptions::default()
        },
        0,
    )
    .unwrap();
    sonar.update(1).unwrap();
    assert_float_eq(sonar.cm(), 127.0, 1e-9);

    let (_bus, adc) = sonar.release().release();
    assert_eq!(adc.configured, vec![0]);
}

#[test]
fn test_hal_board_surfaces_adc_errors() {
    let board = HalBoard::new(FakeBus::default(), FakeAdc::default());
    let mut sonar = Sonar::new(
        board,
        SonarOptions {
            pin: Some(5),
            ..SonarOptions::default()
        },
        0,
    )
    .unwrap();

    assert!(matches!(
        sonar.update(1),
        Err(Error::Bus(HalBoardError::Analog(())))
    ));
}
