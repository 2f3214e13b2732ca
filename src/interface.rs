//! Transport interfaces
//!
//! Controllers never touch hardware directly. They go through a [`Board`], the
//! capability surface of whatever actually samples pins and drives the I2C bus.
//! This module also provides:
//!
//! - [`RegisterBus`], a `device-driver` register interface over a `Board` at a fixed
//!   I2C address, used by the register maps in [`crate::registers`]
//! - [`HalBoard`], a `Board` built from an `embedded-hal` I2C bus and an ADC

use device_driver::RegisterInterface;

/// Pin operating mode requested by a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Continuous analog sampling
    Analog,
}

/// I2C bus configuration passed to [`Board::i2c_config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Device address the controller will talk to
    pub address: Option<u8>,
}

/// Hardware transport consumed by the controllers
///
/// Analog pins report continuously; [`analog_read`](Self::analog_read) returns the
/// latest sampled value of a pin previously put in [`PinMode::Analog`].
pub trait Board {
    /// Transport error, surfaced unchanged as [`Error::Bus`](crate::Error::Bus)
    type Error;

    /// Configure a pin
    ///
    /// # Errors
    ///
    /// Returns the transport error if the pin cannot be configured.
    fn pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error>;

    /// Latest raw value of an analog pin (10-bit on most boards)
    ///
    /// # Errors
    ///
    /// Returns the transport error if the pin cannot be sampled.
    fn analog_read(&mut self, pin: u8) -> Result<u16, Self::Error>;

    /// Prepare the I2C bus
    ///
    /// # Errors
    ///
    /// Returns the transport error if the bus cannot be configured.
    fn i2c_config(&mut self, config: I2cConfig) -> Result<(), Self::Error>;

    /// Write raw bytes to a device
    ///
    /// # Errors
    ///
    /// Returns the transport error on a failed or unacknowledged write.
    fn i2c_write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Read `buffer.len()` bytes from a device without addressing a register
    ///
    /// # Errors
    ///
    /// Returns the transport error on a failed read.
    fn i2c_read_once(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Read `buffer.len()` bytes starting at `register`
    ///
    /// Some parts need an auto-increment flag OR-ed into `register` (see
    /// [`registers::l3gd20h::AUTO_INCREMENT`](crate::registers::l3gd20h::AUTO_INCREMENT)).
    ///
    /// # Errors
    ///
    /// Returns the transport error on a failed transaction.
    fn i2c_read_register(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error>;
}

impl<B: Board + ?Sized> Board for &mut B {
    type Error = B::Error;

    fn pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        (**self).pin_mode(pin, mode)
    }

    fn analog_read(&mut self, pin: u8) -> Result<u16, Self::Error> {
        (**self).analog_read(pin)
    }

    fn i2c_config(&mut self, config: I2cConfig) -> Result<(), Self::Error> {
        (**self).i2c_config(config)
    }

    fn i2c_write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).i2c_write(address, bytes)
    }

    fn i2c_read_once(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        (**self).i2c_read_once(address, buffer)
    }

    fn i2c_read_register(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        (**self).i2c_read_register(address, register, buffer)
    }
}

/// Register interface for one I2C device reached through a [`Board`]
///
/// Register writes go out as `[register, data...]`; reads address the register and
/// read back `read_data.len()` bytes.
pub struct RegisterBus<'a, B> {
    board: &'a mut B,
    address: u8,
}

impl<'a, B> RegisterBus<'a, B> {
    /// Borrow `board` for the device at `address`
    pub const fn new(board: &'a mut B, address: u8) -> Self {
        Self { board, address }
    }

    /// I2C address of the device
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }
}

impl<B: Board> RegisterInterface for RegisterBus<'_, B> {
    type Error = B::Error;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len()
        self.board
            .i2c_read_register(self.address, address, read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len()
        // Max: 1 address + 8 data bytes, more than any register here
        let mut buffer = [0u8; 9];
        buffer[0] = address;
        let len = write_data.len().min(8);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.board.i2c_write(self.address, &buffer[..=len])
    }
}

/// Analog-to-digital converter channel access
pub trait AnalogInput {
    /// ADC error
    type Error;

    /// Put `pin` into analog sampling
    ///
    /// # Errors
    ///
    /// Returns the ADC error if the pin cannot be routed to the converter.
    fn configure(&mut self, pin: u8) -> Result<(), Self::Error> {
        let _ = pin;
        Ok(())
    }

    /// Latest conversion result of `pin`
    ///
    /// # Errors
    ///
    /// Returns the ADC error on a failed conversion.
    fn read(&mut self, pin: u8) -> Result<u16, Self::Error>;
}

/// Error of a [`HalBoard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalBoardError<I, A> {
    /// I2C bus error
    I2c(I),
    /// ADC error
    Analog(A),
}

/// [`Board`] over an `embedded-hal` I2C bus and an [`AnalogInput`]
///
/// The bus is expected to be configured by the HAL already, so
/// [`Board::i2c_config`] is a no-op.
pub struct HalBoard<I2C, ADC> {
    i2c: I2C,
    adc: ADC,
}

impl<I2C, ADC> HalBoard<I2C, ADC> {
    /// Combine an I2C bus and an ADC
    pub const fn new(i2c: I2C, adc: ADC) -> Self {
        Self { i2c, adc }
    }

    /// Consume the board and return the peripherals
    pub fn release(self) -> (I2C, ADC) {
        (self.i2c, self.adc)
    }
}

impl<I2C, ADC> Board for HalBoard<I2C, ADC>
where
    I2C: embedded_hal::i2c::I2c,
    ADC: AnalogInput,
{
    type Error = HalBoardError<I2C::Error, ADC::Error>;

    fn pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        match mode {
            PinMode::Analog => self.adc.configure(pin).map_err(HalBoardError::Analog),
        }
    }

    fn analog_read(&mut self, pin: u8) -> Result<u16, Self::Error> {
        self.adc.read(pin).map_err(HalBoardError::Analog)
    }

    fn i2c_config(&mut self, config: I2cConfig) -> Result<(), Self::Error> {
        let _ = config;
        Ok(())
    }

    fn i2c_write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, bytes).map_err(HalBoardError::I2c)
    }

    fn i2c_read_once(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(address, buffer).map_err(HalBoardError::I2c)
    }

    fn i2c_read_register(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write_read(address, &[register], buffer)
            .map_err(HalBoardError::I2c)
    }
}
