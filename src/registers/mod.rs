//! Register maps of the I2C parts behind the built-in controllers
//!
//! Each part lives in its own module generated with `device_driver::create_device!`.
//! Configuration registers go through the generated accessors; multi-byte sample
//! reads go straight through the interface, like the data burst reads of most IMUs.

pub mod bno055;
pub mod l3gd20h;
pub mod mpu6050;
pub mod srf10;
