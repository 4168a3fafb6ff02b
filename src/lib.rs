//!
//! A platform-agnostic driver for the INA219 current/power monitor. Built using embedded-hal.
//!
//! The driver talks to the chip over I2C, programs one of three fixed calibration profiles
//! (32V/2A, 32V/1A, 16V/400mA, all assuming a 0.1 ohm shunt) and converts the raw register
//! contents into bus voltage, shunt voltage and current readings.
//!
//! ```no_run
//! # use embedded_hal::i2c::I2c;
//! # fn demo<I: I2c>(i2c: I) -> Result<(), ina219::INA219Error<I::Error>> {
//! use ina219::{INA219Driver, DEFAULT_ADDRESS};
//!
//! let mut ina = INA219Driver::new(i2c, DEFAULT_ADDRESS);
//! ina.init()?;
//!
//! let bus = ina.get_bus_voltage_v()?;
//! let current = ina.get_current_ma()?;
//! # Ok(())
//! # }
//! ```
//!

#![cfg_attr(not(feature = "std"), no_std)]

pub mod config;
pub mod driver;
pub mod register;

#[cfg(all(test, not(feature = "std")))]
extern crate std;

#[cfg(test)]
mod testing;

pub use config::{CalibrationProfile, Config};
pub use driver::*;
pub use register::Register;
