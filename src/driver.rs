use crate::config::{
    CalibrationProfile, CONFIG_RESET, PROFILE_16V_400MA, PROFILE_32V_1A, PROFILE_32V_2A,
};
use crate::register::{Register, BUS_VOLTAGE_SHIFT};
use embedded_hal::i2c::{I2c, SevenBitAddress};
use log::{debug, trace};

/// Address with A0 and A1 tied to GND.
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x40;

/// Readings of the shunt voltage register at or above this value are reported as 0 by
/// [`INA219Driver::get_shunt_voltage_mv`].
pub const SHUNT_VOLTAGE_CLAMP: u16 = 650;

/// Bus voltage LSB in mV.
const BUS_VOLTAGE_LSB_MV: u16 = 4;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum INA219Error<I2C> {
    /// The I2C transaction failed
    I2c(I2C),
    /// A calibrated reading was requested before any calibration profile was applied
    NotCalibrated,
}

pub struct INA219Driver<I2C> {
    i2c: I2C,
    address: SevenBitAddress,
    current_divider_ma: u16,
    power_divider_mw: u16,
}

impl<I2C> INA219Driver<I2C>
where
    I2C: I2c,
{
    ///
    ///
    /// # Arguments
    ///
    /// * `i2c`: The i2c bus.
    /// * `address`: The 7-bit address of the chip, [`DEFAULT_ADDRESS`] unless A0/A1 are strapped.
    ///
    /// No bus traffic happens here. Call [`INA219Driver::init`] or one of the
    /// `set_calibration_*` functions before reading current.
    pub fn new(i2c: I2C, address: SevenBitAddress) -> Self {
        Self {
            i2c,
            address,
            current_divider_ma: 0,
            power_divider_mw: 0,
        }
    }

    /// Puts the chip into a known state using the 32V/2A profile.
    pub fn init(&mut self) -> Result<(), INA219Error<I2C::Error>> {
        self.set_calibration_32v_2a()
    }

    /// Up to 32V and 2A, 100uA per current bit, overflow at 3.2A.
    pub fn set_calibration_32v_2a(&mut self) -> Result<(), INA219Error<I2C::Error>> {
        self.set_calibration(&PROFILE_32V_2A)
    }

    /// Up to 32V and 1A, 40uA per current bit, overflow at 1.3A.
    pub fn set_calibration_32v_1a(&mut self) -> Result<(), INA219Error<I2C::Error>> {
        self.set_calibration(&PROFILE_32V_1A)
    }

    /// Up to 16V and 400mA, 50uA per current bit.
    pub fn set_calibration_16v_400ma(&mut self) -> Result<(), INA219Error<I2C::Error>> {
        self.set_calibration(&PROFILE_16V_400MA)
    }

    /// Stores the profile's scale factors, then writes the calibration register followed by the
    /// configuration register.
    pub fn set_calibration(
        &mut self,
        profile: &CalibrationProfile,
    ) -> Result<(), INA219Error<I2C::Error>> {
        self.current_divider_ma = profile.current_divider_ma;
        self.power_divider_mw = profile.power_divider_mw;

        let config = profile.config.bits();
        debug!(
            "ina219@{:#04x}: calibration {:#06x}, config {:#06x}",
            self.address, profile.calibration, config
        );

        self.write(Register::Calibration, profile.calibration)?;
        self.write(Register::Config, config)
    }

    /// Resets every register to its power-on value. The calibration register reads 0 afterwards,
    /// so a profile has to be applied again before reading current.
    pub fn reset(&mut self) -> Result<(), INA219Error<I2C::Error>> {
        debug!("ina219@{:#04x}: reset", self.address);
        self.current_divider_ma = 0;
        self.power_divider_mw = 0;
        self.write(Register::Config, CONFIG_RESET)
    }

    /// Bus voltage with the status bits dropped, in 4mV steps.
    pub fn get_bus_voltage_raw(&mut self) -> Result<i16, INA219Error<I2C::Error>> {
        let value = self.read16(Register::BusVoltage)?;
        Ok(bus_voltage_from_raw(value))
    }

    /// Shunt voltage register as is, 10uV per bit.
    pub fn get_shunt_voltage_raw(&mut self) -> Result<i16, INA219Error<I2C::Error>> {
        Ok(self.read16(Register::ShuntVoltage)? as i16)
    }

    /// Current register as is, unscaled.
    pub fn get_current_raw(&mut self) -> Result<i16, INA219Error<I2C::Error>> {
        Ok(self.read16(Register::Current)? as i16)
    }

    /// Power register as is, unscaled.
    pub fn get_power_raw(&mut self) -> Result<i16, INA219Error<I2C::Error>> {
        Ok(self.read16(Register::Power)? as i16)
    }

    /// Shunt voltage in register units. Register values of [`SHUNT_VOLTAGE_CLAMP`] and above,
    /// including every negative reading, are returned as 0.
    pub fn get_shunt_voltage_mv(&mut self) -> Result<i16, INA219Error<I2C::Error>> {
        let value = self.read16(Register::ShuntVoltage)?;
        Ok(shunt_voltage_mv_from_raw(value))
    }

    /// Same value as [`INA219Driver::get_bus_voltage_raw`].
    pub fn get_bus_voltage_v(&mut self) -> Result<i16, INA219Error<I2C::Error>> {
        let value = self.read16(Register::BusVoltage)?;
        Ok(((value >> BUS_VOLTAGE_SHIFT) << 2) as i16)
    }

    /// Current in mA, rounded half up using the divider of the active profile.
    ///
    /// Returns [`INA219Error::NotCalibrated`] without touching the bus if no profile is active.
    pub fn get_current_ma(&mut self) -> Result<i16, INA219Error<I2C::Error>> {
        if self.current_divider_ma == 0 {
            return Err(INA219Error::NotCalibrated);
        }

        let value = self.read16(Register::Current)? as i16;
        current_ma_from_raw(value, self.current_divider_ma).ok_or(INA219Error::NotCalibrated)
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    pub fn current_divider_ma(&self) -> u16 {
        self.current_divider_ma
    }

    pub fn power_divider_mw(&self) -> u16 {
        self.power_divider_mw
    }

    /// Gives back the i2c bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn write(&mut self, register: Register, data: u16) -> Result<(), INA219Error<I2C::Error>> {
        trace!("ina219@{:#04x}: write {:?} {:#06x}", self.address, register, data);

        let [hi, lo] = data.to_be_bytes();
        self.i2c
            .write(self.address, &[register.addr(), hi, lo])
            .map_err(INA219Error::I2c)
    }

    pub fn read16(&mut self, register: Register) -> Result<u16, INA219Error<I2C::Error>> {
        let mut read_buffer = [0u8; 2];

        // Pointer write and data read are separate transfers with a stop in between.
        self.i2c
            .write(self.address, &[register.addr()])
            .map_err(INA219Error::I2c)?;
        self.i2c
            .read(self.address, &mut read_buffer)
            .map_err(INA219Error::I2c)?;

        let result = u16::from_be_bytes(read_buffer);
        trace!("ina219@{:#04x}: read {:?} {:#06x}", self.address, register, result);

        Ok(result)
    }
}

/// Drops CNVR, OVF and the reserved bit and scales to mV.
pub fn bus_voltage_from_raw(value: u16) -> i16 {
    ((value >> BUS_VOLTAGE_SHIFT) * BUS_VOLTAGE_LSB_MV) as i16
}

pub fn shunt_voltage_mv_from_raw(value: u16) -> i16 {
    if value >= SHUNT_VOLTAGE_CLAMP {
        0
    } else {
        value as i16
    }
}

/// `raw / divider + 0.5`, truncated toward zero. Negative readings therefore round toward zero
/// on exact halves (-5.5 becomes -5). `None` if `divider_ma` is 0.
pub fn current_ma_from_raw(raw: i16, divider_ma: u16) -> Option<i16> {
    if divider_ma == 0 {
        return None;
    }

    let value = raw as f32 / divider_ma as f32;
    Some((value + 0.5) as i16)
}

/// Integer twin of [`current_ma_from_raw`]. Both agree for every reading with the profile dividers.
pub fn current_ma_from_raw_integer(raw: i16, divider_ma: u16) -> Option<i16> {
    if divider_ma == 0 {
        return None;
    }

    let divider = divider_ma as i32;
    Some(((2 * raw as i32 + divider) / (2 * divider)) as i16)
}

#[cfg(feature = "std")]
impl<I2C> std::fmt::Display for INA219Error<I2C>
where
    I2C: std::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            INA219Error::I2c(i2c) => write!(f, "I2C Error: {i2c:?}"),
            INA219Error::NotCalibrated => write!(f, "No calibration profile applied"),
        }
    }
}

#[cfg(feature = "std")]
impl<I2C> std::error::Error for INA219Error<I2C>
where
    I2C: std::fmt::Debug,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
