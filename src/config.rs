//! Configuration register fields and the fixed calibration profiles.
//!
//! Every profile assumes a 0.1 ohm shunt. The calibration register values follow the datasheet
//! relation `Cal = trunc(0.04096 / (Current_LSB * RSHUNT))` and the power LSB is always
//! `20 * Current_LSB`. See [`calibration_value`] for the integer form of the relation.

/// Resets all registers to their power-on values. Self-clearing.
pub const CONFIG_RESET: u16 = 0x8000;

/// Shunt resistance assumed by all profiles, in milliohms.
pub const SHUNT_RESISTANCE_MILLIOHMS: u32 = 100;

/// Bus voltage full-scale range
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum BusVoltageRange {
    V16 = 0x0000,
    V32 = 0x2000,
}

impl BusVoltageRange {
    #[inline(always)]
    pub fn bits(self) -> u16 {
        self as u16
    }
}

/// Shunt PGA gain and the resulting shunt voltage range
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Gain {
    /// Gain 1, +-40mV
    Div1_40mV = 0x0000,
    /// Gain /2, +-80mV
    Div2_80mV = 0x0800,
    /// Gain /4, +-160mV
    Div4_160mV = 0x1000,
    /// Gain /8, +-320mV
    Div8_320mV = 0x1800,
}

impl Gain {
    #[inline(always)]
    pub fn bits(self) -> u16 {
        self as u16
    }
}

/// Bus ADC resolution
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum BusAdcResolution {
    Bits9 = 0x0080,
    Bits10 = 0x0100,
    Bits11 = 0x0200,
    Bits12 = 0x0400,
}

impl BusAdcResolution {
    #[inline(always)]
    pub fn bits(self) -> u16 {
        self as u16
    }
}

/// Shunt ADC resolution and averaging
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ShuntAdcResolution {
    // 1 x 9-bit sample, 84us
    Bits9_1S_84us = 0x0000,
    // 1 x 10-bit sample, 148us
    Bits10_1S_148us = 0x0008,
    // 1 x 11-bit sample, 276us
    Bits11_1S_276us = 0x0010,
    // 1 x 12-bit sample, 532us
    Bits12_1S_532us = 0x0018,
    // 2 x 12-bit samples averaged, 1.06ms
    Bits12_2S_1060us = 0x0048,
    // 4 x 12-bit samples averaged, 2.13ms
    Bits12_4S_2130us = 0x0050,
    // 8 x 12-bit samples averaged, 4.26ms
    Bits12_8S_4260us = 0x0058,
    // 16 x 12-bit samples averaged, 8.51ms
    Bits12_16S_8510us = 0x0060,
    // 32 x 12-bit samples averaged, 17.02ms
    Bits12_32S_17ms = 0x0068,
    // 64 x 12-bit samples averaged, 34.05ms
    Bits12_64S_34ms = 0x0070,
    // 128 x 12-bit samples averaged, 68.10ms
    Bits12_128S_69ms = 0x0078,
}

impl ShuntAdcResolution {
    #[inline(always)]
    pub fn bits(self) -> u16 {
        self as u16
    }
}

/// Operating mode
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Mode {
    PowerDown = 0x0000,
    ShuntTriggered = 0x0001,
    BusTriggered = 0x0002,
    ShuntAndBusTriggered = 0x0003,
    AdcOff = 0x0004,
    ShuntContinuous = 0x0005,
    BusContinuous = 0x0006,
    ShuntAndBusContinuous = 0x0007,
}

impl Mode {
    #[inline(always)]
    pub fn bits(self) -> u16 {
        self as u16
    }
}

/// Contents of the configuration register, one value per field.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Config {
    pub bus_voltage_range: BusVoltageRange,
    pub gain: Gain,
    pub bus_adc: BusAdcResolution,
    pub shunt_adc: ShuntAdcResolution,
    pub mode: Mode,
}

impl Config {
    /// The raw register word.
    pub fn bits(&self) -> u16 {
        self.bus_voltage_range.bits()
            | self.gain.bits()
            | self.bus_adc.bits()
            | self.shunt_adc.bits()
            | self.mode.bits()
    }
}

/// A fixed bundle of calibration register value, configuration register value and the
/// host-side scale factors that go with them.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct CalibrationProfile {
    /// Value written to the calibration register
    pub calibration: u16,
    /// Value written to the configuration register
    pub config: Config,
    /// Raw current counts per mA
    pub current_divider_ma: u16,
    /// Power scale factor, kept with the profile but not applied by any reading
    pub power_divider_mw: u16,
}

/// 32V bus range, 2A expected current, 100uA per bit, overflow at 3.2A.
pub const PROFILE_32V_2A: CalibrationProfile = CalibrationProfile {
    calibration: 0x1000,
    config: Config {
        bus_voltage_range: BusVoltageRange::V32,
        gain: Gain::Div8_320mV,
        bus_adc: BusAdcResolution::Bits12,
        shunt_adc: ShuntAdcResolution::Bits12_1S_532us,
        mode: Mode::ShuntAndBusContinuous,
    },
    current_divider_ma: 10,
    power_divider_mw: 2,
};

/// 32V bus range, 1A expected current, 40uA per bit, overflow at 1.31068A.
pub const PROFILE_32V_1A: CalibrationProfile = CalibrationProfile {
    calibration: 0x2800,
    config: Config {
        bus_voltage_range: BusVoltageRange::V32,
        gain: Gain::Div8_320mV,
        bus_adc: BusAdcResolution::Bits12,
        shunt_adc: ShuntAdcResolution::Bits12_1S_532us,
        mode: Mode::ShuntAndBusContinuous,
    },
    current_divider_ma: 25,
    power_divider_mw: 1,
};

/// 16V bus range, 400mA expected current, 50uA per bit.
pub const PROFILE_16V_400MA: CalibrationProfile = CalibrationProfile {
    calibration: 8192,
    config: Config {
        bus_voltage_range: BusVoltageRange::V16,
        gain: Gain::Div1_40mV,
        bus_adc: BusAdcResolution::Bits12,
        shunt_adc: ShuntAdcResolution::Bits12_1S_532us,
        mode: Mode::ShuntAndBusContinuous,
    },
    current_divider_ma: 20,
    power_divider_mw: 1,
};

/// Calibration register value for a current LSB (in uA per bit) and a shunt (in milliohms).
///
/// Integer form of `trunc(0.04096 / (Current_LSB * RSHUNT))`.
pub const fn calibration_value(current_lsb_ua: u32, shunt_milliohms: u32) -> u32 {
    40_960_000 / (current_lsb_ua * shunt_milliohms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_config_words() {
        assert_eq!(PROFILE_32V_2A.config.bits(), 0x3C1F);
        assert_eq!(PROFILE_32V_1A.config.bits(), 0x3C1F);
        assert_eq!(PROFILE_16V_400MA.config.bits(), 0x041F);
    }

    #[test]
    fn profile_calibration_matches_current_lsb() {
        // (profile, current LSB in uA)
        let table = [
            (PROFILE_32V_2A, 100),
            (PROFILE_32V_1A, 40),
            (PROFILE_16V_400MA, 50),
        ];

        for (profile, lsb_ua) in table {
            assert_eq!(
                profile.calibration as u32,
                calibration_value(lsb_ua, SHUNT_RESISTANCE_MILLIOHMS)
            );
            assert_eq!(profile.current_divider_ma as u32, 1000 / lsb_ua);
        }
    }

    #[test]
    fn profile_table_values() {
        assert_eq!(PROFILE_32V_2A.calibration, 0x1000);
        assert_eq!(PROFILE_32V_2A.current_divider_ma, 10);
        assert_eq!(PROFILE_32V_2A.power_divider_mw, 2);

        assert_eq!(PROFILE_32V_1A.calibration, 0x2800);
        assert_eq!(PROFILE_32V_1A.current_divider_ma, 25);
        assert_eq!(PROFILE_32V_1A.power_divider_mw, 1);

        assert_eq!(PROFILE_16V_400MA.calibration, 0x2000);
        assert_eq!(PROFILE_16V_400MA.current_divider_ma, 20);
        assert_eq!(PROFILE_16V_400MA.power_divider_mw, 1);
    }

    #[test]
    fn reset_bit_does_not_overlap_fields() {
        assert_eq!(PROFILE_32V_2A.config.bits() & CONFIG_RESET, 0);
    }
}
