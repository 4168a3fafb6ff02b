/// Register pointer addresses. Every register is 16 bits wide and transferred MSB first.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Register {
    /// Range, gain, ADC resolution and operating mode
    Config = 0x00,
    /// Signed shunt voltage, 10uV per bit
    ShuntVoltage = 0x01,
    /// Bus voltage in bits 15..3, CNVR in bit 1, OVF in bit 0
    BusVoltage = 0x02,
    /// Power, scaled by the calibration register
    Power = 0x03,
    /// Signed current, scaled by the calibration register
    Current = 0x04,
    /// Full-scale range and LSB of current and power
    Calibration = 0x05,
}

impl Register {
    #[inline(always)]
    pub fn addr(self) -> u8 {
        self as u8
    }
}

impl From<Register> for u8 {
    fn from(r: Register) -> u8 {
        r as u8
    }
}

/// Conversion ready flag in the bus voltage register.
pub const BUS_VOLTAGE_CNVR: u16 = 1 << 1;

/// Math overflow flag in the bus voltage register.
pub const BUS_VOLTAGE_OVF: u16 = 1 << 0;

/// Number of low bits of the bus voltage register that are not part of the reading.
pub const BUS_VOLTAGE_SHIFT: u16 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_pointers_match_datasheet() {
        assert_eq!(Register::Config.addr(), 0x00);
        assert_eq!(Register::ShuntVoltage.addr(), 0x01);
        assert_eq!(Register::BusVoltage.addr(), 0x02);
        assert_eq!(Register::Power.addr(), 0x03);
        assert_eq!(Register::Current.addr(), 0x04);
        assert_eq!(u8::from(Register::Calibration), 0x05);
    }

    #[test]
    fn status_bits_fall_below_shift() {
        let status = BUS_VOLTAGE_CNVR | BUS_VOLTAGE_OVF;
        assert_eq!(status >> BUS_VOLTAGE_SHIFT, 0);
    }
}
