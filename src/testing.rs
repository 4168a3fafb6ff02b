use crate::register::Register;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use std::vec::Vec;

const NUM_REGISTERS: usize = 6;

/// Simulated INA219 register file.
///
/// Writes of `[reg]` move the register pointer, writes of `[reg, hi, lo]` also store the value.
/// Reads return the register under the pointer, MSB first.
pub struct FakeIna219 {
    address: u8,
    pointer: u8,
    regs: [u16; NUM_REGISTERS],
    pub writes: Vec<(u8, u16)>,
}

impl FakeIna219 {
    pub fn new(address: u8) -> Self {
        FakeIna219 {
            address,
            pointer: 0,
            regs: [0; NUM_REGISTERS],
            writes: Vec::new(),
        }
    }

    pub fn with_register(mut self, reg: Register, value: u16) -> Self {
        self.regs[reg.addr() as usize] = value;
        self
    }

    pub fn register(&self, reg: Register) -> u16 {
        self.regs[reg.addr() as usize]
    }
}

impl ErrorType for FakeIna219 {
    type Error = ErrorKind;
}

impl I2c for FakeIna219 {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let bytes: &[u8] = *bytes;
                    match bytes {
                        [reg] if (*reg as usize) < NUM_REGISTERS => {
                            self.pointer = *reg;
                        }
                        [reg, hi, lo] if (*reg as usize) < NUM_REGISTERS => {
                            let value = u16::from_be_bytes([*hi, *lo]);
                            self.pointer = *reg;
                            self.regs[*reg as usize] = value;
                            self.writes.push((*reg, value));
                        }
                        _ => return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
                    }
                }
                Operation::Read(buf) => {
                    let bytes = self.regs[self.pointer as usize].to_be_bytes();
                    if buf.len() > bytes.len() {
                        return Err(ErrorKind::Other);
                    }
                    let n = buf.len();
                    buf.copy_from_slice(&bytes[..n]);
                }
            }
        }

        Ok(())
    }
}
