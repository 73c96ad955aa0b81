//! Register file and program counter.
//!
//! Sixteen general-purpose registers `R0`-`RF`. `R0` reads as zero and
//! can never be written.

use crate::word::Word;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Number of general-purpose registers.
pub const REGISTER_COUNT: usize = 16;

/// Address of the first instruction; `00`-`0F` are conventionally data.
pub const ENTRY_POINT: u32 = 0x10;

/// Highest address the program counter may hold while running.
pub const LAST_ADDRESS: u32 = 0xFF;

/// A write to register 0 was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("register 0 is reserved")]
pub struct ReservedRegister;

/// The register file plus the program counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    gpr: [Word; REGISTER_COUNT],

    /// Program counter. Wider than an address so that running off the end
    /// of memory, or an indirect jump to a large value, is observable.
    pub pc: u32,
}

impl Registers {
    /// Create a register file with every register zero and the program
    /// counter at the entry point.
    pub fn new() -> Self {
        Self {
            gpr: [Word::zero(); REGISTER_COUNT],
            pc: ENTRY_POINT,
        }
    }

    /// Reset all registers and the program counter.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Read a register. Only the low nibble of `idx` is used.
    #[inline]
    pub fn read(&self, idx: u8) -> Word {
        self.gpr[(idx & 0xF) as usize]
    }

    /// Write a register. Register 0 is rejected and left untouched.
    pub fn write(&mut self, idx: u8, value: Word) -> Result<(), ReservedRegister> {
        let idx = (idx & 0xF) as usize;
        if idx == 0 {
            return Err(ReservedRegister);
        }
        self.gpr[idx] = value;
        Ok(())
    }

    /// All sixteen registers in index order.
    pub fn all(&self) -> &[Word; REGISTER_COUNT] {
        &self.gpr
    }

    /// The program counter as a memory address, if it is still in range.
    pub fn pc_address(&self) -> Option<u8> {
        u8::try_from(self.pc).ok()
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
