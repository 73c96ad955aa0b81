//! The 16-bit machine word.
//!
//! Registers and memory cells hold raw 16-bit patterns. Arithmetic and
//! comparisons read them as two's-complement values in `-32768..=32767`;
//! hex text only appears at the I/O boundary.

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// A raw 16-bit value as stored in a register or memory cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(u16);

impl Word {
    /// The all-zero word.
    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Wrap a raw bit pattern.
    #[inline]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw unsigned bit pattern.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Build a word from its two's-complement value.
    #[inline]
    pub const fn from_signed(value: i16) -> Self {
        Self(value as u16)
    }

    /// Two's-complement interpretation: patterns above `0x7FFF` are negative.
    #[inline]
    pub const fn to_signed(self) -> i16 {
        self.0 as i16
    }

    /// Build a word from a wide signed value, or `None` if it does not fit
    /// in `[-32768, 32767]`.
    pub fn from_i64(value: i64) -> Option<Self> {
        i16::try_from(value).ok().map(Self::from_signed)
    }

    /// Check if this is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The low byte, used as an immediate or an address.
    #[inline]
    pub const fn low_byte(self) -> u8 {
        self.0 as u8
    }

    /// Top nibble: the opcode field of an instruction word.
    #[inline]
    pub const fn opcode(self) -> u8 {
        (self.0 >> 12) as u8 & 0xF
    }

    /// Second nibble: the destination register field.
    #[inline]
    pub const fn d(self) -> u8 {
        (self.0 >> 8) as u8 & 0xF
    }

    /// Third nibble: the source register field.
    #[inline]
    pub const fn s(self) -> u8 {
        (self.0 >> 4) as u8 & 0xF
    }

    /// Low nibble: the target register field.
    #[inline]
    pub const fn t(self) -> u8 {
        self.0 as u8 & 0xF
    }

    /// Assemble a word from four nibbles, most significant first.
    pub const fn from_nibbles(op: u8, d: u8, s: u8, t: u8) -> Self {
        Self(
            ((op as u16 & 0xF) << 12)
                | ((d as u16 & 0xF) << 8)
                | ((s as u16 & 0xF) << 4)
                | (t as u16 & 0xF),
        )
    }

    /// Parse one to four hex digits. Surrounding whitespace is ignored and
    /// an empty string reads as zero.
    pub fn parse_hex(s: &str) -> Result<Self, ParseWordError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::zero());
        }
        if s.len() > 4 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseWordError(s.to_string()));
        }
        u16::from_str_radix(s, 16)
            .map(Self)
            .map_err(|_| ParseWordError(s.to_string()))
    }
}

impl From<u16> for Word {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Word> for u16 {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:04X} = {})", self.0, self.to_signed())
    }
}

impl fmt::UpperHex for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// Text that is not a 1-4 digit hex word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a 16-bit hex word: {0:?}")]
pub struct ParseWordError(pub String);
