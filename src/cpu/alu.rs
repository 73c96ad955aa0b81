//! Arithmetic/logic unit.
//!
//! Operands are the two's-complement values of the source registers. Each
//! result is computed in wide signed arithmetic and must land back inside
//! the 16-bit signed range; it is never wrapped or saturated.

use crate::word::Word;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// The six binary operations, opcodes `1`-`6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AluOp {
    /// a + b
    Add,
    /// a - b
    Sub,
    /// a & b
    And,
    /// a ^ b
    Xor,
    /// a << b
    Shl,
    /// a >> b (arithmetic)
    Shr,
}

impl AluOp {
    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::And => "AND",
            AluOp::Xor => "XOR",
            AluOp::Shl => "SHL",
            AluOp::Shr => "SHR",
        }
    }
}

/// Errors raised by the ALU before a result is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AluError {
    #[error("result {0} outside the range of -32768 and 32767")]
    Overflow(i64),

    #[error("negative shift count {0}")]
    NegativeShift(i16),
}

/// Left shifts at or beyond this count overflow for any non-zero operand.
const SHIFT_LIMIT: i16 = 16;

/// Apply `op` to `a` and `b`, range-checking the result.
pub fn compute(op: AluOp, a: i16, b: i16) -> Result<Word, AluError> {
    let (wa, wb) = (a as i64, b as i64);

    let raw = match op {
        AluOp::Add => wa + wb,
        AluOp::Sub => wa - wb,
        AluOp::And => wa & wb,
        AluOp::Xor => wa ^ wb,
        AluOp::Shl => shift_left(a, b)?,
        AluOp::Shr => shift_right(a, b)?,
    };

    Word::from_i64(raw).ok_or(AluError::Overflow(raw))
}

fn shift_left(a: i16, b: i16) -> Result<i64, AluError> {
    if b < 0 {
        return Err(AluError::NegativeShift(b));
    }
    if a == 0 {
        return Ok(0);
    }
    if b >= SHIFT_LIMIT {
        // Any non-zero value has left the 16-bit range; report the magnitude
        // that still fits in the error value.
        return Err(AluError::Overflow((a as i64) << SHIFT_LIMIT));
    }
    Ok((a as i64) << b)
}

fn shift_right(a: i16, b: i16) -> Result<i64, AluError> {
    if b < 0 {
        return Err(AluError::NegativeShift(b));
    }
    Ok((a as i64) >> b.min(63))
}
