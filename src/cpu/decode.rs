//! Instruction decoder.
//!
//! An instruction word is four nibbles: opcode, `d`, `s`, `t`. The low
//! byte (`s` and `t` together) doubles as an 8-bit immediate or address.
//! All sixteen opcodes are defined, so decoding never fails.

use crate::word::Word;
use serde::{Serialize, Deserialize};

/// A register index `0`-`F`.
pub type Reg = u8;

/// Decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// `0`: stop execution.
    Halt,

    // ==================== Arithmetic ====================

    /// `1`: R[d] := R[s] + R[t]
    Add { d: Reg, s: Reg, t: Reg },

    /// `2`: R[d] := R[s] - R[t]
    Sub { d: Reg, s: Reg, t: Reg },

    /// `3`: R[d] := R[s] & R[t]
    And { d: Reg, s: Reg, t: Reg },

    /// `4`: R[d] := R[s] ^ R[t]
    Xor { d: Reg, s: Reg, t: Reg },

    /// `5`: R[d] := R[s] << R[t]
    Shl { d: Reg, s: Reg, t: Reg },

    /// `6`: R[d] := R[s] >> R[t]
    Shr { d: Reg, s: Reg, t: Reg },

    // ==================== Data Transfer ====================

    /// `7`: R[d] := imm
    LoadImmediate { d: Reg, imm: u8 },

    /// `8`: R[d] := M[addr], prompting for input when `addr` is `FF`
    Load { d: Reg, addr: u8 },

    /// `9`: M[addr] := R[d], displaying the value when `addr` is `FF`
    Store { d: Reg, addr: u8 },

    /// `A`: R[d] := M[R[t]]
    LoadIndirect { d: Reg, t: Reg },

    /// `B`: M[R[t]] := R[d]
    StoreIndirect { d: Reg, t: Reg },

    // ==================== Control Flow ====================

    /// `C`: if R[d] == 0 then PC := addr
    BranchZero { d: Reg, addr: u8 },

    /// `D`: if R[d] > 0 then PC := addr
    BranchPositive { d: Reg, addr: u8 },

    /// `E`: PC := R[d] + 1
    JumpRegister { d: Reg },

    /// `F`: R[d] := PC, PC := addr
    Call { d: Reg, addr: u8 },
}

impl Instruction {
    /// The opcode nibble.
    pub fn opcode(&self) -> u8 {
        match self {
            Instruction::Halt => 0x0,
            Instruction::Add { .. } => 0x1,
            Instruction::Sub { .. } => 0x2,
            Instruction::And { .. } => 0x3,
            Instruction::Xor { .. } => 0x4,
            Instruction::Shl { .. } => 0x5,
            Instruction::Shr { .. } => 0x6,
            Instruction::LoadImmediate { .. } => 0x7,
            Instruction::Load { .. } => 0x8,
            Instruction::Store { .. } => 0x9,
            Instruction::LoadIndirect { .. } => 0xA,
            Instruction::StoreIndirect { .. } => 0xB,
            Instruction::BranchZero { .. } => 0xC,
            Instruction::BranchPositive { .. } => 0xD,
            Instruction::JumpRegister { .. } => 0xE,
            Instruction::Call { .. } => 0xF,
        }
    }
}

/// Decode an instruction word.
///
/// Opcodes that take an address or immediate read the whole low byte and
/// ignore the `s`/`t` split; `A` and `B` read only the `t` nibble.
pub fn decode(word: Word) -> Instruction {
    let (d, s, t) = (word.d(), word.s(), word.t());
    let addr = word.low_byte();

    match word.opcode() {
        0x0 => Instruction::Halt,
        0x1 => Instruction::Add { d, s, t },
        0x2 => Instruction::Sub { d, s, t },
        0x3 => Instruction::And { d, s, t },
        0x4 => Instruction::Xor { d, s, t },
        0x5 => Instruction::Shl { d, s, t },
        0x6 => Instruction::Shr { d, s, t },
        0x7 => Instruction::LoadImmediate { d, imm: addr },
        0x8 => Instruction::Load { d, addr },
        0x9 => Instruction::Store { d, addr },
        0xA => Instruction::LoadIndirect { d, t },
        0xB => Instruction::StoreIndirect { d, t },
        0xC => Instruction::BranchZero { d, addr },
        0xD => Instruction::BranchPositive { d, addr },
        0xE => Instruction::JumpRegister { d },
        _ => Instruction::Call { d, addr },
    }
}

/// Encode an instruction back to a word.
///
/// Fields an opcode does not use are encoded as zero, so `encode` is only
/// the inverse of `decode` up to those ignored nibbles.
pub fn encode(instr: &Instruction) -> Word {
    let op = instr.opcode();
    match *instr {
        Instruction::Halt => Word::from_nibbles(op, 0, 0, 0),
        Instruction::Add { d, s, t }
        | Instruction::Sub { d, s, t }
        | Instruction::And { d, s, t }
        | Instruction::Xor { d, s, t }
        | Instruction::Shl { d, s, t }
        | Instruction::Shr { d, s, t } => Word::from_nibbles(op, d, s, t),
        Instruction::LoadImmediate { d, imm: addr }
        | Instruction::Load { d, addr }
        | Instruction::Store { d, addr }
        | Instruction::BranchZero { d, addr }
        | Instruction::BranchPositive { d, addr }
        | Instruction::Call { d, addr } => Word::from_nibbles(op, d, addr >> 4, addr & 0xF),
        Instruction::LoadIndirect { d, t } | Instruction::StoreIndirect { d, t } => {
            Word::from_nibbles(op, d, 0, t)
        }
        Instruction::JumpRegister { d } => Word::from_nibbles(op, d, 0, 0),
    }
}
