//! Disassembler for toy machine programs.
//!
//! Renders instruction words as mnemonics for traces and listings.

use crate::cpu::alu::AluOp;
use crate::cpu::decode::{decode, Instruction, Reg};
use crate::program::Image;
use crate::word::Word;

/// Disassemble a single instruction word to text.
pub fn disassemble_instruction(word: Word) -> String {
    format_instruction(&decode(word))
}

/// Disassemble every cell a program image defines.
pub fn disassemble(image: &Image) -> String {
    let mut output = String::new();
    output.push_str("; Toy Machine Disassembly\n");
    output.push_str("; -----------------------\n\n");

    for (addr, &word) in image.iter() {
        let line = disassemble_instruction(word);
        output.push_str(&format!("{:02X}: {}  ; {}\n", addr, word, line));
    }

    output
}

/// Format a decoded instruction as assembly text.
pub fn format_instruction(instr: &Instruction) -> String {
    match *instr {
        Instruction::Halt => "HLT".to_string(),

        // Arithmetic
        Instruction::Add { d, s, t } => format_alu(AluOp::Add, d, s, t),
        Instruction::Sub { d, s, t } => format_alu(AluOp::Sub, d, s, t),
        Instruction::And { d, s, t } => format_alu(AluOp::And, d, s, t),
        Instruction::Xor { d, s, t } => format_alu(AluOp::Xor, d, s, t),
        Instruction::Shl { d, s, t } => format_alu(AluOp::Shl, d, s, t),
        Instruction::Shr { d, s, t } => format_alu(AluOp::Shr, d, s, t),

        // Transfer
        Instruction::LoadImmediate { d, imm } => format!("LDI R{:X}, {:02X}", d, imm),
        Instruction::Load { d, addr } => format!("LD R{:X}, [{:02X}]", d, addr),
        Instruction::Store { d, addr } => format!("ST R{:X}, [{:02X}]", d, addr),
        Instruction::LoadIndirect { d, t } => format!("LD R{:X}, [R{:X}]", d, t),
        Instruction::StoreIndirect { d, t } => format!("ST R{:X}, [R{:X}]", d, t),

        // Control
        Instruction::BranchZero { d, addr } => format!("JZ R{:X}, {:02X}", d, addr),
        Instruction::BranchPositive { d, addr } => format!("JP R{:X}, {:02X}", d, addr),
        Instruction::JumpRegister { d } => format!("JR R{:X}", d),
        Instruction::Call { d, addr } => format!("CALL R{:X}, {:02X}", d, addr),
    }
}

fn format_alu(op: AluOp, d: Reg, s: Reg, t: Reg) -> String {
    format!("{} R{:X}, R{:X}, R{:X}", op.mnemonic(), d, s, t)
}
