//! # Toy Machine
//!
//! A simulator for a minimal fixed-width instruction-set computer: sixteen
//! 16-bit registers, 256 words of memory, a program counter starting at
//! `10`, and one memory-mapped I/O port at `FF`.
//!
//! Programs are loaded from text listings of `AA: BBBB` lines and run to
//! completion, an explicit halt, or the first fatal error.

pub mod word;
pub mod cpu;
pub mod program;
pub mod disasm;

// Re-export commonly used types
pub use word::Word;
pub use cpu::{Cpu, CpuState, CpuError, HaltReason, Memory, Registers, Instruction, Console, StdConsole, ScriptedConsole};
pub use program::{Image, ListingError, parse_listing, load_listing};
