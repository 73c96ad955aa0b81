//! CPU emulation for the toy machine.
//!
//! - 16 sixteen-bit registers, `R0` hard-wired to zero
//! - 256 memory cells, `FF` mapped to the console
//! - 16 opcodes, execution starting at address `10`

pub mod memory;
pub mod registers;
pub mod alu;
pub mod decode;
pub mod io;
pub mod execute;

pub use memory::{Memory, MemorySizeError, IO_PORT};
pub use registers::Registers;
pub use alu::{AluOp, AluError};
pub use decode::{Instruction, decode, encode};
pub use io::{Console, StdConsole, ScriptedConsole};
pub use execute::{Cpu, CpuError, CpuState, HaltReason};
