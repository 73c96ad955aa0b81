//! Execution engine.
//!
//! Implements the fetch-decode-execute cycle and every instruction's
//! behavior. Port I/O goes through a [`Console`] passed into each step.

use crate::cpu::alu::{self, AluError, AluOp};
use crate::cpu::decode::{self, Instruction, Reg};
use crate::cpu::io::Console;
use crate::cpu::memory::IO_PORT;
use crate::cpu::registers::LAST_ADDRESS;
use crate::cpu::{Memory, Registers};
use crate::disasm::format_instruction;
use crate::program::Image;
use crate::word::Word;
use log::debug;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Why the CPU stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// A halt instruction (opcode `0`) was executed.
    Instruction,
    /// The program counter moved past the last address.
    PcOverflow,
    /// A fatal error aborted the program.
    Fault,
}

/// CPU execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpuState {
    /// CPU is running normally.
    Running,
    /// CPU has stopped and will not execute further instructions.
    Halted(HaltReason),
}

/// Where the program counter goes after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Fall through to the following address.
    Next,
    /// Continue at this address.
    Jump(u32),
    /// Stop.
    Halt,
}

/// The whole machine: registers, memory and run state.
#[derive(Clone, Serialize, Deserialize)]
pub struct Cpu {
    /// Register file and program counter.
    pub regs: Registers,
    /// Main memory.
    pub mem: Memory,
    /// Current execution state.
    pub state: CpuState,
    /// Instructions fetched so far.
    pub cycles: u64,
    /// Last executed instruction (for debugging).
    last_instr: Option<Instruction>,
}

impl Cpu {
    /// Create a new CPU with zeroed state.
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            mem: Memory::new(),
            state: CpuState::Running,
            cycles: 0,
            last_instr: None,
        }
    }

    /// Create a CPU whose memory holds a loaded program image.
    pub fn with_image(image: &Image) -> Self {
        let mut cpu = Self::new();
        cpu.load_program(image);
        cpu
    }

    /// Reset the CPU to initial state.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.mem.clear();
        self.state = CpuState::Running;
        self.cycles = 0;
        self.last_instr = None;
    }

    /// Load a program image into memory.
    pub fn load_program(&mut self, image: &Image) {
        self.mem.load_image(image);
    }

    /// Execute a single instruction.
    ///
    /// Returns the instruction that was executed, or an error. Any error
    /// leaves the CPU halted with [`HaltReason::Fault`].
    pub fn step(&mut self, io: &mut dyn Console) -> Result<Instruction, CpuError> {
        self.halt_if_past_end();
        if self.state != CpuState::Running {
            return Err(CpuError::NotRunning(self.state));
        }

        let Some(pc) = self.regs.pc_address() else {
            return Err(CpuError::NotRunning(self.state));
        };

        // Fetch
        let word = self.mem.read(pc);
        self.cycles += 1;

        // Decode
        let instr = decode::decode(word);
        debug!("{:02X}: {}  {}", pc, word, format_instruction(&instr));

        // Execute
        let flow = match self.execute(pc, instr, io) {
            Ok(flow) => flow,
            Err(e) => {
                self.state = CpuState::Halted(HaltReason::Fault);
                return Err(e);
            }
        };

        match flow {
            Flow::Next => self.regs.pc = pc as u32 + 1,
            Flow::Jump(target) => self.regs.pc = target,
            Flow::Halt => self.state = CpuState::Halted(HaltReason::Instruction),
        }

        self.halt_if_past_end();

        self.last_instr = Some(instr);
        Ok(instr)
    }

    /// Halt if the program counter has left memory.
    fn halt_if_past_end(&mut self) {
        if self.state == CpuState::Running && self.regs.pc > LAST_ADDRESS {
            debug!("program counter {:X} is past the end of memory", self.regs.pc);
            self.state = CpuState::Halted(HaltReason::PcOverflow);
        }
    }

    /// Run until halt or error.
    ///
    /// Returns the number of instructions executed.
    pub fn run(&mut self, io: &mut dyn Console) -> Result<u64, CpuError> {
        let start_cycles = self.cycles;
        self.halt_if_past_end();

        while self.state == CpuState::Running {
            self.step(io)?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Run for at most `max_cycles` instructions.
    pub fn run_limited(&mut self, max_cycles: u64, io: &mut dyn Console) -> Result<u64, CpuError> {
        let start_cycles = self.cycles;
        let limit = self.cycles + max_cycles;
        self.halt_if_past_end();

        while self.state == CpuState::Running && self.cycles < limit {
            self.step(io)?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Execute a decoded instruction fetched from `pc`.
    fn execute(&mut self, pc: u8, instr: Instruction, io: &mut dyn Console) -> Result<Flow, CpuError> {
        match instr {
            Instruction::Halt => {
                debug!("halting");
                return Ok(Flow::Halt);
            }

            // ==================== Arithmetic ====================

            Instruction::Add { d, s, t } => self.alu_op(pc, AluOp::Add, d, s, t)?,
            Instruction::Sub { d, s, t } => self.alu_op(pc, AluOp::Sub, d, s, t)?,
            Instruction::And { d, s, t } => self.alu_op(pc, AluOp::And, d, s, t)?,
            Instruction::Xor { d, s, t } => self.alu_op(pc, AluOp::Xor, d, s, t)?,
            Instruction::Shl { d, s, t } => self.alu_op(pc, AluOp::Shl, d, s, t)?,
            Instruction::Shr { d, s, t } => self.alu_op(pc, AluOp::Shr, d, s, t)?,

            // ==================== Data Transfer ====================

            Instruction::LoadImmediate { d, imm } => {
                self.write_register(pc, d, Word::new(imm as u16))?;
            }

            Instruction::Load { d, addr } => {
                if addr == IO_PORT {
                    let input = self.read_port(pc, io)?;
                    self.mem.write(IO_PORT, input);
                }
                let value = self.mem.read(addr);
                self.write_register(pc, d, value)?;
            }

            Instruction::Store { d, addr } => {
                let value = self.regs.read(d);
                self.store(pc, addr, value, io)?;
            }

            Instruction::LoadIndirect { d, t } => {
                // The port only prompts for the direct load; here it is plain storage.
                let addr = self.regs.read(t).low_byte();
                let value = self.mem.read(addr);
                self.write_register(pc, d, value)?;
            }

            Instruction::StoreIndirect { d, t } => {
                let addr = self.regs.read(t).low_byte();
                let value = self.regs.read(d);
                self.store(pc, addr, value, io)?;
            }

            // ==================== Control Flow ====================

            Instruction::BranchZero { d, addr } => {
                let value = self.regs.read(d).to_signed();
                if value == 0 {
                    debug!("R{:X} is zero, branching to {:02X}", d, addr);
                    return Ok(Flow::Jump(addr as u32));
                }
            }

            Instruction::BranchPositive { d, addr } => {
                let value = self.regs.read(d).to_signed();
                if value > 0 {
                    debug!("R{:X} is positive ({}), branching to {:02X}", d, value, addr);
                    return Ok(Flow::Jump(addr as u32));
                }
            }

            Instruction::JumpRegister { d } => {
                // Lands one past the address held in R[d], so a return through
                // the address saved by a call resumes after the call.
                let target = self.regs.read(d).raw() as u32 + 1;
                debug!("jumping to {:02X}", target);
                return Ok(Flow::Jump(target));
            }

            Instruction::Call { d, addr } => {
                self.write_register(pc, d, Word::new(pc as u16))?;
                debug!("saved {:02X} in R{:X}, calling {:02X}", pc, d, addr);
                return Ok(Flow::Jump(addr as u32));
            }
        }

        Ok(Flow::Next)
    }

    /// Compute R[s] op R[t] on signed operands and commit it to R[d].
    fn alu_op(&mut self, pc: u8, op: AluOp, d: Reg, s: Reg, t: Reg) -> Result<(), CpuError> {
        let a = self.regs.read(s).to_signed();
        let b = self.regs.read(t).to_signed();
        let result = alu::compute(op, a, b).map_err(|e| match e {
            AluError::Overflow(value) => CpuError::ArithmeticOverflow { pc, value },
            AluError::NegativeShift(count) => CpuError::NegativeShift { pc, count },
        })?;
        self.write_register(pc, d, result)
    }

    fn write_register(&mut self, pc: u8, d: Reg, value: Word) -> Result<(), CpuError> {
        self.regs
            .write(d, value)
            .map_err(|_| CpuError::ReservedRegisterWrite { pc })
    }

    /// Store to memory, reporting the value when the target is the port.
    fn store(&mut self, pc: u8, addr: u8, value: Word, io: &mut dyn Console) -> Result<(), CpuError> {
        if addr == IO_PORT {
            io.write_output(value)
                .map_err(|source| CpuError::Io { pc, source })?;
        }
        self.mem.write(addr, value);
        Ok(())
    }

    /// Prompt for one line of port input and parse it as a hex word.
    fn read_port(&mut self, pc: u8, io: &mut dyn Console) -> Result<Word, CpuError> {
        let line = io.read_input().map_err(|source| CpuError::Io { pc, source })?;
        Word::parse_hex(&line).map_err(|_| CpuError::InvalidInput { pc, input: line })
    }

    /// Get the last executed instruction.
    pub fn last_instruction(&self) -> Option<Instruction> {
        self.last_instr
    }

    /// Check if the CPU is halted.
    pub fn is_halted(&self) -> bool {
        matches!(self.state, CpuState::Halted(_))
    }

    /// Check if the CPU is running.
    pub fn is_running(&self) -> bool {
        self.state == CpuState::Running
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("state", &self.state)
            .field("cycles", &self.cycles)
            .field("regs", &self.regs)
            .finish()
    }
}

/// Errors that can occur during CPU execution. All of them are fatal.
#[derive(Debug, Error)]
pub enum CpuError {
    #[error("CPU not running: {0:?}")]
    NotRunning(CpuState),

    #[error("error at {pc:02X}: operation outside the range of -32768 and 32767 ({value})")]
    ArithmeticOverflow { pc: u8, value: i64 },

    #[error("error at {pc:02X}: register 0 is reserved")]
    ReservedRegisterWrite { pc: u8 },

    #[error("error at {pc:02X}: negative shift count {count}")]
    NegativeShift { pc: u8, count: i16 },

    #[error("error at {pc:02X}: input {input:?} is not a hex word")]
    InvalidInput { pc: u8, input: String },

    #[error("error at {pc:02X}: port I/O failed: {source}")]
    Io {
        pc: u8,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::io::ScriptedConsole;
    use crate::cpu::registers::ENTRY_POINT;
    use crate::program::parse_listing;

    fn boot(listing: &str) -> Cpu {
        Cpu::with_image(&parse_listing(listing))
    }

    fn run(cpu: &mut Cpu) -> Result<u64, CpuError> {
        cpu.run(&mut ScriptedConsole::default())
    }

    #[test]
    fn test_cpu_halt() {
        let mut cpu = boot("10: 0000\n");

        let executed = run(&mut cpu).unwrap();

        assert_eq!(executed, 1);
        assert_eq!(cpu.state, CpuState::Halted(HaltReason::Instruction));
        assert_eq!(cpu.regs.pc, ENTRY_POINT);
        assert_eq!(cpu.regs, Registers::new());
        assert_eq!(cpu.mem, Memory::new());
    }

    #[test]
    fn test_load_immediate_then_halt() {
        let mut cpu = boot("10: 7120\n11: 0000\n");

        let executed = run(&mut cpu).unwrap();

        assert_eq!(executed, 2);
        assert_eq!(cpu.regs.read(1), Word::new(0x0020));
        assert!(cpu.is_halted());
        assert_eq!(cpu.last_instruction(), Some(Instruction::Halt));
    }

    #[test]
    fn test_cpu_arithmetic() {
        // R1 = 0x30, R2 = 0x12, R3 = R1 - R2, R4 = R3 & R1, R5 = R1 ^ R2
        let mut cpu = boot(
            "10: 7130\n11: 7212\n12: 2312\n13: 3431\n14: 4512\n15: 7602\n16: 5716\n17: 6876\n18: 0000\n",
        );

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.read(3).to_signed(), 0x30 - 0x12);
        assert_eq!(cpu.regs.read(4).to_signed(), 0x1E & 0x30);
        assert_eq!(cpu.regs.read(5).to_signed(), 0x30 ^ 0x12);
        assert_eq!(cpu.regs.read(7).to_signed(), 0x30 << 2);
        assert_eq!(cpu.regs.read(8).to_signed(), 0x30);
    }

    #[test]
    fn test_subtract_goes_negative() {
        let mut cpu = boot("10: 7101\n11: 7203\n12: 2312\n13: 0000\n");

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.read(3), Word::new(0xFFFE));
        assert_eq!(cpu.regs.read(3).to_signed(), -2);
    }

    #[test]
    fn test_add_at_range_limit_succeeds() {
        let mut cpu = boot("00: 7FFE\n01: 0001\n10: 8100\n11: 8201\n12: 1312\n13: 0000\n");

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.read(3).to_signed(), 32767);
    }

    #[test]
    fn test_sub_at_range_limit_succeeds() {
        let mut cpu = boot("00: 8001\n01: 0001\n10: 8100\n11: 8201\n12: 2312\n13: 0000\n");

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.read(3).to_signed(), -32768);
    }

    #[test]
    fn test_add_overflow_is_fatal() {
        let mut cpu = boot("00: 7FFF\n01: 0001\n10: 8100\n11: 8201\n12: 1312\n13: 0000\n");

        let err = run(&mut cpu).unwrap_err();

        assert!(matches!(err, CpuError::ArithmeticOverflow { pc: 0x12, value: 32768 }));
        assert_eq!(cpu.regs.read(3), Word::zero());
        assert_eq!(cpu.state, CpuState::Halted(HaltReason::Fault));
        assert!(matches!(
            cpu.step(&mut ScriptedConsole::default()),
            Err(CpuError::NotRunning(CpuState::Halted(HaltReason::Fault)))
        ));
        assert_eq!(run(&mut cpu).unwrap(), 0);
    }

    #[test]
    fn test_sub_underflow_is_fatal() {
        let mut cpu = boot("00: 8000\n01: 0001\n10: 8100\n11: 8201\n12: 2312\n13: 0000\n");

        let err = run(&mut cpu).unwrap_err();

        assert!(matches!(err, CpuError::ArithmeticOverflow { pc: 0x12, value: -32769 }));
    }

    #[test]
    fn test_negative_shift_is_fatal() {
        let mut cpu = boot("00: FFFF\n10: 8100\n11: 7201\n12: 5321\n");

        let err = run(&mut cpu).unwrap_err();

        assert!(matches!(err, CpuError::NegativeShift { pc: 0x12, count: -1 }));
    }

    #[test]
    fn test_register_zero_writes_are_fatal() {
        // ALU, load immediate, load, indirect load and call all target R[d].
        for word in ["1012", "7020", "8005", "A003", "F030"] {
            let mut cpu = boot(&format!("10: {}\n11: 0000\n", word));

            let err = run(&mut cpu).unwrap_err();

            assert!(
                matches!(err, CpuError::ReservedRegisterWrite { pc: 0x10 }),
                "{} gave {:?}",
                word,
                err
            );
            assert_eq!(cpu.regs.read(0), Word::zero());
        }
    }

    #[test]
    fn test_load_and_store() {
        let mut cpu = boot("00: 1234\n10: 8100\n11: 9140\n12: 0000\n");

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.read(1), Word::new(0x1234));
        assert_eq!(cpu.mem.read(0x40), Word::new(0x1234));
    }

    #[test]
    fn test_indirect_load_and_store() {
        let mut cpu = boot(
            "05: BEEF\n10: 7305\n11: A103\n12: 7442\n13: B104\n14: 0000\n",
        );

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.read(1), Word::new(0xBEEF));
        assert_eq!(cpu.mem.read(0x42), Word::new(0xBEEF));
    }

    #[test]
    fn test_indirect_address_uses_low_byte() {
        // R3 = 0x0100 + 0x05 via a shift; only the low byte addresses memory.
        let mut cpu = boot(
            "05: 00AB\n10: 7101\n11: 7208\n12: 5312\n13: 7405\n14: 1334\n15: A503\n16: 0000\n",
        );

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.read(3), Word::new(0x0105));
        assert_eq!(cpu.regs.read(5), Word::new(0x00AB));
    }

    #[test]
    fn test_branch_zero_taken_lands_on_target() {
        // 11 would fault; 1F would fault; the branch must land exactly on 20.
        let mut cpu = boot("10: C120\n11: 7099\n1F: 7099\n20: 7201\n21: 0000\n");

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.read(2), Word::new(1));
        assert_eq!(cpu.regs.pc, 0x21);
        assert_eq!(cpu.cycles, 3);
    }

    #[test]
    fn test_branch_zero_not_taken_falls_through() {
        let mut cpu = Cpu::with_image(&parse_listing("10: C120\n11: 0000\n20: 7099\n"));
        cpu.regs.write(1, Word::new(1)).unwrap();

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.pc, 0x11);
        assert_eq!(cpu.cycles, 2);
    }

    #[test]
    fn test_branch_positive() {
        // R1 = 1 branches, R2 = -1 does not.
        let mut cpu = Cpu::with_image(&parse_listing(
            "10: D230\n11: D120\n12: 7099\n20: 0000\n30: 7099\n",
        ));
        cpu.regs.write(1, Word::new(1)).unwrap();
        cpu.regs.write(2, Word::from_signed(-1)).unwrap();

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.pc, 0x20);
        assert_eq!(cpu.cycles, 3);
    }

    #[test]
    fn test_branch_positive_on_zero_falls_through() {
        let mut cpu = boot("10: D120\n11: 0000\n20: 7099\n");

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.pc, 0x11);
    }

    #[test]
    fn test_jump_register_lands_one_past_target() {
        // R2 holds 1F, yet execution continues at 20: the off-by-one is kept.
        let mut cpu = boot("10: 721F\n11: E200\n1F: 7099\n20: 7301\n21: 0000\n");

        run(&mut cpu).unwrap();

        assert_eq!(cpu.regs.read(3), Word::new(1));
        assert_eq!(cpu.regs.pc, 0x21);
    }

    #[test]
    fn test_call_and_return() {
        let mut cpu = boot("10: F530\n11: 0000\n30: 7107\n31: E500\n");

        let executed = run(&mut cpu).unwrap();

        assert_eq!(executed, 4);
        assert_eq!(cpu.regs.read(5), Word::new(0x0010));
        assert_eq!(cpu.regs.read(1), Word::new(7));
        assert_eq!(cpu.regs.pc, 0x11);
    }

    #[test]
    fn test_pc_overflow_halts() {
        let mut cpu = boot("10: C0FF\nFF: 7101\n");

        let executed = run(&mut cpu).unwrap();

        assert_eq!(executed, 2);
        assert_eq!(cpu.state, CpuState::Halted(HaltReason::PcOverflow));
        assert_eq!(cpu.regs.read(1), Word::new(1));
        assert_eq!(cpu.regs.pc, 0x100);
    }

    #[test]
    fn test_pc_already_past_memory_is_a_halt() {
        let mut cpu = boot("10: 7101\n");
        cpu.regs.pc = 0x100;

        assert_eq!(run(&mut cpu).unwrap(), 0);
        assert_eq!(cpu.state, CpuState::Halted(HaltReason::PcOverflow));
        assert_eq!(cpu.cycles, 0);

        let mut cpu = boot("10: 7101\n");
        cpu.regs.pc = 0x1FF;
        let executed = cpu.run_limited(10, &mut ScriptedConsole::default()).unwrap();

        assert_eq!(executed, 0);
        assert_eq!(cpu.state, CpuState::Halted(HaltReason::PcOverflow));
        assert!(matches!(
            cpu.step(&mut ScriptedConsole::default()),
            Err(CpuError::NotRunning(CpuState::Halted(HaltReason::PcOverflow)))
        ));
    }

    #[test]
    fn test_jump_register_past_memory_halts() {
        let mut cpu = boot("00: 0100\n10: 8100\n11: E100\n");

        run(&mut cpu).unwrap();

        assert_eq!(cpu.state, CpuState::Halted(HaltReason::PcOverflow));
        assert_eq!(cpu.regs.pc, 0x101);
    }

    #[test]
    fn test_store_to_port_emits_output() {
        let mut cpu = boot("10: 7105\n11: 91FF\n12: 0000\n");
        let mut console = ScriptedConsole::default();

        cpu.run(&mut console).unwrap();

        assert_eq!(console.outputs, vec![Word::new(5)]);
        assert_eq!(console.transcript(), vec!["> 0005, 5".to_string()]);
        assert_eq!(cpu.mem.read(IO_PORT), Word::new(5));
    }

    #[test]
    fn test_indirect_store_to_port_emits_output() {
        let mut cpu = boot("00: FFFD\n10: 8100\n11: 72FF\n12: B102\n13: 0000\n");
        let mut console = ScriptedConsole::default();

        cpu.run(&mut console).unwrap();

        assert_eq!(console.transcript(), vec!["> FFFD, -3".to_string()]);
    }

    #[test]
    fn test_load_from_port_reads_input() {
        let mut cpu = boot("10: 81FF\n11: 82FF\n12: 1312\n13: 93FF\n14: 0000\n");
        let mut console = ScriptedConsole::new(["002A", "3"]);

        cpu.run(&mut console).unwrap();

        assert_eq!(console.reads, 2);
        assert_eq!(cpu.regs.read(1), Word::new(0x2A));
        assert_eq!(cpu.regs.read(2), Word::new(3));
        assert_eq!(console.outputs, vec![Word::new(0x2D)]);
    }

    #[test]
    fn test_indirect_load_from_port_does_not_prompt() {
        let mut cpu = boot("FF: 0042\n10: 73FF\n11: A103\n12: 0000\n");
        let mut console = ScriptedConsole::default();

        cpu.run(&mut console).unwrap();

        assert_eq!(console.reads, 0);
        assert_eq!(cpu.regs.read(1), Word::new(0x42));
    }

    #[test]
    fn test_port_input_errors() {
        let mut cpu = boot("10: 81FF\n11: 0000\n");
        let err = cpu.run(&mut ScriptedConsole::new(["hello"])).unwrap_err();
        assert!(matches!(err, CpuError::InvalidInput { pc: 0x10, ref input } if input == "hello"));

        let mut cpu = boot("10: 81FF\n11: 0000\n");
        let err = cpu.run(&mut ScriptedConsole::default()).unwrap_err();
        assert!(matches!(err, CpuError::Io { pc: 0x10, .. }));
    }

    #[test]
    fn test_run_limited_stops_infinite_loop() {
        let mut cpu = boot("10: C010\n");

        let executed = cpu.run_limited(100, &mut ScriptedConsole::default()).unwrap();

        assert_eq!(executed, 100);
        assert!(cpu.is_running());
    }

    #[test]
    fn test_countdown_loop() {
        // R1 = 5; loop: R1 -= 1 (R2 = 1), print R1, branch back while positive.
        let mut cpu = boot("10: 7105\n11: 7201\n12: 2112\n13: 91FF\n14: D112\n15: 0000\n");
        let mut console = ScriptedConsole::default();

        cpu.run(&mut console).unwrap();

        let printed: Vec<i16> = console.outputs.iter().map(|w| w.to_signed()).collect();
        assert_eq!(printed, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_reset() {
        let mut cpu = boot("10: 7120\n11: 0000\n");
        run(&mut cpu).unwrap();

        cpu.reset();

        assert!(cpu.is_running());
        assert_eq!(cpu.cycles, 0);
        assert_eq!(cpu.regs, Registers::new());
        assert_eq!(cpu.last_instruction(), None);
    }

    #[test]
    fn test_state_serializes() {
        let mut cpu = boot("10: 7120\n11: 0000\n");
        run(&mut cpu).unwrap();

        let json = serde_json::to_string(&cpu).unwrap();
        let back: Cpu = serde_json::from_str(&json).unwrap();

        assert_eq!(back.regs, cpu.regs);
        assert_eq!(back.mem, cpu.mem);
        assert_eq!(back.state, cpu.state);
    }
}
