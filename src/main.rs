//! Toy Machine - CLI Entry Point
//!
//! Usage:
//! - `toy-machine <program>` - Run a listing until it halts
//! - `toy-machine <program> 1` - Run with a per-instruction trace
//! - `toy-machine` - Prompt for the listing's file name

use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use toy::{Cpu, CpuState, HaltReason, Image, StdConsole};

#[derive(Parser)]
#[command(name = "toy-machine")]
#[command(version = "0.1.0")]
#[command(about = "Simulator for a 16-register, 256-word toy computer")]
struct Cli {
    /// Path to the program listing (prompted for if omitted)
    program: Option<PathBuf>,

    /// Pass `1` to trace every instruction
    debug: Option<String>,

    /// Trace every instruction (same as passing `1` after the program)
    #[arg(short, long)]
    trace: bool,

    /// Stop after this many instructions
    #[arg(short, long)]
    max_cycles: Option<u64>,

    /// Write the final machine state as JSON to this file
    #[arg(long)]
    dump_state: Option<PathBuf>,

    /// Write the final non-zero memory cells as a listing to this file
    #[arg(long)]
    save_memory: Option<PathBuf>,

    /// Print the disassembly of the loaded program instead of running it
    #[arg(long)]
    disasm: bool,
}

fn main() {
    let cli = Cli::parse();
    let trace = cli.trace || cli.debug.as_deref() == Some("1");

    init_logging(trace);

    let path = match cli.program {
        Some(path) => path,
        None => prompt_file_name(),
    };

    let image = match toy::load_listing(&path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("❌ Failed to load {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    if cli.disasm {
        disassemble_image(&image);
        return;
    }

    let outputs = Outputs {
        state: cli.dump_state,
        memory: cli.save_memory,
    };
    run_program(&image, cli.max_cycles, trace, &outputs);
}

fn init_logging(trace: bool) {
    let level = if trace { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = SimpleLogger::new()
        .with_level(level)
        .without_timestamps()
        .init()
    {
        eprintln!("⚠️  Logging unavailable: {}", e);
    }
}

fn prompt_file_name() -> PathBuf {
    print!("File name: ");
    if let Err(e) = io::stdout().flush() {
        eprintln!("❌ Failed to write prompt: {}", e);
        std::process::exit(1);
    }

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => {
            eprintln!("❌ No file name given");
            std::process::exit(1);
        }
        Ok(_) => PathBuf::from(line.trim()),
        Err(e) => {
            eprintln!("❌ Failed to read file name: {}", e);
            std::process::exit(1);
        }
    }
}

/// Files written once the run ends, whether it halted or faulted.
struct Outputs {
    state: Option<PathBuf>,
    memory: Option<PathBuf>,
}

fn run_program(image: &Image, max_cycles: Option<u64>, trace: bool, outputs: &Outputs) {
    let mut cpu = Cpu::with_image(image);
    let mut console = StdConsole::new();

    let result = match max_cycles {
        Some(limit) => cpu.run_limited(limit, &mut console),
        None => cpu.run(&mut console),
    };

    if let Some(path) = &outputs.state {
        dump_state(&cpu, path);
    }
    if let Some(path) = &outputs.memory {
        if let Err(e) = toy::program::save_listing(path, &cpu.mem) {
            eprintln!("❌ Failed to save memory to {}: {}", path.display(), e);
        }
    }

    let cycles = match result {
        Ok(cycles) => cycles,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if trace {
        print_summary(&cpu, cycles);
    }

    if let Some(limit) = max_cycles {
        if cpu.is_running() {
            eprintln!("⚠️  Reached max cycles limit ({}).", limit);
        }
    }
}

fn print_summary(cpu: &Cpu, cycles: u64) {
    println!();
    println!("━━━ Result ━━━");
    println!("Cycles: {}", cycles);
    match cpu.state {
        CpuState::Running => println!("State: running"),
        CpuState::Halted(HaltReason::Instruction) => println!("State: halted"),
        CpuState::Halted(HaltReason::PcOverflow) => println!("State: ran off the end of memory"),
        CpuState::Halted(HaltReason::Fault) => println!("State: faulted"),
    }
    println!("PC: {:02X}", cpu.regs.pc);
    for (idx, value) in cpu.regs.all().iter().enumerate() {
        println!("R{:X}: {} ({})", idx, value, value.to_signed());
    }
}

fn dump_state(cpu: &Cpu, path: &Path) {
    let json = match serde_json::to_string_pretty(cpu) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("❌ Failed to serialize state: {}", e);
            return;
        }
    };

    if let Err(e) = std::fs::write(path, json) {
        eprintln!("❌ Failed to write {}: {}", path.display(), e);
    }
}

fn disassemble_image(image: &Image) {
    print!("{}", toy::disasm::disassemble(image));
}
