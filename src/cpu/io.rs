//! The I/O port's link to the outside world.
//!
//! Reading the port with the load-input instruction asks a [`Console`] for
//! one line; storing to the port hands the word to the console for display.

use crate::word::Word;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Source of port input and sink of port output.
pub trait Console {
    /// Block until one line of input is available and return it without the
    /// line terminator.
    fn read_input(&mut self) -> io::Result<String>;

    /// Report a word written to the port.
    fn write_output(&mut self, value: Word) -> io::Result<()>;
}

/// Render a port output event: raw hex, then the signed decimal value.
pub fn format_output(value: Word) -> String {
    format!("> {}, {}", value, value.to_signed())
}

/// Console on the process's standard input and output.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    /// Create a console bound to stdin/stdout.
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn read_input(&mut self) -> io::Result<String> {
        let mut out = io::stdout().lock();
        write!(out, ": ")?;
        out.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn write_output(&mut self, value: Word) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", format_output(value))?;
        out.flush()
    }
}

/// Console fed from a queue of lines, recording every output word.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    /// Words written to the port, oldest first.
    pub outputs: Vec<Word>,
    /// How many input lines have been consumed.
    pub reads: usize,
}

impl ScriptedConsole {
    /// Create a console that will answer reads with `inputs` in order.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: Vec::new(),
            reads: 0,
        }
    }

    /// Output events rendered as the standard console would print them.
    pub fn transcript(&self) -> Vec<String> {
        self.outputs.iter().map(|w| format_output(*w)).collect()
    }
}

impl Console for ScriptedConsole {
    fn read_input(&mut self) -> io::Result<String> {
        let line = self
            .inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted input left"))?;
        self.reads += 1;
        Ok(line)
    }

    fn write_output(&mut self, value: Word) -> io::Result<()> {
        self.outputs.push(value);
        Ok(())
    }
}
