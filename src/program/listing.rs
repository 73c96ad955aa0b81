//! Listing file format for toy machine programs.
//!
//! A listing is plain text. Every line that starts with two upper-case hex
//! digits, a colon, a space and four upper-case hex digits sets one memory
//! cell:
//!
//! ```text
//! 10: 7120   load 20 into R1
//! 11: 0000   halt
//! ```
//!
//! Every other line (comments, blank lines, malformed entries) is ignored
//! without a diagnostic.

use crate::cpu::Memory;
use crate::word::Word;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// An initial memory image: the cells a listing defines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    cells: BTreeMap<u8, Word>,
}

impl Image {
    /// Create a new empty image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell. A later value for the same address replaces the earlier one.
    pub fn set(&mut self, addr: u8, value: Word) {
        self.cells.insert(addr, value);
    }

    /// Look up a cell.
    pub fn get(&self, addr: u8) -> Option<Word> {
        self.cells.get(&addr).copied()
    }

    /// Cells in address order.
    pub fn iter(&self) -> impl Iterator<Item = (&u8, &Word)> {
        self.cells.iter()
    }

    /// Get the number of defined cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Parse one listing line into `(address, value)`.
fn parse_line(line: &str) -> Option<(u8, Word)> {
    let bytes = line.as_bytes();
    if bytes.len() < 8 || &bytes[2..4] != b": " {
        return None;
    }

    let is_digit = |b: &u8| b.is_ascii_digit() || (b'A'..=b'F').contains(b);
    if !bytes[0..2].iter().all(is_digit) || !bytes[4..8].iter().all(is_digit) {
        return None;
    }

    let addr = u8::from_str_radix(&line[0..2], 16).ok()?;
    let value = u16::from_str_radix(&line[4..8], 16).ok()?;
    Some((addr, Word::new(value)))
}

/// Parse listing text into a memory image.
pub fn parse_listing(source: &str) -> Image {
    let mut image = Image::new();

    for line in source.lines() {
        if let Some((addr, value)) = parse_line(line) {
            image.set(addr, value);
        }
    }

    image
}

/// Load a listing file from disk.
pub fn load_listing<P: AsRef<Path>>(path: P) -> Result<Image, ListingError> {
    let source = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ListingError::IoError(e.to_string()))?;
    Ok(parse_listing(&source))
}

/// Render every non-zero memory cell as a listing.
pub fn format_listing(mem: &Memory) -> String {
    let mut output = String::new();
    for (addr, value) in mem.non_zero() {
        output.push_str(&format!("{:02X}: {}\n", addr, value));
    }
    output
}

/// Save a memory image to disk in listing format.
pub fn save_listing<P: AsRef<Path>>(path: P, mem: &Memory) -> Result<(), ListingError> {
    let mut file = std::fs::File::create(path.as_ref())
        .map_err(|e| ListingError::IoError(e.to_string()))?;

    file.write_all(format_listing(mem).as_bytes())
        .map_err(|e| ListingError::IoError(e.to_string()))?;

    Ok(())
}

/// Errors that can occur while reading or writing listings.
#[derive(Debug, Clone, Error)]
pub enum ListingError {
    #[error("I/O error: {0}")]
    IoError(String),
}
