//! Main memory: 256 sixteen-bit cells addressed `00`-`FF`.
//!
//! Cell `FF` doubles as the I/O port. The array itself only stores words;
//! the engine performs the port's prompt and display side effects.

use crate::program::Image;
use crate::word::Word;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// The number of memory cells.
pub const MEMORY_SIZE: usize = 256;

/// Address of the memory-mapped I/O port.
pub const IO_PORT: u8 = 0xFF;

/// Machine memory: 256 word cells, all zero at power-on.
///
/// Serialized as a plain array of cells; deserializing checks the length.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Word>", into = "Vec<Word>")]
pub struct Memory {
    cells: Vec<Word>,
}

impl Memory {
    /// Create a new memory with all cells zeroed.
    pub fn new() -> Self {
        Self {
            cells: vec![Word::zero(); MEMORY_SIZE],
        }
    }

    /// Read a cell.
    #[inline]
    pub fn read(&self, addr: u8) -> Word {
        self.cells[addr as usize]
    }

    /// Write a cell.
    #[inline]
    pub fn write(&mut self, addr: u8, value: Word) {
        self.cells[addr as usize] = value;
    }

    /// Clear all memory to zeros.
    pub fn clear(&mut self) {
        self.cells.fill(Word::zero());
    }

    /// Copy every cell defined by a loaded listing into memory.
    pub fn load_image(&mut self, image: &Image) {
        for (&addr, &value) in image.iter() {
            self.write(addr, value);
        }
    }

    /// Dump memory contents (for debugging).
    pub fn dump(&self, start: usize, count: usize) -> Vec<(u8, Word)> {
        let end = (start + count).min(MEMORY_SIZE);
        (start..end)
            .map(|i| (i as u8, self.cells[i]))
            .collect()
    }

    /// Iterate over the cells holding something other than zero.
    pub fn non_zero(&self) -> impl Iterator<Item = (u8, Word)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_zero())
            .map(|(i, cell)| (i as u8, *cell))
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Word>> for Memory {
    type Error = MemorySizeError;

    fn try_from(cells: Vec<Word>) -> Result<Self, Self::Error> {
        if cells.len() != MEMORY_SIZE {
            return Err(MemorySizeError(cells.len()));
        }
        Ok(Self { cells })
    }
}

impl From<Memory> for Vec<Word> {
    fn from(mem: Memory) -> Self {
        mem.cells
    }
}

/// A cell array of the wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("memory has {0} cells, expected 256")]
pub struct MemorySizeError(pub usize);

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("non_zero_cells", &self.non_zero().count())
            .field("total_cells", &MEMORY_SIZE)
            .finish()
    }
}
