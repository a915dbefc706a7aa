// Fri Oct 16 2026 - Alex

use crate::error::Result;
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Reads a signature file: one pattern per line, blank lines and lines
/// starting with `#` are skipped.
pub fn load_patterns<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_pattern_lines(&contents))
}

pub fn parse_pattern_lines(contents: &str) -> Vec<String> {
    contents.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Bytes of one input, memory-mapped when it comes from a regular file.
pub enum CorpusBuffer {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl CorpusBuffer {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;

        if file.metadata()?.len() == 0 {
            return Ok(CorpusBuffer::Owned(Vec::new()));
        }

        let mmap = unsafe { Mmap::map(&file) }?;
        Ok(CorpusBuffer::Mapped(mmap))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(CorpusBuffer::Owned(data))
    }
}

impl AsRef<[u8]> for CorpusBuffer {
    fn as_ref(&self) -> &[u8] {
        match self {
            CorpusBuffer::Mapped(mmap) => mmap.as_ref(),
            CorpusBuffer::Owned(data) => data,
        }
    }
}
