//! Reader for ZX Spectrum TAP tape images
//!
//! A TAP file is a flat sequence of blocks, each stored as a little-endian `u16` length followed
//! by that many bytes. Every block begins with a flag byte (0x00 for headers, 0xFF for data by
//! convention) and ends with an XOR checksum over the flag and payload.

pub mod header;


pub use header::{HEADER_BLOCK_LEN, HeaderType, TapHeader};

use std::path::Path;
use std::{fs, io};
use thiserror::Error;

// 6144 bitmap bytes + 768 attribute bytes
pub const SCREEN_DATA_LEN: usize = 6912;

#[derive(Debug, Error)]
pub enum TapError {
    #[error("Error opening TAP file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub type TapResult<T> = Result<T, TapError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapBlock {
    pub index: usize,
    data: Vec<u8>,
}

impl TapBlock {
    #[must_use]
    pub fn new(index: usize, data: Vec<u8>) -> Self {
        Self { index, data }
    }

    /// Full block contents, including the flag and checksum bytes.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flag byte; an empty block reads as flag 0x00.
    #[must_use]
    pub fn flag(&self) -> u8 {
        self.data.first().copied().unwrap_or(0)
    }

    /// Block contents with the flag and checksum stripped. Blocks too short to carry both are
    /// returned whole.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        if self.data.len() > 2 { &self.data[1..self.data.len() - 1] } else { &self.data }
    }

    /// Stored checksum byte, if the block is long enough to have one.
    #[must_use]
    pub fn checksum(&self) -> Option<u8> {
        if self.data.len() >= 2 { self.data.last().copied() } else { None }
    }

    /// XOR of every byte preceding the checksum.
    #[must_use]
    pub fn computed_checksum(&self) -> u8 {
        let checked_len = self.data.len().saturating_sub(1);
        self.data[..checked_len].iter().fold(0, |acc, &byte| acc ^ byte)
    }

    /// Returns the stored and computed checksums if they disagree.
    #[must_use]
    pub fn checksum_mismatch(&self) -> Option<(u8, u8)> {
        let stored = self.checksum()?;
        let computed = self.computed_checksum();
        (stored != computed).then_some((stored, computed))
    }

    /// True if the stored checksum matches, or if the block has no checksum byte at all.
    #[must_use]
    pub fn checksum_valid(&self) -> bool {
        self.checksum_mismatch().is_none()
    }
}

/// A header paired with the data block it describes, or a lone block with no header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapEntry<'a> {
    /// Index of the first block in this entry
    pub index: usize,
    pub header: Option<TapHeader>,
    pub data: &'a TapBlock,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TapFile {
    blocks: Vec<TapBlock>,
}

impl TapFile {
    /// Reads and parses the TAP file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> TapResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|source| TapError::Open { path: path.display().to_string(), source })?;

        log::debug!("Read {} bytes from '{}'", bytes.len(), path.display());

        Ok(Self::from_bytes(&bytes))
    }

    /// Splits `bytes` into blocks.
    ///
    /// Parsing is lenient: a block whose declared length runs past the end of the input is kept
    /// with whatever bytes remain, and a single trailing byte that cannot hold a length is
    /// ignored. Both cases are logged.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut blocks = Vec::new();
        let mut remaining = bytes;

        while !remaining.is_empty() {
            let [lsb, msb, rest @ ..] = remaining else {
                log::warn!("Ignoring {} trailing byte(s) at end of TAP data", remaining.len());
                break;
            };

            let declared_len = usize::from(u16::from_le_bytes([*lsb, *msb]));
            let block_len = declared_len.min(rest.len());
            if block_len < declared_len {
                log::warn!(
                    "TAP block {} declares {declared_len} bytes but only {block_len} remain",
                    blocks.len()
                );
            }

            let block = TapBlock::new(blocks.len(), rest[..block_len].to_vec());
            log::debug!(
                "TAP block {}: flag={:02X}, length={}",
                block.index,
                block.flag(),
                block.len()
            );
            if let Some((stored, computed)) = block.checksum_mismatch() {
                log::warn!(
                    "TAP block {} checksum mismatch: stored {stored:02X}, computed {computed:02X}",
                    block.index
                );
            }

            blocks.push(block);
            remaining = &rest[block_len..];
        }

        Self { blocks }
    }

    #[must_use]
    pub fn blocks(&self) -> &[TapBlock] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Groups blocks into entries. A header block is paired with the block immediately after it;
    /// a header at the end of the file, or any block that is not a header, forms an entry on its
    /// own.
    #[must_use]
    pub fn entries(&self) -> Vec<TapEntry<'_>> {
        let mut entries = Vec::new();

        let mut i = 0;
        while i < self.blocks.len() {
            let block = &self.blocks[i];
            match (TapHeader::parse(block), self.blocks.get(i + 1)) {
                (Some(header), Some(data)) => {
                    entries.push(TapEntry { index: i, header: Some(header), data });
                    i += 2;
                }
                _ => {
                    entries.push(TapEntry { index: i, header: None, data: block });
                    i += 1;
                }
            }
        }

        entries
    }
}
