//! The .mpk envelope: a fixed header followed by length-prefixed,
//! independently decodable mesh records.
//!
//! ```text
//! [0..4]   magic b"MPAK"
//! [4..6]   format version, u16 little-endian
//! [6..10]  record count, u32 little-endian
//! then per record:
//!   u64 little-endian payload length, followed by the bincode payload
//! ```

use crate::error::FormatError;
use crate::record::{AssetDocument, MeshRecord};

/// Magic number identifying .mpk files.
pub const MAGIC: [u8; 4] = *b"MPAK";

/// Current format version.
pub const VERSION: u16 = 1;

const HEADER_SIZE: usize = 10;
const FRAME_SIZE: usize = 8;

/// Encode a complete document to its on-wire form.
pub fn encode_document(document: &AssetDocument) -> Result<Vec<u8>, FormatError> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&(document.meshes.len() as u32).to_le_bytes());

    for record in &document.meshes {
        let payload = bincode::serialize(record)
            .map_err(|e| FormatError::Encode(record.name.clone(), e.to_string()))?;
        bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&payload);
    }

    Ok(bytes)
}

/// Decode a complete document from its on-wire form.
pub fn decode_document(bytes: &[u8]) -> Result<AssetDocument, FormatError> {
    let reader = RecordReader::new(bytes)?;
    let meshes = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(AssetDocument { meshes })
}

/// Streaming reader over the records of an encoded document.
///
/// The header is validated once up front. Each record then decodes from its
/// own frame, so records can be read, skipped, or rejected without touching
/// their siblings' payloads.
///
/// A frame that cannot be read fuses the reader: the error is yielded once
/// and iteration ends.
#[derive(Debug)]
pub struct RecordReader<'a> {
    bytes: &'a [u8],
    offset: usize,
    version: u16,
    record_count: u32,
    remaining: u32,
}

impl<'a> RecordReader<'a> {
    /// Validate the envelope header and position the reader at the first
    /// record.
    pub fn new(bytes: &'a [u8]) -> Result<Self, FormatError> {
        if bytes.len() < HEADER_SIZE {
            return Err(FormatError::Truncated);
        }
        if bytes[0..4] != MAGIC {
            let mut found = [0u8; 4];
            found.copy_from_slice(&bytes[0..4]);
            return Err(FormatError::BadMagic(found));
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(FormatError::UnsupportedVersion(version));
        }
        let record_count = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);

        Ok(Self {
            bytes,
            offset: HEADER_SIZE,
            version,
            record_count,
            remaining: record_count,
        })
    }

    /// Format version the file was written with.
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Total number of records in the document.
    pub fn record_count(&self) -> u32 {
        self.record_count
    }

    /// Skip the next `n` records by hopping over their frames, without
    /// decoding them. [`Iterator::skip`] would decode each skipped record.
    pub fn skip_records(&mut self, n: u32) -> Result<(), FormatError> {
        for _ in 0..n.min(self.remaining) {
            self.next_frame()?;
        }
        Ok(())
    }

    fn next_frame(&mut self) -> Result<&'a [u8], FormatError> {
        match self.frame_at(self.offset) {
            Ok((payload, end)) => {
                self.offset = end;
                self.remaining -= 1;
                Ok(payload)
            }
            Err(e) => {
                // Fuse: a bad frame leaves no trustworthy offset to resume
                // from.
                self.remaining = 0;
                Err(e)
            }
        }
    }

    fn frame_at(&self, offset: usize) -> Result<(&'a [u8], usize), FormatError> {
        let frame = self
            .bytes
            .get(offset..offset + FRAME_SIZE)
            .ok_or(FormatError::Truncated)?;
        let mut len_bytes = [0u8; FRAME_SIZE];
        len_bytes.copy_from_slice(frame);
        let payload_len = u64::from_le_bytes(len_bytes) as usize;

        let start = offset + FRAME_SIZE;
        let end = start
            .checked_add(payload_len)
            .ok_or(FormatError::Truncated)?;
        let payload = self.bytes.get(start..end).ok_or(FormatError::Truncated)?;
        Ok((payload, end))
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Result<MeshRecord, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        Some(self.next_frame().and_then(|payload| {
            bincode::deserialize(payload).map_err(|e| FormatError::Decode(e.to_string()))
        }))
    }
}
