//! Modelpack Format - Binary asset wire contract
//!
//! Defines the per-mesh record schema and the .mpk file envelope shared by
//! the converter and consuming engines.

mod codec;
mod error;
mod record;

pub use codec::{decode_document, encode_document, RecordReader, MAGIC, VERSION};
pub use error::FormatError;
pub use record::{AssetDocument, IndexData, MeshRecord, WrapMode};
