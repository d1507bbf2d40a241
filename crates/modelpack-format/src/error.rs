/// Errors in the .mpk wire format.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("not a model pack file (magic {0:?})")]
    BadMagic([u8; 4]),

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u16),

    #[error("file truncated or record frame out of bounds")]
    Truncated,

    #[error("failed to encode record '{0}': {1}")]
    Encode(String, String),

    #[error("failed to decode record: {0}")]
    Decode(String),
}
