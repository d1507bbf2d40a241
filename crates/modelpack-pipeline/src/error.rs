use std::path::PathBuf;

/// Errors that abort a conversion run.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to read texture '{path}': {source}")]
    TextureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mesh '{mesh}': index {index} does not fit in 16 bits")]
    IndexOverflow { mesh: String, index: u32 },

    #[error("failed to encode asset document: {0}")]
    Encode(#[from] modelpack_format::FormatError),

    #[error("failed to write output '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
