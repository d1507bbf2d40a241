use std::path::PathBuf;

/// Errors that can occur while importing a model file.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to import model '{0}': {1}")]
    ImportFailed(PathBuf, String),

    #[error("mesh '{0}' has no vertex positions")]
    MissingPositions(String),

    #[error("mesh '{mesh}' uses unsupported primitive mode {mode}")]
    UnsupportedPrimitive { mesh: String, mode: String },

    #[error("mesh '{mesh}' has {count} indices, not a multiple of 3")]
    MalformedIndices { mesh: String, count: usize },
}
