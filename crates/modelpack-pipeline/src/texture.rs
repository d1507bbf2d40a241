use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use modelpack_scene::TextureRef;

use crate::error::ConvertError;

/// Materialize a texture reference into the raw file bytes to embed.
///
/// Path references resolve against `base_dir` (the model file's directory)
/// and are read whole; embedded references are used as-is. `None` in means
/// `None` out: a material without the slot produces no payload at all. A
/// path that cannot be read fails the run, since a referenced texture that
/// can't be embedded means the source asset is broken.
pub fn load_texture(
    base_dir: &Path,
    reference: Option<&TextureRef>,
) -> Result<Option<Vec<u8>>, ConvertError> {
    let reference = match reference {
        Some(reference) => reference,
        None => return Ok(None),
    };

    let bytes = match reference {
        TextureRef::Embedded(bytes) => bytes.clone(),
        TextureRef::Path(path) if path.is_empty() => return Ok(None),
        TextureRef::Path(path) => {
            let full_path = resolve(base_dir, Path::new(path));
            fs::read(&full_path).map_err(|e| ConvertError::TextureRead {
                path: full_path,
                source: e,
            })?
        }
    };

    // Sniff the container for the log only; payloads embed untouched.
    match image::guess_format(&bytes) {
        Ok(format) => debug!("Texture payload: {} bytes, {:?}", bytes.len(), format),
        Err(_) => warn!(
            "Texture payload of {} bytes has an unrecognized container format",
            bytes.len()
        ),
    }

    Ok(Some(bytes))
}

/// Resolve a material texture path against the model's directory.
fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
