//! Modelpack Scene - Model import facade
//!
//! Wraps the glTF importer behind an owned, importer-agnostic scene
//! representation for the modelpack conversion pipeline.

mod error;
mod import;
mod types;

pub use error::SceneError;
pub use import::import_scene;
pub use types::{Scene, SceneMaterial, SceneMesh, TextureRef, WrapMode};
