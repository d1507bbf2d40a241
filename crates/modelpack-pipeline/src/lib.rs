//! Modelpack Pipeline - Scene-to-asset conversion
//!
//! Turns an imported [`modelpack_scene::Scene`] into a flat, self-contained
//! binary asset document: per-mesh geometry extraction, material resolution,
//! texture embedding, index packing, and the single-file write.

mod convert;
mod error;
mod geometry;
mod indices;
mod material;
mod texture;

pub use convert::{convert_scene, write_document, ConvertOptions};
pub use error::ConvertError;
pub use geometry::{extract_geometry, GeometryBuffers};
pub use indices::{pack_indices, IndexWidth};
pub use material::{resolve_material, ResolvedMaterial};
pub use texture::load_texture;
