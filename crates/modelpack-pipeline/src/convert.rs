use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use modelpack_format::{encode_document, AssetDocument, MeshRecord};
use modelpack_scene::{Scene, SceneMesh};

use crate::error::ConvertError;
use crate::geometry::{extract_geometry, zero_filled};
use crate::indices::{pack_indices, IndexWidth};
use crate::material::resolve_material;
use crate::texture::load_texture;

/// Conversion settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    pub index_width: IndexWidth,
}

/// Convert an imported scene into a complete asset document.
///
/// Meshes are processed in scene order and records land in the same order,
/// so record `i` always matches scene mesh `i`. `base_dir` is the model
/// file's directory; relative texture paths resolve against it. The first
/// failing mesh aborts the run.
pub fn convert_scene(
    scene: &Scene,
    base_dir: &Path,
    options: &ConvertOptions,
) -> Result<AssetDocument, ConvertError> {
    let mut document = AssetDocument::default();

    for mesh in &scene.meshes {
        let record = build_record(scene, mesh, base_dir, options)?;
        document.meshes.push(record);
    }

    info!("Converted {} meshes", document.meshes.len());
    Ok(document)
}

fn build_record(
    scene: &Scene,
    mesh: &SceneMesh,
    base_dir: &Path,
    options: &ConvertOptions,
) -> Result<MeshRecord, ConvertError> {
    let geometry = extract_geometry(mesh);
    let material = resolve_material(scene, mesh);

    let indices = pack_indices(&mesh.name, &mesh.faces, options.index_width)?;

    let diffuse_texture = load_texture(base_dir, material.diffuse.as_ref())?;
    let normal_texture = load_texture(base_dir, material.normal.as_ref())?;

    debug!(
        "Mesh '{}': {} vertices, {} indices, material '{}'",
        mesh.name,
        geometry.vertex_count,
        indices.len(),
        material.name
    );

    let vertex_count = geometry.vertex_count;
    Ok(MeshRecord {
        name: mesh.name.clone(),
        vertex_count: vertex_count as u32,
        positions: fill_buffer(&mesh.name, "positions", vertex_count, geometry.positions),
        normals: fill_buffer(&mesh.name, "normals", vertex_count, geometry.normals),
        tangents: fill_buffer(&mesh.name, "tangents", vertex_count, geometry.tangents),
        bitangents: fill_buffer(&mesh.name, "bitangents", vertex_count, geometry.bitangents),
        tex_coords: fill_buffer(&mesh.name, "tex_coords", vertex_count, geometry.tex_coords),
        indices,
        material: material.name,
        wrap_mode: material.wrap_mode,
        opacity: material.opacity,
        diffuse_texture,
        normal_texture,
    })
}

/// Records carry a fixed buffer shape; an attribute the extractor reported
/// absent becomes a zero-filled buffer of the full length.
fn fill_buffer(
    mesh_name: &str,
    attribute: &str,
    vertex_count: usize,
    buffer: Option<Vec<f32>>,
) -> Vec<f32> {
    match buffer {
        Some(buffer) => buffer,
        None => {
            warn!("Mesh '{}': no {}, zero-filling", mesh_name, attribute);
            zero_filled(vertex_count)
        }
    }
}

/// Encode `document` and write it to `path` in one atomic step.
///
/// The bytes land in a temporary sibling file first and are renamed over the
/// destination, so a failed run never leaves a partial file behind.
pub fn write_document(document: &AssetDocument, path: &Path) -> Result<(), ConvertError> {
    let bytes = encode_document(document)?;

    let tmp_path = tmp_sibling(path);
    fs::write(&tmp_path, &bytes).map_err(|e| ConvertError::OutputWrite {
        path: tmp_path.clone(),
        source: e,
    })?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(ConvertError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        });
    }

    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
