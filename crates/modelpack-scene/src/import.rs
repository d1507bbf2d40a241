use std::path::Path;

use glam::Vec3;
use tracing::{debug, warn};

use crate::error::SceneError;
use crate::types::{Scene, SceneMaterial, SceneMesh, TextureRef, WrapMode};

/// Import a glTF 2.0 file (.gltf or .glb) into an owned [`Scene`].
///
/// Buffer payloads are loaded eagerly; image payloads are never decoded, so
/// embedded textures come back as the raw file bytes. Nothing borrowed from
/// the importer survives past this call.
pub fn import_scene(path: &Path) -> Result<Scene, SceneError> {
    if !path.exists() {
        return Err(SceneError::NotFound(path.to_path_buf()));
    }

    let gltf::Gltf { document, blob } = gltf::Gltf::open(path)
        .map_err(|e| SceneError::ImportFailed(path.to_path_buf(), e.to_string()))?;

    let buffers = gltf::import_buffers(&document, path.parent(), blob)
        .map_err(|e| SceneError::ImportFailed(path.to_path_buf(), e.to_string()))?;

    let materials = collect_materials(&document, &buffers);

    let mut meshes = Vec::new();
    for mesh in document.meshes() {
        let name = mesh.name().unwrap_or("unnamed").to_string();
        let primitive_count = mesh.primitives().count();

        for (prim_index, primitive) in mesh.primitives().enumerate() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                return Err(SceneError::UnsupportedPrimitive {
                    mesh: name.clone(),
                    mode: format!("{:?}", primitive.mode()),
                });
            }

            // One record per primitive; suffix names only when a mesh
            // actually splits.
            let prim_name = if primitive_count > 1 {
                format!("{name}_prim{prim_index}")
            } else {
                name.clone()
            };

            let scene_mesh = read_primitive(prim_name, &primitive, &buffers)?;
            debug!(
                "Imported mesh '{}': {} vertices, {} faces",
                scene_mesh.name,
                scene_mesh.vertex_count,
                scene_mesh.faces.len()
            );
            meshes.push(scene_mesh);
        }
    }

    debug!(
        "glTF '{}': {} meshes, {} materials",
        path.display(),
        meshes.len(),
        materials.len()
    );

    Ok(Scene { meshes, materials })
}

fn read_primitive(
    name: String,
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
) -> Result<SceneMesh, SceneError> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .map(|iter| iter.collect())
        .ok_or_else(|| SceneError::MissingPositions(name.clone()))?;
    let vertex_count = positions.len();

    let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|iter| iter.collect());

    // glTF tangents are vec4 with a handedness sign in w; the bitangent is
    // reconstructed from it when normals are also present.
    let tangents4: Option<Vec<[f32; 4]>> = reader.read_tangents().map(|iter| iter.collect());
    let tangents: Option<Vec<[f32; 3]>> = tangents4
        .as_ref()
        .map(|ts| ts.iter().map(|t| [t[0], t[1], t[2]]).collect());
    let bitangents: Option<Vec<[f32; 3]>> = match (&normals, &tangents4) {
        (Some(normals), Some(tangents4)) => Some(
            normals
                .iter()
                .zip(tangents4.iter())
                .map(|(n, t)| {
                    let bitangent = Vec3::from(*n).cross(Vec3::new(t[0], t[1], t[2])) * t[3];
                    bitangent.to_array()
                })
                .collect(),
        ),
        _ => None,
    };

    let tex_coords: Option<Vec<[f32; 3]>> = reader
        .read_tex_coords(0)
        .map(|tc| tc.into_f32().map(|[u, v]| [u, v, 0.0]).collect());

    let faces = match reader.read_indices() {
        Some(indices) => {
            let flat: Vec<u32> = indices.into_u32().collect();
            if flat.len() % 3 != 0 {
                return Err(SceneError::MalformedIndices {
                    mesh: name,
                    count: flat.len(),
                });
            }
            flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
        }
        None => sequential_faces(vertex_count),
    };

    Ok(SceneMesh {
        name,
        vertex_count,
        positions: Some(positions),
        normals,
        tangents,
        bitangents,
        tex_coords,
        faces,
        material_index: primitive.material().index(),
    })
}

/// Faces for a non-indexed triangle primitive: consecutive vertex triples.
fn sequential_faces(vertex_count: usize) -> Vec<[u32; 3]> {
    let full = (vertex_count - vertex_count % 3) as u32;
    (0..full).step_by(3).map(|i| [i, i + 1, i + 2]).collect()
}

fn collect_materials(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> Vec<SceneMaterial> {
    document
        .materials()
        .map(|material| {
            let name = material.name().unwrap_or("").to_string();
            let pbr = material.pbr_metallic_roughness();

            let base_color = pbr.base_color_texture();
            let diffuse = base_color
                .as_ref()
                .and_then(|info| texture_ref(&info.texture(), buffers));
            let wrap_u = base_color.map(|info| wrap_mode(info.texture().sampler().wrap_s()));

            // The normal-texture slot fills the role the legacy height slot
            // plays in older material systems.
            let height = material
                .normal_texture()
                .and_then(|normal| texture_ref(&normal.texture(), buffers));

            let opacity = Some(pbr.base_color_factor()[3]);

            SceneMaterial {
                name,
                diffuse,
                height,
                wrap_u,
                opacity,
            }
        })
        .collect()
}

fn texture_ref(
    texture: &gltf::Texture<'_>,
    buffers: &[gltf::buffer::Data],
) -> Option<TextureRef> {
    match texture.source().source() {
        gltf::image::Source::Uri { uri, .. } => {
            if uri.starts_with("data:") {
                warn!("Ignoring data-URI image on texture {}", texture.index());
                None
            } else {
                Some(TextureRef::Path(uri.to_string()))
            }
        }
        gltf::image::Source::View { view, .. } => {
            let buffer = &buffers[view.buffer().index()];
            let start = view.offset();
            let end = start + view.length();
            buffer
                .get(start..end)
                .map(|bytes| TextureRef::Embedded(bytes.to_vec()))
        }
    }
}

fn wrap_mode(wrapping: gltf::texture::WrappingMode) -> WrapMode {
    match wrapping {
        gltf::texture::WrappingMode::ClampToEdge => WrapMode::ClampToEdge,
        gltf::texture::WrappingMode::MirroredRepeat => WrapMode::MirroredRepeat,
        gltf::texture::WrappingMode::Repeat => WrapMode::Repeat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("modelpack_scene_test_{name}"));
        if dir.exists() {
            fs::remove_dir_all(&dir).unwrap();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    // 4 vertices followed by 6 u16 indices, matching QUAD_GLTF's buffer views.
    fn quad_buffer() -> Vec<u8> {
        let positions: [[f32; 3]; 4] = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
        ];
        let indices: [u16; 6] = [0, 1, 2, 2, 1, 3];
        let mut bytes = Vec::new();
        for position in positions {
            for component in position {
                bytes.extend_from_slice(&component.to_le_bytes());
            }
        }
        for index in indices {
            bytes.extend_from_slice(&index.to_le_bytes());
        }
        bytes
    }

    const QUAD_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [ { "mesh": 0 } ],
        "meshes": [
            {
                "name": "quad",
                "primitives": [
                    { "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 }
                ]
            }
        ],
        "materials": [
            {
                "name": "checker",
                "pbrMetallicRoughness": {
                    "baseColorTexture": { "index": 0 },
                    "baseColorFactor": [1.0, 1.0, 1.0, 0.5]
                }
            }
        ],
        "textures": [ { "source": 0, "sampler": 0 } ],
        "samplers": [ { "wrapS": 33071, "wrapT": 10497 } ],
        "images": [ { "uri": "checker.png" } ],
        "accessors": [
            {
                "bufferView": 0,
                "componentType": 5126,
                "count": 4,
                "type": "VEC3",
                "min": [0.0, 0.0, 0.0],
                "max": [1.0, 1.0, 0.0]
            },
            { "bufferView": 1, "componentType": 5123, "count": 6, "type": "SCALAR" }
        ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 48 },
            { "buffer": 0, "byteOffset": 48, "byteLength": 12 }
        ],
        "buffers": [ { "uri": "quad.bin", "byteLength": 60 } ]
    }"#;

    fn write_quad_gltf(dir: &Path) -> PathBuf {
        let buffer = quad_buffer();
        assert_eq!(buffer.len(), 60);
        fs::write(dir.join("quad.bin"), buffer).unwrap();
        let model_path = dir.join("quad.gltf");
        fs::write(&model_path, QUAD_GLTF).unwrap();
        model_path
    }

    // 3 positions, 3 normals, then 3 vec4 tangents with w = -1, matching
    // TRI_GLTF's buffer views.
    fn tri_buffer() -> Vec<u8> {
        let mut bytes = Vec::new();
        let positions: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        for position in positions {
            for component in position {
                bytes.extend_from_slice(&component.to_le_bytes());
            }
        }
        for _ in 0..3 {
            for component in [0.0f32, 0.0, 1.0] {
                bytes.extend_from_slice(&component.to_le_bytes());
            }
        }
        for _ in 0..3 {
            for component in [1.0f32, 0.0, 0.0, -1.0] {
                bytes.extend_from_slice(&component.to_le_bytes());
            }
        }
        bytes
    }

    const TRI_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [ { "mesh": 0 } ],
        "meshes": [
            {
                "name": "tri",
                "primitives": [
                    { "attributes": { "POSITION": 0, "NORMAL": 1, "TANGENT": 2 } }
                ]
            }
        ],
        "accessors": [
            {
                "bufferView": 0,
                "componentType": 5126,
                "count": 3,
                "type": "VEC3",
                "min": [0.0, 0.0, 0.0],
                "max": [1.0, 1.0, 0.0]
            },
            { "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3" },
            { "bufferView": 2, "componentType": 5126, "count": 3, "type": "VEC4" }
        ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
            { "buffer": 0, "byteOffset": 36, "byteLength": 36 },
            { "buffer": 0, "byteOffset": 72, "byteLength": 48 }
        ],
        "buffers": [ { "uri": "tri.bin", "byteLength": 120 } ]
    }"#;

    fn write_tri_gltf(dir: &Path) -> PathBuf {
        let buffer = tri_buffer();
        assert_eq!(buffer.len(), 120);
        fs::write(dir.join("tri.bin"), buffer).unwrap();
        let model_path = dir.join("tri.gltf");
        fs::write(&model_path, TRI_GLTF).unwrap();
        model_path
    }

    #[test]
    fn imports_quad_mesh() {
        let dir = scratch_dir("imports_quad_mesh");
        let model_path = write_quad_gltf(&dir);

        let scene = import_scene(&model_path).unwrap();
        assert_eq!(scene.meshes.len(), 1);

        let mesh = &scene.meshes[0];
        assert_eq!(mesh.name, "quad");
        assert_eq!(mesh.vertex_count, 4);
        assert_eq!(mesh.positions.as_ref().unwrap().len(), 4);
        assert!(mesh.normals.is_none());
        assert!(mesh.tex_coords.is_none());
        assert_eq!(mesh.faces, vec![[0, 1, 2], [2, 1, 3]]);
        assert_eq!(mesh.material_index, Some(0));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn imports_material_fields() {
        let dir = scratch_dir("imports_material_fields");
        let model_path = write_quad_gltf(&dir);

        let scene = import_scene(&model_path).unwrap();
        assert_eq!(scene.materials.len(), 1);

        let material = &scene.materials[0];
        assert_eq!(material.name, "checker");
        assert_eq!(
            material.diffuse,
            Some(TextureRef::Path("checker.png".to_string()))
        );
        assert!(material.height.is_none());
        assert_eq!(material.wrap_u, Some(WrapMode::ClampToEdge));
        assert_eq!(material.opacity, Some(0.5));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_returns_not_found() {
        let result = import_scene(Path::new("/nonexistent/model.gltf"));
        match result.unwrap_err() {
            SceneError::NotFound(_) => {}
            other => panic!("expected NotFound, got: {:?}", other),
        }
    }

    #[test]
    fn sequential_faces_cover_whole_vertex_range() {
        assert_eq!(sequential_faces(6), vec![[0, 1, 2], [3, 4, 5]]);
        assert_eq!(sequential_faces(0), Vec::<[u32; 3]>::new());
        // A trailing partial triple is dropped.
        assert_eq!(sequential_faces(5), vec![[0, 1, 2]]);
    }

    #[test]
    fn bitangent_follows_tangent_handedness() {
        let dir = scratch_dir("bitangent_follows_tangent_handedness");
        let model_path = write_tri_gltf(&dir);

        let scene = import_scene(&model_path).unwrap();
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.tangents.as_ref().unwrap()[0], [1.0, 0.0, 0.0]);
        // The cross of +Z and +X is +Y; the w = -1 handedness flips it.
        assert_eq!(mesh.bitangents.as_ref().unwrap()[0], [0.0, -1.0, 0.0]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
