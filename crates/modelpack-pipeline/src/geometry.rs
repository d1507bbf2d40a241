use bytemuck::cast_slice;
use tracing::warn;

use modelpack_scene::SceneMesh;

/// Per-vertex attribute buffers pulled out of one mesh, flattened to
/// `3 * vertex_count` floats each. `None` marks an attribute the source
/// never carried.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuffers {
    pub vertex_count: usize,
    pub positions: Option<Vec<f32>>,
    pub normals: Option<Vec<f32>>,
    pub tangents: Option<Vec<f32>>,
    pub bitangents: Option<Vec<f32>>,
    pub tex_coords: Option<Vec<f32>>,
}

/// Read every vertex attribute of `mesh` into flat float buffers.
///
/// A present attribute is copied out whole; an absent one stays `None`
/// instead of becoming a short or garbage buffer. A present array whose
/// length disagrees with the mesh's vertex count is truncated or zero-padded
/// to it, so every returned buffer is exactly `3 * vertex_count` long.
pub fn extract_geometry(mesh: &SceneMesh) -> GeometryBuffers {
    let count = mesh.vertex_count;
    GeometryBuffers {
        vertex_count: count,
        positions: flatten(&mesh.name, "positions", count, mesh.positions.as_deref()),
        normals: flatten(&mesh.name, "normals", count, mesh.normals.as_deref()),
        tangents: flatten(&mesh.name, "tangents", count, mesh.tangents.as_deref()),
        bitangents: flatten(&mesh.name, "bitangents", count, mesh.bitangents.as_deref()),
        tex_coords: flatten(&mesh.name, "tex_coords", count, mesh.tex_coords.as_deref()),
    }
}

/// Zero-filled stand-in buffer for an absent attribute.
pub(crate) fn zero_filled(vertex_count: usize) -> Vec<f32> {
    vec![0.0; vertex_count * 3]
}

fn flatten(
    mesh_name: &str,
    attribute: &str,
    vertex_count: usize,
    array: Option<&[[f32; 3]]>,
) -> Option<Vec<f32>> {
    let array = array?;
    let mut flat: Vec<f32> = cast_slice(array).to_vec();
    if array.len() != vertex_count {
        warn!(
            "Mesh '{}': {} array has {} entries for {} vertices, resizing",
            mesh_name,
            attribute,
            array.len(),
            vertex_count
        );
        flat.resize(vertex_count * 3, 0.0);
    }
    Some(flat)
}
