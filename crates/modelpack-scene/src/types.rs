/// A parsed model file: ordered meshes plus the material table they
/// reference by index.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<SceneMesh>,
    pub materials: Vec<SceneMaterial>,
}

/// One triangulated surface within a [`Scene`] (importer-agnostic raw data).
///
/// Per-vertex attributes are `None` when the source file does not carry
/// them; a present array always has `vertex_count` entries.
#[derive(Debug, Clone, Default)]
pub struct SceneMesh {
    pub name: String,
    pub vertex_count: usize,
    pub positions: Option<Vec<[f32; 3]>>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub tangents: Option<Vec<[f32; 3]>>,
    pub bitangents: Option<Vec<[f32; 3]>>,
    /// First UV channel, carried as 3 floats per vertex with a zero third
    /// component.
    pub tex_coords: Option<Vec<[f32; 3]>>,
    /// Triangle faces, 3 vertex indices each, winding order as authored.
    pub faces: Vec<[u32; 3]>,
    pub material_index: Option<usize>,
}

/// Shading parameters and texture references applied to a mesh.
#[derive(Debug, Clone, Default)]
pub struct SceneMaterial {
    pub name: String,
    /// Diffuse/albedo texture reference.
    pub diffuse: Option<TextureRef>,
    /// Height-slot texture reference; the converter treats it as the
    /// normal map.
    pub height: Option<TextureRef>,
    /// U-axis wrap mode of the diffuse texture.
    pub wrap_u: Option<WrapMode>,
    pub opacity: Option<f32>,
}

/// Where a material's texture payload lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureRef {
    /// Path relative to the model file's directory (or absolute).
    Path(String),
    /// Raw file bytes embedded in the model container.
    Embedded(Vec<u8>),
}

/// Texture-coordinate addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    ClampToEdge,
    MirroredRepeat,
    Repeat,
}
