use serde::{Deserialize, Serialize};

/// Texture-coordinate addressing mode, encoded by name rather than a raw
/// integer sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    /// The source material did not specify one.
    #[default]
    Unspecified,
    ClampToEdge,
    MirroredRepeat,
    Repeat,
}

/// Packed triangle indices. The width is explicit in the encoding so readers
/// never guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexData {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexData {
    /// Number of indices regardless of width.
    pub fn len(&self) -> usize {
        match self {
            IndexData::U16(indices) => indices.len(),
            IndexData::U32(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of one index in bits.
    pub fn bit_width(&self) -> u32 {
        match self {
            IndexData::U16(_) => 16,
            IndexData::U32(_) => 32,
        }
    }
}

/// One mesh, normalized and self-contained.
///
/// The five vertex buffers hold exactly `3 * vertex_count` floats each; an
/// attribute the source never carried is zero-filled. Texture fields hold
/// the raw bytes of the source image file, `None` when the material
/// referenced no image (never an empty stand-in blob).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshRecord {
    pub name: String,
    pub vertex_count: u32,
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub tangents: Vec<f32>,
    pub bitangents: Vec<f32>,
    pub tex_coords: Vec<f32>,
    pub indices: IndexData,
    pub material: String,
    pub wrap_mode: WrapMode,
    pub opacity: f32,
    pub diffuse_texture: Option<Vec<u8>>,
    pub normal_texture: Option<Vec<u8>>,
}

/// The complete, ordered output of one conversion run. Record `i`
/// corresponds to source mesh `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetDocument {
    pub meshes: Vec<MeshRecord>,
}
