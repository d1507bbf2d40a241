use bytemuck::cast_slice;
use tracing::debug;

use modelpack_format::IndexData;

use crate::error::ConvertError;

/// Output width policy for packed triangle indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexWidth {
    /// 16-bit when every index fits, otherwise widen the buffer to 32-bit.
    #[default]
    Auto,
    /// Force 16-bit; an index above `u16::MAX` fails the run.
    U16,
    /// Force 32-bit.
    U32,
}

/// Flatten `faces` into a fixed-width index buffer, 3 indices per face in
/// authored order. Winding is preserved; nothing is deduplicated or
/// re-sorted. An index that does not fit the forced 16-bit width is an
/// error, never a wrapped value.
pub fn pack_indices(
    mesh_name: &str,
    faces: &[[u32; 3]],
    width: IndexWidth,
) -> Result<IndexData, ConvertError> {
    let flat: Vec<u32> = cast_slice(faces).to_vec();

    match width {
        IndexWidth::U32 => Ok(IndexData::U32(flat)),
        IndexWidth::U16 => {
            let mut narrow = Vec::with_capacity(flat.len());
            for &index in &flat {
                if index > u32::from(u16::MAX) {
                    return Err(ConvertError::IndexOverflow {
                        mesh: mesh_name.to_string(),
                        index,
                    });
                }
                narrow.push(index as u16);
            }
            Ok(IndexData::U16(narrow))
        }
        IndexWidth::Auto => {
            if flat.iter().all(|&index| index <= u32::from(u16::MAX)) {
                Ok(IndexData::U16(
                    flat.into_iter().map(|index| index as u16).collect(),
                ))
            } else {
                debug!("Mesh '{}': indices exceed 16 bits, widening to u32", mesh_name);
                Ok(IndexData::U32(flat))
            }
        }
    }
}
