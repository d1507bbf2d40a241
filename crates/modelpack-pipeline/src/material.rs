use tracing::warn;

use modelpack_format::WrapMode;
use modelpack_scene::{Scene, SceneMesh, TextureRef, WrapMode as SceneWrapMode};

/// Material parameters for one mesh, with every absence resolved to its
/// default form.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMaterial {
    pub name: String,
    pub diffuse: Option<TextureRef>,
    pub normal: Option<TextureRef>,
    pub wrap_mode: WrapMode,
    pub opacity: f32,
}

impl Default for ResolvedMaterial {
    fn default() -> Self {
        Self {
            name: String::new(),
            diffuse: None,
            normal: None,
            wrap_mode: WrapMode::Unspecified,
            opacity: 1.0,
        }
    }
}

/// Resolve `mesh`'s material reference against the scene's material table.
///
/// A missing or out-of-range material index is not an error: every field
/// falls back to its default and conversion continues.
pub fn resolve_material(scene: &Scene, mesh: &SceneMesh) -> ResolvedMaterial {
    let index = match mesh.material_index {
        Some(index) => index,
        None => return ResolvedMaterial::default(),
    };

    let material = match scene.materials.get(index) {
        Some(material) => material,
        None => {
            warn!(
                "Mesh '{}': material index {} out of range ({} materials), using defaults",
                mesh.name,
                index,
                scene.materials.len()
            );
            return ResolvedMaterial::default();
        }
    };

    ResolvedMaterial {
        name: material.name.clone(),
        diffuse: material.diffuse.clone(),
        // The height slot doubles as the normal map in this pipeline.
        normal: material.height.clone(),
        wrap_mode: material.wrap_u.map(wrap_mode).unwrap_or_default(),
        opacity: material.opacity.unwrap_or(1.0),
    }
}

fn wrap_mode(wrap: SceneWrapMode) -> WrapMode {
    match wrap {
        SceneWrapMode::ClampToEdge => WrapMode::ClampToEdge,
        SceneWrapMode::MirroredRepeat => WrapMode::MirroredRepeat,
        SceneWrapMode::Repeat => WrapMode::Repeat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelpack_scene::SceneMaterial;

    fn scene_with_material() -> Scene {
        Scene {
            meshes: Vec::new(),
            materials: vec![SceneMaterial {
                name: "checker".to_string(),
                diffuse: Some(TextureRef::Path("checker.png".to_string())),
                height: Some(TextureRef::Path("checker_n.png".to_string())),
                wrap_u: Some(SceneWrapMode::MirroredRepeat),
                opacity: Some(0.25),
            }],
        }
    }

    fn mesh_with_material_index(index: Option<usize>) -> SceneMesh {
        SceneMesh {
            name: "mesh".to_string(),
            material_index: index,
            ..SceneMesh::default()
        }
    }

    #[test]
    fn resolves_material_fields() {
        let scene = scene_with_material();
        let resolved = resolve_material(&scene, &mesh_with_material_index(Some(0)));
        assert_eq!(resolved.name, "checker");
        assert_eq!(
            resolved.diffuse,
            Some(TextureRef::Path("checker.png".to_string()))
        );
        assert_eq!(
            resolved.normal,
            Some(TextureRef::Path("checker_n.png".to_string()))
        );
        assert_eq!(resolved.wrap_mode, WrapMode::MirroredRepeat);
        assert_eq!(resolved.opacity, 0.25);
    }

    #[test]
    fn out_of_range_index_degrades_to_defaults() {
        let scene = scene_with_material();
        // Off by one: equal to the material count.
        let resolved = resolve_material(&scene, &mesh_with_material_index(Some(1)));
        assert_eq!(resolved, ResolvedMaterial::default());
        assert_eq!(resolved.name, "");
        assert_eq!(resolved.wrap_mode, WrapMode::Unspecified);
        assert_eq!(resolved.opacity, 1.0);
    }

    #[test]
    fn missing_index_degrades_to_defaults() {
        let scene = scene_with_material();
        let resolved = resolve_material(&scene, &mesh_with_material_index(None));
        assert_eq!(resolved, ResolvedMaterial::default());
    }

    #[test]
    fn unspecified_wrap_and_opacity_take_defaults() {
        let mut scene = scene_with_material();
        scene.materials[0].wrap_u = None;
        scene.materials[0].opacity = None;
        let resolved = resolve_material(&scene, &mesh_with_material_index(Some(0)));
        assert_eq!(resolved.wrap_mode, WrapMode::Unspecified);
        assert_eq!(resolved.opacity, 1.0);
    }
}
