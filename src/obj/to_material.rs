use super::{MTL, Obj};
use crate::mesh::{Material, ShadingModel, Texture, TextureKind};
use crate::F;

/// Scale applied to `Ns`. Plain exponents come out too dull in practice.
pub const SHININESS_SCALE: F = 4.;

fn shading_model(illum: i32, name: &str) -> ShadingModel {
    match illum {
        0 => ShadingModel::Flat,
        1 => ShadingModel::Gouraud,
        2 => ShadingModel::Phong,
        i => {
            log::warn!("unexpected illumination model {i} in material {name:?} (0-2 recognized)");
            ShadingModel::Gouraud
        }
    }
}

impl From<&MTL> for Material {
    fn from(mtl: &MTL) -> Self {
        // Only diffuse maps are translated for now.
        let textures = mtl
            .textures
            .iter()
            .find(|t| t.kind == TextureKind::Diffuse)
            .map(|t| Texture {
                kind: TextureKind::Diffuse,
                image: t.image.clone(),
                original_path: t.path.clone(),
            })
            .into_iter()
            .collect();

        Material {
            name: mtl.name.clone(),
            shading: shading_model(mtl.illum, &mtl.name),
            ambient: mtl.ka,
            diffuse: mtl.kd,
            specular: mtl.ks,
            emissive: mtl.ke,
            shininess: mtl.ns * SHININESS_SCALE,
            opacity: mtl.d,
            refraction_index: mtl.ni,
            textures,
        }
    }
}

/// Translates the material library of `obj`, in library order.
///
/// Names without an entry in [`Obj::mtls`] are skipped, so the result may be shorter than
/// [`Obj::mtl_lib`] and mesh material indices past a skipped entry no longer line up.
pub fn build_materials(obj: &Obj) -> Vec<Material> {
    if obj.mtl_lib.is_empty() {
        log::warn!("no materials specified");
        return vec![];
    }
    let mut out = Vec::with_capacity(obj.mtl_lib.len());
    for name in &obj.mtl_lib {
        let Some(mtl) = obj.mtls.get(name) else {
            log::warn!("material {name:?} is listed in the library but was never defined, skipping");
            continue;
        };
        out.push(Material::from(mtl));
    }
    out
}

#[cfg(test)]
use super::MtlTexture;

#[test]
fn test_translate() {
    let mut mtl = MTL::new("brass");
    mtl.illum = 2;
    mtl.ns = 8.;
    mtl.ka = [0.1, 0.1, 0.1];
    mtl.kd = [0.8, 0.6, 0.2];
    mtl.ks = [1., 1., 1.];
    mtl.ke = [0., 0., 0.5];
    mtl.d = 0.5;
    mtl.ni = 1.5;
    mtl.textures = vec![
        MtlTexture {
            kind: TextureKind::Normal,
            path: "n.png".into(),
            image: None,
        },
        MtlTexture {
            kind: TextureKind::Diffuse,
            path: "brass.png".into(),
            image: None,
        },
    ];

    let mat = Material::from(&mtl);
    assert_eq!(mat.name, "brass");
    assert_eq!(mat.shading, ShadingModel::Phong);
    assert_eq!(mat.shininess, 32.);
    assert_eq!(mat.diffuse, [0.8, 0.6, 0.2]);
    assert_eq!(mat.emissive, [0., 0., 0.5]);
    assert_eq!((mat.opacity, mat.refraction_index), (0.5, 1.5));
    assert_eq!(mat.textures.len(), 1);
    let tex = mat.texture(TextureKind::Diffuse).unwrap();
    assert_eq!(tex.original_path, "brass.png");
    assert!(mat.texture(TextureKind::Normal).is_none());
}

#[test]
fn test_shading_models() {
    let expect = [
        (0, ShadingModel::Flat),
        (1, ShadingModel::Gouraud),
        (2, ShadingModel::Phong),
        (3, ShadingModel::Gouraud),
        (-1, ShadingModel::Gouraud),
    ];
    for (illum, shading) in expect {
        assert_eq!(shading_model(illum, "m"), shading);
    }
}

#[test]
fn test_skip_missing() {
    let mut obj = Obj::new("o");
    obj.push_mtl(MTL::new("a"));
    obj.mtl_lib.push("ghost".into());
    obj.push_mtl(MTL::new("b"));

    let names: Vec<_> = build_materials(&obj).into_iter().map(|m| m.name).collect();
    assert_eq!(names, ["a", "b"]);

    assert!(build_materials(&Obj::new("empty")).is_empty());
}

#[test]
fn test_diffuse_image_passthrough() {
    use image::DynamicImage;
    let diffuse = DynamicImage::new_rgb8(1, 1);
    let mut mtl = MTL::new("painted");
    mtl.textures = vec![
        MtlTexture {
            kind: TextureKind::Specular,
            path: "spec.png".into(),
            image: Some(DynamicImage::new_luma8(2, 2)),
        },
        MtlTexture {
            kind: TextureKind::Diffuse,
            path: "paint.png".into(),
            image: Some(diffuse.clone()),
        },
    ];

    let mat = Material::from(&mtl);
    assert_eq!(mat.textures.len(), 1);
    let tex = mat.texture(TextureKind::Diffuse).unwrap();
    assert_eq!(tex.image.as_ref(), Some(&diffuse));
    assert_eq!(tex.original_path, "paint.png");
    assert!(mat.texture(TextureKind::Specular).is_none());
}
