use super::{F, MAX_UV, PrimitiveKind, TextureKind, Vec2, Vec3};
use image::DynamicImage;
use std::collections::HashMap;

/// Conversion of an [`Obj`] into a [`Scene`](crate::Scene).
pub mod to_mesh;

/// Materials of an [`Obj`] into scene materials.
pub mod to_material;

/// Primitive classification and face allocation.
pub mod topology;

/// Dense vertex buffer construction.
pub mod vertices;

pub type VertIdx = usize;
pub type VertNIdx = usize;
pub type VertTIdx = usize;
pub type MeshIdx = usize;
pub type MatIdx = usize;

/// A single input face, with indices into the pools of an [`Obj`].
///
/// `vn` and `vt` are parallel to `v` but may be shorter or empty.
#[derive(Debug, PartialEq, Default, Clone)]
pub struct PolyMeshFace {
    pub kind: PrimitiveKind,
    pub v: Vec<VertIdx>,
    pub vn: Vec<VertNIdx>,
    pub vt: Vec<VertTIdx>,
}

impl PolyMeshFace {
    pub fn points(v: impl Into<Vec<VertIdx>>) -> Self {
        Self {
            kind: PrimitiveKind::Point,
            v: v.into(),
            ..Default::default()
        }
    }
    pub fn line(v: impl Into<Vec<VertIdx>>) -> Self {
        Self {
            kind: PrimitiveKind::Line,
            v: v.into(),
            ..Default::default()
        }
    }
    pub fn polygon(v: impl Into<Vec<VertIdx>>) -> Self {
        Self {
            kind: PrimitiveKind::Polygon,
            v: v.into(),
            ..Default::default()
        }
    }
    pub fn with_normals(mut self, vn: impl Into<Vec<VertNIdx>>) -> Self {
        self.vn = vn.into();
        self
    }
    pub fn with_uvs(mut self, vt: impl Into<Vec<VertTIdx>>) -> Self {
        self.vt = vt.into();
        self
    }
}

/// A run of faces sharing one material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjMesh {
    pub name: String,
    /// Index into [`Obj::mtl_lib`], `None` if no material was assigned.
    pub mat: Option<MatIdx>,
    pub has_normals: bool,
    /// Which texture coordinate channels carry data.
    pub uv_channels: [bool; MAX_UV],
    pub f: Vec<PolyMeshFace>,
}

impl ObjMesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A named group of meshes, which may itself contain further objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjObject {
    pub name: String,
    /// Indices into [`Obj::meshes`].
    pub meshes: Vec<MeshIdx>,
    pub children: Vec<ObjObject>,
}

impl ObjObject {
    pub fn new(name: impl Into<String>, meshes: impl Into<Vec<MeshIdx>>) -> Self {
        Self {
            name: name.into(),
            meshes: meshes.into(),
            children: vec![],
        }
    }
}

/// A texture referenced by an [`MTL`].
#[derive(Debug, Clone, PartialEq)]
pub struct MtlTexture {
    pub kind: TextureKind,
    pub path: String,
    /// Set if the loader already decoded the image.
    pub image: Option<DynamicImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MTL {
    pub name: String,

    pub ka: Vec3,
    pub kd: Vec3,
    pub ks: Vec3,
    pub ke: Vec3,

    /// Specular exponent
    pub ns: F,
    /// Index of refraction
    pub ni: F,
    /// Dissolve
    pub d: F,

    pub illum: i32,

    pub textures: Vec<MtlTexture>,
}

impl Default for MTL {
    fn default() -> Self {
        Self {
            name: String::new(),
            ka: Default::default(),
            kd: Default::default(),
            ks: Default::default(),
            ke: Default::default(),
            ns: 0.,
            ni: 1.,
            // IMPORTANT set this to 1 otherwise it will be transparent.
            d: 1.,
            illum: 1,
            textures: vec![],
        }
    }
}

impl MTL {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A parsed OBJ model: flat attribute pools shared by every mesh, plus the material library.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Obj {
    pub name: String,

    pub v: Vec<Vec3>,
    pub vn: Vec<Vec3>,
    pub vt: Vec<Vec2>,
    /// Per-position colors, indexed like `v`.
    pub vc: Vec<Vec3>,

    pub objects: Vec<ObjObject>,
    pub meshes: Vec<ObjMesh>,

    /// Material names in declaration order.
    pub mtl_lib: Vec<String>,
    pub mtls: HashMap<String, MTL>,
}

impl Obj {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds `mtl` to the library, returning its index.
    pub fn push_mtl(&mut self, mtl: MTL) -> MatIdx {
        let idx = self.mtl_lib.len();
        self.mtl_lib.push(mtl.name.clone());
        self.mtls.insert(mtl.name.clone(), mtl);
        idx
    }

    /// Adds `mesh`, returning its index.
    pub fn push_mesh(&mut self, mesh: ObjMesh) -> MeshIdx {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }
}
