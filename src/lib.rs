//! Turns an already parsed OBJ model into a renderer-ready scene graph.
//!
//! The input is an [`obj::Obj`]: flat attribute pools, a tree of objects, a list of meshes
//! with per-face index tuples and a material library. The output is a [`Scene`]: an arena of
//! nodes, a flat list of meshes with dense per-mesh vertex buffers, and a flat list of
//! materials.

#[cfg(not(feature = "f64"))]
pub type F = f32;

#[cfg(feature = "f64")]
pub type F = f64;

/// Alias for array of floats.
pub type Vector<const N: usize, T = F> = [T; N];

pub type Vec2 = Vector<2>;
pub type Vec3 = Vector<3>;
pub type Vec4 = Vector<4>;

/// Maximum number of texture coordinate channels per mesh.
pub const MAX_UV: usize = 4;

/// Errors raised while building a scene.
pub mod error;
pub use error::{Error, Pool, Result};

/// Limits applied during conversion.
pub mod config;
pub use config::ImportConfig;

/// Output faces and primitive classification.
pub mod face;
pub use face::{FaceKind, PrimitiveKind, PrimitiveTypes};

/// Scene graph representation.
pub mod mesh;
pub use mesh::{Material, Mesh, Node, Scene, ShadingModel, Texture, TextureKind};

/// OBJ model and conversion into a [`Scene`].
pub mod obj;

/// Converts a model into a scene with the default [`ImportConfig`].
pub fn convert(model: &obj::Obj) -> Result<Scene> {
    convert_with(model, &ImportConfig::default())
}

/// Converts a model into a scene, enforcing the limits in `cfg`.
pub fn convert_with(model: &obj::Obj, cfg: &ImportConfig) -> Result<Scene> {
    obj::to_mesh::build_scene(model, cfg)
}

pub(crate) fn append_one([a, b, c]: [F; 3]) -> [F; 4] {
    [a, b, c, 1.]
}

pub(crate) fn append_zero([a, b]: [F; 2]) -> [F; 3] {
    [a, b, 0.]
}
