use crate::{F, FaceKind};

/// Upper bound on the bytes a single attribute allocation may claim.
pub const MAX_ALLOC_BYTES: usize = 256 * 1024 * 1024;

/// Limits enforced while building dense vertex buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    /// Largest dense vertex count a single mesh may have.
    pub max_vertices: usize,
    /// Largest output face count a single mesh may have.
    pub max_faces: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_vertices: MAX_ALLOC_BYTES / std::mem::size_of::<[F; 3]>(),
            max_faces: MAX_ALLOC_BYTES / std::mem::size_of::<FaceKind>(),
        }
    }
}

impl ImportConfig {
    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }
    pub fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }
}

#[test]
fn test_default_limits() {
    let cfg = ImportConfig::default();
    assert_eq!(cfg.max_vertices, MAX_ALLOC_BYTES / (3 * std::mem::size_of::<F>()));
    assert!(cfg.max_faces > 0);

    let cfg = cfg.with_max_vertices(8).with_max_faces(2);
    assert_eq!((cfg.max_vertices, cfg.max_faces), (8, 2));
}
