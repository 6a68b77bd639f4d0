use super::{MeshIdx, Obj, ObjObject};
use crate::{Error, FaceKind, ImportConfig, Mesh, PrimitiveKind, PrimitiveTypes, Result};

/// How one input face maps onto output faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Contribution to the mesh's primitive bitmask. Empty if no faces are emitted.
    pub primitive: PrimitiveTypes,
    /// Number of output faces.
    pub num_faces: usize,
    /// Index slots in each output face.
    pub face_len: usize,
}

impl Classification {
    const NONE: Self = Self {
        primitive: PrimitiveTypes::EMPTY,
        num_faces: 0,
        face_len: 0,
    };

    /// Dense vertex slots this face consumes.
    pub fn num_indices(&self) -> usize {
        self.num_faces * self.face_len
    }
}

/// Classifies a face of `kind` with `n` vertices.
///
/// Lines become `n - 1` two-index segments, points become `n` single-index faces, anything
/// else is a single face with `n` indices.
pub fn classify(kind: PrimitiveKind, n: usize) -> Classification {
    match kind {
        PrimitiveKind::Line if n < 2 => Classification::NONE,
        PrimitiveKind::Line => Classification {
            primitive: PrimitiveTypes::LINE,
            num_faces: n - 1,
            face_len: 2,
        },
        PrimitiveKind::Point if n == 0 => Classification::NONE,
        PrimitiveKind::Point => Classification {
            primitive: PrimitiveTypes::POINT,
            num_faces: n,
            face_len: 1,
        },
        PrimitiveKind::Polygon if n == 0 => Classification::NONE,
        PrimitiveKind::Polygon => Classification {
            primitive: if n > 3 {
                PrimitiveTypes::POLYGON
            } else {
                PrimitiveTypes::TRIANGLE
            },
            num_faces: 1,
            face_len: n,
        },
    }
}

/// A mesh whose faces are allocated but whose index slots and vertex buffers are not yet filled.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub mesh: Mesh,
    /// Total index slots over all faces, which is also the dense vertex count.
    pub num_indices: usize,
}

/// Allocates the output faces for mesh `mesh_idx` of `object`.
///
/// Returns `Ok(None)` if the mesh has no faces.
pub fn build_topology(
    obj: &Obj,
    object: &ObjObject,
    mesh_idx: MeshIdx,
    cfg: &ImportConfig,
) -> Result<Option<Topology>> {
    let Some(src) = obj.meshes.get(mesh_idx) else {
        return Err(Error::MeshIndexOutOfRange {
            index: mesh_idx,
            len: obj.meshes.len(),
        });
    };
    if src.f.is_empty() {
        log::debug!(
            "skipping mesh {mesh_idx} ({:?}) of {:?}: no faces",
            src.name,
            object.name
        );
        return Ok(None);
    }

    let mut primitives = PrimitiveTypes::EMPTY;
    let mut num_faces = 0;
    let mut num_indices = 0;
    for f in &src.f {
        let c = classify(f.kind, f.v.len());
        primitives |= c.primitive;
        num_faces += c.num_faces;
        num_indices += c.num_indices();
    }

    if num_faces > cfg.max_faces {
        return Err(Error::TooManyFaces {
            mesh: src.name.clone(),
            count: num_faces,
            max: cfg.max_faces,
        });
    }

    let mut f = Vec::with_capacity(num_faces);
    for face in &src.f {
        let c = classify(face.kind, face.v.len());
        f.extend((0..c.num_faces).map(|_| FaceKind::with_len(c.face_len)));
    }

    let mesh = Mesh {
        name: src.name.clone(),
        primitives,
        f,
        mat: src.mat,
        ..Default::default()
    };
    Ok(Some(Topology { mesh, num_indices }))
}

#[test]
fn test_classify() {
    let c = classify(PrimitiveKind::Line, 4);
    assert_eq!((c.primitive, c.num_faces, c.face_len), (PrimitiveTypes::LINE, 3, 2));
    assert_eq!(c.num_indices(), 6);

    let c = classify(PrimitiveKind::Point, 3);
    assert_eq!((c.primitive, c.num_faces, c.face_len), (PrimitiveTypes::POINT, 3, 1));

    let c = classify(PrimitiveKind::Polygon, 3);
    assert_eq!((c.primitive, c.num_faces, c.face_len), (PrimitiveTypes::TRIANGLE, 1, 3));

    let c = classify(PrimitiveKind::Polygon, 5);
    assert_eq!((c.primitive, c.num_faces, c.face_len), (PrimitiveTypes::POLYGON, 1, 5));
}

#[test]
fn test_classify_degenerate() {
    for kind in [PrimitiveKind::Point, PrimitiveKind::Line, PrimitiveKind::Polygon] {
        assert_eq!(classify(kind, 0), Classification::NONE);
    }
    assert_eq!(classify(PrimitiveKind::Line, 1), Classification::NONE);
}

#[cfg(test)]
fn mixed_obj() -> Obj {
    use super::{ObjMesh, PolyMeshFace};
    let mut obj = Obj::new("m");
    let mut mesh = ObjMesh::new("mixed");
    mesh.mat = Some(2);
    mesh.f = vec![
        PolyMeshFace::polygon([0, 1, 2]),
        PolyMeshFace::line([0, 1, 2]),
        PolyMeshFace::points([3, 4]),
        PolyMeshFace::polygon([0, 1, 2, 3]),
    ];
    obj.push_mesh(mesh);
    obj.push_mesh(ObjMesh::new("empty"));
    obj
}

#[test]
fn test_build_topology() {
    let obj = mixed_obj();
    let o = ObjObject::new("o", [0, 1]);
    let cfg = ImportConfig::default();
    let t = build_topology(&obj, &o, 0, &cfg).unwrap().unwrap();
    // tri + 2 segments + 2 points + quad
    assert_eq!(t.mesh.f.len(), 6);
    assert_eq!(t.num_indices, 3 + 4 + 2 + 4);
    let lens: Vec<_> = t.mesh.f.iter().map(FaceKind::len).collect();
    assert_eq!(lens, [3, 2, 2, 1, 1, 4]);
    assert_eq!(
        t.mesh.primitives,
        PrimitiveTypes::TRIANGLE | PrimitiveTypes::LINE | PrimitiveTypes::POINT | PrimitiveTypes::POLYGON
    );
    assert_eq!(t.mesh.name, "mixed");
    assert_eq!(t.mesh.mat, Some(2));

    assert_eq!(build_topology(&obj, &o, 1, &cfg).unwrap(), None);
    assert_eq!(
        build_topology(&obj, &o, 7, &cfg),
        Err(Error::MeshIndexOutOfRange { index: 7, len: 2 })
    );
}

#[test]
fn test_face_guard() {
    let obj = mixed_obj();
    let o = ObjObject::new("o", [0]);
    let cfg = ImportConfig::default().with_max_faces(5);
    assert_eq!(
        build_topology(&obj, &o, 0, &cfg),
        Err(Error::TooManyFaces {
            mesh: "mixed".into(),
            count: 6,
            max: 5
        })
    );
}
