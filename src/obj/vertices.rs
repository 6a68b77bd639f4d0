use super::topology::classify;
use super::{MeshIdx, Obj, ObjObject, PolyMeshFace};
use crate::{
    Error, ImportConfig, MAX_UV, Mesh, Pool, PrimitiveKind, Result, append_one, append_zero,
};

fn lookup<T: Copy>(pool: &[T], index: usize, kind: Pool) -> Result<T> {
    pool.get(index).copied().ok_or(Error::IndexOutOfRange {
        pool: kind,
        index,
        len: pool.len(),
    })
}

/// Copies the attributes of the vertex at tuple position `pos` of `face` into dense slot `slot`.
fn copy_vertex(
    obj: &Obj,
    face: &PolyMeshFace,
    pos: usize,
    mesh: &mut Mesh,
    slot: usize,
) -> Result<()> {
    let vi = face.v[pos];
    mesh.v[slot] = lookup(&obj.v, vi, Pool::Position)?;

    if let Some(&ni) = face.vn.get(pos) {
        let n = lookup(&obj.vn, ni, Pool::Normal)?;
        if let Some(dst) = mesh.n.get_mut(slot) {
            *dst = n;
        }
    }

    if let Some(&ti) = face.vt.get(pos) {
        let uv = lookup(&obj.vt, ti, Pool::TexCoord)?;
        if let Some(dst) = mesh.uv[0].get_mut(slot) {
            *dst = append_zero(uv);
        }
    }

    if !mesh.vert_colors.is_empty() {
        mesh.vert_colors[slot] = append_one(lookup(&obj.vc, vi, Pool::Color)?);
    }
    Ok(())
}

/// Copies every allocated attribute of `slot` into `slot + 1`.
fn duplicate(mesh: &mut Mesh, slot: usize) {
    mesh.v[slot + 1] = mesh.v[slot];
    if !mesh.n.is_empty() {
        mesh.n[slot + 1] = mesh.n[slot];
    }
    for uv in mesh.uv.iter_mut().filter(|uv| !uv.is_empty()) {
        uv[slot + 1] = uv[slot];
    }
    if !mesh.vert_colors.is_empty() {
        mesh.vert_colors[slot + 1] = mesh.vert_colors[slot];
    }
}

/// Fills the dense vertex buffers of `mesh` and the index slots of its faces.
///
/// `mesh` must come from [`build_topology`](super::topology::build_topology) for the same
/// `mesh_idx`, and `num_indices` must be the slot count it returned. Every tuple position gets
/// its own slot, nothing is deduplicated. Polylines are split into independent segments, so
/// each interior vertex of a line is stored twice.
pub fn fill_vertices(
    obj: &Obj,
    object: &ObjObject,
    mesh_idx: MeshIdx,
    mesh: &mut Mesh,
    num_indices: usize,
    cfg: &ImportConfig,
) -> Result<()> {
    let Some(src) = obj.meshes.get(mesh_idx) else {
        return Err(Error::MeshIndexOutOfRange {
            index: mesh_idx,
            len: obj.meshes.len(),
        });
    };

    if num_indices == 0 {
        return Err(Error::NoVertices {
            mesh: src.name.clone(),
        });
    } else if num_indices > cfg.max_vertices {
        return Err(Error::TooManyVertices {
            mesh: src.name.clone(),
            count: num_indices,
            max: cfg.max_vertices,
        });
    }

    mesh.v = vec![[0.; 3]; num_indices];
    if !obj.vn.is_empty() && src.has_normals {
        mesh.n = vec![[0.; 3]; num_indices];
    }
    if !obj.vc.is_empty() {
        mesh.vert_colors = vec![[0.; 4]; num_indices];
    }
    mesh.uv = std::array::from_fn(|_| vec![]);
    mesh.uv_components = [0; MAX_UV];
    if !obj.vt.is_empty() && src.uv_channels[0] {
        mesh.uv_components[0] = 2;
        mesh.uv[0] = vec![[0.; 3]; num_indices];
    }

    // Both cursors run across the whole mesh, not per input face.
    let mut slot = 0;
    let mut out_face = 0;
    for face in &src.f {
        if classify(face.kind, face.v.len()).num_faces == 0 {
            continue;
        }
        log::trace!(
            "{:?} face with {} vertices at slot {slot}, face {out_face}",
            face.kind,
            face.v.len()
        );
        let last_pos = face.v.len() - 1;
        let mut out_vert = 0;
        for pos in 0..face.v.len() {
            let last = pos == last_pos;
            copy_vertex(obj, face, pos, mesh, slot)?;

            match face.kind {
                PrimitiveKind::Point => {
                    mesh.f[out_face].as_mut_slice()[0] = slot;
                    out_face += 1;
                }
                PrimitiveKind::Line => {
                    // Every vertex but the last starts a segment. Every vertex but the first
                    // ends the previous one; interior vertices end it with a copy of themselves.
                    if !last {
                        mesh.f[out_face].as_mut_slice()[0] = slot;
                    }
                    if pos != 0 {
                        if !last {
                            duplicate(mesh, slot);
                            slot += 1;
                        }
                        mesh.f[out_face - 1].as_mut_slice()[1] = slot;
                    }
                    if !last {
                        out_face += 1;
                    }
                }
                PrimitiveKind::Polygon => {
                    mesh.f[out_face].as_mut_slice()[out_vert] = slot;
                    out_vert += 1;
                    if last {
                        out_face += 1;
                    }
                }
            }
            slot += 1;
        }
    }
    debug_assert_eq!(slot, num_indices);
    debug_assert_eq!(out_face, mesh.f.len());

    log::debug!(
        "mesh {:?} of {:?}: {} faces, {} vertices",
        mesh.name,
        object.name,
        mesh.f.len(),
        slot
    );
    Ok(())
}

#[cfg(test)]
fn assemble(obj: &Obj, mesh_idx: MeshIdx) -> Result<Mesh> {
    use super::topology::build_topology;
    let o = ObjObject::new("o", [mesh_idx]);
    let cfg = ImportConfig::default();
    let t = build_topology(obj, &o, mesh_idx, &cfg)?.expect("mesh has faces");
    let mut mesh = t.mesh;
    fill_vertices(obj, &o, mesh_idx, &mut mesh, t.num_indices, &cfg)?;
    Ok(mesh)
}

#[cfg(test)]
fn pool_obj(faces: Vec<PolyMeshFace>) -> Obj {
    use super::ObjMesh;
    let mut obj = Obj::new("pool");
    obj.v = (0..10).map(|i| [i as crate::F, 0., 0.]).collect();
    let mut mesh = ObjMesh::new("m");
    mesh.f = faces;
    obj.push_mesh(mesh);
    obj
}

#[test]
fn test_line_segments() {
    let obj = pool_obj(vec![PolyMeshFace::line([3, 5, 7, 9])]);
    let m = assemble(&obj, 0).unwrap();
    assert_eq!(m.num_vertices(), 6);
    let segs: Vec<[crate::F; 2]> = m
        .f
        .iter()
        .map(|f| {
            let s = f.as_slice();
            [m.v[s[0]][0], m.v[s[1]][0]]
        })
        .collect();
    assert_eq!(segs, [[3., 5.], [5., 7.], [7., 9.]]);
}

#[test]
fn test_line_starting_at_zero() {
    // The first vertex of the line is pool entry 0, the duplication must still happen.
    let obj = pool_obj(vec![PolyMeshFace::line([0, 1, 2])]);
    let m = assemble(&obj, 0).unwrap();
    assert_eq!(m.num_vertices(), 4);
    let xs: Vec<_> = m.v.iter().map(|v| v[0]).collect();
    assert_eq!(xs, [0., 1., 1., 2.]);
    assert_eq!(m.f[0].as_slice(), &[0, 2]);
    assert_eq!(m.f[1].as_slice(), &[1, 3]);
}

#[test]
fn test_cursors_span_faces() {
    let obj = pool_obj(vec![
        PolyMeshFace::polygon([0, 1, 2]),
        PolyMeshFace::points([4, 5]),
        PolyMeshFace::line([6, 7]),
        PolyMeshFace::polygon([1, 2, 3, 4]),
    ]);
    let m = assemble(&obj, 0).unwrap();
    let idxs: Vec<_> = m.f.iter().map(|f| f.as_slice().to_vec()).collect();
    assert_eq!(
        idxs,
        vec![vec![0, 1, 2], vec![3], vec![4], vec![5, 6], vec![7, 8, 9, 10]]
    );
    let xs: Vec<_> = m.v.iter().map(|v| v[0]).collect();
    assert_eq!(xs, [0., 1., 2., 4., 5., 6., 7., 1., 2., 3., 4.]);
}

#[test]
fn test_attributes() {
    let mut obj = pool_obj(vec![
        PolyMeshFace::polygon([0, 1, 2])
            .with_normals([2, 1, 0])
            .with_uvs([1, 0]),
    ]);
    obj.vn = vec![[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];
    obj.vt = vec![[0.25, 0.5], [0.75, 1.]];
    obj.vc = (0..10).map(|i| [i as crate::F, 1., 1.]).collect();
    obj.meshes[0].has_normals = true;
    obj.meshes[0].uv_channels[0] = true;

    let m = assemble(&obj, 0).unwrap();
    assert_eq!(m.n, vec![[0., 0., 1.], [0., 1., 0.], [1., 0., 0.]]);
    assert_eq!(m.uv_components[0], 2);
    // the third vertex has no uv index and keeps the default
    assert_eq!(m.uv[0], vec![[0.75, 1., 0.], [0.25, 0.5, 0.], [0., 0., 0.]]);
    assert_eq!(m.vert_colors, vec![[0., 1., 1., 1.], [1., 1., 1., 1.], [2., 1., 1., 1.]]);
    assert!(!m.has_uv(1));
}

#[test]
fn test_buffers_gated_by_mesh_flags() {
    let mut obj = pool_obj(vec![PolyMeshFace::polygon([0, 1, 2]).with_normals([0, 0, 0])]);
    obj.vn = vec![[0., 0., 1.]];
    obj.vt = vec![[0., 0.]];
    let m = assemble(&obj, 0).unwrap();
    assert!(!m.has_normals());
    assert!(!m.has_uv(0));
    assert!(!m.has_vert_colors());
    assert_eq!(m.uv_components, [0; MAX_UV]);
}

#[test]
fn test_out_of_range() {
    let obj = pool_obj(vec![PolyMeshFace::polygon([0, 1, 100])]);
    assert_eq!(
        assemble(&obj, 0),
        Err(Error::IndexOutOfRange {
            pool: Pool::Position,
            index: 100,
            len: 10
        })
    );

    let mut obj = pool_obj(vec![PolyMeshFace::polygon([0, 1, 2]).with_normals([0, 3])]);
    obj.vn = vec![[0., 0., 1.]; 3];
    obj.meshes[0].has_normals = true;
    assert_eq!(
        assemble(&obj, 0),
        Err(Error::IndexOutOfRange {
            pool: Pool::Normal,
            index: 3,
            len: 3
        })
    );

    let mut obj = pool_obj(vec![PolyMeshFace::points([9])]);
    obj.vc = vec![[1., 1., 1.]; 4];
    assert_eq!(
        assemble(&obj, 0),
        Err(Error::IndexOutOfRange {
            pool: Pool::Color,
            index: 9,
            len: 4
        })
    );
}

#[test]
fn test_vertex_guards() {
    let obj = pool_obj(vec![PolyMeshFace::polygon(Vec::<usize>::new()), PolyMeshFace::line([4])]);
    assert_eq!(assemble(&obj, 0), Err(Error::NoVertices { mesh: "m".into() }));

    let obj = pool_obj(vec![PolyMeshFace::polygon([0, 1, 2, 3])]);
    let o = ObjObject::new("o", [0]);
    let cfg = ImportConfig::default().with_max_vertices(3);
    let mut mesh = Mesh::default();
    assert_eq!(
        fill_vertices(&obj, &o, 0, &mut mesh, 4, &cfg),
        Err(Error::TooManyVertices {
            mesh: "m".into(),
            count: 4,
            max: 3
        })
    );
}
