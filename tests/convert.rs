use objscene::obj::{MTL, MtlTexture, Obj, ObjMesh, ObjObject, PolyMeshFace};
use objscene::{
    Error, F, FaceKind, ImportConfig, Pool, PrimitiveTypes, ShadingModel, TextureKind, convert,
    convert_with,
};

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A model with ten distinct positions `[i, 2i, 3i]`.
fn pool_model(faces: Vec<PolyMeshFace>) -> Obj {
    let mut obj = Obj::new("model");
    obj.v = (0..10)
        .map(|i| {
            let i = i as F;
            [i, 2. * i, 3. * i]
        })
        .collect();
    let mut mesh = ObjMesh::new("mesh");
    mesh.f = faces;
    let mi = obj.push_mesh(mesh);
    obj.objects.push(ObjObject::new("object", [mi]));
    obj
}

fn positions(obj: &Obj, idxs: &[usize]) -> Vec<[F; 3]> {
    idxs.iter().map(|&i| obj.v[i]).collect()
}

#[test]
fn test_flat_objects() {
    init_log();
    let mut obj = Obj::new("flat");
    obj.v = vec![[0.; 3]; 4];
    let mut counts = vec![];
    for oi in 0..5 {
        let mut meshes = vec![];
        for mi in 0..oi {
            let mut m = ObjMesh::new(format!("{oi}_{mi}"));
            // every other mesh is empty and must not show up in the scene
            if mi % 2 == 0 {
                m.f.push(PolyMeshFace::polygon([0, 1, 2, 3]));
            }
            meshes.push(obj.push_mesh(m));
        }
        counts.push((0..oi).filter(|mi| mi % 2 == 0).count());
        obj.objects.push(ObjObject::new(format!("o{oi}"), meshes));
    }

    let s = convert(&obj).unwrap();
    assert_eq!(s.root_node().children.len(), 5);
    assert_eq!(s.meshes.len(), counts.iter().sum::<usize>());
    assert_eq!(s.num_vertices(), 4 * s.meshes.len());
    let node_counts: Vec<_> = s.children(s.root).map(|n| n.meshes.len()).collect();
    assert_eq!(node_counts, counts);

    let mut next = 0;
    for n in s.children(s.root) {
        for &m in &n.meshes {
            assert_eq!(m, next);
            next += 1;
        }
        assert_eq!(n.parent, Some(s.root));
    }
}

#[test]
fn test_single_triangle() {
    let obj = pool_model(vec![PolyMeshFace::polygon([7, 2, 5])]);
    let s = convert(&obj).unwrap();
    assert_eq!(s.meshes.len(), 1);
    let m = &s.meshes[0];
    assert_eq!(m.f, vec![FaceKind::Tri([0, 1, 2])]);
    assert_eq!(m.primitives, PrimitiveTypes::TRIANGLE);
    assert_eq!(m.v, positions(&obj, &[7, 2, 5]));
    assert!(!m.has_normals());
    assert!(!m.has_uv(0));
}

#[test]
fn test_repeated_vertex_is_not_deduplicated() {
    let obj = pool_model(vec![
        PolyMeshFace::polygon([1, 2, 3]),
        PolyMeshFace::polygon([3, 2, 1]),
    ]);
    let m = &convert(&obj).unwrap().meshes[0];
    assert_eq!(m.num_vertices(), 6);
    assert_eq!(m.v, positions(&obj, &[1, 2, 3, 3, 2, 1]));
}

#[test]
fn test_polygon() {
    let obj = pool_model(vec![PolyMeshFace::polygon([0, 1, 2, 3, 4])]);
    let m = &convert(&obj).unwrap().meshes[0];
    assert_eq!(m.primitives, PrimitiveTypes::POLYGON);
    assert_eq!(m.f.len(), 1);
    assert_eq!(m.f[0].len(), 5);
    assert_eq!(m.num_vertices(), 5);
}

#[test]
fn test_points() {
    let obj = pool_model(vec![PolyMeshFace::points([4, 8, 6])]);
    let m = &convert(&obj).unwrap().meshes[0];
    assert_eq!(m.primitives, PrimitiveTypes::POINT);
    assert_eq!(
        m.f,
        vec![FaceKind::Point([0]), FaceKind::Point([1]), FaceKind::Point([2])]
    );
    assert_eq!(m.v, positions(&obj, &[4, 8, 6]));
}

#[test]
fn test_polyline() {
    let obj = pool_model(vec![PolyMeshFace::line([3, 6, 9])]);
    let m = &convert(&obj).unwrap().meshes[0];
    assert_eq!(m.primitives, PrimitiveTypes::LINE);
    assert_eq!(m.f.len(), 2);
    assert!(m.f.iter().all(|f| f.len() == 2));
    assert_eq!(m.num_vertices(), 4);

    let seg = |fi: usize| -> Vec<[F; 3]> { m.f[fi].as_slice().iter().map(|&i| m.v[i]).collect() };
    assert_eq!(seg(0), positions(&obj, &[3, 6]));
    assert_eq!(seg(1), positions(&obj, &[6, 9]));
}

#[test]
fn test_polyline_attributes_follow_duplicate() {
    let mut obj = pool_model(vec![
        PolyMeshFace::line([1, 2, 3])
            .with_normals([0, 1, 2])
            .with_uvs([2, 1, 0]),
    ]);
    obj.vn = vec![[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];
    obj.vt = vec![[0., 0.], [0.5, 0.5], [1., 1.]];
    obj.meshes[0].has_normals = true;
    obj.meshes[0].uv_channels[0] = true;

    let m = &convert(&obj).unwrap().meshes[0];
    assert_eq!(m.n.len(), m.num_vertices());
    assert_eq!(m.uv[0].len(), m.num_vertices());
    for f in &m.f {
        let [a, b] = [f.as_slice()[0], f.as_slice()[1]];
        // the segment end is a copy of the next segment start
        assert_ne!(m.n[a], m.n[b]);
    }
    assert_eq!(m.n[1], m.n[2]);
    assert_eq!(m.uv[0][1], m.uv[0][2]);
    assert_eq!(m.uv[0][1], [0.5, 0.5, 0.]);
}

#[test]
fn test_out_of_range_aborts() {
    init_log();
    let obj = pool_model(vec![
        PolyMeshFace::polygon([0, 1, 2]),
        PolyMeshFace::polygon([0, 100, 2]),
    ]);
    assert_eq!(
        convert(&obj),
        Err(Error::IndexOutOfRange {
            pool: Pool::Position,
            index: 100,
            len: 10
        })
    );

    let mut obj = pool_model(vec![PolyMeshFace::polygon([0, 1, 2]).with_uvs([0, 0, 5])]);
    obj.vt = vec![[0., 0.]];
    assert!(matches!(
        convert(&obj),
        Err(Error::IndexOutOfRange {
            pool: Pool::TexCoord,
            index: 5,
            ..
        })
    ));
}

#[test]
fn test_empty_name() {
    let mut obj = pool_model(vec![PolyMeshFace::polygon([0, 100, 2])]);
    obj.name.clear();
    // the name check comes before any mesh is looked at
    assert_eq!(convert(&obj), Err(Error::EmptyModelName));
}

#[test]
fn test_allocation_guard() {
    let obj = pool_model(vec![PolyMeshFace::line([0, 1, 2, 3])]);
    let cfg = ImportConfig::default().with_max_vertices(5);
    assert_eq!(
        convert_with(&obj, &cfg),
        Err(Error::TooManyVertices {
            mesh: "mesh".into(),
            count: 6,
            max: 5
        })
    );
    assert!(convert_with(&obj, &cfg.with_max_vertices(6)).is_ok());
}

#[test]
fn test_idempotent() {
    let mut obj = pool_model(vec![
        PolyMeshFace::polygon([0, 1, 2]),
        PolyMeshFace::line([2, 3, 4, 5]),
        PolyMeshFace::points([9, 8]),
    ]);
    obj.objects[0].children.push(ObjObject::new("child", [0]));
    obj.push_mtl(MTL::new("a"));
    obj.push_mtl(MTL::new("b"));
    assert_eq!(convert(&obj).unwrap(), convert(&obj).unwrap());
}

#[test]
fn test_materials() {
    init_log();
    let mut obj = pool_model(vec![PolyMeshFace::polygon([0, 1, 2])]);
    let mut red = MTL::new("red");
    red.kd = [1., 0., 0.];
    red.ns = 10.;
    red.illum = 0;
    red.textures.push(MtlTexture {
        kind: TextureKind::Diffuse,
        path: "red.png".into(),
        image: None,
    });
    let mut odd = MTL::new("odd");
    odd.illum = 7;
    let red_idx = obj.push_mtl(red);
    obj.mtl_lib.push("missing".into());
    obj.push_mtl(odd);
    obj.meshes[0].mat = Some(red_idx);

    let s = convert(&obj).unwrap();
    assert_eq!(s.meshes[0].mat, Some(red_idx));
    assert_eq!(s.materials.len(), 2);
    assert_eq!(s.materials[0].name, "red");
    assert_eq!(s.materials[0].shading, ShadingModel::Flat);
    assert_eq!(s.materials[0].shininess, 40.);
    assert_eq!(s.materials[0].diffuse, [1., 0., 0.]);
    assert_eq!(
        s.materials[0]
            .texture(TextureKind::Diffuse)
            .map(|t| t.original_path.as_str()),
        Some("red.png")
    );
    assert_eq!(s.materials[1].name, "odd");
    assert_eq!(s.materials[1].shading, ShadingModel::Gouraud);
}

#[test]
fn test_no_material_library() {
    init_log();
    let obj = pool_model(vec![PolyMeshFace::polygon([0, 1, 2])]);
    let s = convert(&obj).unwrap();
    assert!(s.materials.is_empty());
    assert_eq!(s.meshes[0].mat, None);
}

#[test]
fn test_vertex_colors() {
    let mut obj = pool_model(vec![PolyMeshFace::line([0, 1, 2])]);
    obj.vc = (0..10).map(|i| [i as F / 10., 0., 0.]).collect();
    let m = &convert(&obj).unwrap().meshes[0];
    assert_eq!(m.vert_colors.len(), 4);
    let reds: Vec<_> = m.vert_colors.iter().map(|c| c[0]).collect();
    assert_eq!(reds, [0., 0.1, 0.1, 0.2]);
    assert!(m.vert_colors.iter().all(|c| c[3] == 1.));
}
