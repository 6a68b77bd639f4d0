use super::to_material::build_materials;
use super::topology::{Topology, build_topology};
use super::vertices::fill_vertices;
use super::{Obj, ObjObject};
use crate::{Error, ImportConfig, Result, Scene};

/// Adds a node for `object` under `parent`, along with its meshes and child objects.
fn build_node(
    obj: &Obj,
    object: &ObjObject,
    parent: usize,
    scene: &mut Scene,
    cfg: &ImportConfig,
) -> Result<usize> {
    let node = scene.append_child(parent, object.name.clone());

    let first_mesh = scene.meshes.len();
    for &mesh_idx in &object.meshes {
        let Some(Topology {
            mut mesh,
            num_indices,
        }) = build_topology(obj, object, mesh_idx, cfg)?
        else {
            continue;
        };
        fill_vertices(obj, object, mesh_idx, &mut mesh, num_indices, cfg)?;
        scene.meshes.push(mesh);
    }
    // Meshes are only ever appended, so this node owns a contiguous range.
    scene.nodes[node].meshes = (first_mesh..scene.meshes.len()).collect();

    // Child objects get their own nodes; this node holds no extra mesh slot for them.
    for child in &object.children {
        build_node(obj, child, node, scene, cfg)?;
    }
    Ok(node)
}

/// Builds a [`Scene`] from `obj`: one node per object below a root named after the model,
/// every non-empty mesh, and the translated material library.
pub fn build_scene(obj: &Obj, cfg: &ImportConfig) -> Result<Scene> {
    if obj.name.is_empty() {
        return Err(Error::EmptyModelName);
    }
    let mut scene = Scene::with_root(obj.name.clone());
    for object in &obj.objects {
        build_node(obj, object, scene.root, &mut scene, cfg)?;
    }
    scene.materials = build_materials(obj);

    log::debug!(
        "built scene {:?}: {} nodes, {} meshes, {} materials",
        obj.name,
        scene.nodes.len(),
        scene.meshes.len(),
        scene.materials.len()
    );
    Ok(scene)
}

impl TryFrom<&Obj> for Scene {
    type Error = Error;
    fn try_from(obj: &Obj) -> Result<Self> {
        build_scene(obj, &ImportConfig::default())
    }
}

#[cfg(test)]
use super::{ObjMesh, PolyMeshFace};

#[cfg(test)]
fn tri_mesh(name: &str) -> ObjMesh {
    let mut m = ObjMesh::new(name);
    m.f.push(PolyMeshFace::polygon([0, 1, 2]));
    m
}

#[test]
fn test_nested_objects() {
    let mut obj = Obj::new("nested");
    obj.v = vec![[0.; 3]; 3];
    let m0 = obj.push_mesh(tri_mesh("m0"));
    let m1 = obj.push_mesh(tri_mesh("m1"));
    let m2 = obj.push_mesh(tri_mesh("m2"));
    let empty = obj.push_mesh(ObjMesh::new("empty"));

    let mut parent = ObjObject::new("parent", [m0, empty]);
    let mut child = ObjObject::new("child", [m1]);
    child.children.push(ObjObject::new("grandchild", [m2]));
    parent.children.push(child);
    parent.children.push(ObjObject::new("leaf", Vec::<usize>::new()));
    obj.objects.push(parent);

    let s = Scene::try_from(&obj).unwrap();
    assert_eq!(s.nodes.len(), 5);
    assert_eq!(s.root_node().name, "nested");
    assert_eq!(s.meshes.len(), 3);

    let names: Vec<_> = s.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["nested", "parent", "child", "grandchild", "leaf"]);
    // The parent only references its own mesh, not a slot for its children.
    assert_eq!(s.nodes[1].meshes, vec![0]);
    assert_eq!(s.nodes[2].meshes, vec![1]);
    assert_eq!(s.nodes[3].meshes, vec![2]);
    assert!(s.nodes[4].meshes.is_empty());
    assert_eq!(s.nodes[1].children, vec![2, 4]);
    assert_eq!(s.nodes[3].parent, Some(2));
    assert_eq!(s.node(3).map(|n| n.name.as_str()), Some("grandchild"));
    assert!(s.node(5).is_none());
    assert_eq!(s.descendant_mesh_count(s.root), s.meshes.len());
    let mesh_names: Vec<_> = s.meshes.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(mesh_names, ["m0", "m1", "m2"]);
}

#[test]
fn test_bad_mesh_reference() {
    let mut obj = Obj::new("bad");
    obj.objects.push(ObjObject::new("o", [3]));
    assert_eq!(
        build_scene(&obj, &ImportConfig::default()),
        Err(Error::MeshIndexOutOfRange { index: 3, len: 0 })
    );
}
