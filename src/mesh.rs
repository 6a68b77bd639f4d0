use super::{F, FaceKind, MAX_UV, PrimitiveTypes, Vec3, Vec4};

use image::DynamicImage;

/// A node in the scene hierarchy. Nodes live in [`Scene::nodes`] and refer to each other by index.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    /// Index of the parent node, `None` for the root.
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Indices into [`Scene::meshes`], contiguous and increasing.
    pub meshes: Vec<usize>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Scene {
    pub root: usize,
    pub nodes: Vec<Node>,
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
}

impl Scene {
    /// Creates a scene with a single root node named `name`.
    pub fn with_root(name: impl Into<String>) -> Self {
        Self {
            root: 0,
            nodes: vec![Node {
                name: name.into(),
                ..Default::default()
            }],
            meshes: vec![],
            materials: vec![],
        }
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[self.root]
    }

    pub fn node(&self, i: usize) -> Option<&Node> {
        self.nodes.get(i)
    }

    /// Children of node `i`, in insertion order.
    pub fn children(&self, i: usize) -> impl Iterator<Item = &Node> + '_ {
        self.nodes[i].children.iter().map(|&c| &self.nodes[c])
    }

    /// Creates a new node named `name` as the last child of `parent`, returning its index.
    pub fn append_child(&mut self, parent: usize, name: impl Into<String>) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            name: name.into(),
            parent: Some(parent),
            ..Default::default()
        });
        self.nodes[parent].children.push(idx);
        idx
    }

    /// Number of mesh references held by node `i` and all of its descendants.
    pub fn descendant_mesh_count(&self, i: usize) -> usize {
        let n = &self.nodes[i];
        n.meshes.len()
            + n.children
                .iter()
                .map(|&c| self.descendant_mesh_count(c))
                .sum::<usize>()
    }

    /// Total number of dense vertices over all meshes.
    pub fn num_vertices(&self) -> usize {
        self.meshes.iter().map(Mesh::num_vertices).sum()
    }
}

/// A mesh with dense, per-mesh vertex buffers.
///
/// Every attribute buffer is either empty or has exactly [`Mesh::num_vertices`] entries.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    /// Union of the primitive kinds of every face.
    pub primitives: PrimitiveTypes,

    pub f: Vec<FaceKind>,

    pub v: Vec<Vec3>,
    pub n: Vec<Vec3>,
    pub uv: [Vec<Vec3>; MAX_UV],
    /// Number of meaningful components in each `uv` channel.
    pub uv_components: [u8; MAX_UV],
    pub vert_colors: Vec<Vec4>,

    /// Material index as stored in the model's material library.
    ///
    /// Materials that are missing from the library map are skipped by the translator, so this
    /// is only a direct index into [`Scene::materials`] if every library entry resolved.
    pub mat: Option<usize>,
}

impl Mesh {
    pub fn num_vertices(&self) -> usize {
        self.v.len()
    }
    pub fn has_normals(&self) -> bool {
        !self.n.is_empty()
    }
    pub fn has_uv(&self, chan: usize) -> bool {
        self.uv.get(chan).is_some_and(|uv| !uv.is_empty())
    }
    pub fn has_vert_colors(&self) -> bool {
        !self.vert_colors.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadingModel {
    Flat,
    #[default]
    Gouraud,
    Phong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
    Ambient,
    Emissive,
    Normal,
    Height,
    Opacity,
    Shininess,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub kind: TextureKind,
    /// Image handed over by the loader, never decoded here.
    pub image: Option<DynamicImage>,
    pub original_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub shading: ShadingModel,

    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub emissive: Vec3,

    pub shininess: F,
    pub opacity: F,
    pub refraction_index: F,

    pub textures: Vec<Texture>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            shading: ShadingModel::default(),
            ambient: [0.; 3],
            diffuse: [0.; 3],
            specular: [0.; 3],
            emissive: [0.; 3],
            shininess: 0.,
            // IMPORTANT set this to 1 otherwise it will be transparent.
            opacity: 1.,
            refraction_index: 1.,
            textures: vec![],
        }
    }
}

impl Material {
    pub fn texture(&self, kind: TextureKind) -> Option<&Texture> {
        self.textures.iter().find(|t| t.kind == kind)
    }
}

#[test]
fn test_append_child() {
    let mut s = Scene::with_root("root");
    let a = s.append_child(s.root, "a");
    let b = s.append_child(a, "b");
    let c = s.append_child(s.root, "c");
    assert_eq!(s.root_node().children, vec![a, c]);
    assert_eq!(s.nodes[b].parent, Some(a));
    assert_eq!(s.nodes[a].parent, Some(s.root));
    assert_eq!(s.root_node().parent, None);
    let names: Vec<_> = s.children(s.root).map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["a", "c"]);

    s.nodes[b].meshes = vec![0, 1];
    s.nodes[c].meshes = vec![2];
    assert_eq!(s.descendant_mesh_count(s.root), 3);
    assert_eq!(s.descendant_mesh_count(a), 2);
}
