//! Scene description types produced by importers.

use std::sync::Arc;

use crate::math::Mat4;

/// A node in the imported transform hierarchy.
///
/// Nodes form a recursive tree. Only the name and the local transform matter
/// to the rig: bones are matched to nodes by name.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Node name. Importers must give every node a name so that bone names
    /// resolve against the hierarchy.
    pub name: String,
    /// Local transform relative to the parent node.
    pub transform: Mat4,
    /// Child nodes forming the sub-tree.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Creates a named node with an identity transform and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::identity(),
            children: Vec::new(),
        }
    }

    /// Set the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    /// Set the child nodes.
    #[must_use]
    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }

    /// Count this node and all of its descendants.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }
}

/// One influence of a bone over a mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexWeight {
    /// Vertex index within the owning [`SceneMesh`].
    pub vertex: usize,
    /// Blend weight.
    pub weight: f32,
}

/// A bone as seen by one mesh: its name, bind offset, and vertex weights.
#[derive(Debug, Clone)]
pub struct SceneBone {
    /// Bone name, matching a [`SceneNode::name`] in the hierarchy.
    pub name: String,
    /// Maps mesh-space rest positions into bone-local space.
    pub offset_matrix: Mat4,
    /// Vertices this bone influences.
    pub weights: Vec<VertexWeight>,
}

impl SceneBone {
    /// Creates a bone with an identity offset and no weights.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offset_matrix: Mat4::identity(),
            weights: Vec::new(),
        }
    }

    /// Set the offset (inverse bind) matrix.
    #[must_use]
    pub fn with_offset_matrix(mut self, offset_matrix: Mat4) -> Self {
        self.offset_matrix = offset_matrix;
        self
    }

    /// Append a vertex weight.
    #[must_use]
    pub fn with_weight(mut self, vertex: usize, weight: f32) -> Self {
        self.weights.push(VertexWeight { vertex, weight });
        self
    }
}

/// A `(bone name, vertex index, weight)` triple.
#[derive(Debug, Clone, Copy)]
pub struct WeightAssignment<'a> {
    pub bone: &'a SceneBone,
    pub vertex: usize,
    pub weight: f32,
}

/// Encoded image bytes stored inside a model file.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    /// Texture cache key. Unique per image within one model file.
    pub key: String,
    /// Declared MIME type, if any.
    pub mime_type: Option<String>,
    /// Encoded bytes (PNG, JPEG, ...), shared between meshes using the image.
    pub data: Arc<[u8]>,
}

/// Where a mesh's diffuse texture comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    /// File path relative to the texture directory.
    Path(String),
    /// Image carried by the model file itself.
    Embedded(EmbeddedImage),
}

/// Flat vertex data for one imported mesh.
#[derive(Debug, Clone, Default)]
pub struct SceneMesh {
    /// Mesh name, if any.
    pub name: Option<String>,
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Texture coordinates. Empty when the mesh has none.
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle-list indices. `None` for consecutive triples.
    pub indices: Option<Vec<u32>>,
    /// Bones that influence this mesh.
    pub bones: Vec<SceneBone>,
    /// Diffuse texture, if the mesh has one.
    pub texture: Option<TextureSource>,
}

impl SceneMesh {
    /// Creates a mesh from positions alone.
    pub fn new(positions: Vec<[f32; 3]>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    /// Set the mesh name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the texture coordinates.
    #[must_use]
    pub fn with_tex_coords(mut self, tex_coords: Vec<[f32; 2]>) -> Self {
        self.tex_coords = tex_coords;
        self
    }

    /// Set the triangle-list indices.
    #[must_use]
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Set the influencing bones.
    #[must_use]
    pub fn with_bones(mut self, bones: Vec<SceneBone>) -> Self {
        self.bones = bones;
        self
    }

    /// Set the diffuse texture path, relative to the texture directory.
    #[must_use]
    pub fn with_texture_path(mut self, path: impl Into<String>) -> Self {
        self.texture = Some(TextureSource::Path(path.into()));
        self
    }

    /// Set an embedded diffuse texture.
    #[must_use]
    pub fn with_embedded_texture(mut self, image: EmbeddedImage) -> Self {
        self.texture = Some(TextureSource::Embedded(image));
        self
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Iterate all weight triples, bone by bone in import order.
    pub fn weight_assignments(&self) -> impl Iterator<Item = WeightAssignment<'_>> {
        self.bones.iter().flat_map(|bone| {
            bone.weights.iter().map(move |w| WeightAssignment {
                bone,
                vertex: w.vertex,
                weight: w.weight,
            })
        })
    }
}

/// An imported scene: one hierarchy root and the meshes to skin.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Root of the transform hierarchy.
    pub root: SceneNode,
    /// Meshes in import order.
    pub meshes: Vec<SceneMesh>,
}

impl Scene {
    /// Creates a scene with the given root and no meshes.
    pub fn new(root: SceneNode) -> Self {
        Self {
            root,
            meshes: Vec::new(),
        }
    }

    /// Set the meshes.
    #[must_use]
    pub fn with_meshes(mut self, meshes: Vec<SceneMesh>) -> Self {
        self.meshes = meshes;
        self
    }
}
