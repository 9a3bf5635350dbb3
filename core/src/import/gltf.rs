//! glTF 2.0 scene importer.
//!
//! Supports `.glb` and `.gltf` with embedded, data URI, or relative-file
//! buffers. Only what the rig needs is read: node names and local transforms,
//! triangle-list primitives with positions, texture coordinates and indices,
//! `JOINTS_0`/`WEIGHTS_0` for skinned nodes, and the base color image.
//!
//! External image URIs are percent-decoded into texture paths. Images stored
//! in a buffer view or a base64 `data:` URI are carried as encoded bytes,
//! keyed `"{model path}#image{index}"`.

use std::path::Path;
use std::sync::Arc;

use base64::Engine as _;
use gltf_dep::Document;
use gltf_dep::buffer::Data;
use gltf_dep::image::Source;
use gltf_dep::mesh::Mode;

use crate::error::ImportError;
use crate::math::{Mat4, mat4_from_cols_array_2d};
use crate::scene::{
    EmbeddedImage, Scene, SceneBone, SceneMesh, SceneNode, TextureSource, VertexWeight,
};

use super::SceneImporter;

/// Name of the node inserted above multiple scene roots.
pub const SYNTHETIC_ROOT: &str = "<root>";

/// Imports glTF files into a [`Scene`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfImporter;

impl GltfImporter {
    /// Create an importer.
    pub fn new() -> Self {
        Self
    }

    /// Import from in-memory `.glb` or `.gltf` bytes.
    ///
    /// `base` is the directory relative buffer URIs are resolved against.
    /// Without it only embedded and data URI buffers can be read. Embedded
    /// images are keyed `"#image{index}"`; [`SceneImporter::import`]
    /// prefixes the key with the file path.
    pub fn import_slice(&self, data: &[u8], base: Option<&Path>) -> Result<Scene, ImportError> {
        self.import_bytes(data, base, "")
    }

    fn import_bytes(
        &self,
        data: &[u8],
        base: Option<&Path>,
        origin: &str,
    ) -> Result<Scene, ImportError> {
        let gltf_dep::Gltf { document, blob } = gltf_dep::Gltf::from_slice(data)?;
        let buffers = gltf_dep::import_buffers(&document, base, blob)?;
        let ctx = ImportContext {
            document: &document,
            buffers: &buffers,
            origin,
        };
        ctx.scene()
    }
}

impl SceneImporter for GltfImporter {
    fn import(&self, path: &Path) -> Result<Scene, ImportError> {
        let data = std::fs::read(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.import_bytes(&data, path.parent(), &path.to_string_lossy())
    }
}

struct ImportContext<'a> {
    document: &'a Document,
    buffers: &'a [Data],
    /// Prefix of embedded image cache keys.
    origin: &'a str,
}

impl ImportContext<'_> {
    fn scene(&self) -> Result<Scene, ImportError> {
        let scene = self
            .document
            .default_scene()
            .or_else(|| self.document.scenes().next())
            .ok_or(ImportError::NoScene)?;

        let mut roots: Vec<SceneNode> = scene.nodes().map(|n| load_node(&n)).collect();
        let root = match roots.len() {
            0 => return Err(ImportError::NoScene),
            1 => roots.remove(0),
            _ => SceneNode::new(SYNTHETIC_ROOT).with_children(roots),
        };

        let mut mesh_nodes = Vec::new();
        for node in scene.nodes() {
            collect_mesh_nodes(node, &mut mesh_nodes);
        }

        let images = self.load_images()?;
        let mut meshes = Vec::new();
        for node in &mesh_nodes {
            self.load_node_meshes(node, &images, &mut meshes)?;
        }

        log::debug!(
            "glTF scene: {} nodes, {} meshes",
            root.node_count(),
            meshes.len()
        );
        Ok(Scene::new(root).with_meshes(meshes))
    }

    /// Append one `SceneMesh` per primitive of the node's mesh.
    fn load_node_meshes(
        &self,
        node: &gltf_dep::Node<'_>,
        images: &[Option<TextureSource>],
        out: &mut Vec<SceneMesh>,
    ) -> Result<(), ImportError> {
        let Some(mesh) = node.mesh() else {
            return Ok(());
        };
        let skin = node.skin().map(|skin| self.load_skin(&skin));
        let primitive_count = mesh.primitives().len();

        for (prim_idx, primitive) in mesh.primitives().enumerate() {
            if primitive.mode() != Mode::Triangles {
                return Err(ImportError::UnsupportedTopology(format!(
                    "mesh {} primitive {prim_idx} uses {:?}, only triangle lists are supported",
                    mesh.index(),
                    primitive.mode()
                )));
            }

            let reader = primitive.reader(|buffer| self.buffer(buffer));
            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or(ImportError::MissingPositions {
                    mesh: mesh.index(),
                    primitive: prim_idx,
                })?
                .collect();
            let tex_coords: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|tc| tc.into_f32().collect())
                .unwrap_or_default();

            let mut scene_mesh = SceneMesh::new(positions).with_tex_coords(tex_coords);
            if let Some(indices) = reader.read_indices() {
                scene_mesh = scene_mesh.with_indices(indices.into_u32().collect());
            }
            if let Some(name) = mesh.name() {
                scene_mesh = if primitive_count > 1 {
                    scene_mesh.with_name(format!("{name}_prim{prim_idx}"))
                } else {
                    scene_mesh.with_name(name)
                };
            }
            scene_mesh.texture = base_color_image(&primitive)
                .and_then(|index| images.get(index).cloned().flatten());

            match (&skin, reader.read_joints(0), reader.read_weights(0)) {
                (Some(skin), Some(joints), Some(weights)) => {
                    let joints: Vec<[u16; 4]> = joints.into_u16().collect();
                    let weights: Vec<[f32; 4]> = weights.into_f32().collect();
                    scene_mesh.bones = skin.bones_for(mesh.index(), &joints, &weights)?;
                }
                (None, Some(_), _) => {
                    log::debug!(
                        "Mesh {} has joints but node '{}' has no skin; treating it as static",
                        mesh.index(),
                        node_name(node)
                    );
                }
                _ => {}
            }

            out.push(scene_mesh);
        }
        Ok(())
    }

    fn load_skin(&self, skin: &gltf_dep::Skin<'_>) -> SkinJoints {
        let names: Vec<String> = skin.joints().map(|joint| node_name(&joint)).collect();
        let reader = skin.reader(|buffer| self.buffer(buffer));
        let mut offsets: Vec<Mat4> = reader
            .read_inverse_bind_matrices()
            .map(|matrices| matrices.map(mat4_from_cols_array_2d).collect())
            .unwrap_or_default();
        offsets.resize(names.len(), Mat4::identity());
        SkinJoints { names, offsets }
    }

    fn buffer(&self, buffer: gltf_dep::Buffer<'_>) -> Option<&[u8]> {
        self.buffers.get(buffer.index()).map(|data| data.0.as_slice())
    }

    /// Texture source for every image, indexed like `document.images()`.
    ///
    /// `None` marks an image that cannot be used; meshes referencing it stay
    /// untextured.
    fn load_images(&self) -> Result<Vec<Option<TextureSource>>, ImportError> {
        self.document
            .images()
            .map(|image| self.load_image(&image))
            .collect()
    }

    fn load_image(
        &self,
        image: &gltf_dep::Image<'_>,
    ) -> Result<Option<TextureSource>, ImportError> {
        let key = format!("{}#image{}", self.origin, image.index());
        match image.source() {
            Source::View { view, mime_type } => {
                let bytes = self
                    .buffer(view.buffer())
                    .and_then(|data| data.get(view.offset()..view.offset() + view.length()))
                    .ok_or_else(|| {
                        ImportError::IncompleteScene(format!(
                            "image {} buffer view {} is out of range",
                            image.index(),
                            view.index()
                        ))
                    })?;
                Ok(Some(TextureSource::Embedded(EmbeddedImage {
                    key,
                    mime_type: Some(mime_type.to_string()),
                    data: Arc::from(bytes),
                })))
            }
            Source::Uri { uri, mime_type } => match uri.strip_prefix("data:") {
                Some(data_uri) => match decode_data_uri(data_uri) {
                    Some((uri_mime, bytes)) => Ok(Some(TextureSource::Embedded(EmbeddedImage {
                        key,
                        mime_type: mime_type.or(uri_mime).map(String::from),
                        data: Arc::from(bytes),
                    }))),
                    None => {
                        log::warn!("Image {} has an unreadable data URI", image.index());
                        Ok(None)
                    }
                },
                None => Ok(Some(TextureSource::Path(decode_uri_path(uri)))),
            },
        }
    }
}

/// Joint names and inverse bind matrices of one skin.
struct SkinJoints {
    names: Vec<String>,
    offsets: Vec<Mat4>,
}

impl SkinJoints {
    /// Convert per-vertex joint/weight quads into per-bone weight lists.
    ///
    /// Zero weights are skipped and joints that end up with no weights are
    /// left out.
    fn bones_for(
        &self,
        mesh: usize,
        joints: &[[u16; 4]],
        weights: &[[f32; 4]],
    ) -> Result<Vec<SceneBone>, ImportError> {
        let mut bones: Vec<SceneBone> = self
            .names
            .iter()
            .zip(&self.offsets)
            .map(|(name, offset)| SceneBone::new(name.clone()).with_offset_matrix(*offset))
            .collect();

        for (vertex, (joint_quad, weight_quad)) in joints.iter().zip(weights).enumerate() {
            for (&joint, &weight) in joint_quad.iter().zip(weight_quad) {
                if weight <= 0.0 {
                    continue;
                }
                let joint = joint as usize;
                let bone = bones.get_mut(joint).ok_or(ImportError::InvalidJoint {
                    mesh,
                    joint,
                    joint_count: self.names.len(),
                })?;
                bone.weights.push(VertexWeight { vertex, weight });
            }
        }

        bones.retain(|bone| !bone.weights.is_empty());
        Ok(bones)
    }
}

fn node_name(node: &gltf_dep::Node<'_>) -> String {
    node.name()
        .map(String::from)
        .unwrap_or_else(|| format!("node{}", node.index()))
}

fn load_node(node: &gltf_dep::Node<'_>) -> SceneNode {
    SceneNode::new(node_name(node))
        .with_transform(mat4_from_cols_array_2d(node.transform().matrix()))
        .with_children(node.children().map(|c| load_node(&c)).collect())
}

/// Pre-order list of nodes that carry a mesh.
fn collect_mesh_nodes<'a>(node: gltf_dep::Node<'a>, out: &mut Vec<gltf_dep::Node<'a>>) {
    if node.mesh().is_some() {
        out.push(node.clone());
    }
    for child in node.children() {
        collect_mesh_nodes(child, out);
    }
}

/// Image index of the primitive's base color texture.
fn base_color_image(primitive: &gltf_dep::Primitive<'_>) -> Option<usize> {
    let info = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_texture()?;
    Some(info.texture().source().index())
}

/// Split the part after `data:` into its MIME type and decoded bytes.
///
/// Only base64 payloads are supported.
fn decode_data_uri(data_uri: &str) -> Option<(Option<&str>, Vec<u8>)> {
    let (header, payload) = data_uri.split_once(',')?;
    let mime_type = header.strip_suffix(";base64")?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()?;
    Some(((!mime_type.is_empty()).then_some(mime_type), bytes))
}

/// Percent-decode a relative image URI into a file path.
fn decode_uri_path(uri: &str) -> String {
    match urlencoding::decode(uri) {
        Ok(path) => path.into_owned(),
        Err(e) => {
            log::warn!("Image URI '{uri}' does not decode to UTF-8 ({e}); using it verbatim");
            uri.to_string()
        }
    }
}
