//! The character container: submeshes, skeleton, and texture cache.
//!
//! A [`Character`] owns everything needed to pose and draw one loaded model.
//! Each frame follows a two-phase protocol:
//!
//! 1. Pose: [`Character::set_bone_rotation`] as often as needed.
//! 2. [`Character::update`] recomputes bone finals and returns a
//!    [`PosedCharacter`], a read-only view whose [`PosedCharacter::draw`]
//!    skins every submesh and hands it to a [`Renderer`].
//!
//! Drawing is only reachable through `update`, so a frame cannot be drawn
//! with stale bone matrices.
//!
//! # Example
//!
//! ```ignore
//! use redlilium_rig::character::{Character, LoadOptions};
//! use redlilium_rig::import::GltfImporter;
//! use redlilium_rig::skeleton::Rotation;
//! use redlilium_rig::texture::ImageTextureProvider;
//!
//! let mut textures = ImageTextureProvider::new();
//! let mut character = Character::new();
//! character.load(&GltfImporter::new(), "mita/mita.glb", &LoadOptions::new(), &mut textures)?;
//!
//! character.set_bone_rotation("Head", Rotation::from_degrees(Vec3::y(), 30.0));
//! character.update().draw(&mut renderer);
//! ```

mod options;

pub use options::LoadOptions;

use std::path::Path;

use crate::error::ImportError;
use crate::import::SceneImporter;
use crate::math::Vec3;
use crate::mesh::Submesh;
use crate::render::{Renderer, SubmeshDraw};
use crate::scene::{Scene, TextureSource};
use crate::skeleton::{self, Rotation, Skeleton};
use crate::skinning::{self, SkinnedVertex};
use crate::texture::{TextureCache, TextureHandle, TextureProvider};

/// One loaded, poseable character.
#[derive(Debug, Default)]
pub struct Character {
    submeshes: Vec<Submesh>,
    skeleton: Skeleton,
    textures: TextureCache,
}

impl Character {
    /// Create an empty character.
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a model file and replace the current model with it.
    ///
    /// On error the previously loaded model is left untouched. The texture
    /// cache survives reloads, so loading the same asset again reuses its
    /// texture handles.
    pub fn load(
        &mut self,
        importer: &impl SceneImporter,
        path: impl AsRef<Path>,
        options: &LoadOptions,
        provider: &mut impl TextureProvider,
    ) -> Result<(), ImportError> {
        let path = path.as_ref();
        let scene = importer.import(path).inspect_err(|e| {
            log::error!("Failed to load model {}: {e}", path.display());
        })?;
        let texture_dir = options.resolve_texture_dir(path);
        self.load_scene(&scene, &texture_dir, options, provider)?;
        log::info!(
            "Loaded {}: {} submeshes, {} bones",
            path.display(),
            self.submeshes.len(),
            self.skeleton.len()
        );
        Ok(())
    }

    /// Build the character from an already imported scene.
    pub fn load_scene(
        &mut self,
        scene: &Scene,
        texture_dir: &Path,
        options: &LoadOptions,
        provider: &mut impl TextureProvider,
    ) -> Result<(), ImportError> {
        let (mut submeshes, skeleton) = skeleton::build(scene)?;

        for (submesh, mesh) in submeshes.iter_mut().zip(&scene.meshes) {
            let handle = match &mesh.texture {
                Some(TextureSource::Path(texture_path)) => {
                    let full_path = texture_dir.join(texture_path);
                    self.textures
                        .get_or_load(&full_path.to_string_lossy(), provider)
                }
                Some(TextureSource::Embedded(image)) => {
                    self.textures.get_or_load_embedded(image, provider)
                }
                None => TextureHandle::NONE,
            };
            submesh.set_texture(handle);
            if options.flip_uvs {
                for vertex in submesh.vertices_mut() {
                    vertex.uv[1] = 1.0 - vertex.uv[1];
                }
            }
        }

        self.submeshes = submeshes;
        self.skeleton = skeleton;
        Ok(())
    }

    /// Set the manual rotation of a bone, replacing any previous one.
    ///
    /// Unknown bone names are logged and ignored; returns whether the
    /// rotation was applied.
    pub fn set_bone_rotation(&mut self, name: &str, rotation: impl Into<Rotation>) -> bool {
        match self.skeleton.set_bone_rotation(name, rotation) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Ignoring pose request: {e}");
                false
            }
        }
    }

    /// Reset every bone to its bind pose.
    pub fn reset_pose(&mut self) {
        self.skeleton.reset_pose();
    }

    /// Recompute bone transforms for this frame.
    pub fn update(&mut self) -> PosedCharacter<'_> {
        self.skeleton.update();
        PosedCharacter { character: self }
    }

    /// Loaded submeshes in import order.
    pub fn submeshes(&self) -> &[Submesh] {
        &self.submeshes
    }

    /// The skeleton.
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// The texture cache.
    pub fn texture_cache(&self) -> &TextureCache {
        &self.textures
    }

    /// Drop every cached texture handle. The next load decodes again.
    pub fn clear_texture_cache(&mut self) {
        self.textures.clear();
    }
}

/// A character whose bone transforms are current for this frame.
#[derive(Debug, Clone, Copy)]
pub struct PosedCharacter<'a> {
    character: &'a Character,
}

impl<'a> PosedCharacter<'a> {
    /// The underlying character.
    pub fn character(&self) -> &'a Character {
        self.character
    }

    /// Deformed positions of one submesh.
    pub fn deformed_positions(&self, submesh: usize) -> Option<Vec<Vec3>> {
        let submesh = self.character.submeshes.get(submesh)?;
        Some(skinning::deform(submesh, self.character.skeleton.bones()))
    }

    /// Skin every submesh and pass it to `renderer`, in submesh order.
    pub fn draw(&self, renderer: &mut impl Renderer) {
        let bones = self.character.skeleton.bones();
        let mut vertices: Vec<SkinnedVertex> = Vec::new();

        for (index, submesh) in self.character.submeshes.iter().enumerate() {
            skinning::skin_into(submesh, bones, &mut vertices);
            renderer.draw_submesh(&SubmeshDraw {
                index,
                label: submesh.label(),
                texture: submesh.texture(),
                vertices: &vertices,
                indices: submesh.indices(),
            });
        }
    }
}
