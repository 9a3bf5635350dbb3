//! Renderer collaborator interface.
//!
//! The rig never issues draw calls itself. Each frame a
//! [`PosedCharacter`](crate::character::PosedCharacter) hands every submesh's
//! skinned vertex stream to a [`Renderer`] in submesh order.

use crate::skinning::SkinnedVertex;
use crate::texture::TextureHandle;

/// One submesh ready to draw.
#[derive(Debug, Clone, Copy)]
pub struct SubmeshDraw<'a> {
    /// Position of the submesh within the character.
    pub index: usize,
    /// Debug label.
    pub label: Option<&'a str>,
    /// Texture to bind; may be [`TextureHandle::NONE`].
    pub texture: TextureHandle,
    /// Skinned vertices for this frame.
    pub vertices: &'a [SkinnedVertex],
    /// Triangle-list indices. `None` means consecutive triples.
    pub indices: Option<&'a [u32]>,
}

impl SubmeshDraw<'_> {
    /// Number of triangles described by this draw.
    pub fn triangle_count(&self) -> usize {
        match self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertices.len() / 3,
        }
    }
}

/// Receives skinned submeshes and draws them.
pub trait Renderer {
    /// Draw one submesh.
    fn draw_submesh(&mut self, draw: &SubmeshDraw<'_>);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw_submesh(&mut self, draw: &SubmeshDraw<'_>) {
        (**self).draw_submesh(draw)
    }
}
