//! # RedLilium Rig Demos
//!
//! Headless drivers for the rig.
//!
//! ## Available Demos
//!
//! - `pose_demo` - Load a character and hold a bone rotation key for N frames

use redlilium_rig::math::Vec3;
use redlilium_rig::render::{Renderer, SubmeshDraw};

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A renderer that records what one frame would draw instead of drawing it.
#[derive(Debug, Clone)]
pub struct FrameStats {
    /// Submeshes drawn.
    pub submeshes: usize,
    /// Submeshes drawn with a texture bound.
    pub textured: usize,
    /// Triangles drawn.
    pub triangles: usize,
    /// Axis-aligned bounds of every skinned vertex, if any were drawn.
    pub bounds: Option<(Vec3, Vec3)>,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            submeshes: 0,
            textured: 0,
            triangles: 0,
            bounds: None,
        }
    }

    /// Forget the previous frame.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Diagonal of the bounding box, or zero when nothing was drawn.
    pub fn extent(&self) -> f32 {
        self.bounds.map_or(0.0, |(min, max)| (max - min).norm())
    }
}

impl Renderer for FrameStats {
    fn draw_submesh(&mut self, draw: &SubmeshDraw<'_>) {
        self.submeshes += 1;
        self.triangles += draw.triangle_count();
        if !draw.texture.is_none() {
            self.textured += 1;
        }
        for vertex in draw.vertices {
            let p = Vec3::from(vertex.position);
            self.bounds = Some(match self.bounds {
                Some((min, max)) => (min.inf(&p), max.sup(&p)),
                None => (p, p),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redlilium_rig::skinning::SkinnedVertex;
    use redlilium_rig::texture::TextureHandle;

    fn vertex(x: f32, y: f32, z: f32) -> SkinnedVertex {
        SkinnedVertex {
            position: [x, y, z],
            uv: [0.0, 0.0],
        }
    }

    #[test]
    fn test_frame_stats_accumulate() {
        let vertices = [vertex(-1.0, 0.0, 2.0), vertex(3.0, -4.0, 0.0), vertex(0.0, 1.0, 0.0)];
        let mut stats = FrameStats::new();
        stats.draw_submesh(&SubmeshDraw {
            index: 0,
            label: None,
            texture: TextureHandle::from_raw(3),
            vertices: &vertices,
            indices: None,
        });
        stats.draw_submesh(&SubmeshDraw {
            index: 1,
            label: Some("hair"),
            texture: TextureHandle::NONE,
            vertices: &vertices[..0],
            indices: Some(&[0, 1, 2, 2, 1, 0][..]),
        });

        assert_eq!(stats.submeshes, 2);
        assert_eq!(stats.textured, 1);
        assert_eq!(stats.triangles, 3);
        let (min, max) = stats.bounds.unwrap();
        assert_eq!(min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(max, Vec3::new(3.0, 1.0, 2.0));

        stats.reset();
        assert_eq!(stats.submeshes, 0);
        assert_eq!(stats.extent(), 0.0);
    }
}
