//! # Pose Demo
//!
//! Loads a character, then simulates holding a rotation key: every frame the
//! chosen bone turns a few more degrees around the chosen axis, the skeleton
//! is updated, and the skinned frame is drawn through a stats-collecting
//! renderer.
//!
//! ```bash
//! pose_demo assets/mita/mita.glb --bone Head --axis y --frames 90
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use redlilium_rig::math::Vec3;
use redlilium_rig::texture::ImageTextureProvider;
use redlilium_rig::{Character, LoadOptions, Rotation, import::GltfImporter};
use redlilium_rig_demos::FrameStats;

/// Rotation axis selection for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
enum CliAxis {
    X,
    #[default]
    Y,
    Z,
}

impl From<CliAxis> for Vec3 {
    fn from(axis: CliAxis) -> Self {
        match axis {
            CliAxis::X => Vec3::x(),
            CliAxis::Y => Vec3::y(),
            CliAxis::Z => Vec3::z(),
        }
    }
}

/// Pose a skinned character on the CPU.
#[derive(Parser, Debug)]
#[command(name = "pose_demo", version)]
struct Args {
    /// Model file (.gltf or .glb).
    model: PathBuf,

    /// Directory textures are resolved against. Defaults to the model's directory.
    #[arg(long)]
    texture_dir: Option<PathBuf>,

    /// Bone to rotate.
    #[arg(long, default_value = "Head")]
    bone: String,

    /// Rotation axis.
    #[arg(long, default_value = "y", value_enum)]
    axis: CliAxis,

    /// Degrees added per frame while the key is held.
    #[arg(long, default_value = "2.0", allow_negative_numbers = true)]
    degrees_per_frame: f32,

    /// Number of frames to simulate.
    #[arg(long, default_value = "60")]
    frames: u32,

    /// Flip the V texture coordinate on import.
    #[arg(long)]
    flip_uvs: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut options = LoadOptions::new().with_flip_uvs(args.flip_uvs);
    if let Some(dir) = &args.texture_dir {
        options = options.with_texture_dir(dir);
    }

    let mut textures = ImageTextureProvider::new();
    let mut character = Character::new();
    if let Err(e) = character.load(&GltfImporter::new(), &args.model, &options, &mut textures) {
        log::error!("Cannot continue without a model: {e}");
        return ExitCode::FAILURE;
    }
    log::info!(
        "{} textures decoded, {} cached paths",
        textures.len(),
        character.texture_cache().len()
    );

    let axis = Vec3::from(args.axis);
    let mut stats = FrameStats::new();
    let mut angle = 0.0f32;

    for frame in 0..args.frames {
        angle += args.degrees_per_frame;
        character.set_bone_rotation(&args.bone, Rotation::from_degrees(axis, angle));

        stats.reset();
        character.update().draw(&mut stats);

        if frame % 15 == 0 || frame + 1 == args.frames {
            log::info!(
                "frame {frame}: {}° on '{}', {} submeshes ({} textured), {} triangles, extent {:.3}",
                angle,
                args.bone,
                stats.submeshes,
                stats.textured,
                stats.triangles,
                stats.extent()
            );
        }
    }

    if let Some((min, max)) = stats.bounds {
        log::info!(
            "Final bounds: [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
            min.x,
            min.y,
            min.z,
            max.x,
            max.y,
            max.z
        );
    }
    ExitCode::SUCCESS
}
