//! pinhole - render a scene to PNG.

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pinhole_render::{FrameBuffer, SceneDescription};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let description = match &args.scene {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read scene {}", path.display()))?;
            SceneDescription::from_toml(&source)
                .with_context(|| format!("Failed to parse scene {}", path.display()))?
        }
        None => {
            info!("No scene given, using the demo scene");
            SceneDescription::default()
        }
    };

    if args.dump_scene {
        print!("{}", description.to_toml()?);
        return Ok(());
    }

    if args.width == 0 || args.height == 0 {
        anyhow::bail!("Image size must be non-zero, got {}x{}", args.width, args.height);
    }

    let scene = description.build().context("Failed to build scene")?;
    let mut frame = FrameBuffer::new(args.width, args.height);
    let stats = match args.threads {
        Some(threads) => scene.render_with_threads(&mut frame, threads)?,
        None => scene.render(&mut frame)?,
    };

    frame
        .to_rgb8()
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(
        "Wrote {} ({} chunks, {:.3}s)",
        args.output.display(),
        stats.chunks,
        stats.elapsed.as_secs_f64()
    );

    Ok(())
}
