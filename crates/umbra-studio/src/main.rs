//! Umbra studio: renders a seeded lightmap scene headlessly and writes a PNG.

mod scene;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use umbra_engine::coords::{Color, Viewport};
use umbra_engine::light::LightTexture;
use umbra_engine::logging::{init_logging, LoggingConfig};
use umbra_engine::render::{
    split_quadrants, BlendTechnique, LightmapCompositor, LightmapPass, PassScheduler, Rasterizer,
};
use umbra_engine::software::SoftwareRasterizer;
use umbra_engine::{CullMode, LightmapConfig, ResolutionScale};

use scene::Scene;

#[derive(Parser, Debug)]
#[command(name = "umbra-studio", about = "Render a 2D lightmap scene to PNG")]
struct Args {
    /// Output width in pixels.
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value = "720")]
    height: u32,

    /// Lightmap resolution: 1, 4 or 8 (also "full", "fourth", "eighth").
    #[arg(long, default_value = "1")]
    scale: ResolutionScale,

    /// Blur radius in lightmap texels; 0 disables.
    #[arg(long, default_value = "0")]
    blur: f32,

    /// Ambient gray level.
    #[arg(long, default_value = "0.1")]
    ambient: f32,

    /// Composite blend: "multiply" or "add".
    #[arg(long, default_value = "multiply")]
    blend: BlendTechnique,

    #[arg(long, default_value = "none")]
    cull: CullMode,

    /// Render the screen as four quadrant passes.
    #[arg(long)]
    split: bool,

    /// Outline light bounds and gathered hulls.
    #[arg(long)]
    wireframe: bool,

    /// Frames to simulate; the last one is written.
    #[arg(long, default_value = "1")]
    frames: u32,

    #[arg(long, default_value = "0")]
    seed: u64,

    #[arg(long, default_value = "10")]
    lights: usize,

    #[arg(long, default_value = "100")]
    hulls: usize,

    #[arg(long, short, default_value = "lightmap.png")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());
    let args = Args::parse();

    let mut r = SoftwareRasterizer::new(args.width, args.height);
    let texture = r.upload_texture(&LightTexture::point(256))?;

    let aspect = args.width as f32 / args.height.max(1) as f32;
    let mut scene = Scene::generate(texture, aspect, args.seed, args.lights, args.hulls)?;

    let config = LightmapConfig {
        resolution_scale: args.scale,
        blur: args.blur,
        ambient: Color::gray(args.ambient),
        cull_mode: args.cull,
        debug_wireframe: args.wireframe,
    };
    let mut compositor = LightmapCompositor::new(&mut r, config, args.width, args.height)?;
    let mut scheduler = PassScheduler::new();

    info!(
        "{}x{} lightmap {:?}, {} lights, {} hulls",
        args.width,
        args.height,
        compositor.lightmap_size(),
        scene.lights.len(),
        scene.hulls.len()
    );

    for _ in 0..args.frames.max(1) {
        let matrix = scene.view_projection();
        let viewports: Vec<Viewport> = if args.split {
            split_quadrants(args.width, args.height).to_vec()
        } else {
            vec![Viewport::from_size(args.width, args.height)]
        };
        let passes = viewports.into_iter().map(|vp| LightmapPass::new(vp, matrix));

        let stats = scheduler.run_frame(&mut r, &mut compositor, passes, &scene.lights, &scene.hulls)?;
        info!(
            "frame {}: {} passes, {} lights drawn, {} culled, {} hulls gathered",
            stats.frame,
            stats.passes,
            stats.lights.lights_drawn,
            stats.lights.lights_culled,
            stats.lights.hulls_gathered
        );

        r.back_buffer_mut().fill(Color::gray(0.5));
        compositor.composite(&mut r, args.blend)?;
        scene.advance();
    }

    let frame = r.back_buffer();
    let image = image::RgbaImage::from_raw(frame.width(), frame.height(), frame.to_rgba8())
        .context("back buffer does not match its dimensions")?;
    image
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!("wrote {}", args.output.display());

    compositor.dispose(&mut r);
    Ok(())
}
