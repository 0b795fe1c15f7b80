//! Renders the two-triangle test scene to an image file.
//!
//! Usage: `softrast [OUTPUT] [none|ssaa|msaa]`

use anyhow::{bail, Context, Result};
use softrast::prelude::*;

const WINDOW_WIDTH: u32 = 700;
const WINDOW_HEIGHT: u32 = 700;

fn parse_anti_aliasing(arg: Option<&str>) -> Result<AntiAliasing> {
    match arg.map(str::to_ascii_lowercase).as_deref() {
        None | Some("none") => Ok(AntiAliasing::None),
        Some("ssaa") => Ok(AntiAliasing::Supersample),
        Some("msaa") => Ok(AntiAliasing::Multisample),
        Some(other) => bail!("unknown anti-aliasing mode '{}', expected none, ssaa or msaa", other),
    }
}

fn scene() -> MeshData {
    let near = Vec3::new(217.0, 238.0, 185.0) / 255.0;
    let far = Vec3::new(185.0, 217.0, 238.0) / 255.0;

    MeshData {
        positions: vec![
            Vec3::new(2.0, 0.0, -2.0),
            Vec3::new(0.0, 2.0, -2.0),
            Vec3::new(-2.0, 0.0, -2.0),
            Vec3::new(3.5, -1.0, -5.0),
            Vec3::new(2.5, 1.5, -5.0),
            Vec3::new(-1.0, 0.5, -5.0),
        ],
        indices: vec![[0, 1, 2], [3, 4, 5]],
        colors: vec![near, near, near, far, far, far],
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let output = args.get(1).map(String::as_str).unwrap_or("output.png");
    let anti_aliasing = parse_anti_aliasing(args.get(2).map(String::as_str))?;

    let config = RasterConfig::new(WINDOW_WIDTH, WINDOW_HEIGHT).anti_aliasing(anti_aliasing);
    let mut engine = Engine::with_config(config);

    let mesh = engine.load_mesh_data(scene());
    engine.set_model(Mat4::identity());
    engine.set_view(Mat4::look_from(Vec3::new(0.0, 0.0, 5.0)));
    engine.set_projection(
        Projection::from_degrees(
            45.0,
            WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32,
            0.1,
            50.0,
        )
        .matrix(),
    );

    log::info!("rendering scene with {} anti-aliasing", anti_aliasing);
    engine.clear(Buffers::COLOR | Buffers::DEPTH);
    engine
        .draw(mesh.positions, mesh.indices, mesh.colors, Primitive::Triangle)
        .context("drawing scene")?;
    engine
        .save(output)
        .with_context(|| format!("saving frame to {}", output))?;

    Ok(())
}
