//! Render a mesh as a silhouette, a wireframe, and with flat and per-vertex shading.
//!
//! Writes `simple.png`, `wireframe.png`, `flat_shading.png` and `pv_shading.png`, then rotating
//! animations `wireframe_render.gif`, `flat_shading.gif` and `pv_shading.gif`.
//!
//! ```text
//! cargo run --example render_mesh -- [-m <mesh.off>] [-o <output dir>]
//! ```
//!
//! The mesh defaults to the bundled `data/cube.off` and the output directory to the current one.

use raster::{
    export::{save_png, GifRecorder},
    scene::{render, Mesh, Scene},
    FrameBuffer,
};
use std::{env, f32::consts::PI, path::PathBuf};

/// Frames per animation.
const FRAMES: usize = 20;
/// Time each animation frame is shown, in milliseconds.
const FRAME_DELAY: u32 = 250;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut mesh_path = PathBuf::from("data/cube.off");
    let mut out_dir = PathBuf::from(".");

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match (args[i].as_str(), args.get(i + 1)) {
            ("-m", Some(path)) => mesh_path = PathBuf::from(path),
            ("-o", Some(dir)) => out_dir = PathBuf::from(dir),
            (flag, _) => return Err(format!("unrecognised argument `{}`", flag).into()),
        }
        i += 2;
    }
    std::fs::create_dir_all(&out_dir)?;

    let mesh = Mesh::load_off(&mesh_path)?;
    let scene = Scene::default();
    let [w, h] = scene.camera.image_size();
    let mut frame = FrameBuffer::new([w, h]);

    render::simple_render(&scene, &mesh, &mut frame);
    save_png(&frame, out_dir.join("simple.png"))?;

    frame.reset();
    render::wireframe_render(&scene, &mesh, 0.0, &mut frame);
    save_png(&frame, out_dir.join("wireframe.png"))?;

    frame.reset();
    render::flat_shading(&scene, &mesh, 0.0, &mut frame);
    save_png(&frame, out_dir.join("flat_shading.png"))?;

    frame.reset();
    render::pv_shading(&scene, &mesh, 0.0, &mut frame);
    save_png(&frame, out_dir.join("pv_shading.png"))?;

    let animations: [(&str, fn(&Scene, &Mesh, f32, &mut FrameBuffer)); 3] = [
        ("wireframe_render.gif", render::wireframe_render),
        ("flat_shading.gif", render::flat_shading),
        ("pv_shading.gif", render::pv_shading),
    ];
    for (name, draw) in animations.iter() {
        let mut gif = GifRecorder::create(out_dir.join(name), w, h, FRAME_DELAY)?;
        for i in 0..FRAMES {
            let alpha = 2.0 * PI * i as f32 / FRAMES as f32;
            frame.reset();
            draw(&scene, &mesh, alpha, &mut frame);
            gif.push_frame(&frame)?;
        }
        gif.finish()?;
    }

    Ok(())
}
