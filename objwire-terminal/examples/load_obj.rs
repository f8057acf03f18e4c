//! Example: render an OBJ file headlessly and print a summary
//!
//! Usage: cargo run --example load_obj -- path/to/file.obj [fill]

use anyhow::{Context, Result};
use objwire_core::{install_model_renderer, obj, Host, LoadOptions, ModelConfig};
use std::env;

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let mut config = ModelConfig::default();
    match args.get(1) {
        Some(path) => {
            println!("Loading OBJ file: {}", path);
            let mesh = obj::load_mesh_file(path, &LoadOptions::strict())
                .with_context(|| format!("Failed to load {path}"))?;
            println!(
                "Loaded {} vertices, {} faces",
                mesh.vertices.len(),
                mesh.faces.len()
            );
            if let Some((min, max)) = mesh.bounds() {
                println!("Bounds: {:?} .. {:?}", min.coords.as_slice(), max.coords.as_slice());
            }
            config.obj_text = std::fs::read_to_string(path)?.into();
        }
        None => {
            eprintln!("Usage: {} <obj-file> [fill]", args[0]);
            eprintln!("\nNo OBJ file provided, using the embedded cat...");
        }
    }
    if let Some(fill) = args.get(2) {
        config.params = config.params.with_fill(fill.parse().context("fill must be a number")?);
    }

    let mut host = Host::new();
    install_model_renderer(&mut host, config);
    host.spawn_player("example");

    let mut ticks = 0;
    while !host.context.scheduler.is_idle() {
        host.tick();
        ticks += 1;
    }

    println!("{} ticks, {} lines submitted", ticks, host.drawer().len());
    for message in host.chat().messages() {
        println!("{}", message);
    }
    Ok(())
}
