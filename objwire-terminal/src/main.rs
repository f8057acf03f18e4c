//! objwire terminal host
//!
//! Usage: objwire-terminal [model.obj] [fill]
//!
//! Without a path the embedded cat is rendered. The render starts when the
//! local player spawns and advances one face per frame.
//! Controls:
//!   - WASD / Arrow Keys: Rotate the view
//!   - O: Toggle perspective/orthographic
//!   - P: Respawn (the model is only rendered once)
//!   - Q/ESC: Quit
//!
//! Logging goes to stderr, or to the file named by `OBJWIRE_LOG` so it does
//! not fight with the alternate screen.

use anyhow::{bail, Context, Result};
use objwire_core::{obj, LoadOptions, ModelConfig};
use objwire_terminal::TerminalApp;
use std::env;
use std::fs::File;

fn init_logging() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Ok(path) = env::var("OBJWIRE_LOG") {
        let file = File::create(&path).with_context(|| format!("create log file {path}"))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn config_from_args(args: &[String]) -> Result<ModelConfig> {
    let mut config = ModelConfig::default();

    if let Some(path) = args.get(1) {
        let text = std::fs::read_to_string(path).with_context(|| format!("read OBJ {path}"))?;
        // Reject malformed files before the terminal is taken over
        let mesh = obj::load_mesh_with(&text, &LoadOptions::strict())?;
        println!(
            "Loaded {}: {} vertices, {} faces",
            path,
            mesh.vertices.len(),
            mesh.faces.len()
        );
        config.obj_text = text.into();
    }

    if let Some(fill) = args.get(2) {
        let fill: u32 = fill.parse().with_context(|| format!("invalid fill {fill:?}"))?;
        if fill == 0 {
            bail!("fill must be at least 1");
        }
        config.params = config.params.with_fill(fill);
    }

    Ok(config)
}

fn main() -> Result<()> {
    init_logging()?;

    let args: Vec<String> = env::args().collect();
    let config = config_from_args(&args)?;

    println!("objwire terminal host - starting (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(config, "player")?;
    app.run()?;

    for message in app.messages() {
        println!("{message}");
    }
    Ok(())
}
