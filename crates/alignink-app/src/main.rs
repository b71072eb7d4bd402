//! Main application entry point.
//!
//! Usage:
//!   alignink [OPTIONS] [SCENE]
//!
//! Without a scene file, the built-in demo scene is replayed.

use std::path::PathBuf;
use std::process::ExitCode;

use alignink_app::{load_snap_config, App, AppConfig, AppError, Scene};
use clap::Parser;

#[derive(Parser)]
#[command(name = "alignink")]
#[command(about = "Replay shape drags through the alignment snap engine")]
struct Cli {
    /// Scene file (JSON). Uses the demo scene if not provided
    scene: Option<PathBuf>,

    /// Snap configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snap threshold in canvas units (overrides any config)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,
}

fn run(cli: Cli) -> Result<String, AppError> {
    let scene = match &cli.scene {
        Some(path) => Scene::from_file(path)?,
        None => {
            log::info!("No scene given, replaying the demo scene");
            Scene::demo()
        }
    };

    let snap = cli.config.as_deref().map(load_snap_config).transpose()?;
    let app = App::new(AppConfig {
        snap,
        threshold: cli.threshold,
        pretty: cli.pretty,
    });

    let replay = app.replay(&scene)?;
    app.render(&replay)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting AlignInk");

    match run(Cli::parse()) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
