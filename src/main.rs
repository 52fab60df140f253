//! shadelab - split-view Phong lighting playground
//!
//! Usage:
//!   shadelab [MODELS]... [--width N] [--height N]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use shadelab::{AppConfig, run};

#[derive(Parser)]
#[command(name = "shadelab")]
#[command(about = "Transform and lighting playground with per-vertex and per-pixel shading side by side")]
struct Cli {
    /// OBJ or STL files to load (defaults to the bundled models/ set)
    models: Vec<PathBuf>,

    /// Window width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = AppConfig::new()
        .size(cli.width, cli.height)
        .models(cli.models);

    log::info!("Controls:");
    log::info!("  T/R/S      - translate / rotate / scale model");
    log::info!("  E/C/U      - edit camera eye / center / up");
    log::info!("  K/J        - light edit / shininess");
    log::info!("  L          - cycle light (directional, point, spot)");
    log::info!("  A/D/F      - toggle ambient / diffuse / specular");
    log::info!("  Z/X        - previous / next model");
    log::info!("  O/P        - orthographic / perspective");
    log::info!("  I          - print matrices");
    log::info!("  wheel/drag - edit in the current mode, Esc quits");

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
