//! Binary entry point: a windowed red light, green light match.
use std::path::PathBuf;

use anyhow::{bail, Context};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use redlight::{init_logging, GameSettings, PresentationPlugin, RedLightPlugin};

/// A red light, green light reflex minigame
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file overriding the default match settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the doll's timing, for repeatable matches
    #[arg(long)]
    seed: Option<u64>,
}

fn load_settings(args: &Args) -> anyhow::Result<GameSettings> {
    let mut settings = match &args.config {
        Some(path) => GameSettings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => GameSettings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let settings = load_settings(&args)?;
    log::info!("hold ArrowUp to run; freeze when the doll turns around");

    let exit = App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Red Light, Green Light".to_owned(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(settings)
        .add_plugins((RedLightPlugin, PresentationPlugin))
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("app exited with code {code}"),
    }
}
