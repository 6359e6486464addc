//! Vibrato GUI - standalone modulation panel.

use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use vibrato_config::{PanelConfig, default_config_path, find_patch};
use vibrato_gui::VibratoApp;

/// Vibrato modulation panel.
#[derive(Parser, Debug)]
#[command(name = "vibrato-gui")]
#[command(about = "Standalone vibrato modulation panel")]
#[command(version)]
struct Args {
    /// Panel configuration file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Patch to load at startup, as a path or the name of a user patch
    #[arg(long)]
    patch: Option<String>,

    /// Start without a host playhead (tempo sync unavailable)
    #[arg(long)]
    no_playhead: bool,
}

fn load_config(explicit: Option<PathBuf>) -> PanelConfig {
    let path = explicit.clone().unwrap_or_else(default_config_path);
    if explicit.is_none() && !path.exists() {
        return PanelConfig::default();
    }
    match PanelConfig::load(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded panel config");
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "using default panel config");
            PanelConfig::default()
        }
    }
}

fn resolve_patch(arg: &str) -> Option<PathBuf> {
    let found = find_patch(arg);
    if found.is_none() {
        tracing::warn!(patch = %arg, "patch not found");
    }
    found
}

fn main() -> eframe::Result<()> {
    use tracing_subscriber::EnvFilter;

    // Initialize tracing subscriber; bridge log:: records from eframe/egui
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    tracing_log::LogTracer::init().ok();

    let args = Args::parse();

    tracing::info!("Starting Vibrato GUI");
    let config = load_config(args.config);
    let patch = args.patch.as_deref().and_then(resolve_patch);
    let has_playhead = !args.no_playhead;
    tracing::info!(has_playhead, "demo engine");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 340.0])
            .with_min_inner_size([600.0, 280.0])
            .with_title("Vibrato"),
        ..Default::default()
    };

    eframe::run_native(
        "Vibrato",
        options,
        Box::new(move |cc| Ok(Box::new(VibratoApp::new(cc, &config, patch.as_deref(), has_playhead)))),
    )
}
