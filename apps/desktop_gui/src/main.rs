use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::config::{load_settings, DEFAULT_CONFIG_FILE};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::ProdutosApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop front end for a produtos REST service")]
struct Args {
    /// Collection endpoint; overrides the settings file and environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    let api_url = settings.api_url.clone();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Produtos")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Produtos",
        options,
        Box::new(|_cc| Ok(Box::new(ProdutosApp::new(cmd_tx, ui_rx, api_url)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_defaults_and_api_url_is_optional() {
        let args = Args::try_parse_from(["produtos-desktop"]).expect("parse");
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert!(args.api_url.is_none());
    }

    #[test]
    fn api_url_flag_is_captured() {
        let args = Args::try_parse_from([
            "produtos-desktop",
            "--api-url",
            "http://10.0.0.5:8080/produtos",
            "--config",
            "/etc/produtos.toml",
        ])
        .expect("parse");
        assert_eq!(args.api_url.as_deref(), Some("http://10.0.0.5:8080/produtos"));
        assert_eq!(args.config, PathBuf::from("/etc/produtos.toml"));
    }
}
