mod app;
mod config;
mod domain;
mod infra;
mod logging;
mod platform;
mod ui;
mod usecase;


use tracing::{error, info};

use crate::config::{log_filter_from_env, AppConfig};
use crate::logging::init_logging;

fn main() {
    init_logging(log_filter_from_env().as_deref());

    let webview_data_dir = match AppConfig::from_env().and_then(|config| {
        info!(data_dir = %config.data_dir.display(), "starting");
        config.ensure_webview_data_dir()
    }) {
        Ok(dir) => dir,
        Err(err) => {
            error!(error = %format!("{err:#}"), "failed to prepare data directory");
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Controle de Faturas"))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}
