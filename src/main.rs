use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

mod app;
mod config;
mod domain;
mod infra;
mod logging;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use crate::app::App;
use crate::config::AppConfig;

fn main() {
    let config_path = default_config_path().ok();
    let config = AppConfig::load_from(config_path.as_deref());
    logging::init(&config.log_level, default_logs_dir().ok().as_deref());
    if let Some(path) = config_path.filter(|path| !path.exists()) {
        if let Err(err) = config.save_to(&path) {
            tracing::warn!(error = %err, "failed to write default config");
        }
    }

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");
    tracing::info!(webview_data_dir = %webview_data_dir.display(), "starting csv studio");

    dioxus::LaunchBuilder::desktop()
        .with_context(config)
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("CSV Studio"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}

fn default_project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "csvstudio", "csv-studio")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

fn default_config_path() -> Result<PathBuf> {
    Ok(default_project_dirs()?.config_dir().join("config.json"))
}

fn default_logs_dir() -> Result<PathBuf> {
    Ok(default_project_dirs()?.data_local_dir().join("logs"))
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(default_project_dirs()?.data_local_dir())
}
