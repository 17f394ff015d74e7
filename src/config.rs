// src/config.rs

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Application configuration.
///
/// Every file path the app touches lives here, so handlers and renderers
/// never reach for an implicit working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the flat array of test records.
    pub data_file: PathBuf,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Where the progress chart is written (inside `static_dir`).
    pub graph_file: PathBuf,
    /// Where the exported PDF report is written.
    pub export_file: PathBuf,
    /// Listen address, e.g. "0.0.0.0:3000".
    pub bind_addr: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_file = env::var("STUDYTRACK_DATA_FILE")
            .unwrap_or_else(|_| "data/tests.json".to_string())
            .into();

        let static_dir: PathBuf = env::var("STUDYTRACK_STATIC_DIR")
            .unwrap_or_else(|_| "static".to_string())
            .into();

        let graph_file = static_dir.join("graphs").join("progress.svg");

        let export_file = env::var("STUDYTRACK_EXPORT_FILE")
            .unwrap_or_else(|_| "data/report.pdf".to_string())
            .into();

        let bind_addr =
            env::var("STUDYTRACK_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            data_file,
            static_dir,
            graph_file,
            export_file,
            bind_addr,
            rust_log,
        }
    }

    /// Public URL of the generated chart, relative to the site root.
    pub fn graph_url(&self) -> &'static str {
        "/static/graphs/progress.svg"
    }

    /// Creates the directories the app writes into.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        if let Some(parent) = self.data_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Some(parent) = self.graph_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Some(parent) = self.export_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}
