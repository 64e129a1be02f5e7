//! Configuration types for the arqueo engine.

use serde::{Deserialize, Serialize};

use crate::calculation::NonCashPolicy;

/// Report rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory holding the TrueType font family used by the PDF renderer.
    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: String,
    /// Name of the font family inside `fonts_dir`.
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fonts_dir: default_fonts_dir(),
            font_family: default_font_family(),
        }
    }
}

/// Engine configuration, loaded from a single YAML file.
///
/// Every field has a default matching the behavior of the original system,
/// so a missing or partial file still yields a working engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// How the `noncash` aggregate map is summed. See
    /// [`NonCashPolicy`] for the two historical variants.
    #[serde(default)]
    pub noncash_policy: NonCashPolicy,
    /// Report rendering settings.
    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            listen_addr: default_listen_addr(),
            noncash_policy: NonCashPolicy::default(),
            report: ReportConfig::default(),
        }
    }
}

fn default_database_path() -> String {
    "./arqueo.db".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_fonts_dir() -> String {
    "./fonts".to_string()
}

fn default_font_family() -> String {
    "LiberationSans".to_string()
}
