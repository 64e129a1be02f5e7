//! Configuration loading and management for the arqueo engine.
//!
//! The engine reads a single YAML file with the database path, listen
//! address, non-cash aggregation policy, and report font settings. Every
//! field is optional; defaults mirror the original deployment.
//!
//! # Example
//!
//! ```no_run
//! use arqueo_engine::config::EngineConfig;
//!
//! let config = EngineConfig::load("./arqueo.yaml").unwrap();
//! println!("Database at {}", config.database_path);
//! ```

mod loader;
mod types;

pub use types::{EngineConfig, ReportConfig};
