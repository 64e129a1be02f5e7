//! Configuration loading functionality.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

impl EngineConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file (e.g. "./arqueo.yaml")
    ///
    /// # Returns
    ///
    /// Returns the parsed configuration, or an error if the file is missing
    /// or contains invalid YAML. Fields absent from the file take their
    /// defaults.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use arqueo_engine::config::EngineConfig;
    ///
    /// let config = EngineConfig::load("./arqueo.yaml")?;
    /// println!("Serving on {}", config.listen_addr);
    /// # Ok::<(), arqueo_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
