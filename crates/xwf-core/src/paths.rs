//! Standard paths used by xwf

use std::path::PathBuf;

/// Standard xwf paths
pub struct Paths {
    /// Config directory (~/.config/xwf)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("xwf");

        Self { config }
    }

    /// Path of the main configuration file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.yaml")
    }
}
