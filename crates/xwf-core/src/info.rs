//! Generator metadata
//!
//! Read once at start-up and handed to whatever needs the name or version.

/// Name and version of the running generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInfo {
    pub name: String,
    pub version: String,
}

impl GeneratorInfo {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// One-line greeting shown before the prompt
    pub fn welcome(&self) -> String {
        format!("Welcome to the {} generator (v{})", self.name.to_uppercase(), self.version)
    }
}
