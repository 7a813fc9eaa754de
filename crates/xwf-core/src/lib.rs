//! xwf Core - Shared functionality for the xwf generator
//!
//! Standard paths, the user configuration file, and the generator's own
//! package metadata.

pub mod config;
pub mod info;
pub mod paths;

pub use config::{Config, InstallConfig};
pub use info::GeneratorInfo;
pub use paths::Paths;
