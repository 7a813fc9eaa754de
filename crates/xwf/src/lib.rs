//! xwf - Front-end web project scaffolding
//!
//! Creates a static site skeleton (HTML, RequireJS, Sass, Grunt and Bower
//! config) from a fixed manifest. Every file is either copied verbatim or
//! rendered with the app name substituted for `{{appName}}`.
//!
//! A run is an explicit two-step pipeline: [`collect_context`] asks for the
//! app name, then [`Scaffolder::materialize`] writes the manifest.

pub mod context;
pub mod error;
pub mod install;
pub mod manifest;
pub mod render;
pub mod scaffold;
pub mod source;

pub use context::{collect_context, ProjectContext};
pub use error::ScaffoldError;
pub use manifest::{EntryKind, Manifest, ManifestEntry};
pub use scaffold::{ScaffoldReport, Scaffolder};
pub use source::{DirTemplates, EmbeddedTemplates, TemplateSource};
