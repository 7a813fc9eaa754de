//! The file manifest
//!
//! A manifest is the fixed list of files the generator produces. Each entry
//! names a template, where it lands relative to the project root, and
//! whether it is copied verbatim or rendered with the project context.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, ScaffoldError};
use crate::source::TemplateSource;

/// How a manifest entry is materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Byte-for-byte copy
    Literal,
    /// Placeholder substitution before writing
    Templated,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Templated => "templated",
        }
    }
}

/// One file produced by the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub source_id: String,
    pub dest_path: String,
    pub kind: EntryKind,
}

impl ManifestEntry {
    pub fn literal(source_id: &str, dest_path: &str) -> Self {
        Self {
            source_id: source_id.to_string(),
            dest_path: dest_path.to_string(),
            kind: EntryKind::Literal,
        }
    }

    pub fn templated(source_id: &str, dest_path: &str) -> Self {
        Self {
            source_id: source_id.to_string(),
            dest_path: dest_path.to_string(),
            kind: EntryKind::Templated,
        }
    }
}

/// Ordered set of directories and files to create
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Directories created even when no entry lands in them
    pub directories: Vec<String>,
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(directories: &[&str], entries: Vec<ManifestEntry>) -> Self {
        Self {
            directories: directories.iter().map(|d| d.to_string()).collect(),
            entries,
        }
    }

    /// The front-end web app skeleton
    pub fn web_app() -> Self {
        Self::new(
            &[
                "app",
                "app/javascripts",
                "app/javascripts/lib",
                "app/javascripts/lib/jquery-plugins",
                "app/stylesheets",
                "app/stylesheets/modules",
                "app/stylesheets/partials",
                "app/stylesheets/vendor",
            ],
            vec![
                ManifestEntry::templated("_index.html", "app/index.html"),
                ManifestEntry::literal("_app.js", "app/javascripts/app.js"),
                ManifestEntry::literal("_main.js", "app/javascripts/main.js"),
                ManifestEntry::literal(
                    "_jquery.sampleplugin.js",
                    "app/javascripts/lib/jquery-plugins/jquery.sampleplugin.js",
                ),
                ManifestEntry::literal("_main.scss", "app/stylesheets/main.scss"),
                ManifestEntry::literal("_all.scss", "app/stylesheets/modules/_all.scss"),
                ManifestEntry::literal("_framework.scss", "app/stylesheets/modules/_framework.scss"),
                ManifestEntry::literal("_sprites-2x.scss", "app/stylesheets/modules/_sprites-2x.scss"),
                ManifestEntry::literal("_base.scss", "app/stylesheets/partials/_base.scss"),
                ManifestEntry::literal("_content.scss", "app/stylesheets/partials/_content.scss"),
                ManifestEntry::literal("_footer.scss", "app/stylesheets/partials/_footer.scss"),
                ManifestEntry::literal("_global.scss", "app/stylesheets/partials/_global.scss"),
                ManifestEntry::literal("_grids.scss", "app/stylesheets/partials/_grids.scss"),
                ManifestEntry::literal("_header.scss", "app/stylesheets/partials/_header.scss"),
                ManifestEntry::literal("_resets.scss", "app/stylesheets/partials/_resets.scss"),
                ManifestEntry::literal("_typography.scss", "app/stylesheets/partials/_typography.scss"),
                ManifestEntry::templated("_bower.json", "bower.json"),
                ManifestEntry::literal("_config.rb", "config.rb"),
                ManifestEntry::literal("_gruntfile.js", "Gruntfile.js"),
                ManifestEntry::templated("_package.json", "package.json"),
                ManifestEntry::templated("_readme.md", "README.md"),
                ManifestEntry::literal("bowerrc", ".bowerrc"),
                ManifestEntry::literal("gitignore", ".gitignore"),
                ManifestEntry::literal("editorconfig", ".editorconfig"),
                ManifestEntry::literal("jshintrc", ".jshintrc"),
            ],
        )
    }

    /// Directories that must exist before any file is written.
    ///
    /// Declared directories come first, then the parents of each entry.
    /// Every ancestor is listed before its descendants and nothing repeats.
    pub fn directory_set(&self) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let mut dirs = Vec::new();

        let declared = self.directories.iter().map(PathBuf::from);
        let parents = self
            .entries
            .iter()
            .filter_map(|e| Path::new(&e.dest_path).parent().map(Path::to_path_buf));

        for dir in declared.chain(parents) {
            let mut partial = PathBuf::new();
            for component in dir.components() {
                partial.push(component);
                if seen.insert(partial.clone()) {
                    dirs.push(partial.clone());
                }
            }
        }

        dirs
    }

    /// Check manifest invariants: relative, non-escaping, unique destinations
    pub fn validate(&self) -> Result<()> {
        for dir in &self.directories {
            check_relative(dir)?;
        }

        let mut dests = HashSet::new();
        for entry in &self.entries {
            check_relative(&entry.dest_path)?;
            if !dests.insert(Path::new(&entry.dest_path)) {
                return Err(ScaffoldError::InvalidManifest(format!(
                    "duplicate destination: {}",
                    entry.dest_path
                )));
            }
        }

        for dir in self.directory_set() {
            if dests.contains(dir.as_path()) {
                return Err(ScaffoldError::InvalidManifest(format!(
                    "destination is also a directory: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Source ids that `source` cannot resolve, in manifest order
    pub fn missing_sources(&self, source: &dyn TemplateSource) -> Vec<String> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| seen.insert(e.source_id.as_str()))
            .filter(|e| !source.contains(&e.source_id))
            .map(|e| e.source_id.clone())
            .collect()
    }

    /// Files `source` offers that no entry refers to
    pub fn unreferenced_sources(&self, source: &dyn TemplateSource) -> Vec<String> {
        let used: HashSet<&str> = self.entries.iter().map(|e| e.source_id.as_str()).collect();
        source
            .source_ids()
            .into_iter()
            .filter(|id| !used.contains(id.as_str()))
            .collect()
    }
}

fn check_relative(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScaffoldError::InvalidManifest("empty path".to_string()));
    }

    let ok = Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if !ok {
        return Err(ScaffoldError::InvalidManifest(format!(
            "path must stay inside the project: {}",
            path
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DirTemplates, EmbeddedTemplates};

    #[test]
    fn test_web_app_manifest_is_valid() {
        let manifest = Manifest::web_app();
        manifest.validate().unwrap();
        assert_eq!(manifest.entries.len(), 25);
    }

    #[test]
    fn test_web_app_sources_are_embedded() {
        let manifest = Manifest::web_app();
        assert!(manifest.missing_sources(&EmbeddedTemplates).is_empty());
    }

    #[test]
    fn test_missing_sources_reported_once() {
        let manifest = Manifest::new(
            &[],
            vec![
                ManifestEntry::literal("gone", "a.txt"),
                ManifestEntry::literal("_main.js", "b.js"),
                ManifestEntry::literal("gone", "c.txt"),
            ],
        );
        assert_eq!(manifest.missing_sources(&EmbeddedTemplates), vec!["gone"]);
    }

    #[test]
    fn test_unreferenced_sources() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("used.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("extra.txt"), b"y").unwrap();

        let manifest = Manifest::new(&[], vec![ManifestEntry::literal("used.txt", "out.txt")]);
        let source = DirTemplates::new(dir.path());

        assert_eq!(manifest.unreferenced_sources(&source), vec!["extra.txt"]);
        assert!(Manifest::web_app().unreferenced_sources(&EmbeddedTemplates).is_empty());
    }

    #[test]
    fn test_directory_set_includes_ancestors() {
        let manifest = Manifest::new(&["a/b/c"], vec![]);
        assert_eq!(
            manifest.directory_set(),
            vec![PathBuf::from("a"), PathBuf::from("a/b"), PathBuf::from("a/b/c")]
        );
    }

    #[test]
    fn test_directory_set_covers_entry_parents() {
        let manifest = Manifest::new(
            &["app"],
            vec![
                ManifestEntry::templated("x", "app/deep/index.html"),
                ManifestEntry::literal("y", "README.md"),
                ManifestEntry::literal("z", "app/deep/other.txt"),
            ],
        );

        let dirs = manifest.directory_set();
        assert_eq!(dirs, vec![PathBuf::from("app"), PathBuf::from("app/deep")]);
    }

    #[test]
    fn test_web_app_keeps_empty_vendor_dir() {
        let dirs = Manifest::web_app().directory_set();
        assert!(dirs.contains(&PathBuf::from("app/stylesheets/vendor")));
    }

    #[test]
    fn test_duplicate_destination_rejected() {
        let manifest = Manifest::new(
            &[],
            vec![
                ManifestEntry::literal("a", "out.txt"),
                ManifestEntry::templated("b", "out.txt"),
            ],
        );

        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate destination: out.txt"));
    }

    #[test]
    fn test_escaping_paths_rejected() {
        for bad in ["../out.txt", "/etc/passwd", "a/../../b", ""] {
            let manifest = Manifest::new(&[], vec![ManifestEntry::literal("a", bad)]);
            assert!(
                matches!(manifest.validate(), Err(ScaffoldError::InvalidManifest(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_file_directory_collision_rejected() {
        let manifest = Manifest::new(
            &["docs"],
            vec![ManifestEntry::literal("a", "docs")],
        );
        assert!(manifest.validate().is_err());
    }
}
