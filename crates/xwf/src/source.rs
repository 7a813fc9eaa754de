//! Template sources
//!
//! The scaffolder only ever asks a source for the bytes behind a source id.
//! Built-in templates are compiled into the binary; a directory on disk can
//! stand in for them when customizing the skeleton.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};

/// Read-only provider of template content by source id
pub trait TemplateSource {
    /// Get the raw bytes of a template
    fn fetch(&self, source_id: &str) -> Result<Cow<'_, [u8]>>;

    /// Whether the source can resolve `source_id`
    fn contains(&self, source_id: &str) -> bool {
        self.fetch(source_id).is_ok()
    }

    /// Every source id this source can serve, sorted
    fn source_ids(&self) -> Vec<String>;
}

/// Templates compiled into the binary
static EMBEDDED: &[(&str, &[u8])] = &[
    ("_all.scss", include_bytes!("../templates/_all.scss")),
    ("_app.js", include_bytes!("../templates/_app.js")),
    ("_base.scss", include_bytes!("../templates/_base.scss")),
    ("_bower.json", include_bytes!("../templates/_bower.json")),
    ("_config.rb", include_bytes!("../templates/_config.rb")),
    ("_content.scss", include_bytes!("../templates/_content.scss")),
    ("_footer.scss", include_bytes!("../templates/_footer.scss")),
    ("_framework.scss", include_bytes!("../templates/_framework.scss")),
    ("_global.scss", include_bytes!("../templates/_global.scss")),
    ("_grids.scss", include_bytes!("../templates/_grids.scss")),
    ("_gruntfile.js", include_bytes!("../templates/_gruntfile.js")),
    ("_header.scss", include_bytes!("../templates/_header.scss")),
    ("_index.html", include_bytes!("../templates/_index.html")),
    ("_jquery.sampleplugin.js", include_bytes!("../templates/_jquery.sampleplugin.js")),
    ("_main.js", include_bytes!("../templates/_main.js")),
    ("_main.scss", include_bytes!("../templates/_main.scss")),
    ("_package.json", include_bytes!("../templates/_package.json")),
    ("_readme.md", include_bytes!("../templates/_readme.md")),
    ("_resets.scss", include_bytes!("../templates/_resets.scss")),
    ("_sprites-2x.scss", include_bytes!("../templates/_sprites-2x.scss")),
    ("_typography.scss", include_bytes!("../templates/_typography.scss")),
    ("bowerrc", include_bytes!("../templates/bowerrc")),
    ("editorconfig", include_bytes!("../templates/editorconfig")),
    ("gitignore", include_bytes!("../templates/gitignore")),
    ("jshintrc", include_bytes!("../templates/jshintrc")),
];

/// The built-in template set
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl TemplateSource for EmbeddedTemplates {
    fn fetch(&self, source_id: &str) -> Result<Cow<'_, [u8]>> {
        EMBEDDED
            .iter()
            .find(|(id, _)| *id == source_id)
            .map(|(_, bytes)| Cow::Borrowed(*bytes))
            .ok_or_else(|| ScaffoldError::MissingTemplate(source_id.to_string()))
    }

    fn source_ids(&self) -> Vec<String> {
        EMBEDDED.iter().map(|(id, _)| id.to_string()).collect()
    }
}

/// Templates read from a directory, one file per source id
#[derive(Debug, Clone)]
pub struct DirTemplates {
    root: PathBuf,
}

impl DirTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a source id to a path inside the template directory
    fn resolve(&self, source_id: &str) -> Option<PathBuf> {
        let rel = Path::new(source_id);
        let inside = !source_id.is_empty() && rel.components().all(|c| matches!(c, Component::Normal(_)));
        inside.then(|| self.root.join(rel))
    }
}

impl TemplateSource for DirTemplates {
    fn fetch(&self, source_id: &str) -> Result<Cow<'_, [u8]>> {
        let path = self
            .resolve(source_id)
            .ok_or_else(|| ScaffoldError::MissingTemplate(source_id.to_string()))?;

        match fs::read(&path) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ScaffoldError::MissingTemplate(source_id.to_string()))
            }
            Err(e) => Err(ScaffoldError::MissingTemplate(format!("{} ({})", source_id, e))),
        }
    }

    fn contains(&self, source_id: &str) -> bool {
        self.resolve(source_id).is_some_and(|p| p.is_file())
    }

    fn source_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&self.root)
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_embedded_fetch() {
        let source = EmbeddedTemplates;
        let index = source.fetch("_index.html").unwrap();
        assert!(String::from_utf8_lossy(&index).contains("{{appName}}"));
        assert!(source.contains("gitignore"));
    }

    #[test]
    fn test_embedded_missing() {
        let err = EmbeddedTemplates.fetch("nope.txt").unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingTemplate(id) if id == "nope.txt"));
    }

    #[test]
    fn test_embedded_ids_unique() {
        let mut ids = EmbeddedTemplates.source_ids();
        let count = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_dir_fetch_and_list() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("a.txt"), b"alpha").unwrap();
        fs::write(dir.path().join("nested/b.txt"), b"beta").unwrap();

        let source = DirTemplates::new(dir.path());
        assert_eq!(&*source.fetch("a.txt").unwrap(), b"alpha");
        assert_eq!(&*source.fetch("nested/b.txt").unwrap(), b"beta");
        assert_eq!(source.source_ids(), vec!["a.txt", "nested/b.txt"]);
    }

    #[test]
    fn test_dir_rejects_escaping_ids() {
        let dir = tempdir().unwrap();
        let source = DirTemplates::new(dir.path().join("templates"));

        for id in ["../secret", "/etc/passwd", ""] {
            assert!(matches!(source.fetch(id), Err(ScaffoldError::MissingTemplate(_))));
            assert!(!source.contains(id));
        }
    }

    #[test]
    fn test_dir_missing_file() {
        let dir = tempdir().unwrap();
        let source = DirTemplates::new(dir.path());
        assert!(matches!(
            source.fetch("absent.txt"),
            Err(ScaffoldError::MissingTemplate(id)) if id == "absent.txt"
        ));
    }
}
