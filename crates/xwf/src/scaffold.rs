//! Manifest materialization
//!
//! Two phases: create every directory in the manifest's directory set, then
//! write each entry in manifest order. The first failure aborts the run.
//! Files written before it stay on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::context::ProjectContext;
use crate::error::{Result, ScaffoldError};
use crate::manifest::{EntryKind, Manifest, ManifestEntry};
use crate::render::render_for;
use crate::source::TemplateSource;

/// What a successful run produced
#[derive(Debug, Clone, Default)]
pub struct ScaffoldReport {
    /// Directories that did not exist before the run
    pub directories_created: Vec<PathBuf>,
    /// Files written, in manifest order
    pub files_written: Vec<PathBuf>,
}

/// Writes manifests to disk using a template source
pub struct Scaffolder<'a> {
    source: &'a dyn TemplateSource,
}

impl<'a> Scaffolder<'a> {
    pub fn new(source: &'a dyn TemplateSource) -> Self {
        Self { source }
    }

    /// Create every directory and file in `manifest` under `target_root`
    pub fn materialize(
        &self,
        manifest: &Manifest,
        ctx: &ProjectContext,
        target_root: &Path,
    ) -> Result<ScaffoldReport> {
        manifest.validate()?;

        info!(
            root = %target_root.display(),
            entries = manifest.entries.len(),
            "materializing manifest"
        );

        let mut report = ScaffoldReport::default();

        for dir in manifest.directory_set() {
            let path = target_root.join(&dir);
            if path.is_dir() {
                continue;
            }
            fs::create_dir_all(&path)
                .map_err(|e| directory_error(manifest, target_root, &dir, e))?;
            debug!(dir = %path.display(), "created directory");
            report.directories_created.push(path);
        }

        for entry in &manifest.entries {
            let path = self.write_entry(entry, ctx, target_root)?;
            report.files_written.push(path);
        }

        info!(
            directories = report.directories_created.len(),
            files = report.files_written.len(),
            "manifest materialized"
        );

        Ok(report)
    }

    fn write_entry(
        &self,
        entry: &ManifestEntry,
        ctx: &ProjectContext,
        target_root: &Path,
    ) -> Result<PathBuf> {
        let content = self.source.fetch(&entry.source_id)?;
        let dest = target_root.join(&entry.dest_path);

        match entry.kind {
            EntryKind::Literal => {
                fs::write(&dest, &content).map_err(|e| ScaffoldError::write(&dest, e))?;
            }
            EntryKind::Templated => {
                let text = std::str::from_utf8(&content)
                    .map_err(|_| ScaffoldError::NotUtf8(entry.source_id.clone()))?;
                let rendered = render_for(Path::new(&entry.dest_path), text, ctx);
                fs::write(&dest, rendered).map_err(|e| ScaffoldError::write(&dest, e))?;
            }
        }

        debug!(
            source = %entry.source_id,
            dest = %dest.display(),
            kind = entry.kind.as_str(),
            "wrote file"
        );

        Ok(dest)
    }
}

/// A directory that cannot be created is reported against the first entry
/// that would have been written inside it, if there is one.
fn directory_error(manifest: &Manifest, target_root: &Path, dir: &Path, e: io::Error) -> ScaffoldError {
    let dir_path = target_root.join(dir);
    let source = io::Error::new(
        e.kind(),
        format!("cannot create directory {}: {}", dir_path.display(), e),
    );

    let blocked = manifest
        .entries
        .iter()
        .find(|entry| Path::new(&entry.dest_path).starts_with(dir));

    match blocked {
        Some(entry) => ScaffoldError::write(target_root.join(&entry.dest_path), source),
        None => ScaffoldError::write(dir_path, source),
    }
}
