//! Writing component files into a project.
//!
//! A [`Materializer`] turns one component from the registry into files on
//! disk. It runs in two phases:
//!
//! 1. For every file: compute the target path, fetch the artifact, and
//!    rewrite its imports. Any failure here aborts the component before a
//!    single file is touched.
//! 2. For every file: apply the overwrite policy and write atomically.
//!
//! An existing file whose bytes already match is skipped without asking.
//! Other existing files are only replaced when the policy is
//! [`OverwritePolicy::Force`] or the [`ConflictDecider`] says so; a skipped
//! file is left byte-for-byte unchanged.

pub mod target;
pub mod transform;
pub mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Aliases;
use crate::error::Result;
use crate::registry::{ComponentEntry, RegistrySource};

pub use target::target_path;
pub use transform::{rewrite_imports, Transformed};
pub use writer::write_atomic;

/// What to do when a target file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Replace existing files without asking.
    Force,
    /// Ask the [`ConflictDecider`] for each existing file.
    #[default]
    Ask,
}

/// Decides whether an existing file should be replaced.
pub trait ConflictDecider {
    /// Return `true` to overwrite `target`.
    fn should_overwrite(&mut self, target: &Path) -> Result<bool>;
}

impl<F> ConflictDecider for F
where
    F: FnMut(&Path) -> bool,
{
    fn should_overwrite(&mut self, target: &Path) -> Result<bool> {
        Ok(self(target))
    }
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Created,
    Overwritten,
    Skipped,
}

/// Result of materializing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Registry file identifier.
    pub file_id: String,
    /// Where the file was (or would have been) written.
    pub path: PathBuf,
    pub action: FileAction,
    /// Import rewrite warnings for this file.
    pub warnings: Vec<String>,
}

impl FileOutcome {
    /// Whether the file on disk was changed.
    pub fn written(&self) -> bool {
        self.action != FileAction::Skipped
    }
}

/// A file that has been fetched and transformed but not yet written.
struct PreparedFile {
    file_id: String,
    path: PathBuf,
    content: String,
    warnings: Vec<String>,
}

/// Writes components from a registry into a target directory.
pub struct Materializer<'a> {
    source: &'a dyn RegistrySource,
    aliases: &'a Aliases,
    target_dir: PathBuf,
    overwrite: OverwritePolicy,
}

impl<'a> Materializer<'a> {
    /// Create a materializer writing into `target_dir`.
    pub fn new(
        source: &'a dyn RegistrySource,
        aliases: &'a Aliases,
        target_dir: impl Into<PathBuf>,
        overwrite: OverwritePolicy,
    ) -> Self {
        Self {
            source,
            aliases,
            target_dir: target_dir.into(),
            overwrite,
        }
    }

    /// Fetch, transform, and write every file of `component`.
    ///
    /// # Errors
    ///
    /// `UnsafePath` or `RegistryUnavailable` leave the disk untouched.
    /// `FileWriteFailure` stops at the failing file; earlier files of the
    /// same component stay written.
    pub fn materialize(
        &self,
        component: &ComponentEntry,
        decider: &mut dyn ConflictDecider,
    ) -> Result<Vec<FileOutcome>> {
        let prepared = component
            .files
            .iter()
            .map(|file_id| self.prepare(file_id))
            .collect::<Result<Vec<_>>>()?;

        let mut outcomes = Vec::with_capacity(prepared.len());
        for file in prepared {
            let action = self.write(&file, decider)?;
            outcomes.push(FileOutcome {
                file_id: file.file_id,
                path: file.path,
                action,
                warnings: file.warnings,
            });
        }

        Ok(outcomes)
    }

    fn prepare(&self, file_id: &str) -> Result<PreparedFile> {
        let path = target_path(&self.target_dir, file_id)?;
        let raw = self.source.fetch_artifact(file_id)?;
        let Transformed { source, warnings } = rewrite_imports(&raw, self.aliases);

        for warning in &warnings {
            tracing::warn!("{}: {}", file_id, warning);
        }

        Ok(PreparedFile {
            file_id: file_id.to_string(),
            path,
            content: source,
            warnings,
        })
    }

    fn write(&self, file: &PreparedFile, decider: &mut dyn ConflictDecider) -> Result<FileAction> {
        let exists = file.path.exists();
        if exists {
            if fs::read(&file.path).is_ok_and(|current| current == file.content.as_bytes()) {
                tracing::debug!("{} is up to date", file.path.display());
                return Ok(FileAction::Skipped);
            }
            let replace = match self.overwrite {
                OverwritePolicy::Force => true,
                OverwritePolicy::Ask => decider.should_overwrite(&file.path)?,
            };
            if !replace {
                tracing::debug!("Skipping existing {}", file.path.display());
                return Ok(FileAction::Skipped);
            }
        }

        write_atomic(&file.path, &file.content)?;

        Ok(if exists {
            FileAction::Overwritten
        } else {
            FileAction::Created
        })
    }
}
