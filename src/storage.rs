use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::checklist::{Category, json, normalize};
use crate::git_ops::GitOps;

/// A single persisted string slot
///
/// `read` returns `None` when nothing has been stored yet.
pub trait SlotStore: Send {
    fn read(&self) -> Result<Option<String>>;
    fn write(&self, content: &str) -> Result<()>;

    /// Location on disk, if the slot is file-backed
    fn path(&self) -> Option<&Path> {
        None
    }
}

/// Slot stored as one file
pub struct FileSlot {
    file_path: PathBuf,
}

impl FileSlot {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }
}

impl SlotStore for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        Ok(Some(content))
    }

    fn write(&self, content: &str) -> Result<()> {
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.file_path)
    }
}

/// In-memory slot; clones share the same content
#[derive(Clone, Default)]
pub struct MemorySlot {
    content: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Arc::new(Mutex::new(Some(content.into()))),
        }
    }

    pub fn content(&self) -> Option<String> {
        self.content.lock().unwrap().clone()
    }
}

impl SlotStore for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.content())
    }

    fn write(&self, content: &str) -> Result<()> {
        *self.content.lock().unwrap() = Some(content.to_string());
        Ok(())
    }
}

/// Loads and saves the category collection, committing each save to git
/// when sync is enabled and the data file is under version control
pub struct Storage {
    slot: Box<dyn SlotStore>,
    git_ops: Option<GitOps>,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>, sync_git: bool) -> Self {
        let file_path = file_path.as_ref();
        let git_ops = if sync_git {
            let found = GitOps::discover(file_path);
            if found.is_none() {
                tracing::warn!(
                    path = %file_path.display(),
                    "Git sync requested but the data file is not inside a git repository"
                );
            }
            found
        } else {
            None
        };
        Self {
            slot: Box::new(FileSlot::new(file_path)),
            git_ops,
        }
    }

    pub fn with_slot(slot: impl SlotStore + 'static) -> Self {
        Self {
            slot: Box::new(slot),
            git_ops: None,
        }
    }

    pub fn is_git_synced(&self) -> bool {
        self.git_ops.is_some()
    }

    /// Read the stored collection
    ///
    /// Nothing stored, an empty slot and unparsable content all yield an
    /// empty collection. Only I/O failures are errors.
    pub fn load(&self) -> Result<Vec<Category>> {
        if let Some(ref git_ops) = self.git_ops
            && let Err(e) = git_ops.pull()
        {
            tracing::warn!(error = %e, "Git pull failed, loading local data");
        }

        let Some(content) = self.slot.read()? else {
            return Ok(Vec::new());
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut categories = match json::import_json(&content) {
            Ok(categories) => categories,
            Err(e) => {
                tracing::warn!(error = %e, "Stored checklist data is corrupt, starting empty");
                return Ok(Vec::new());
            }
        };
        normalize(&mut categories);
        tracing::debug!(categories = categories.len(), "Loaded checklist data");
        Ok(categories)
    }

    /// Write the collection back, then commit it with `message`
    ///
    /// A failed commit is logged; the data is already on disk at that point.
    pub fn save(&self, categories: &[Category], message: &str) -> Result<()> {
        let content = json::export_json(categories).context("Failed to serialize checklist")?;
        self.slot.write(&content)?;

        if let (Some(git_ops), Some(path)) = (&self.git_ops, self.slot.path()) {
            match git_ops.commit(path, message) {
                Ok(true) => tracing::debug!(commit_message = message, "Committed checklist data"),
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %e, "Git commit failed"),
            }
        }
        Ok(())
    }

    /// Push pending commits on shutdown
    pub fn shutdown(&self) -> Result<()> {
        match &self.git_ops {
            Some(git_ops) => git_ops.push(),
            None => Ok(()),
        }
    }
}
