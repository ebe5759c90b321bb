/// Durable tenant selection slot
///
/// The current tenant selection survives process restarts through a single
/// string value stored under a fixed, well-known key. Absence is a valid
/// "no prior selection" state. The slot is read during tenant-selection
/// resolution and written whenever the effective selection changes, so it
/// always mirrors the in-memory selection.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Well-known key the selection is stored under
///
/// Kept identical across client implementations so a selection persisted by
/// one survives into another.
pub const CURRENT_TENANT_KEY: &str = "currentTenantId";

/// Durable storage for the current tenant selection
pub trait SelectionSlot: Send + Sync {
    /// Reads the persisted selection, `None` if nothing was persisted
    fn get(&self) -> Option<String>;

    /// Persists a selection
    fn set(&self, tenant_id: &str) -> io::Result<()>;

    /// Removes the persisted selection
    fn clear(&self) -> io::Result<()>;
}

/// In-memory slot for ephemeral sessions and tests
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: Mutex<Option<String>>,
}

impl MemorySlot {
    /// Creates an empty slot
    pub fn new() -> Self {
        MemorySlot::default()
    }
}

impl SelectionSlot for MemorySlot {
    fn get(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }

    fn set(&self, tenant_id: &str) -> io::Result<()> {
        *self.value.lock().unwrap() = Some(tenant_id.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.value.lock().unwrap() = None;
        Ok(())
    }
}

/// File-backed slot holding the selection as a single line
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Creates a slot backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSlot { path: path.into() }
    }

    /// Creates a slot under `dir`, named after the well-known key
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        FileSlot {
            path: dir.into().join(CURRENT_TENANT_KEY),
        }
    }
}

impl SelectionSlot for FileSlot {
    fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read selection slot");
                None
            }
        }
    }

    fn set(&self, tenant_id: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, tenant_id)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}
