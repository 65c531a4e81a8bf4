//! Persistence sinks for the application state
//!
//! The store hands the full state to a [`StateSink`] after every section
//! update. Sinks are best-effort: the store logs a failed write and carries
//! on without retrying.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::logging::Logger;
use crate::store::errors::{PersistError, PersistResult};
use crate::store::state::ApplicationState;

/// Trait for writing the application state to an external slot
///
/// Implementations should be quick and synchronous; the store calls
/// `persist` inline before notifying listeners.
pub trait StateSink {
    /// Write the full state
    ///
    /// # Returns
    /// * `Ok(())` - If the state was written
    /// * `Err(PersistError)` - If the write failed; the store logs and ignores it
    fn persist(&self, state: &ApplicationState) -> PersistResult<()>;
}

impl<T: StateSink + ?Sized> StateSink for &T {
    fn persist(&self, state: &ApplicationState) -> PersistResult<()> {
        (**self).persist(state)
    }
}

impl<T: StateSink + ?Sized> StateSink for Box<T> {
    fn persist(&self, state: &ApplicationState) -> PersistResult<()> {
        (**self).persist(state)
    }
}

/// Serialization format for written state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Render the state as pretty JSON or YAML
pub fn render_state(state: &ApplicationState, format: OutputFormat) -> PersistResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(state)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(state)?),
    }
}

/// In-memory global slot holding the most recently persisted state
///
/// Clones share the same slot, so a caller can keep a handle while the
/// store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    slot: Rc<RefCell<Option<ApplicationState>>>,
    saves: Rc<Cell<usize>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last persisted state, if any
    pub fn latest(&self) -> Option<ApplicationState> {
        self.slot.borrow().clone()
    }

    /// Number of successful writes
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StateSink for MemorySink {
    fn persist(&self, state: &ApplicationState) -> PersistResult<()> {
        *self.slot.borrow_mut() = Some(state.clone());
        self.saves.set(self.saves.get() + 1);
        Logger::new("save-data").debug("save data to memory slot");
        Ok(())
    }
}

/// Writes the state to a file, replacing its content on every update
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: OutputFormat,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn io_error(&self, err: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl StateSink for FileSink {
    fn persist(&self, state: &ApplicationState) -> PersistResult<()> {
        let content = render_state(state, self.format)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        fs::write(&self.path, content).map_err(|e| self.io_error(e))?;
        Logger::new("save-data").debug_with(
            "save data to file",
            &[serde_json::Value::from(self.path.display().to_string())],
        );
        Ok(())
    }
}

/// Discards every write
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StateSink for NullSink {
    fn persist(&self, _state: &ApplicationState) -> PersistResult<()> {
        Ok(())
    }
}
