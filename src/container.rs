//! On-disk container files

use crate::error::{Result, StoreError};
use crate::parser;
use crate::types::{FILE_VERSION, FILE_VERSION_NAME, Group};
use crate::writer;
use std::fs;
use std::path::{Path, PathBuf};

/// A container file held in memory and written back on flush.
///
/// Changes made through [`ContainerFile::root_mut`] are persisted by
/// [`flush`](ContainerFile::flush), [`close`](ContainerFile::close), or, as a
/// last resort, when the value is dropped. Drop cannot report failures, so it
/// logs them; call `close` to observe them.
#[derive(Debug)]
pub struct ContainerFile {
    path: PathBuf,
    root: Group,
    read_only: bool,
    dirty: bool,
}

impl ContainerFile {
    /// Create (or truncate) a container at `path` and stamp its file version
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let mut root = Group::new();
        root.set_attribute(FILE_VERSION_NAME, FILE_VERSION)?;
        let file = Self {
            path: path.as_ref().to_path_buf(),
            root,
            read_only: false,
            dirty: false,
        };
        // the file exists on disk from here on, even before the first flush
        file.write_out()?;
        log::debug!("created container {}", file.path.display());
        Ok(file)
    }

    /// Open an existing container for reading and writing
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(path.as_ref(), false)
    }

    /// Open an existing container for reading only
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(path.as_ref(), true)
    }

    fn load(path: &Path, read_only: bool) -> Result<Self> {
        let bytes = fs::read(path)?;
        let root = parser::parse(&bytes)?;
        if root.string_attribute(FILE_VERSION_NAME).is_none() {
            log::debug!("{} carries no {FILE_VERSION_NAME} attribute", path.display());
        }
        Ok(Self {
            path: path.to_path_buf(),
            root,
            read_only,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Data-model version recorded at creation, if any
    pub fn file_version(&self) -> Option<&str> {
        self.root.string_attribute(FILE_VERSION_NAME)
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    /// Mutable access to the root group; marks the file dirty
    pub fn root_mut(&mut self) -> Result<&mut Group> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        self.dirty = true;
        Ok(&mut self.root)
    }

    /// Write pending changes to disk
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty || self.read_only {
            return Ok(());
        }
        self.write_out()?;
        self.dirty = false;
        Ok(())
    }

    /// Flush and release the file, reporting any write failure
    pub fn close(mut self) -> Result<()> {
        self.flush()
    }

    fn write_out(&self) -> Result<()> {
        let bytes = writer::to_bytes(&self.root)?;
        // write beside the target, then rename over it
        let tmp = self.path.with_extension("tvtmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}

impl Drop for ContainerFile {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            log::error!("failed to flush {} on drop: {e}", self.path.display());
        }
    }
}
