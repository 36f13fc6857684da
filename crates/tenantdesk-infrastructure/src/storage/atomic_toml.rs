//! Atomic TOML files: tmp file + fsync + rename, serialized by a lock file.

use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tenantdesk_core::ConsoleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtomicTomlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Lock error on {}: {source}", path.display())]
    Lock { path: PathBuf, source: io::Error },
    /// Raised by an `update` closure to abandon the write.
    #[error("Update rejected: {0}")]
    Rejected(String),
}

impl From<AtomicTomlError> for ConsoleError {
    fn from(e: AtomicTomlError) -> Self {
        ConsoleError::storage(e.to_string())
    }
}

/// A TOML document on disk that readers never see half-written.
///
/// Saves land in a sibling `.{name}.tmp`, are fsynced, then renamed over
/// the target. `update` serializes writers through `{name}.lock`.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    private: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            private: false,
            _marker: PhantomData,
        }
    }

    /// Restricts the file to its owner (mode 600 on Unix).
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file is missing or blank.
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(toml::from_str(&content)?))
    }

    /// Replaces the file with `data`.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        let rendered = toml::to_string_pretty(data)?;
        let (dir, tmp_path) = self.sibling(".tmp", true)?;
        fs::create_dir_all(dir)?;

        let mut tmp = File::create(&tmp_path)?;
        if self.private {
            restrict_permissions(&tmp)?;
        }
        tmp.write_all(rendered.as_bytes())?;
        tmp.sync_all()?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Read-modify-write under the lock file.
    ///
    /// A missing file starts from `T::default()`. Nothing is written when
    /// `f` fails.
    pub fn update<F>(&self, f: F) -> Result<(), AtomicTomlError>
    where
        T: Default,
        F: FnOnce(&mut T) -> Result<(), AtomicTomlError>,
    {
        let (_, lock_path) = self.sibling(".lock", false)?;
        let _guard = LockGuard::acquire(lock_path)?;

        let mut data = self.load()?.unwrap_or_default();
        f(&mut data)?;
        self.save(&data)
    }

    /// Path next to the target: `.{name}{suffix}` when `hidden`, otherwise
    /// `{name}{suffix}`.
    fn sibling(&self, suffix: &str, hidden: bool) -> Result<(&Path, PathBuf), AtomicTomlError> {
        let (Some(dir), Some(name)) = (self.path.parent(), self.path.file_name()) else {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("{} is not a file path", self.path.display()),
            )
            .into());
        };
        let dot = if hidden { "." } else { "" };
        let sibling = dir.join(format!("{}{}{}", dot, name.to_string_lossy(), suffix));
        Ok((dir, sibling))
    }
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}

/// Holds an exclusive lock on a lock file; removes the file on drop.
struct LockGuard {
    _file: File,
    path: PathBuf,
}

impl LockGuard {
    fn acquire(path: PathBuf) -> Result<Self, AtomicTomlError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        if let Err(source) = file.lock_exclusive() {
            return Err(AtomicTomlError::Lock { path, source });
        }
        Ok(Self { _file: file, path })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
