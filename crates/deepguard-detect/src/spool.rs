//! Scoped temporary storage for in-flight analyses.
//!
//! Every analysis materializes its image under the spool directory with a
//! name that cannot collide across concurrent requests, and the
//! [`SpooledFile`] guard removes the file on every exit path, panic
//! unwinding included.

use std::path::{Path, PathBuf};

use tracing::warn;

use deepguard_core::ResourceError;

/// Directory holding in-flight spooled images.
#[derive(Debug, Clone)]
pub struct SpoolDir {
    root: PathBuf,
}

impl SpoolDir {
    /// Open a spool directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ResourceError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| ResourceError::Spool {
            path: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Spool uploaded bytes under a per-request unique name.
    pub fn spool_upload(&self, extension: &str, bytes: &[u8]) -> Result<SpooledFile, ResourceError> {
        let name = format!("{}{}", uuid::Uuid::new_v4(), extension);
        self.write(name, bytes)
    }

    /// Spool a downloaded image. Uniqueness is keyed by process id plus a
    /// per-request UUID, so concurrent requests never collide.
    pub fn spool_download(&self, bytes: &[u8]) -> Result<SpooledFile, ResourceError> {
        let name = format!("url_{}_{}.jpg", std::process::id(), uuid::Uuid::new_v4());
        self.write(name, bytes)
    }

    fn write(&self, name: String, bytes: &[u8]) -> Result<SpooledFile, ResourceError> {
        let path = self.root.join(name);
        std::fs::write(&path, bytes).map_err(|source| ResourceError::Spool {
            path: path.display().to_string(),
            source,
        })?;
        Ok(SpooledFile { path })
    }
}

/// Owning guard for one spooled file. Dropping the guard deletes the file.
#[derive(Debug)]
pub struct SpooledFile {
    path: PathBuf,
}

impl SpooledFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the spooled file in bytes, read back from disk.
    pub fn size(&self) -> Result<u64, ResourceError> {
        std::fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(|source| ResourceError::Spool {
                path: self.path.display().to_string(),
                source,
            })
    }

    /// The spooled contents.
    pub fn read(&self) -> Result<Vec<u8>, ResourceError> {
        std::fs::read(&self.path).map_err(|source| ResourceError::Spool {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl Drop for SpooledFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove spooled file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_removes_the_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let spool = SpoolDir::open(dir.path()).unwrap();

        let spooled = spool.spool_upload(".png", b"not really a png").unwrap();
        let path = spooled.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(spooled.size().unwrap(), 16);

        drop(spooled);
        assert!(!path.exists());
    }

    #[test]
    fn guard_removes_the_file_on_panic() {
        let dir = tempfile::tempdir().unwrap();
        let spool = SpoolDir::open(dir.path()).unwrap();

        let path = {
            let spooled = spool.spool_download(b"bytes").unwrap();
            let path = spooled.path().to_path_buf();
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let _held = spooled;
                panic!("downstream failure");
            }));
            assert!(result.is_err());
            path
        };
        assert!(!path.exists());
    }

    #[test]
    fn concurrent_spools_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let spool = SpoolDir::open(dir.path()).unwrap();

        let a = spool.spool_download(b"a").unwrap();
        let b = spool.spool_download(b"b").unwrap();
        assert_ne!(a.path(), b.path());
    }
}
