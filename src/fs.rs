//! Filesystem capability used by the provisioner.
//!
//! All provisioning I/O goes through [`FileSystem`] so the provisioning flow
//! can be exercised against an in-memory tree in tests.

use std::fs;
use std::path::Path;

use crate::error::ProvisioningError;

pub trait FileSystem {
    fn is_dir(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<(), ProvisioningError>;

    fn write(&self, path: &Path, contents: &str) -> Result<(), ProvisioningError>;

    fn read_to_string(&self, path: &Path) -> Result<String, ProvisioningError>;

    fn remove_dir_all(&self, path: &Path) -> Result<(), ProvisioningError>;

    /// Limit access to the owning user (mode 0600 on Unix).
    fn restrict_to_owner(&self, path: &Path) -> Result<(), ProvisioningError>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), ProvisioningError> {
        (**self).create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), ProvisioningError> {
        (**self).write(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, ProvisioningError> {
        (**self).read_to_string(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), ProvisioningError> {
        (**self).remove_dir_all(path)
    }

    fn restrict_to_owner(&self, path: &Path) -> Result<(), ProvisioningError> {
        (**self).restrict_to_owner(path)
    }
}

/// [`FileSystem`] backed by the host disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), ProvisioningError> {
        fs::create_dir_all(path).map_err(|e| ProvisioningError::fs(path, e))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), ProvisioningError> {
        fs::write(path, contents).map_err(|e| ProvisioningError::fs(path, e))
    }

    fn read_to_string(&self, path: &Path) -> Result<String, ProvisioningError> {
        fs::read_to_string(path).map_err(|e| ProvisioningError::fs(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), ProvisioningError> {
        fs::remove_dir_all(path).map_err(|e| ProvisioningError::fs(path, e))
    }

    fn restrict_to_owner(&self, path: &Path) -> Result<(), ProvisioningError> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(path)
                .map_err(|e| ProvisioningError::fs(path, e))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).map_err(|e| ProvisioningError::fs(path, e))?;
        }
        #[cfg(not(unix))]
        let _ = path;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};
    use std::io;
    use std::path::{Path, PathBuf};

    use super::FileSystem;
    use crate::error::ProvisioningError;

    /// In-memory tree with optional injected write failures.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryFileSystem {
        dirs: RefCell<BTreeSet<PathBuf>>,
        files: RefCell<BTreeMap<PathBuf, String>>,
        fail_writes_to: RefCell<Option<PathBuf>>,
    }

    impl MemoryFileSystem {
        pub(crate) fn fail_writes_to(&self, path: impl Into<PathBuf>) {
            *self.fail_writes_to.borrow_mut() = Some(path.into());
        }

        pub(crate) fn file(&self, path: &Path) -> Option<String> {
            self.files.borrow().get(path).cloned()
        }

        pub(crate) fn exists(&self, path: &Path) -> bool {
            self.dirs.borrow().contains(path) || self.files.borrow().contains_key(path)
        }

        /// File names directly under `dir`, sorted.
        pub(crate) fn list(&self, dir: &Path) -> Vec<String> {
            self.files
                .borrow()
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .collect()
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.borrow().contains(path)
        }

        fn create_dir_all(&self, path: &Path) -> Result<(), ProvisioningError> {
            let mut dirs = self.dirs.borrow_mut();
            for ancestor in path.ancestors() {
                dirs.insert(ancestor.to_path_buf());
            }
            Ok(())
        }

        fn write(&self, path: &Path, contents: &str) -> Result<(), ProvisioningError> {
            if self.fail_writes_to.borrow().as_deref() == Some(path) {
                return Err(ProvisioningError::fs(
                    path,
                    io::Error::new(io::ErrorKind::PermissionDenied, "injected write failure"),
                ));
            }
            let parent_exists = path.parent().is_some_and(|p| self.is_dir(p));
            if !parent_exists {
                return Err(ProvisioningError::fs(
                    path,
                    io::Error::new(io::ErrorKind::NotFound, "parent directory missing"),
                ));
            }
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }

        fn read_to_string(&self, path: &Path) -> Result<String, ProvisioningError> {
            self.file(path).ok_or_else(|| {
                ProvisioningError::fs(path, io::Error::new(io::ErrorKind::NotFound, "no such file"))
            })
        }

        fn remove_dir_all(&self, path: &Path) -> Result<(), ProvisioningError> {
            if !self.is_dir(path) {
                return Err(ProvisioningError::fs(
                    path,
                    io::Error::new(io::ErrorKind::NotFound, "no such directory"),
                ));
            }
            self.dirs.borrow_mut().retain(|p| !p.starts_with(path));
            self.files.borrow_mut().retain(|p, _| !p.starts_with(path));
            Ok(())
        }

        fn restrict_to_owner(&self, _path: &Path) -> Result<(), ProvisioningError> {
            Ok(())
        }
    }
}
