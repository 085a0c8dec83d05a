//! Process-wide path layout for the pkglab home directory.
//!
//! ## What
//! Every pkglab process (daemon, CLI, tests with an override) agrees on one
//! directory layout rooted at `$HOME/.pkglab` (or `PKGLAB_HOME` when set):
//! the config file, PID file, fingerprint state, the storage root the
//! registry owns exclusively, and the repos directory of per-consumer state
//! sidecars.
//!
//! ## Why
//! Centralizing the layout here means the registry, publisher, sync engine
//! and CLI never disagree about where a given file lives, and a test harness
//! can redirect the whole tree by constructing a [`PkglabPaths`] directly
//! instead of relying on environment variables deep in call stacks.

use std::path::{Path, PathBuf};

use crate::error::{Error, FileSystemError, Result};

const DEFAULT_APP_DIR: &str = ".pkglab";
const HOME_OVERRIDE_VAR: &str = "PKGLAB_HOME";

/// The on-disk layout every pkglab process agrees on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkglabPaths {
    home: PathBuf,
}

impl PkglabPaths {
    /// Builds the layout rooted at an explicit `home` directory, bypassing
    /// environment discovery. Used by tests and by callers that already
    /// resolved an override.
    #[must_use]
    pub fn at(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Resolves the pkglab home directory: `$PKGLAB_HOME` if set, otherwise
    /// `$HOME/.pkglab`.
    ///
    /// # Errors
    /// Returns [`FileSystemError::NotFound`] if neither `PKGLAB_HOME` nor the
    /// user's home directory can be determined.
    pub fn discover() -> Result<Self> {
        if let Ok(override_dir) = std::env::var(HOME_OVERRIDE_VAR) {
            return Ok(Self::at(override_dir));
        }
        let home = dirs::home_dir().ok_or_else(|| {
            Error::FileSystem(FileSystemError::NotFound { path: PathBuf::from("$HOME") })
        })?;
        Ok(Self::at(home.join(DEFAULT_APP_DIR)))
    }

    /// The pkglab home directory itself.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `<home>/config.json`.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.home.join("config.json")
    }

    /// `<home>/pid.json`.
    #[must_use]
    pub fn pid_file(&self) -> PathBuf {
        self.home.join("pid.json")
    }

    /// `<home>/fingerprints.json`.
    #[must_use]
    pub fn fingerprints_file(&self) -> PathBuf {
        self.home.join("fingerprints.json")
    }

    /// `<home>/publish.lock`, the cross-process file lock guaranteeing
    /// at-most-one `pub` invocation at a time on one machine.
    #[must_use]
    pub fn publish_lock_file(&self) -> PathBuf {
        self.home.join("publish.lock")
    }

    /// `<home>/daemon-start.lock`, serializing racing daemon start-ups.
    #[must_use]
    pub fn daemon_start_lock_file(&self) -> PathBuf {
        self.home.join("daemon-start.lock")
    }

    /// `<home>/storage`, exclusively owned by the registry process: the
    /// on-disk packument + tarball store.
    #[must_use]
    pub fn storage_dir(&self) -> PathBuf {
        self.home.join("storage")
    }

    /// `<home>/repos`, one JSON sidecar per consumer repo.
    #[must_use]
    pub fn repos_dir(&self) -> PathBuf {
        self.home.join("repos")
    }

    /// `<home>/daemon.log`.
    #[must_use]
    pub fn daemon_log_file(&self) -> PathBuf {
        self.home.join("daemon.log")
    }

    /// Ensures every directory this layout names exists, creating parents as
    /// needed. Idempotent.
    ///
    /// # Errors
    /// Returns [`FileSystemError`] if a directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.home, &self.storage_dir(), &self.repos_dir()] {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::FileSystem(FileSystemError::from_io(e, dir)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_at_home() {
        let paths = PkglabPaths::at("/tmp/pkglab-test-home");
        assert_eq!(paths.config_file(), Path::new("/tmp/pkglab-test-home/config.json"));
        assert_eq!(paths.storage_dir(), Path::new("/tmp/pkglab-test-home/storage"));
        assert_eq!(paths.repos_dir(), Path::new("/tmp/pkglab-test-home/repos"));
        assert_eq!(paths.pid_file(), Path::new("/tmp/pkglab-test-home/pid.json"));
    }

    #[test]
    fn ensure_dirs_creates_storage_and_repos() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let paths = PkglabPaths::at(tmp.path());
        paths.ensure_dirs().expect("ensure_dirs");
        assert!(paths.storage_dir().is_dir());
        assert!(paths.repos_dir().is_dir());
    }
}
