//! Shared state every command needs: the pkglab home layout, its config,
//! and an HTTP client pointed at the local registry.

use sublime_standard_tools::config::AppConfig;
use sublime_standard_tools::paths::PkglabPaths;
use sublime_standard_tools::process::PidInfo;

use crate::error::{CliError, CliResult};

/// Everything a command needs besides its own arguments.
pub struct CliContext {
    /// The resolved `<home>` layout (`$PKGLAB_HOME` or `~/.pkglab`).
    pub paths: PkglabPaths,
    /// `<home>/config.json`, loaded (or initialized with defaults).
    pub config: AppConfig,
    /// Shared HTTP client for every registry request this invocation makes.
    pub client: reqwest::Client,
}

impl CliContext {
    /// Resolves paths, loads (or creates) the config, and builds an HTTP
    /// client. Ensures `<home>`'s directories exist.
    ///
    /// # Errors
    /// Returns [`CliError::ConfigIncompatible`] if `config.json` predates
    /// the current schema, or a wrapped [`sublime_standard_tools`] error on
    /// other I/O failure.
    pub fn load() -> CliResult<Self> {
        let paths = PkglabPaths::discover()?;
        paths.ensure_dirs()?;
        let config = AppConfig::load_or_init(&paths.config_file()).map_err(|e| {
            if matches!(e, sublime_standard_tools::error::ConfigError::LegacyFormat { .. }) {
                CliError::ConfigIncompatible(e.to_string())
            } else {
                CliError::Standard(e.into())
            }
        })?;
        let client = reqwest::Client::new();
        Ok(Self { paths, config, client })
    }

    /// `http://127.0.0.1:<port>`, the local registry's base URL.
    #[must_use]
    pub fn registry_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.config.port)
    }

    /// Reads the daemon's PID file, if present.
    ///
    /// # Errors
    /// Returns a wrapped [`sublime_standard_tools::error::ProcessError`] if
    /// the file exists but can't be parsed.
    pub fn read_pid(&self) -> Option<PidInfo> {
        PidInfo::read(&self.paths.pid_file()).ok()
    }
}
