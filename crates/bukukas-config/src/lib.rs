//! Configuration management for bukukas
//!
//! Settings come from three layers, weakest first: hardcoded defaults, an
//! optional YAML file, and environment variables. The tool runs fully
//! offline with zero configuration; a remote backup target only becomes
//! active once an access token is present.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Remote backup repository settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Repository in `owner/name` form
    #[serde(default = "default_repo")]
    pub repo: String,
    /// Access token; absent means remote backups are disabled
    #[serde(default)]
    pub token: Option<String>,
    /// Branch the backups are committed to
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Folder inside the repository holding the backups
    #[serde(default = "default_folder")]
    pub folder: String,
    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            token: None,
            branch: default_branch(),
            folder: default_folder(),
            api_base: default_api_base(),
        }
    }
}

fn default_repo() -> String {
    "puanbening/administrasi-bumdes".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_folder() -> String {
    "backup".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

/// Local fallback storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for local fallback backups
    #[serde(default = "default_local_dir")]
    pub local_dir: PathBuf,
    /// Snapshot file name, used for both the remote path and the local file
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            local_dir: default_local_dir(),
            snapshot_file: default_snapshot_file(),
        }
    }
}

fn default_local_dir() -> PathBuf {
    PathBuf::from("backup_local")
}

fn default_snapshot_file() -> String {
    "snapshot.json".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote backup settings
    #[serde(default)]
    pub remote: RemoteConfig,
    /// Local storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides.
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|_| ConfigError::IoError {
            path: path.to_string_lossy().to_string(),
        })?;

        let mut config: Config =
            serde_yaml::from_str(&content).map_err(|_| ConfigError::InvalidYaml)?;
        config.apply_env();
        config.validate()?;

        Ok(config)
    }

    /// Build configuration from defaults plus environment overrides.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Apply environment variable overrides on top of the current values.
    ///
    /// An empty `GITHUB_TOKEN` counts as unset, so exporting `GITHUB_TOKEN=`
    /// switches the tool back to local-only mode.
    pub fn apply_env(&mut self) {
        if let Ok(repo) = std::env::var("GITHUB_REPO") {
            self.remote.repo = repo;
        }
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            self.remote.token = if token.trim().is_empty() {
                None
            } else {
                Some(token)
            };
        }
        if let Ok(branch) = std::env::var("GITHUB_BRANCH") {
            self.remote.branch = branch;
        }
        if let Ok(folder) = std::env::var("BACKUP_FOLDER") {
            self.remote.folder = folder;
        }
        if let Ok(base) = std::env::var("BUKUKAS_API_BASE") {
            self.remote.api_base = base;
        }
        if let Ok(dir) = std::env::var("BUKUKAS_LOCAL_DIR") {
            self.storage.local_dir = PathBuf::from(dir);
        }
        if let Ok(level) = std::env::var("BUKUKAS_LOG") {
            self.logging.level = level;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.remote.repo.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "remote.repo".to_string(),
                reason: "Repository must be in owner/name form".to_string(),
            });
        }

        if self.remote.branch.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "remote.branch".to_string(),
                reason: "Branch must not be empty".to_string(),
            });
        }

        if self.storage.snapshot_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.snapshot_file".to_string(),
                reason: "Snapshot file name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Whether a remote backup target is configured
    pub fn remote_enabled(&self) -> bool {
        self.remote.token.is_some()
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_offline() {
        let config = Config::default();
        assert_eq!(config.remote.repo, "puanbening/administrasi-bumdes");
        assert_eq!(config.remote.branch, "main");
        assert_eq!(config.remote.folder, "backup");
        assert_eq!(config.storage.local_dir, PathBuf::from("backup_local"));
        assert_eq!(config.storage.snapshot_file, "snapshot.json");
        assert!(!config.remote_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "remote:\n  branch: backup-test\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.remote.branch, "backup-test");
        assert_eq!(config.remote.folder, "backup");
        assert_eq!(config.storage.snapshot_file, "snapshot.json");
    }

    #[test]
    fn test_validate_rejects_bad_repo() {
        let mut config = Config::default();
        config.remote.repo = "not-a-repo".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::InvalidValue);
    }

    #[test]
    fn test_validate_rejects_empty_snapshot_file() {
        let mut config = Config::default();
        config.storage.snapshot_file = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("GITHUB_REPO", "desa/buku-kas");
        std::env::set_var("GITHUB_TOKEN", "ghp_dummy");
        std::env::set_var("GITHUB_BRANCH", "backups");
        std::env::set_var("BACKUP_FOLDER", "arsip");
        std::env::set_var("BUKUKAS_LOCAL_DIR", "/tmp/arsip_local");

        let config = Config::from_env();
        assert_eq!(config.remote.repo, "desa/buku-kas");
        assert_eq!(config.remote.token.as_deref(), Some("ghp_dummy"));
        assert_eq!(config.remote.branch, "backups");
        assert_eq!(config.remote.folder, "arsip");
        assert_eq!(config.storage.local_dir, PathBuf::from("/tmp/arsip_local"));
        assert!(config.remote_enabled());

        // blank token disables the remote again
        std::env::set_var("GITHUB_TOKEN", "");
        let config = Config::from_env();
        assert!(!config.remote_enabled());

        for key in [
            "GITHUB_REPO",
            "GITHUB_TOKEN",
            "GITHUB_BRANCH",
            "BACKUP_FOLDER",
            "BUKUKAS_LOCAL_DIR",
        ] {
            std::env::remove_var(key);
        }
    }
}
