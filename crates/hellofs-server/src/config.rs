//! Mount configuration.
//!
//! Settings come from an optional RON file and are then overridden by
//! command-line flags. A missing default config file is not an error; a
//! missing file named with `--config` is.
//!
//! ```ron
//! (
//!     mountpoint: Some("/mnt/hello"),
//!     fs_name: "hellofs",
//!     allow_other: false,
//!     auto_unmount: true,
//!     readdir_budget: 4096,
//!     attr_ttl_secs: 1,
//! )
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use fuser::MountOption;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ATTR_TTL, DEFAULT_FS_NAME, DEFAULT_READDIR_BUDGET,
    MIN_READDIR_BUDGET,
};

/// Config loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to render config: {0}")]
    Render(#[from] ron::Error),

    #[error("no mountpoint given (pass MOUNTPOINT or set `mountpoint` in the config file)")]
    MissingMountpoint,

    #[error("readdir budget {budget} is below {min} bytes, the size of the longest entry")]
    ReaddirBudgetTooSmall { budget: usize, min: usize },
}

/// Resolved mount settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    /// Where to mount.
    pub mountpoint: Option<PathBuf>,
    /// Name shown in the mount table.
    pub fs_name: String,
    /// Let other users see the mount.
    pub allow_other: bool,
    /// Unmount when the process exits.
    pub auto_unmount: bool,
    /// Byte budget for each readdir reply.
    pub readdir_budget: usize,
    /// Attribute cache TTL, in seconds.
    pub attr_ttl_secs: u64,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            mountpoint: None,
            fs_name: DEFAULT_FS_NAME.to_string(),
            allow_other: false,
            auto_unmount: false,
            readdir_budget: DEFAULT_READDIR_BUDGET,
            attr_ttl_secs: DEFAULT_ATTR_TTL.as_secs(),
        }
    }
}

impl MountConfig {
    /// Default config file location (`~/.config/hellofs/config.ron` on Linux).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a RON config string.
    pub fn from_ron(text: &str, path: &Path) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text, path)
    }

    /// Load the default config file if it exists, else defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Render as pretty RON.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// The mountpoint, which must be set by now.
    pub fn mountpoint(&self) -> Result<&Path, ConfigError> {
        self.mountpoint
            .as_deref()
            .ok_or(ConfigError::MissingMountpoint)
    }

    /// Attribute cache TTL.
    pub fn attr_ttl(&self) -> Duration {
        Duration::from_secs(self.attr_ttl_secs)
    }

    /// Check values that would make the mount unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mountpoint()?;
        if self.readdir_budget < MIN_READDIR_BUDGET {
            return Err(ConfigError::ReaddirBudgetTooSmall {
                budget: self.readdir_budget,
                min: MIN_READDIR_BUDGET,
            });
        }
        Ok(())
    }

    /// FUSE mount options for a backend that is `read_only` or not.
    pub fn mount_options(&self, read_only: bool) -> Vec<MountOption> {
        let mut options = vec![
            MountOption::FSName(self.fs_name.clone()),
            MountOption::DefaultPermissions,
        ];
        if read_only {
            options.push(MountOption::RO);
        }
        if self.allow_other {
            options.push(MountOption::AllowOther);
        }
        if self.auto_unmount {
            options.push(MountOption::AutoUnmount);
        }
        options
    }
}

/// Read-only FUSE filesystem with a fixed hello tree.
#[derive(Parser, Debug)]
#[command(name = "hellofs")]
#[command(about = "Mount a fixed, read-only hello filesystem")]
pub struct Cli {
    /// Directory to mount on
    pub mountpoint: Option<PathBuf>,

    /// Config file (RON). Defaults to the user config dir if present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Filesystem name shown in the mount table
    #[arg(long)]
    pub fs_name: Option<String>,

    /// Allow other users to access the mount
    #[arg(long)]
    pub allow_other: bool,

    /// Unmount automatically when the process exits
    #[arg(long)]
    pub auto_unmount: bool,

    /// Byte budget for each readdir reply
    #[arg(long)]
    pub readdir_budget: Option<usize>,

    /// Attribute cache TTL in seconds
    #[arg(long)]
    pub attr_ttl_secs: Option<u64>,

    /// Print the resolved config and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Load the config file and apply flag overrides.
    pub fn resolve(&self) -> Result<MountConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => MountConfig::load(path)?,
            None => MountConfig::load_default()?,
        };
        Ok(self.apply(base))
    }

    /// Apply flags on top of `config`. Boolean flags can only switch on.
    pub fn apply(&self, mut config: MountConfig) -> MountConfig {
        if let Some(mountpoint) = &self.mountpoint {
            config.mountpoint = Some(mountpoint.clone());
        }
        if let Some(name) = &self.fs_name {
            config.fs_name = name.clone();
        }
        config.allow_other |= self.allow_other;
        config.auto_unmount |= self.auto_unmount;
        if let Some(budget) = self.readdir_budget {
            config.readdir_budget = budget;
        }
        if let Some(ttl) = self.attr_ttl_secs {
            config.attr_ttl_secs = ttl;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hellofs").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = MountConfig::default();
        assert_eq!(config.fs_name, "hellofs");
        assert_eq!(config.readdir_budget, 4096);
        assert_eq!(config.attr_ttl(), Duration::from_secs(1));
        assert!(config.mountpoint.is_none());
    }

    #[test]
    fn test_parse_partial_ron() {
        let text = r#"(mountpoint: Some("/mnt/x"), readdir_budget: 64)"#;
        let config = MountConfig::from_ron(text, Path::new("t.ron")).unwrap();
        assert_eq!(config.mountpoint.as_deref(), Some(Path::new("/mnt/x")));
        assert_eq!(config.readdir_budget, 64);
        assert_eq!(config.fs_name, "hellofs");
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = MountConfig::from_ron("(readdir_budget: \"lots\")", Path::new("bad.ron"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.ron"));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"(fs_name: "demo", allow_other: true, attr_ttl_secs: 5)"#).unwrap();

        let config = MountConfig::load(file.path()).unwrap();
        assert_eq!(config.fs_name, "demo");
        assert!(config.allow_other);
        assert_eq!(config.attr_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MountConfig::load(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = MountConfig {
            mountpoint: Some(PathBuf::from("/mnt/hello")),
            auto_unmount: true,
            ..Default::default()
        };
        let text = config.to_ron().unwrap();
        assert_eq!(MountConfig::from_ron(&text, Path::new("x")).unwrap(), config);
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            MountConfig::default().validate(),
            Err(ConfigError::MissingMountpoint)
        ));

        let mut config = MountConfig {
            mountpoint: Some(PathBuf::from("/mnt")),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.readdir_budget = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ReaddirBudgetTooSmall { budget: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_budget_below_one_dirent() {
        assert_eq!(MIN_READDIR_BUDGET, 280);

        let mut config = MountConfig {
            mountpoint: Some(PathBuf::from("/mnt")),
            readdir_budget: 16,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ReaddirBudgetTooSmall { budget: 16, min: 280 }
        ));
        assert!(err.to_string().contains("280"));

        config.readdir_budget = MIN_READDIR_BUDGET - 1;
        assert!(config.validate().is_err());
        config.readdir_budget = MIN_READDIR_BUDGET;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mount_options() {
        let config = MountConfig::default();
        let options = config.mount_options(true);
        assert!(options.contains(&MountOption::RO));
        assert!(options.contains(&MountOption::FSName("hellofs".to_string())));
        assert!(!options.contains(&MountOption::AllowOther));
        assert!(!options.contains(&MountOption::AutoUnmount));

        let config = MountConfig {
            allow_other: true,
            auto_unmount: true,
            ..Default::default()
        };
        let options = config.mount_options(false);
        assert!(!options.contains(&MountOption::RO));
        assert!(options.contains(&MountOption::AllowOther));
        assert!(options.contains(&MountOption::AutoUnmount));
    }

    #[test]
    fn test_cli_overrides_file() {
        let base = MountConfig {
            mountpoint: Some(PathBuf::from("/from/file")),
            fs_name: "file".to_string(),
            readdir_budget: 128,
            ..Default::default()
        };

        let args = ["/from/cli", "--readdir-budget", "512", "--allow-other"];
        let config = cli(&args).apply(base.clone());
        assert_eq!(config.mountpoint.as_deref(), Some(Path::new("/from/cli")));
        assert_eq!(config.readdir_budget, 512);
        assert_eq!(config.fs_name, "file");
        assert!(config.allow_other);

        let untouched = cli(&[]).apply(base.clone());
        assert_eq!(untouched, base);
    }

    #[test]
    fn test_cli_resolve_with_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"(mountpoint: Some("/mnt/a"), attr_ttl_secs: 9)"#).unwrap();
        let path = file.path().to_str().unwrap();

        let config = cli(&["--config", path, "--fs-name", "x"]).resolve().unwrap();
        assert_eq!(config.mountpoint.as_deref(), Some(Path::new("/mnt/a")));
        assert_eq!(config.attr_ttl_secs, 9);
        assert_eq!(config.fs_name, "x");
    }
}
