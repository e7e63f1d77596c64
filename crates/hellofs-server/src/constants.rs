//! Server configuration constants.
//!
//! Centralizes hardcoded values for easier configuration and documentation.

use std::time::Duration;

use hellofs_kernel::vfs::encoded_len;

/// Filesystem name shown in the mount table.
pub const DEFAULT_FS_NAME: &str = "hellofs";

/// Byte budget for one readdir reply. Matches the page-sized buffer the
/// kernel normally asks for.
pub const DEFAULT_READDIR_BUDGET: usize = 4096;

/// Longest entry name the kernel passes through (`NAME_MAX`).
pub const MAX_NAME_LEN: usize = 255;

/// Smallest readdir budget that always fits one entry.
pub const MIN_READDIR_BUDGET: usize = encoded_len(MAX_NAME_LEN);

/// How long the kernel may cache attributes.
pub const DEFAULT_ATTR_TTL: Duration = Duration::from_secs(1);

/// Directory under the user config dir holding the config file.
pub const CONFIG_DIR_NAME: &str = "hellofs";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";
