/*!
 * VFS Configuration
 *
 * Runtime configuration for mount resolution and boot mounts
 */

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::types::{VfsError, VfsResult};
use crate::core::limits::{DEVICE_ROOT, PATH_SEPARATOR};

/// Environment variable naming a JSON configuration file
pub const CONFIG_ENV: &str = "VFS_CONFIG";

/// How a path picks its mount when several mountpoints prefix it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Earliest mounted prefix wins, even when a later mount is more specific
    #[default]
    FirstMatch,
    /// Longest matching mountpoint wins; ties go to the earliest mount
    LongestPrefix,
}

/// VFS configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VfsConfig {
    pub resolution: ResolutionPolicy,
    /// Refuse a mount whose mountpoint string is already mounted
    pub reject_duplicate_mounts: bool,
    /// Where the device namespace is mounted at boot
    pub device_root: String,
}

impl Default for VfsConfig {
    fn default() -> Self {
        Self {
            resolution: ResolutionPolicy::FirstMatch,
            reject_duplicate_mounts: false,
            device_root: DEVICE_ROOT.to_string(),
        }
    }
}

impl VfsConfig {
    /// Longest-prefix resolution with unique mountpoints
    pub fn strict() -> Self {
        Self {
            resolution: ResolutionPolicy::LongestPrefix,
            reject_duplicate_mounts: true,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> VfsResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| VfsError::InvalidArgument(format!("invalid VFS config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `VFS_CONFIG`, or defaults when unset
    pub fn from_env() -> VfsResult<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> VfsResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            VfsError::InvalidArgument(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Mountpoints must be absolute and end with a separator
    #[must_use = "validation result must be checked"]
    pub fn validate(&self) -> VfsResult<()> {
        let root = &self.device_root;
        if !root.starts_with(PATH_SEPARATOR) || !root.ends_with(PATH_SEPARATOR) {
            return Err(VfsError::InvalidArgument(format!(
                "device_root must start and end with '{PATH_SEPARATOR}': {root}"
            )));
        }
        Ok(())
    }
}
