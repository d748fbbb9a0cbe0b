/*!
 * VFS Directory Entry
 * Fixed-capacity names produced by directory listings
 */

use super::errors::{VfsError, VfsResult};
use crate::core::limits::DIR_ENTRY_NAME_MAX;
use crate::core::InlineString;
use serde::{Deserialize, Deserializer, Serialize};

/// Directory entry
///
/// Names are non-empty, hold at most [`DirEntry::NAME_MAX`] bytes and
/// contain neither NUL bytes nor path separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirEntry {
    #[serde(deserialize_with = "deserialize_entry_name")]
    name: InlineString,
}

impl DirEntry {
    pub const NAME_MAX: usize = DIR_ENTRY_NAME_MAX;

    /// Create a new directory entry with validation
    #[must_use = "validation result must be checked"]
    pub fn new(name: impl AsRef<str>) -> VfsResult<Self> {
        let name = name.as_ref();
        Self::validate_name(name)?;
        Ok(Self {
            name: InlineString::from(name),
        })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Validate entry name
    #[must_use = "validation result must be checked"]
    pub fn validate_name(name: &str) -> VfsResult<()> {
        if name.is_empty() {
            return Err(VfsError::InvalidArgument(
                "entry name cannot be empty".into(),
            ));
        }
        if name.len() > Self::NAME_MAX {
            return Err(VfsError::InvalidArgument(format!(
                "entry name exceeds {} bytes: {name}",
                Self::NAME_MAX
            )));
        }
        if name.contains('\0') {
            return Err(VfsError::InvalidArgument(
                "entry name cannot contain null bytes".into(),
            ));
        }
        if name.contains('/') {
            return Err(VfsError::InvalidArgument(
                "entry name cannot contain path separators".into(),
            ));
        }
        Ok(())
    }
}

fn deserialize_entry_name<'de, D>(deserializer: D) -> Result<InlineString, D::Error>
where
    D: Deserializer<'de>,
{
    let name = InlineString::deserialize(deserializer)?;
    DirEntry::validate_name(&name).map_err(serde::de::Error::custom)?;
    Ok(name)
}
