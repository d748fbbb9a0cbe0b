/*!
 * Filesystem Type Identifier
 * Integer tag naming a filesystem driver
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Filesystem type identifier
///
/// Drivers are registered and mounted by this tag. Uniqueness is expected
/// but not enforced: lookups return the earliest registered driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct FsType(u32);

impl FsType {
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl From<u32> for FsType {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for FsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fs#{}", self.0)
    }
}
