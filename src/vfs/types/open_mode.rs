/*!
 * VFS Open Mode and Seek Origin
 * Mode bits checked on handle operations and seek origins forwarded to drivers
 */

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::errors::VfsError;

bitflags! {
    /// Open-mode bitmask carried by every file handle
    ///
    /// `READ`/`WRITE` gate handle reads and writes. `APPEND` keeps the handle
    /// positioned at end-of-file after open and after every write. `CREATE`
    /// asks `open` to create a missing file and retry once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OpenMode: u32 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const APPEND = 1 << 2;
        const CREATE = 1 << 3;
    }
}

impl OpenMode {
    /// Create read-only mode
    #[inline]
    #[must_use]
    pub const fn read_only() -> Self {
        Self::READ
    }

    /// Create write-only mode
    #[inline]
    #[must_use]
    pub const fn write_only() -> Self {
        Self::WRITE
    }

    #[inline]
    #[must_use]
    pub const fn read_write() -> Self {
        Self::READ.union(Self::WRITE)
    }

    /// Create appending mode (write + append)
    #[inline]
    #[must_use]
    pub const fn append_only() -> Self {
        Self::WRITE.union(Self::APPEND)
    }

    #[inline]
    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.contains(Self::READ)
    }

    #[inline]
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.contains(Self::WRITE)
    }

    #[inline]
    #[must_use]
    pub const fn is_append(&self) -> bool {
        self.contains(Self::APPEND)
    }

    /// Check if a failed open falls back to create-then-reopen
    #[inline]
    #[must_use]
    pub const fn will_create(&self) -> bool {
        self.contains(Self::CREATE)
    }
}

/// Seek origin with conventional begin/current/end semantics
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeekOrigin {
    Begin = 0,
    Current = 1,
    End = 2,
}

impl TryFrom<u8> for SeekOrigin {
    type Error = VfsError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(SeekOrigin::Begin),
            1 => Ok(SeekOrigin::Current),
            2 => Ok(SeekOrigin::End),
            other => Err(VfsError::InvalidArgument(format!(
                "unknown seek origin: {other}"
            ))),
        }
    }
}
