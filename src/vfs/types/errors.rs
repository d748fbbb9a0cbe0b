/*!
 * VFS Error Types
 * Structured, type-safe error handling for dispatch operations
 */

use miette::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::fs_type::FsType;
use super::operation::Operation;

/// VFS operation result
///
/// # Must Use
/// VFS operations can fail and must be handled to prevent data loss
#[must_use = "VFS operations can fail and must be handled"]
pub type VfsResult<T> = Result<T, VfsError>;

/// VFS errors
///
/// The first five variants are the dispatch layer's own outcomes. Drivers
/// report their failures either as `DriverFailure` or as one of the more
/// specific variants below it. Context strings must be non-empty.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum VfsError {
    #[error("No driver registered for filesystem type {0}")]
    #[diagnostic(
        code(vfs::driver_not_found),
        help("Register the driver before mounting volumes of this type.")
    )]
    DriverNotFound(FsType),

    #[error("No mount found for: {0}")]
    #[diagnostic(
        code(vfs::mount_not_found),
        help("Paths resolve by mountpoint prefix; unmount needs the exact mountpoint string.")
    )]
    MountNotFound(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Driver does not support {op}")]
    #[diagnostic(code(vfs::unsupported))]
    Unsupported { op: Operation },

    #[error("Permission denied: {0}")]
    #[diagnostic(
        code(vfs::permission_denied),
        help("Reopen the file with the required open mode.")
    )]
    PermissionDenied(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Driver failure: {0}")]
    #[diagnostic(code(vfs::driver_failure))]
    DriverFailure(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Not found: {0}")]
    #[diagnostic(code(vfs::not_found))]
    NotFound(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Already exists: {0}")]
    #[diagnostic(code(vfs::already_exists))]
    AlreadyExists(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Not a directory: {0}")]
    #[diagnostic(
        code(vfs::not_a_directory),
        help("Directory arguments must end with '/'.")
    )]
    NotADirectory(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Is a directory: {0}")]
    #[diagnostic(code(vfs::is_a_directory))]
    IsADirectory(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Invalid argument: {0}")]
    #[diagnostic(code(vfs::invalid_argument))]
    InvalidArgument(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Out of space")]
    #[diagnostic(code(vfs::out_of_space))]
    OutOfSpace,

    #[error("Cross-device operation")]
    #[diagnostic(
        code(vfs::cross_device),
        help("Rename and copy only work within a single mount.")
    )]
    CrossDevice,
}

impl VfsError {
    /// Error for a dispatch table entry the driver leaves empty
    #[inline]
    pub const fn unsupported(op: Operation) -> Self {
        VfsError::Unsupported { op }
    }

    /// Check whether this error reports a missing dispatch table entry for `op`
    #[inline]
    #[must_use]
    pub fn is_unsupported(&self, op: Operation) -> bool {
        matches!(self, VfsError::Unsupported { op: missing } if *missing == op)
    }

    /// Convert to a negative POSIX errno for syscall layers
    #[must_use]
    pub const fn errno(&self) -> i32 {
        match self {
            VfsError::NotFound(_) | VfsError::MountNotFound(_) => -2, // ENOENT
            VfsError::DriverFailure(_) => -5,                        // EIO
            // read(2)/write(2) on a descriptor lacking the access mode
            VfsError::PermissionDenied(_) => -9, // EBADF
            VfsError::AlreadyExists(_) => -17,   // EEXIST
            VfsError::CrossDevice => -18,        // EXDEV
            VfsError::DriverNotFound(_) => -19,  // ENODEV
            VfsError::NotADirectory(_) => -20,   // ENOTDIR
            VfsError::IsADirectory(_) => -21,    // EISDIR
            VfsError::InvalidArgument(_) => -22, // EINVAL
            VfsError::OutOfSpace => -28,         // ENOSPC
            VfsError::Unsupported { .. } => -95, // ENOTSUP
        }
    }
}

/// Deserialize and validate non-empty string for error messages
pub(super) fn deserialize_nonempty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.is_empty() {
        return Err(serde::de::Error::custom("error message must not be empty"));
    }
    Ok(s)
}
