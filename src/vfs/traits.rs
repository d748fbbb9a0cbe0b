/*!
 * VFS Traits
 * The dispatch table every filesystem driver implements
 */

use super::handle::FileHandle;
use super::types::*;

/// Filesystem driver dispatch table
///
/// Every operation is optional. A driver exposes an operation by overriding
/// the method; the default bodies report [`VfsError::Unsupported`], which the
/// VFS treats as "callback absent". Paths handed to drivers are relative to
/// the mountpoint: the VFS strips exactly the mountpoint's length first.
///
/// Drivers are shared across every mount of their type and must be
/// `Send + Sync`. Handles are single-owner, so per-handle state needs no
/// locking; anything shared between handles is the driver's to guard.
pub trait FileSystemDriver: Send + Sync {
    /// Filesystem type identifier this driver registers under
    fn fs_type(&self) -> FsType;

    /// Human-readable driver name for logs
    fn name(&self) -> &str {
        "anonymous"
    }

    /// Open `path`, populating the handle's private slot as needed
    fn open(&self, _handle: &mut FileHandle, _path: &str) -> VfsResult<()> {
        Err(VfsError::unsupported(Operation::Open))
    }

    /// Release driver state attached to the handle
    fn close(&self, _handle: &mut FileHandle) -> VfsResult<()> {
        Err(VfsError::unsupported(Operation::Close))
    }

    /// Read into `buf`, returning bytes transferred (may be partial)
    fn read(&self, _handle: &mut FileHandle, _buf: &mut [u8]) -> VfsResult<usize> {
        Err(VfsError::unsupported(Operation::Read))
    }

    /// Write from `buf`, returning bytes transferred (may be partial)
    fn write(&self, _handle: &mut FileHandle, _buf: &[u8]) -> VfsResult<usize> {
        Err(VfsError::unsupported(Operation::Write))
    }

    /// Reposition the handle, returning the new absolute position
    fn seek(&self, _handle: &mut FileHandle, _offset: i64, _origin: SeekOrigin) -> VfsResult<u64> {
        Err(VfsError::unsupported(Operation::Seek))
    }

    /// Driver-defined control request
    fn control(&self, _handle: &mut FileHandle, _request: u32, _arg: usize) -> VfsResult<usize> {
        Err(VfsError::unsupported(Operation::Control))
    }

    fn create(&self, _path: &str, _mode: u32) -> VfsResult<()> {
        Err(VfsError::unsupported(Operation::Create))
    }

    fn delete(&self, _path: &str) -> VfsResult<()> {
        Err(VfsError::unsupported(Operation::Delete))
    }

    fn rename(&self, _src: &str, _dest: &str) -> VfsResult<()> {
        Err(VfsError::unsupported(Operation::Rename))
    }

    fn copy(&self, _src: &str, _dest: &str) -> VfsResult<()> {
        Err(VfsError::unsupported(Operation::Copy))
    }

    /// List a directory; ordering is driver-defined
    fn list(&self, _dir: &str) -> VfsResult<Vec<DirEntry>> {
        Err(VfsError::unsupported(Operation::List))
    }

    /// Attach a volume. Receives the caller's original arguments.
    fn mount(&self, _device: Option<&str>, _mountpoint: &str, _fs_type: FsType) -> VfsResult<()> {
        Err(VfsError::unsupported(Operation::Mount))
    }

    fn unmount(&self, _mountpoint: &str) -> VfsResult<()> {
        Err(VfsError::unsupported(Operation::Unmount))
    }
}
