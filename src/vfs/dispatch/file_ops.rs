/*!
 * Handle Operations
 * open/close/read/write/seek/control routed through a file handle
 */

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::super::handle::FileHandle;
use super::super::traits::FileSystemDriver;
use super::super::types::*;
use super::Vfs;
use crate::core::limits::FALLBACK_CREATE_MODE;

impl Vfs {
    /// Open `path` with `mode`
    ///
    /// If the driver's open fails and `mode` has `CREATE`, the file is created
    /// through the driver and opened once more. Append handles start at
    /// end-of-file. A driver without an open callback fails immediately.
    #[instrument(level = "debug", skip(self))]
    pub fn open(&self, path: &str, mode: OpenMode) -> VfsResult<FileHandle> {
        let (mount, rel) = self.route(path)?;
        let driver = Arc::clone(mount.driver());
        let mut handle = FileHandle::new(mount, mode);

        match driver.open(&mut handle, rel) {
            Ok(()) => {}
            Err(e) if e.is_unsupported(Operation::Open) => return Err(e),
            Err(open_err) if mode.will_create() => {
                match driver.create(rel, FALLBACK_CREATE_MODE) {
                    Ok(()) => {
                        debug!(path, "Created missing file, reopening");
                        driver.open(&mut handle, rel)?;
                    }
                    Err(e) if e.is_unsupported(Operation::Create) => return Err(open_err),
                    Err(e) => return Err(e),
                }
            }
            Err(open_err) => return Err(open_err),
        }

        if mode.is_append() {
            seek_to_end(driver.as_ref(), &mut handle);
        }
        Ok(handle)
    }

    /// Close a handle
    ///
    /// The handle is released whether or not the driver has a close callback;
    /// the driver's result is returned.
    #[instrument(level = "debug", skip(self))]
    pub fn close(&self, mut handle: FileHandle) -> VfsResult<()> {
        let driver = handle.driver();
        let result = driver.close(&mut handle);
        drop(handle);
        result
    }

    /// Read into `buf`; partial reads are returned as-is
    pub fn read(&self, handle: &mut FileHandle, buf: &mut [u8]) -> VfsResult<usize> {
        if !handle.mode().is_readable() {
            return Err(VfsError::PermissionDenied(format!(
                "handle on {} not opened for reading",
                handle.mount().mountpoint()
            )));
        }
        handle.driver().read(handle, buf)
    }

    /// Write from `buf`; append handles are moved back to end-of-file afterwards
    pub fn write(&self, handle: &mut FileHandle, buf: &[u8]) -> VfsResult<usize> {
        if !handle.mode().is_writable() {
            return Err(VfsError::PermissionDenied(format!(
                "handle on {} not opened for writing",
                handle.mount().mountpoint()
            )));
        }
        let driver = handle.driver();
        let written = driver.write(handle, buf)?;
        if handle.mode().is_append() {
            seek_to_end(driver.as_ref(), handle);
        }
        Ok(written)
    }

    /// Reposition the handle, returning the driver's new position
    pub fn seek(&self, handle: &mut FileHandle, offset: i64, origin: SeekOrigin) -> VfsResult<u64> {
        handle.driver().seek(handle, offset, origin)
    }

    /// Forward a driver-defined control request
    pub fn control(&self, handle: &mut FileHandle, request: u32, arg: usize) -> VfsResult<usize> {
        handle.driver().control(handle, request, arg)
    }
}

/// Append repositioning is best-effort: the triggering open or write still succeeds
fn seek_to_end(driver: &dyn FileSystemDriver, handle: &mut FileHandle) {
    if let Err(e) = driver.seek(handle, 0, SeekOrigin::End) {
        warn!(
            mountpoint = handle.mount().mountpoint(),
            error = %e,
            "Append handle could not seek to end-of-file"
        );
    }
}
