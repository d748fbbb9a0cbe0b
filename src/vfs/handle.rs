/*!
 * File Handle
 * Session state for one open file
 */

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use super::mount::MountEntry;
use super::traits::FileSystemDriver;
use super::types::OpenMode;

/// Open file handle
///
/// Created by `Vfs::open` and consumed by `Vfs::close`, so a handle can never
/// be used after close and is released on every exit path. The private slot
/// belongs to the driver: it is set during the driver's `open` and read back
/// by later callbacks.
///
/// Handles are single-owner. They may move between threads but the VFS does
/// not synchronize concurrent use of one handle.
pub struct FileHandle {
    mount: Arc<MountEntry>,
    mode: OpenMode,
    private: Option<Box<dyn Any + Send + Sync>>,
}

impl FileHandle {
    pub(crate) fn new(mount: Arc<MountEntry>, mode: OpenMode) -> Self {
        Self {
            mount,
            mode,
            private: None,
        }
    }

    /// Mount entry this handle was opened through
    #[inline]
    pub fn mount(&self) -> &Arc<MountEntry> {
        &self.mount
    }

    #[inline]
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    #[inline]
    pub(crate) fn driver(&self) -> Arc<dyn FileSystemDriver> {
        Arc::clone(self.mount.driver())
    }

    /// Store driver-private state, replacing any previous value
    pub fn set_private<T: Any + Send + Sync>(&mut self, data: T) {
        self.private = Some(Box::new(data));
    }

    pub fn private<T: Any>(&self) -> Option<&T> {
        self.private.as_ref()?.downcast_ref::<T>()
    }

    pub fn private_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.private.as_mut()?.downcast_mut::<T>()
    }

    /// Remove and return driver-private state
    pub fn take_private<T: Any>(&mut self) -> Option<Box<T>> {
        match self.private.take()?.downcast::<T>() {
            Ok(data) => Some(data),
            Err(other) => {
                self.private = Some(other);
                None
            }
        }
    }

    #[inline]
    pub fn has_private(&self) -> bool {
        self.private.is_some()
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("mountpoint", &self.mount.mountpoint())
            .field("mode", &self.mode)
            .field("has_private", &self.private.is_some())
            .finish()
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        trace!(mountpoint = self.mount.mountpoint(), "Released file handle");
    }
}
