/*!
 * VFS Facade
 * Uniform path and handle API over every mounted driver
 */

mod file_ops;
mod path_ops;

use std::sync::Arc;
use tracing::instrument;

use super::config::VfsConfig;
use super::mount::{MountEntry, MountInfo, MountTable};
use super::registry::DriverRegistry;
use super::traits::FileSystemDriver;
use super::types::*;

/// Virtual filesystem: driver registry plus mount table
///
/// Cloning is cheap and shares state, like handing out references to one
/// process-wide VFS. Each registry is guarded by its own lock, which is not
/// held while a driver callback runs. Mount and unmount are serialized
/// with each other.
pub struct Vfs {
    registry: Arc<DriverRegistry>,
    mounts: Arc<MountTable>,
    config: Arc<VfsConfig>,
}

impl Vfs {
    /// Create an empty VFS with default configuration
    pub fn new() -> Self {
        Self::with_config(VfsConfig::default())
    }

    pub fn with_config(config: VfsConfig) -> Self {
        Self {
            registry: Arc::new(DriverRegistry::new()),
            mounts: Arc::new(MountTable::with_config(&config)),
            config: Arc::new(config),
        }
    }

    #[inline]
    pub fn config(&self) -> &VfsConfig {
        &self.config
    }

    /// Register a filesystem driver (always succeeds)
    pub fn register(&self, driver: Arc<dyn FileSystemDriver>) -> VfsResult<()> {
        self.registry.register(driver)
    }

    /// Drivers cannot be unregistered; always fails
    pub fn unregister(&self, fs_type: FsType) -> VfsResult<()> {
        self.registry.unregister(fs_type)
    }

    /// Find the driver registered for `fs_type`
    pub fn find(&self, fs_type: FsType) -> VfsResult<Arc<dyn FileSystemDriver>> {
        self.registry.find(fs_type)
    }

    /// Mount a volume of `fs_type` from `device` at `mountpoint`
    #[instrument(level = "debug", skip(self))]
    pub fn mount(&self, device: Option<&str>, mountpoint: &str, fs_type: FsType) -> VfsResult<()> {
        self.mounts.mount(&self.registry, device, mountpoint, fs_type)
    }

    /// Unmount by exact mountpoint string
    #[instrument(level = "debug", skip(self))]
    pub fn unmount(&self, mountpoint: &str) -> VfsResult<()> {
        self.mounts.unmount(mountpoint)
    }

    /// Resolve a path to its owning mount
    pub fn resolve(&self, path: &str) -> VfsResult<Arc<MountEntry>> {
        self.mounts.resolve(path)
    }

    /// List all mounts in mount order
    pub fn mounts(&self) -> Vec<MountInfo> {
        self.mounts.mounts()
    }

    pub fn is_mounted(&self, mountpoint: &str) -> bool {
        self.mounts.is_mounted(mountpoint)
    }

    /// Resolve `path` and strip its mountpoint
    fn route<'p>(&self, path: &'p str) -> VfsResult<(Arc<MountEntry>, &'p str)> {
        let mount = self.mounts.resolve(path)?;
        let rel = mount.relative(path)?;
        Ok((mount, rel))
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Vfs {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            mounts: Arc::clone(&self.mounts),
            config: Arc::clone(&self.config),
        }
    }
}
