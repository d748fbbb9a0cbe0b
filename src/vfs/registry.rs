/*!
 * Driver Registry
 * Ordered set of filesystem drivers keyed by filesystem type
 */

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

use super::traits::FileSystemDriver;
use super::types::*;

/// Registered filesystem drivers in registration order
pub struct DriverRegistry {
    drivers: RwLock<Vec<Arc<dyn FileSystemDriver>>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self {
            drivers: RwLock::new(Vec::new()),
        }
    }

    /// Register a driver; volumes of its type can be mounted afterwards
    ///
    /// Always succeeds. A driver whose type is already registered is kept
    /// but stays shadowed by the earlier one.
    pub fn register(&self, driver: Arc<dyn FileSystemDriver>) -> VfsResult<()> {
        let fs_type = driver.fs_type();
        let mut drivers = self.drivers.write();

        if drivers.iter().any(|d| d.fs_type() == fs_type) {
            warn!(
                fs_type = %fs_type,
                driver = driver.name(),
                "Filesystem type already registered, new driver is shadowed"
            );
        }

        info!(fs_type = %fs_type, driver = driver.name(), "Registered filesystem driver");
        drivers.push(driver);
        Ok(())
    }

    /// Drivers cannot be removed once registered
    pub fn unregister(&self, fs_type: FsType) -> VfsResult<()> {
        warn!(fs_type = %fs_type, "Driver unregistration is not supported");
        Err(VfsError::unsupported(Operation::Unregister))
    }

    /// Find the earliest registered driver of `fs_type`
    pub fn find(&self, fs_type: FsType) -> VfsResult<Arc<dyn FileSystemDriver>> {
        self.drivers
            .read()
            .iter()
            .find(|d| d.fs_type() == fs_type)
            .cloned()
            .ok_or(VfsError::DriverNotFound(fs_type))
    }

    pub fn len(&self) -> usize {
        self.drivers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.read().is_empty()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
