/*!
 * Mount Table
 * Manages mount entries and resolves paths to them
 */

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::config::{ResolutionPolicy, VfsConfig};
use super::registry::DriverRegistry;
use super::traits::FileSystemDriver;
use super::types::*;

/// A mountpoint and device bound to one driver
///
/// Owns copies of the strings it was mounted with. Handles keep their entry
/// alive, so an unmounted entry lives on until its last handle is closed.
pub struct MountEntry {
    mountpoint: String,
    device: Option<String>,
    driver: Arc<dyn FileSystemDriver>,
}

impl MountEntry {
    #[inline]
    pub fn mountpoint(&self) -> &str {
        &self.mountpoint
    }

    /// Device identifier; `None` for virtual devices
    #[inline]
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    #[inline]
    pub fn driver(&self) -> &Arc<dyn FileSystemDriver> {
        &self.driver
    }

    #[inline]
    pub fn fs_type(&self) -> FsType {
        self.driver.fs_type()
    }

    /// Textual prefix test over exactly the mountpoint's length
    #[inline]
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(self.mountpoint.as_str())
    }

    /// Strip the mountpoint from `path`, yielding the driver-relative remainder
    pub fn relative<'p>(&self, path: &'p str) -> VfsResult<&'p str> {
        path.strip_prefix(self.mountpoint.as_str())
            .ok_or_else(|| VfsError::MountNotFound(path.to_string()))
    }

    fn info(&self) -> MountInfo {
        MountInfo {
            mountpoint: self.mountpoint.clone(),
            device: self.device.clone(),
            fs_type: self.fs_type(),
            driver: self.driver.name().to_string(),
        }
    }
}

impl fmt::Debug for MountEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountEntry")
            .field("mountpoint", &self.mountpoint)
            .field("device", &self.device)
            .field("fs_type", &self.fs_type())
            .field("driver", &self.driver.name())
            .finish()
    }
}

/// Snapshot of one mount for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountInfo {
    pub mountpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    pub fs_type: FsType,
    pub driver: String,
}

/// Mount table in mount order (oldest first)
///
/// Mount and unmount are serialized by a lifecycle lock held across the
/// driver's mount or unmount callback, so those two callbacks must not call
/// back into mount or unmount. Resolution only takes the entry lock.
pub struct MountTable {
    entries: RwLock<Vec<Arc<MountEntry>>>,
    lifecycle: Mutex<()>,
    policy: ResolutionPolicy,
    reject_duplicates: bool,
}

impl MountTable {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            lifecycle: Mutex::new(()),
            policy,
            reject_duplicates: false,
        }
    }

    pub fn with_config(config: &VfsConfig) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            lifecycle: Mutex::new(()),
            policy: config.resolution,
            reject_duplicates: config.reject_duplicate_mounts,
        }
    }

    #[inline]
    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Mount a volume of `fs_type` at `mountpoint`
    ///
    /// The entry is linked before the driver's mount callback runs. If the
    /// driver has no mount callback or it fails, the entry is unlinked again
    /// and the driver's error is returned.
    pub fn mount(
        &self,
        registry: &DriverRegistry,
        device: Option<&str>,
        mountpoint: &str,
        fs_type: FsType,
    ) -> VfsResult<()> {
        let driver = registry.find(fs_type)?;
        let _lifecycle = self.lifecycle.lock();

        let entry = Arc::new(MountEntry {
            mountpoint: mountpoint.to_owned(),
            device: device.map(str::to_owned),
            driver: Arc::clone(&driver),
        });

        {
            let mut entries = self.entries.write();
            if entries.iter().any(|e| e.mountpoint == mountpoint) {
                if self.reject_duplicates {
                    return Err(VfsError::AlreadyExists(format!(
                        "mountpoint already mounted: {mountpoint}"
                    )));
                }
                warn!(mountpoint, "Mountpoint mounted twice, the earlier mount keeps priority");
            }
            entries.push(Arc::clone(&entry));
        }

        if let Err(e) = driver.mount(device, mountpoint, fs_type) {
            self.unlink(&entry);
            warn!(mountpoint, fs_type = %fs_type, error = %e, "Driver refused mount");
            return Err(e);
        }

        info!(
            mountpoint,
            device = device.unwrap_or("<none>"),
            fs_type = %fs_type,
            driver = driver.name(),
            "Mounted filesystem"
        );
        Ok(())
    }

    /// Unmount the entry whose mountpoint equals `mountpoint` exactly
    ///
    /// The driver's unmount callback runs before the entry is unlinked. Its
    /// result is logged and otherwise ignored. Concurrent unmounts of one
    /// mountpoint call the driver once; the losers get `MountNotFound`.
    pub fn unmount(&self, mountpoint: &str) -> VfsResult<()> {
        let _lifecycle = self.lifecycle.lock();
        let entry = self
            .entries
            .read()
            .iter()
            .find(|e| e.mountpoint == mountpoint)
            .cloned()
            .ok_or_else(|| VfsError::MountNotFound(mountpoint.to_string()))?;

        if let Err(e) = entry.driver.unmount(mountpoint) {
            debug!(mountpoint, error = %e, "Driver unmount reported failure, ignored");
        }

        if !self.unlink(&entry) {
            return Err(VfsError::MountNotFound(mountpoint.to_string()));
        }

        info!(mountpoint, fs_type = %entry.fs_type(), "Unmounted filesystem");
        Ok(())
    }

    fn unlink(&self, entry: &Arc<MountEntry>) -> bool {
        let mut entries = self.entries.write();
        match entries.iter().position(|e| Arc::ptr_eq(e, entry)) {
            Some(pos) => {
                entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Resolve `path` to its mount entry by mountpoint prefix
    ///
    /// Under [`ResolutionPolicy::FirstMatch`] the oldest matching mount wins,
    /// so `/dev` also captures `/device/x`; mountpoints should end with `/`.
    pub fn resolve(&self, path: &str) -> VfsResult<Arc<MountEntry>> {
        let entries = self.entries.read();
        let mut matching = entries.iter().filter(|e| e.matches(path));

        let found = match self.policy {
            ResolutionPolicy::FirstMatch => matching.next(),
            ResolutionPolicy::LongestPrefix => matching.fold(None, |best: Option<&Arc<MountEntry>>, e| {
                match best {
                    Some(b) if b.mountpoint.len() >= e.mountpoint.len() => Some(b),
                    _ => Some(e),
                }
            }),
        };

        found
            .cloned()
            .ok_or_else(|| VfsError::MountNotFound(path.to_string()))
    }

    /// List all mounts in mount order
    pub fn mounts(&self) -> Vec<MountInfo> {
        self.entries.read().iter().map(|e| e.info()).collect()
    }

    /// Check if `mountpoint` is mounted (exact match)
    pub fn is_mounted(&self, mountpoint: &str) -> bool {
        self.entries.read().iter().any(|e| e.mountpoint == mountpoint)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for MountTable {
    fn default() -> Self {
        Self::new(ResolutionPolicy::default())
    }
}
