/*!
 * VFS Initialization
 * Boot-time registration and the baseline mount table
 */

use std::sync::Arc;
use tracing::info;

use super::config::VfsConfig;
use super::dispatch::Vfs;
use super::traits::FileSystemDriver;
use super::types::VfsResult;

/// Bring up the VFS
///
/// Registers the device-namespace driver and mounts it at the configured
/// device root, then registers the disk driver. Disk volumes are mounted
/// later by the caller once their devices are known.
pub fn init_vfs(
    config: VfsConfig,
    device_fs: Arc<dyn FileSystemDriver>,
    disk_fs: Arc<dyn FileSystemDriver>,
) -> VfsResult<Vfs> {
    config.validate()?;
    info!(
        resolution = ?config.resolution,
        device_root = %config.device_root,
        "Initializing VFS"
    );

    let vfs = Vfs::with_config(config);

    let device_type = device_fs.fs_type();
    vfs.register(device_fs)?;
    let device_root = vfs.config().device_root.clone();
    vfs.mount(None, &device_root, device_type)?;
    info!(mountpoint = %device_root, fs_type = %device_type, "Device namespace mounted");

    let disk_type = disk_fs.fs_type();
    vfs.register(disk_fs)?;
    info!(fs_type = %disk_type, "Disk driver ready");

    info!(mounts = vfs.mounts().len(), "VFS initialization complete");
    Ok(vfs)
}
