/*!
 * Kernel VFS - Smoke Entry Point
 *
 * Boots the VFS with in-memory device and disk drivers, mounts a disk
 * volume and walks a file through create, write, read and list.
 */

use miette::{IntoDiagnostic, Result};
use std::sync::Arc;
use tracing::info;

use kernel_vfs::{init_tracing, init_vfs, FsType, MemFs, OpenMode, SeekOrigin, VfsConfig};

const DEVICE_FS: FsType = FsType::new(1);
const DISK_FS: FsType = FsType::new(2);
const DISK_MOUNT: &str = "/mnt/";

fn main() -> Result<()> {
    init_tracing();

    info!("Kernel VFS starting...");
    let config = VfsConfig::from_env()?;

    let device_fs = Arc::new(MemFs::new(DEVICE_FS).with_name("devfs"));
    let disk_fs = Arc::new(MemFs::with_capacity(DISK_FS, 1 << 20).with_name("ramdisk"));
    let vfs = init_vfs(config, device_fs, disk_fs.clone())?;

    vfs.mount(Some("ram0"), DISK_MOUNT, DISK_FS)?;
    vfs.create("/mnt/docs/", 0)?;

    let mut handle = vfs.open("/mnt/docs/hello.txt", OpenMode::CREATE | OpenMode::WRITE)?;
    let written = vfs.write(&mut handle, b"hello from the vfs\n")?;
    vfs.close(handle)?;
    info!(written, "Wrote /mnt/docs/hello.txt");

    let mut handle = vfs.open("/mnt/docs/hello.txt", OpenMode::read_only())?;
    let size = vfs.seek(&mut handle, 0, SeekOrigin::End)?;
    vfs.seek(&mut handle, 0, SeekOrigin::Begin)?;
    let mut buf = vec![0u8; size as usize];
    let read = vfs.read(&mut handle, &mut buf)?;
    vfs.close(handle)?;
    info!(read, contents = %String::from_utf8_lossy(&buf[..read]).trim_end(), "Read back file");

    for entry in vfs.list("/mnt/docs/")? {
        info!(name = entry.name(), "Directory entry");
    }

    let table = serde_json::to_string_pretty(&vfs.mounts()).into_diagnostic()?;
    info!(mounts = %table, used = disk_fs.used(), "Mount table");

    vfs.unmount(DISK_MOUNT)?;
    info!(remaining = vfs.mounts().len(), "Kernel VFS smoke run complete");
    Ok(())
}
