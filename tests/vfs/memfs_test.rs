/*!
 * MemFs Tests
 * The in-memory driver exercised through the VFS facade
 */

use pretty_assertions::assert_eq;
use std::sync::Arc;

use kernel_vfs::vfs::{FsType, MemFs, SeekOrigin, Vfs, MEMFS_CTL_SIZE, MEMFS_CTL_TRUNCATE};
use kernel_vfs::{OpenMode, VfsError};

const RAMFS: FsType = FsType::new(3);

fn ramdisk(capacity: Option<usize>) -> (Vfs, Arc<MemFs>) {
    let fs = Arc::new(match capacity {
        Some(max) => MemFs::with_capacity(RAMFS, max),
        None => MemFs::new(RAMFS),
    });
    let vfs = Vfs::new();
    vfs.register(fs.clone()).unwrap();
    vfs.mount(Some("ram0"), "/ram/", RAMFS).unwrap();
    (vfs, fs)
}

fn names(vfs: &Vfs, dir: &str) -> Vec<String> {
    vfs.list(dir)
        .unwrap()
        .iter()
        .map(|e| e.name().to_string())
        .collect()
}

#[test]
fn test_memfs_write_then_read() {
    let (vfs, fs) = ramdisk(None);

    let mut handle = vfs.open("/ram/hello", OpenMode::CREATE | OpenMode::read_write()).unwrap();
    assert_eq!(vfs.write(&mut handle, b"hello world").unwrap(), 11);
    assert_eq!(vfs.seek(&mut handle, 0, SeekOrigin::Begin).unwrap(), 0);

    let mut buf = [0u8; 5];
    assert_eq!(vfs.read(&mut handle, &mut buf).unwrap(), 5);
    assert_eq!(&buf, b"hello");
    assert_eq!(vfs.seek(&mut handle, 1, SeekOrigin::Current).unwrap(), 6);
    assert_eq!(vfs.read(&mut handle, &mut buf).unwrap(), 5);
    assert_eq!(&buf, b"world");
    vfs.close(handle).unwrap();

    assert_eq!(fs.used(), 11);
    assert_eq!(names(&vfs, "/ram/"), vec!["hello"]);
}

#[test]
fn test_memfs_append() {
    let (vfs, _fs) = ramdisk(None);

    let mut handle = vfs.open("/ram/log", OpenMode::CREATE | OpenMode::WRITE).unwrap();
    vfs.write(&mut handle, b"one\n").unwrap();
    vfs.close(handle).unwrap();

    let mut handle = vfs.open("/ram/log", OpenMode::append_only()).unwrap();
    vfs.write(&mut handle, b"two\n").unwrap();
    assert_eq!(vfs.seek(&mut handle, 0, SeekOrigin::Current).unwrap(), 8);
    vfs.close(handle).unwrap();

    let mut handle = vfs.open("/ram/log", OpenMode::read_only()).unwrap();
    let mut buf = vec![0u8; 16];
    let n = vfs.read(&mut handle, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"one\ntwo\n");
    vfs.close(handle).unwrap();
}

#[test]
fn test_memfs_directories() {
    let (vfs, _fs) = ramdisk(None);

    vfs.create("/ram/docs/", 0).unwrap();
    vfs.create("/ram/docs/b", 0).unwrap();
    vfs.create("/ram/docs/a", 0).unwrap();
    assert_eq!(names(&vfs, "/ram/docs/"), vec!["a", "b"]);

    assert!(matches!(
        vfs.open("/ram/docs", OpenMode::read_only()),
        Err(VfsError::IsADirectory(_))
    ));
    assert!(matches!(vfs.list("/ram/docs/a/"), Err(VfsError::NotADirectory(_))));
    assert!(matches!(vfs.create("/ram/nope/x", 0), Err(VfsError::NotFound(_))));
}

#[test]
fn test_memfs_rename_copy_delete() {
    let (vfs, fs) = ramdisk(None);

    let mut handle = vfs.open("/ram/a", OpenMode::CREATE | OpenMode::WRITE).unwrap();
    vfs.write(&mut handle, b"1234").unwrap();
    vfs.close(handle).unwrap();

    vfs.rename("/ram/a", "/ram/b").unwrap();
    vfs.copy("/ram/b", "/ram/c").unwrap();
    assert_eq!(names(&vfs, "/ram/"), vec!["b", "c"]);
    assert_eq!(fs.used(), 8);

    vfs.delete("/ram/b").unwrap();
    assert_eq!(names(&vfs, "/ram/"), vec!["c"]);
    assert_eq!(fs.used(), 4);
    assert!(matches!(vfs.delete("/ram/b"), Err(VfsError::NotFound(_))));
}

#[test]
fn test_memfs_capacity() {
    let (vfs, fs) = ramdisk(Some(8));

    let mut handle = vfs.open("/ram/big", OpenMode::CREATE | OpenMode::WRITE).unwrap();
    assert_eq!(vfs.write(&mut handle, b"12345678").unwrap(), 8);
    let err = vfs.write(&mut handle, b"9").unwrap_err();
    assert_eq!(err, VfsError::OutOfSpace);
    assert_eq!(err.errno(), -28);

    assert_eq!(vfs.control(&mut handle, MEMFS_CTL_TRUNCATE, 2).unwrap(), 2);
    assert_eq!(fs.used(), 2);
    assert_eq!(vfs.control(&mut handle, MEMFS_CTL_SIZE, 0).unwrap(), 2);
    assert!(matches!(vfs.control(&mut handle, 99, 0), Err(VfsError::InvalidArgument(_))));
    vfs.close(handle).unwrap();
}

#[test]
fn test_memfs_seek_before_start() {
    let (vfs, _fs) = ramdisk(None);

    let mut handle = vfs.open("/ram/f", OpenMode::CREATE | OpenMode::READ).unwrap();
    assert!(matches!(
        vfs.seek(&mut handle, -1, SeekOrigin::Begin),
        Err(VfsError::InvalidArgument(_))
    ));
    vfs.close(handle).unwrap();
}

#[test]
fn test_memfs_mount_accounting() {
    let (vfs, fs) = ramdisk(None);
    assert_eq!(fs.mount_count(), 1);

    vfs.mount(Some("ram1"), "/ram2/", RAMFS).unwrap();
    assert_eq!(fs.mount_count(), 2);

    vfs.unmount("/ram/").unwrap();
    vfs.unmount("/ram2/").unwrap();
    assert_eq!(fs.mount_count(), 0);
}

#[test]
fn test_memfs_rejects_unaddressable_sizes() {
    let (vfs, fs) = ramdisk(None);

    let mut handle = vfs.open("/ram/f", OpenMode::CREATE | OpenMode::WRITE).unwrap();
    assert_eq!(vfs.seek(&mut handle, i64::MAX, SeekOrigin::Begin).unwrap(), i64::MAX as u64);
    assert!(matches!(vfs.write(&mut handle, b"x"), Err(VfsError::InvalidArgument(_))));
    assert!(matches!(
        vfs.control(&mut handle, MEMFS_CTL_TRUNCATE, usize::MAX),
        Err(VfsError::InvalidArgument(_))
    ));
    assert_eq!(vfs.control(&mut handle, MEMFS_CTL_SIZE, 0).unwrap(), 0);
    assert_eq!(fs.used(), 0);
    vfs.close(handle).unwrap();
}

#[test]
fn test_memfs_far_write_respects_capacity() {
    let (vfs, fs) = ramdisk(Some(64));

    let mut handle = vfs.open("/ram/f", OpenMode::CREATE | OpenMode::WRITE).unwrap();
    vfs.seek(&mut handle, 1 << 40, SeekOrigin::Begin).unwrap();
    assert_eq!(vfs.write(&mut handle, b"x").unwrap_err(), VfsError::OutOfSpace);
    assert_eq!(fs.used(), 0);

    vfs.seek(&mut handle, 60, SeekOrigin::Begin).unwrap();
    assert_eq!(vfs.write(&mut handle, b"1234").unwrap(), 4);
    assert_eq!(fs.used(), 64);
    vfs.close(handle).unwrap();
}
