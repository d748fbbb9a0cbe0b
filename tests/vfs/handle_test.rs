/*!
 * Handle Tests
 * open/close/read/write/seek/control dispatch and open-mode enforcement
 */

use pretty_assertions::assert_eq;

use kernel_vfs::vfs::{Operation, SeekOrigin};
use kernel_vfs::{OpenMode, VfsError};

use crate::support::{mounted, Cursor, ScriptedDriver};

#[test]
fn test_open_strips_mountpoint() {
    let (vfs, driver) = mounted(ScriptedDriver::new(1).with_file("dir/f", b""), "/mnt/");

    let handle = vfs.open("/mnt/dir/f", OpenMode::read_only()).unwrap();
    assert_eq!(handle.mount().mountpoint(), "/mnt/");
    assert_eq!(handle.mode(), OpenMode::READ);
    assert_eq!(handle.private::<Cursor>().unwrap().path, "dir/f");
    assert_eq!(driver.calls(), vec!["mount hd0 /mnt/ fs#1", "open dir/f"]);
}

#[test]
fn test_open_unresolved_path() {
    let (vfs, driver) = mounted(ScriptedDriver::new(1), "/mnt/");
    assert!(matches!(
        vfs.open("/elsewhere/f", OpenMode::read_only()),
        Err(VfsError::MountNotFound(_))
    ));
    assert!(driver.calls_to(Operation::Open).is_empty());
}

#[test]
fn test_open_create_fallback_returns_usable_handle() {
    let (vfs, driver) = mounted(ScriptedDriver::new(1), "/mnt/");

    let mut handle = vfs.open("/mnt/missing", OpenMode::CREATE | OpenMode::WRITE).unwrap();
    assert_eq!(
        driver.calls(),
        vec!["mount hd0 /mnt/ fs#1", "open missing", "create missing 0", "open missing"]
    );

    assert_eq!(vfs.write(&mut handle, b"data").unwrap(), 4);
    vfs.close(handle).unwrap();
    assert_eq!(driver.file("missing").unwrap(), b"data");
}

#[test]
fn test_open_create_fallback_fails_when_reopen_fails() {
    let (vfs, driver) = mounted(ScriptedDriver::new(1).failing(&[Operation::Open]), "/mnt/");

    let err = vfs.open("/mnt/missing", OpenMode::CREATE | OpenMode::WRITE).unwrap_err();
    assert!(matches!(err, VfsError::DriverFailure(_)));
    assert_eq!(
        driver.calls(),
        vec!["mount hd0 /mnt/ fs#1", "open missing", "create missing 0", "open missing"]
    );

    // The file was created but no handle is left holding the mount
    assert!(driver.file("missing").is_some());
    let mount = vfs.resolve("/mnt/missing").unwrap();
    assert_eq!(std::sync::Arc::strong_count(&mount), 2);
}

#[test]
fn test_open_without_create_flag_fails() {
    let (vfs, driver) = mounted(ScriptedDriver::new(1), "/mnt/");

    assert!(matches!(
        vfs.open("/mnt/missing", OpenMode::read_write()),
        Err(VfsError::NotFound(_))
    ));
    assert!(driver.calls_to(Operation::Create).is_empty());
}

#[test]
fn test_open_create_fallback_without_create_callback() {
    let (vfs, _driver) = mounted(ScriptedDriver::new(1).without(&[Operation::Create]), "/mnt/");

    let err = vfs.open("/mnt/missing", OpenMode::CREATE | OpenMode::WRITE).unwrap_err();
    assert!(matches!(err, VfsError::NotFound(_)));
}

#[test]
fn test_open_without_open_callback() {
    let (vfs, driver) = mounted(ScriptedDriver::new(1).without(&[Operation::Open]), "/mnt/");

    let err = vfs.open("/mnt/f", OpenMode::CREATE | OpenMode::WRITE).unwrap_err();
    assert!(err.is_unsupported(Operation::Open));
    assert!(driver.calls_to(Operation::Create).is_empty());
}

#[test]
fn test_write_only_handle_cannot_read() {
    let (vfs, driver) = mounted(ScriptedDriver::new(1).with_file("f", b"abc"), "/mnt/");

    let mut handle = vfs.open("/mnt/f", OpenMode::write_only()).unwrap();
    let mut buf = [0u8; 8];
    assert!(matches!(vfs.read(&mut handle, &mut buf), Err(VfsError::PermissionDenied(_))));
    assert!(driver.calls_to(Operation::Read).is_empty());

    assert_eq!(vfs.write(&mut handle, b"xy").unwrap(), 2);
    assert_eq!(driver.calls_to(Operation::Write), vec!["write 2"]);
    vfs.close(handle).unwrap();
}

#[test]
fn test_read_only_handle_cannot_write() {
    let (vfs, driver) = mounted(ScriptedDriver::new(1).with_file("f", b"abc"), "/mnt/");

    let mut handle = vfs.open("/mnt/f", OpenMode::read_only()).unwrap();
    let err = vfs.write(&mut handle, b"xy").unwrap_err();
    assert!(matches!(err, VfsError::PermissionDenied(_)));
    assert_eq!(err.errno(), -9);
    assert!(driver.calls_to(Operation::Write).is_empty());
    vfs.close(handle).unwrap();
}

#[test]
fn test_append_positions_at_end_of_file() {
    let (vfs, driver) = mounted(ScriptedDriver::new(1).with_file("log", b"12345"), "/mnt/");

    let mut handle = vfs.open("/mnt/log", OpenMode::append_only()).unwrap();
    assert_eq!(handle.private::<Cursor>().unwrap().pos, 5);

    assert_eq!(vfs.write(&mut handle, b"678").unwrap(), 3);
    assert_eq!(vfs.seek(&mut handle, 0, SeekOrigin::Current).unwrap(), 8);
    assert_eq!(driver.file("log").unwrap(), b"12345678");
    assert_eq!(driver.calls_to(Operation::Seek).len(), 3);
    vfs.close(handle).unwrap();
}

#[test]
fn test_append_without_seek_callback_still_opens() {
    let (vfs, _driver) = mounted(
        ScriptedDriver::new(1).with_file("log", b"abc").without(&[Operation::Seek]),
        "/mnt/",
    );

    let mut handle = vfs.open("/mnt/log", OpenMode::append_only()).unwrap();
    assert_eq!(vfs.write(&mut handle, b"z").unwrap(), 1);
    assert!(vfs
        .seek(&mut handle, 0, SeekOrigin::End)
        .unwrap_err()
        .is_unsupported(Operation::Seek));
    vfs.close(handle).unwrap();
}

#[test]
fn test_partial_read_passes_through() {
    let (vfs, _driver) = mounted(ScriptedDriver::new(1).with_file("f", b"abc"), "/mnt/");

    let mut handle = vfs.open("/mnt/f", OpenMode::read_only()).unwrap();
    let mut buf = [0u8; 16];
    assert_eq!(vfs.read(&mut handle, &mut buf).unwrap(), 3);
    assert_eq!(&buf[..3], b"abc");
    assert_eq!(vfs.read(&mut handle, &mut buf).unwrap(), 0);
    vfs.close(handle).unwrap();
}

#[test]
fn test_control_is_forwarded() {
    let (vfs, driver) = mounted(ScriptedDriver::new(1).with_file("f", b""), "/mnt/");

    let mut handle = vfs.open("/mnt/f", OpenMode::read_only()).unwrap();
    assert_eq!(vfs.control(&mut handle, 0x10, 42).unwrap(), 42);
    assert_eq!(driver.calls_to(Operation::Control), vec!["control 16 42"]);
    vfs.close(handle).unwrap();
}

#[test]
fn test_missing_callbacks_are_unsupported() {
    let (vfs, _driver) = mounted(
        ScriptedDriver::new(1)
            .with_file("f", b"")
            .without(&[Operation::Read, Operation::Write, Operation::Seek, Operation::Control]),
        "/mnt/",
    );

    let mut handle = vfs.open("/mnt/f", OpenMode::read_write()).unwrap();
    let mut buf = [0u8; 4];
    assert!(vfs.read(&mut handle, &mut buf).unwrap_err().is_unsupported(Operation::Read));
    assert!(vfs.write(&mut handle, b"x").unwrap_err().is_unsupported(Operation::Write));
    assert!(vfs
        .seek(&mut handle, 0, SeekOrigin::Begin)
        .unwrap_err()
        .is_unsupported(Operation::Seek));
    assert!(vfs.control(&mut handle, 1, 0).unwrap_err().is_unsupported(Operation::Control));
    vfs.close(handle).unwrap();
}

#[test]
fn test_close_without_callback_reports_failure() {
    let (vfs, driver) = mounted(
        ScriptedDriver::new(1).with_file("f", b"").without(&[Operation::Close]),
        "/mnt/",
    );

    let handle = vfs.open("/mnt/f", OpenMode::read_only()).unwrap();
    let mount = std::sync::Arc::clone(handle.mount());
    assert_eq!(std::sync::Arc::strong_count(&mount), 3);

    assert!(vfs.close(handle).unwrap_err().is_unsupported(Operation::Close));
    // Handle was released regardless of the outcome
    assert_eq!(std::sync::Arc::strong_count(&mount), 2);
    assert_eq!(driver.calls_to(Operation::Close), vec!["close"]);
}
