/*!
 * In-Memory Filesystem Driver
 * Volatile reference driver for tests, benches and bring-up
 */

mod dir_ops;
mod file_handle;
mod file_ops;
mod node;

use ahash::RandomState;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

use super::handle::FileHandle;
use super::traits::FileSystemDriver;
use super::types::*;
use node::Node;

/// Control request: return the open file's size
pub const MEMFS_CTL_SIZE: u32 = 1;

/// Control request: truncate or extend the open file to `arg` bytes
pub const MEMFS_CTL_TRUNCATE: u32 = 2;

/// In-memory filesystem driver
///
/// Nodes are keyed by their mount-relative path without leading or trailing
/// separators; the root directory is the empty key. Creating a path that
/// ends with `/` makes a directory. All mounts of one `MemFs` share its
/// nodes.
///
/// # Performance
/// - Cache-line aligned to prevent false sharing of the atomic size counter
#[repr(C, align(64))]
#[derive(Debug, Clone)]
pub struct MemFs {
    fs_type: FsType,
    name: String,
    nodes: Arc<DashMap<String, Node, RandomState>>,
    max_size: Option<usize>,
    current_size: Arc<AtomicUsize>,
    mounted: Arc<AtomicUsize>,
}

impl MemFs {
    /// Create new in-memory filesystem registered under `fs_type`
    pub fn new(fs_type: FsType) -> Self {
        let nodes = DashMap::with_hasher(RandomState::new());
        nodes.insert(String::new(), Node::empty_dir());

        Self {
            fs_type,
            name: "memfs".to_string(),
            nodes: Arc::new(nodes),
            max_size: None,
            current_size: Arc::new(AtomicUsize::new(0)),
            mounted: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create with size limit
    pub fn with_capacity(fs_type: FsType, max_size: usize) -> Self {
        let mut fs = Self::new(fs_type);
        fs.max_size = Some(max_size);
        fs
    }

    /// Override the name reported in logs and mount listings
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Number of live mounts of this driver
    pub fn mount_count(&self) -> usize {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Bytes currently stored
    pub fn used(&self) -> usize {
        self.current_size.load(Ordering::SeqCst)
    }

    /// Node key for a mount-relative path
    pub(super) fn key(path: &str) -> String {
        path.trim_matches('/').to_string()
    }

    /// Split a key into (parent key, name)
    pub(super) fn split(key: &str) -> (&str, &str) {
        key.rsplit_once('/').unwrap_or(("", key))
    }

    /// Render a key for error messages
    pub(super) fn display(key: &str) -> String {
        format!("/{key}")
    }

    /// Check if space is available and reserve it atomically
    pub(super) fn check_and_reserve_space(&self, additional: usize) -> VfsResult<()> {
        if let Some(max) = self.max_size {
            loop {
                let current = self.current_size.load(Ordering::SeqCst);
                if current + additional > max {
                    return Err(VfsError::OutOfSpace);
                }
                if self
                    .current_size
                    .compare_exchange(
                        current,
                        current + additional,
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    )
                    .is_ok()
                {
                    break;
                }
            }
        } else {
            self.current_size.fetch_add(additional, Ordering::SeqCst);
        }
        Ok(())
    }

    /// Release space held by removed or shrunk data
    pub(super) fn release_space(&self, amount: usize) {
        self.current_size.fetch_sub(amount, Ordering::SeqCst);
    }

    /// Ensure the parent of `key` is an existing directory
    pub(super) fn ensure_parent(&self, key: &str) -> VfsResult<()> {
        let (parent, _) = Self::split(key);
        match self.nodes.get(parent) {
            Some(node) if node.is_dir() => Ok(()),
            Some(_) => Err(VfsError::NotADirectory(Self::display(parent))),
            None => Err(VfsError::NotFound(format!(
                "parent directory not found: {}",
                Self::display(parent)
            ))),
        }
    }

    /// Add child to parent directory
    pub(super) fn add_child(&self, key: &str) -> VfsResult<()> {
        let (parent, name) = Self::split(key);
        match self.nodes.get_mut(parent).as_deref_mut() {
            Some(Node::Directory { children }) => {
                children.insert(name.to_string());
                Ok(())
            }
            _ => Err(VfsError::NotADirectory(Self::display(parent))),
        }
    }

    /// Remove child from parent directory
    pub(super) fn remove_child(&self, key: &str) {
        let (parent, name) = Self::split(key);
        if let Some(Node::Directory { children }) = self.nodes.get_mut(parent).as_deref_mut() {
            children.remove(name);
        }
    }
}

impl FileSystemDriver for MemFs {
    fn fs_type(&self) -> FsType {
        self.fs_type
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self, handle: &mut FileHandle, path: &str) -> VfsResult<()> {
        self.open_impl(handle, path)
    }

    fn close(&self, handle: &mut FileHandle) -> VfsResult<()> {
        self.close_impl(handle)
    }

    fn read(&self, handle: &mut FileHandle, buf: &mut [u8]) -> VfsResult<usize> {
        self.read_impl(handle, buf)
    }

    fn write(&self, handle: &mut FileHandle, buf: &[u8]) -> VfsResult<usize> {
        self.write_impl(handle, buf)
    }

    fn seek(&self, handle: &mut FileHandle, offset: i64, origin: SeekOrigin) -> VfsResult<u64> {
        self.seek_impl(handle, offset, origin)
    }

    fn control(&self, handle: &mut FileHandle, request: u32, arg: usize) -> VfsResult<usize> {
        self.control_impl(handle, request, arg)
    }

    fn create(&self, path: &str, _mode: u32) -> VfsResult<()> {
        self.create_impl(path)
    }

    fn delete(&self, path: &str) -> VfsResult<()> {
        self.delete_impl(path)
    }

    fn rename(&self, src: &str, dest: &str) -> VfsResult<()> {
        self.rename_impl(src, dest)
    }

    fn copy(&self, src: &str, dest: &str) -> VfsResult<()> {
        self.copy_impl(src, dest)
    }

    fn list(&self, dir: &str) -> VfsResult<Vec<DirEntry>> {
        self.list_impl(dir)
    }

    fn mount(&self, device: Option<&str>, mountpoint: &str, _fs_type: FsType) -> VfsResult<()> {
        let count = self.mounted.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(driver = %self.name, device, mountpoint, mounts = count, "memfs mounted");
        Ok(())
    }

    fn unmount(&self, mountpoint: &str) -> VfsResult<()> {
        let _ = self
            .mounted
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        debug!(driver = %self.name, mountpoint, "memfs unmounted");
        Ok(())
    }
}
