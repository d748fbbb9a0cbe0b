/*!
 * Kernel VFS Library
 * Mount-based virtual filesystem dispatch exposed as a library
 */

pub mod core;
pub mod monitoring;
pub mod vfs;

// Re-exports
pub use monitoring::init_tracing;
pub use vfs::{
    init_vfs, DirEntry, DriverRegistry, FileHandle, FileSystemDriver, FsType, MemFs, MountEntry,
    MountInfo, MountTable, OpenMode, Operation, ResolutionPolicy, SeekOrigin, Vfs, VfsConfig,
    VfsError, VfsResult,
};
