/*!
 * Virtual File System Module
 * Mount-based dispatch over pluggable filesystem drivers
 */

pub mod config;
pub mod dispatch;
pub mod handle;
pub mod init;
pub mod memory;
pub mod mount;
pub mod registry;
pub mod traits;
pub mod types;

// Re-exports
pub use config::{ResolutionPolicy, VfsConfig, CONFIG_ENV};
pub use dispatch::Vfs;
pub use handle::FileHandle;
pub use init::init_vfs;
pub use memory::{MemFs, MEMFS_CTL_SIZE, MEMFS_CTL_TRUNCATE};
pub use mount::{MountEntry, MountInfo, MountTable};
pub use registry::DriverRegistry;
pub use traits::FileSystemDriver;
pub use types::{DirEntry, FsType, OpenMode, Operation, SeekOrigin, VfsError, VfsResult};
