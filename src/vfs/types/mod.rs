/*!
 * VFS Types
 * Shared types for dispatch operations
 */

mod entry;
mod errors;
mod fs_type;
mod open_mode;
mod operation;

pub use entry::DirEntry;
pub use errors::{VfsError, VfsResult};
pub use fs_type::FsType;
pub use open_mode::{OpenMode, SeekOrigin};
pub use operation::Operation;
