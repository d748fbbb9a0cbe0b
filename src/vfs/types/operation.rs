/*!
 * Driver Operations
 * Names for every entry of a driver's dispatch table
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the driver dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Open,
    Close,
    Read,
    Write,
    Seek,
    Control,
    Create,
    Delete,
    Rename,
    Copy,
    List,
    Mount,
    Unmount,
    /// Registry-level removal of a driver; never available
    Unregister,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Open => "open",
            Operation::Close => "close",
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Seek => "seek",
            Operation::Control => "control",
            Operation::Create => "create",
            Operation::Delete => "delete",
            Operation::Rename => "rename",
            Operation::Copy => "copy",
            Operation::List => "list",
            Operation::Mount => "mount",
            Operation::Unmount => "unmount",
            Operation::Unregister => "unregister",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
