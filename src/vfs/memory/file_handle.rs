/*!
 * File Handle State
 * Per-handle cursor stored in the VFS handle's private slot
 */

/// Position of one open MemFs file
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MemCursor {
    /// Node key of the open file
    pub key: String,
    pub pos: u64,
}

impl MemCursor {
    pub fn new(key: String) -> Self {
        Self { key, pos: 0 }
    }
}
