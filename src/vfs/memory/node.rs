/*!
 * Filesystem Node Types
 * Internal representation of files and directories
 */

use std::collections::BTreeSet;

/// In-memory filesystem node
#[derive(Debug, Clone)]
pub(super) enum Node {
    File { data: Vec<u8> },
    /// Child names kept sorted so listings are stable
    Directory { children: BTreeSet<String> },
}

impl Node {
    pub fn empty_file() -> Self {
        Node::File { data: Vec::new() }
    }

    pub fn empty_dir() -> Self {
        Node::Directory {
            children: BTreeSet::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    /// Bytes charged against the filesystem capacity
    pub fn size(&self) -> usize {
        match self {
            Node::File { data } => data.len(),
            Node::Directory { .. } => 0,
        }
    }
}
