/*!
 * Directory Operations Implementation
 * Path-based dispatch entries for namespace changes and listings
 */

use dashmap::mapref::entry::Entry;

use super::super::types::*;
use super::node::Node;
use super::MemFs;

impl MemFs {
    /// Insert a new node at `key` and link it into its parent
    fn insert_node(&self, key: &str, node: Node) -> VfsResult<()> {
        let (_, name) = Self::split(key);
        DirEntry::validate_name(name)?;
        self.ensure_parent(key)?;

        let size = node.size();
        self.check_and_reserve_space(size)?;

        // The entry guard locks a shard; drop it before touching the parent
        let inserted = match self.nodes.entry(key.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(node);
                true
            }
        };

        if !inserted {
            self.release_space(size);
            return Err(VfsError::AlreadyExists(Self::display(key)));
        }

        self.link_or_discard(key)
    }

    /// Link `key` into its parent, or drop the node if the parent is gone
    fn link_or_discard(&self, key: &str) -> VfsResult<()> {
        if let Err(e) = self.add_child(key) {
            if let Some((_, node)) = self.nodes.remove(key) {
                self.release_space(node.size());
            }
            return Err(e);
        }
        Ok(())
    }

    pub(super) fn create_impl(&self, path: &str) -> VfsResult<()> {
        let key = Self::key(path);
        if key.is_empty() {
            return Err(VfsError::AlreadyExists("/".into()));
        }

        let node = if path.ends_with('/') {
            Node::empty_dir()
        } else {
            Node::empty_file()
        };
        self.insert_node(&key, node)
    }

    pub(super) fn delete_impl(&self, path: &str) -> VfsResult<()> {
        let key = Self::key(path);
        if key.is_empty() {
            return Err(VfsError::InvalidArgument("cannot delete the root directory".into()));
        }

        let removed = self.nodes.remove_if(&key, |_, node| match node {
            Node::Directory { children } => children.is_empty(),
            Node::File { .. } => true,
        });

        match removed {
            Some((_, node)) => {
                self.release_space(node.size());
                self.remove_child(&key);
                Ok(())
            }
            None if self.nodes.contains_key(&key) => Err(VfsError::DriverFailure(format!(
                "directory not empty: {}",
                Self::display(&key)
            ))),
            None => Err(VfsError::NotFound(Self::display(&key))),
        }
    }

    pub(super) fn rename_impl(&self, src: &str, dest: &str) -> VfsResult<()> {
        let src_key = Self::key(src);
        let dest_key = Self::key(dest);
        if src_key == dest_key {
            return Ok(());
        }

        let data = self.file_data(&src_key)?;
        let size = data.len();
        self.insert_node(&dest_key, Node::File { data })?;

        // Space was charged twice while both nodes existed
        if let Some((_, node)) = self.nodes.remove(&src_key) {
            self.release_space(node.size());
            self.remove_child(&src_key);
        } else {
            self.release_space(size);
        }
        Ok(())
    }

    pub(super) fn copy_impl(&self, src: &str, dest: &str) -> VfsResult<()> {
        let data = self.file_data(&Self::key(src))?;
        self.insert_node(&Self::key(dest), Node::File { data })
    }

    pub(super) fn list_impl(&self, dir: &str) -> VfsResult<Vec<DirEntry>> {
        let key = Self::key(dir);

        let children = match self.nodes.get(&key).as_deref() {
            Some(Node::Directory { children }) => children.clone(),
            Some(Node::File { .. }) => return Err(VfsError::NotADirectory(Self::display(&key))),
            None => return Err(VfsError::NotFound(Self::display(&key))),
        };

        children.iter().map(DirEntry::new).collect()
    }

    /// Clone a regular file's contents
    fn file_data(&self, key: &str) -> VfsResult<Vec<u8>> {
        match self.nodes.get(key).as_deref() {
            Some(Node::File { data }) => Ok(data.clone()),
            Some(Node::Directory { .. }) => Err(VfsError::IsADirectory(Self::display(key))),
            None => Err(VfsError::NotFound(Self::display(key))),
        }
    }
}
