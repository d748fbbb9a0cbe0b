/*!
 * File Operations Implementation
 * Handle-based dispatch entries for file I/O
 */

use super::super::handle::FileHandle;
use super::super::types::*;
use super::file_handle::MemCursor;
use super::node::Node;
use super::{MemFs, MEMFS_CTL_SIZE, MEMFS_CTL_TRUNCATE};

impl MemFs {
    fn cursor(handle: &mut FileHandle) -> VfsResult<&mut MemCursor> {
        handle
            .private_mut::<MemCursor>()
            .ok_or_else(|| VfsError::InvalidArgument("handle has no memfs cursor".into()))
    }

    fn file_len(&self, key: &str) -> VfsResult<usize> {
        match self.nodes.get(key).as_deref() {
            Some(Node::File { data }) => Ok(data.len()),
            Some(Node::Directory { .. }) => Err(VfsError::IsADirectory(Self::display(key))),
            None => Err(VfsError::NotFound(Self::display(key))),
        }
    }

    pub(super) fn open_impl(&self, handle: &mut FileHandle, path: &str) -> VfsResult<()> {
        let key = Self::key(path);
        self.file_len(&key)?;
        handle.set_private(MemCursor::new(key));
        Ok(())
    }

    pub(super) fn close_impl(&self, handle: &mut FileHandle) -> VfsResult<()> {
        handle
            .take_private::<MemCursor>()
            .map(|_| ())
            .ok_or_else(|| VfsError::InvalidArgument("handle has no memfs cursor".into()))
    }

    pub(super) fn read_impl(&self, handle: &mut FileHandle, buf: &mut [u8]) -> VfsResult<usize> {
        let cursor = Self::cursor(handle)?;

        let read = match self.nodes.get(&cursor.key).as_deref() {
            Some(Node::File { data }) => {
                let start = (cursor.pos as usize).min(data.len());
                let count = buf.len().min(data.len() - start);
                buf[..count].copy_from_slice(&data[start..start + count]);
                count
            }
            Some(Node::Directory { .. }) => {
                return Err(VfsError::IsADirectory(Self::display(&cursor.key)))
            }
            None => return Err(VfsError::NotFound(Self::display(&cursor.key))),
        };

        cursor.pos += read as u64;
        Ok(read)
    }

    /// Zero-extend `data` to `new_len`, charging the growth against capacity
    fn grow(&self, data: &mut Vec<u8>, new_len: usize) -> VfsResult<()> {
        if new_len > isize::MAX as usize {
            return Err(VfsError::InvalidArgument(format!(
                "file size {new_len} exceeds the addressable maximum"
            )));
        }
        let additional = new_len - data.len();
        self.check_and_reserve_space(additional)?;
        if data.try_reserve(additional).is_err() {
            self.release_space(additional);
            return Err(VfsError::OutOfSpace);
        }
        data.resize(new_len, 0);
        Ok(())
    }

    pub(super) fn write_impl(&self, handle: &mut FileHandle, buf: &[u8]) -> VfsResult<usize> {
        let cursor = Self::cursor(handle)?;
        if buf.is_empty() {
            return Ok(0);
        }
        let start = usize::try_from(cursor.pos)
            .map_err(|_| VfsError::InvalidArgument(format!("position {} out of range", cursor.pos)))?;
        let end = start.checked_add(buf.len()).ok_or_else(|| {
            VfsError::InvalidArgument(format!("write of {} bytes at {start} overflows", buf.len()))
        })?;

        match self.nodes.get_mut(&cursor.key).as_deref_mut() {
            Some(Node::File { data }) => {
                if end > data.len() {
                    // Gap between old end and the cursor is zero-filled
                    self.grow(data, end)?;
                }
                data[start..end].copy_from_slice(buf);
            }
            Some(Node::Directory { .. }) => {
                return Err(VfsError::IsADirectory(Self::display(&cursor.key)))
            }
            None => return Err(VfsError::NotFound(Self::display(&cursor.key))),
        }

        cursor.pos = end as u64;
        Ok(buf.len())
    }

    pub(super) fn seek_impl(
        &self,
        handle: &mut FileHandle,
        offset: i64,
        origin: SeekOrigin,
    ) -> VfsResult<u64> {
        let cursor = Self::cursor(handle)?;
        let base = match origin {
            SeekOrigin::Begin => 0,
            SeekOrigin::Current => cursor.pos as i64,
            SeekOrigin::End => self.file_len(&cursor.key)? as i64,
        };

        let pos = base
            .checked_add(offset)
            .filter(|pos| *pos >= 0)
            .ok_or_else(|| {
                VfsError::InvalidArgument(format!("seek before start of file: {offset} from {origin:?}"))
            })?;

        cursor.pos = pos as u64;
        Ok(cursor.pos)
    }

    pub(super) fn control_impl(
        &self,
        handle: &mut FileHandle,
        request: u32,
        arg: usize,
    ) -> VfsResult<usize> {
        let cursor = Self::cursor(handle)?;
        match request {
            MEMFS_CTL_SIZE => self.file_len(&cursor.key),
            MEMFS_CTL_TRUNCATE => {
                match self.nodes.get_mut(&cursor.key).as_deref_mut() {
                    Some(Node::File { data }) => {
                        if arg > data.len() {
                            self.grow(data, arg)?;
                        } else {
                            self.release_space(data.len() - arg);
                            data.truncate(arg);
                        }
                        Ok(arg)
                    }
                    Some(Node::Directory { .. }) => {
                        Err(VfsError::IsADirectory(Self::display(&cursor.key)))
                    }
                    None => Err(VfsError::NotFound(Self::display(&cursor.key))),
                }
            }
            other => Err(VfsError::InvalidArgument(format!(
                "unknown memfs control request: {other}"
            ))),
        }
    }
}
