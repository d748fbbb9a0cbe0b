/*!
 * Path Operations
 * Whole-path operations forwarded to a driver without a handle
 */

use std::sync::Arc;
use tracing::instrument;

use super::super::mount::MountEntry;
use super::super::types::*;
use super::Vfs;
use crate::core::limits::PATH_SEPARATOR;

impl Vfs {
    #[instrument(level = "debug", skip(self))]
    pub fn create(&self, path: &str, mode: u32) -> VfsResult<()> {
        let (mount, rel) = self.route(path)?;
        mount.driver().create(rel, mode)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, path: &str) -> VfsResult<()> {
        let (mount, rel) = self.route(path)?;
        mount.driver().delete(rel)
    }

    /// Rename within one mount; a destination on another mount is `CrossDevice`
    #[instrument(level = "debug", skip(self))]
    pub fn rename(&self, src: &str, dest: &str) -> VfsResult<()> {
        let (mount, src_rel) = self.route(src)?;
        let dest_rel = self.relative_on(&mount, dest)?;
        mount.driver().rename(src_rel, dest_rel)
    }

    /// Copy within one mount; a destination on another mount is `CrossDevice`
    #[instrument(level = "debug", skip(self))]
    pub fn copy(&self, src: &str, dest: &str) -> VfsResult<()> {
        let (mount, src_rel) = self.route(src)?;
        let dest_rel = self.relative_on(&mount, dest)?;
        mount.driver().copy(src_rel, dest_rel)
    }

    /// List a directory; `dir` must end with a separator
    ///
    /// Entries come back exactly as the driver produced them.
    #[instrument(level = "debug", skip(self))]
    pub fn list(&self, dir: &str) -> VfsResult<Vec<DirEntry>> {
        if !dir.ends_with(PATH_SEPARATOR) {
            return Err(VfsError::NotADirectory(dir.to_string()));
        }
        let (mount, rel) = self.route(dir)?;
        mount.driver().list(rel)
    }

    /// Strip `path` for `mount`, requiring that `path` resolves to the same mount
    fn relative_on<'p>(&self, mount: &Arc<MountEntry>, path: &'p str) -> VfsResult<&'p str> {
        let (other, rel) = self.route(path)?;
        if !Arc::ptr_eq(mount, &other) {
            return Err(VfsError::CrossDevice);
        }
        Ok(rel)
    }
}
