use std::path::{Component, Path, PathBuf};

use crate::errors::{Error, Result};

/// Joins `name` onto `dir` if it names an entry directly inside of it.
/// Absolute paths and names with more than one component are refused.
#[must_use]
pub fn file_in_dir(dir: &Path, name: &str) -> Option<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(dir.join(name)),
        _ => None,
    }
}

/// Files lying unpacked in the game directory. They take precedence over
/// the archive, which lets modified assets be dropped in without repacking.
#[derive(Debug, Clone)]
pub struct LooseFiles {
    root: PathBuf,
}

impl LooseFiles {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path of the named file, or `None` if the name would leave the
    /// game directory.
    #[must_use]
    pub fn path(&self, name: &str) -> Option<PathBuf> {
        file_in_dir(&self.root, name)
    }

    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_some_and(|path| path.is_file())
    }

    /// Reads the named file, or returns `None` if there is no such file.
    pub fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self
            .path(name)
            .ok_or_else(|| Error::InvalidArgument(format!("{name:?} is not a plain file name")))?;
        if !path.is_file() {
            return Ok(None);
        }
        log::debug!("Using loose file {}", path.display());
        std::fs::read(&path)
            .map(Some)
            .map_err(|err| Error::io(path, err))
    }
}
