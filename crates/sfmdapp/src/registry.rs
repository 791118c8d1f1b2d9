//! # Kind Registry
//!
//! An explicit table of the document kinds the tool understands. It is built
//! once by the caller (normally `main`) and passed by reference to whatever
//! needs to resolve a kind: by its name, by the root element of a file, or by
//! the file's suffix.

use crate::error::{MdError, Result};
use crate::schema::kinds;
use crate::schema::KindSchema;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Registry {
    kinds: Vec<&'static KindSchema>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(kinds::ALL.to_vec())
    }
}

impl Registry {
    pub fn new(kinds: Vec<&'static KindSchema>) -> Self {
        Self { kinds }
    }

    pub fn kinds(&self) -> &[&'static KindSchema] {
        &self.kinds
    }

    /// Kind whose name matches `name`, ignoring case (`profile`, `Profile`).
    pub fn by_name(&self, name: &str) -> Result<&'static KindSchema> {
        self.kinds
            .iter()
            .copied()
            .find(|k| k.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| MdError::UnknownKind(name.to_string()))
    }

    /// Kind whose document root is `root`. Root names are exact.
    pub fn by_root(&self, root: &str) -> Result<&'static KindSchema> {
        self.kinds
            .iter()
            .copied()
            .find(|k| k.name == root)
            .ok_or_else(|| MdError::UnknownKind(root.to_string()))
    }

    /// Kind whose file suffix matches `path`, if any.
    pub fn by_path(&self, path: &Path) -> Option<&'static KindSchema> {
        let file_name = path.file_name()?.to_str()?;
        self.kinds.iter().copied().find(|k| k.matches_path(file_name))
    }
}
