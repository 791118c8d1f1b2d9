//! # Store
//!
//! Reading documents from disk and writing them back.
//!
//! Writes are atomic: the canonical bytes go to a hidden temp file next to the
//! target (`.{name}.{uuid}.tmp`), which is then renamed over it. If anything
//! fails the temp file is removed and the target keeps its old content. The
//! rewritten file keeps the mode of the one it replaces, and a symlinked path
//! is written through to its target.
//!
//! Tidy helpers compare canonical bytes against what is on disk, so
//! [`needs_tidy`] can answer "would this change?" without writing anything.

use crate::document::Document;
use crate::error::{MdError, Result};
use crate::ops::tidy::{tidy, Manifest};
use crate::registry::Registry;
use crate::schema::kinds::PACKAGE;
use crate::schema::KindSchema;
use crate::xml::decode::decode;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| MdError::parse(path, e))
}

/// Opens `path` as a document of `kind`. The root element must match.
pub fn open(path: &Path, kind: &'static KindSchema) -> Result<Document> {
    let root = decode(&read(path)?, path)?;
    if root.name != kind.name {
        return Err(MdError::parse(
            path,
            format!("expected {} document, found <{}>", kind.name, root.name),
        ));
    }
    tracing::debug!(path = %path.display(), kind = kind.name, "opened");
    Ok(Document::from_root(kind, root))
}

/// Opens `path` as whatever kind its root element names.
pub fn open_any(path: &Path, registry: &Registry) -> Result<Document> {
    let root = decode(&read(path)?, path)?;
    let kind = registry.by_root(&root.name)?;
    tracing::debug!(path = %path.display(), kind = kind.name, "opened");
    Ok(Document::from_root(kind, root))
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4()))
}

/// Writes the canonical encoding of `doc` to `path`.
pub fn write_to_file(doc: &Document, path: &Path) -> Result<()> {
    write_bytes(path, doc.encode().as_bytes())
}

/// The file a write to `path` lands in: a symlink is followed so the link
/// itself survives the rename.
fn write_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn write_bytes(path: &Path, content: &[u8]) -> Result<()> {
    let target = write_target(path);
    let tmp = temp_path(&target);
    // An existing file keeps its mode.
    let permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());
    let written = fs::write(&tmp, content)
        .and_then(|()| match permissions {
            Some(permissions) => fs::set_permissions(&tmp, permissions),
            None => Ok(()),
        })
        .and_then(|()| fs::rename(&tmp, &target));
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp);
        return Err(MdError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote");
    Ok(())
}

/// Reads a package manifest whose member order drives tidy.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let doc = open(path, &PACKAGE)?;
    Ok(Manifest::from_package(&doc))
}

/// Canonical bytes of `path` after tidying, along with the bytes on disk.
fn tidied(path: &Path, registry: &Registry, manifest: Option<&Manifest>) -> Result<(Vec<u8>, String)> {
    let original = read(path)?;
    let root = decode(&original, path)?;
    let kind = registry.by_root(&root.name)?;
    let mut doc = Document::from_root(kind, root);
    tidy(&mut doc, manifest)?;
    Ok((original, doc.encode()))
}

/// Tidies `path` in place. Returns whether the file changed; an unchanged file
/// is not rewritten.
pub fn tidy_file(path: &Path, registry: &Registry, manifest: Option<&Manifest>) -> Result<bool> {
    let (original, canonical) = tidied(path, registry, manifest)?;
    if original == canonical.as_bytes() {
        return Ok(false);
    }
    write_bytes(path, canonical.as_bytes())?;
    Ok(true)
}

/// Whether tidying `path` would change it. Never writes.
pub fn needs_tidy(path: &Path, registry: &Registry, manifest: Option<&Manifest>) -> Result<bool> {
    let (original, canonical) = tidied(path, registry, manifest)?;
    Ok(original != canonical.as_bytes())
}
