//! # API Facade
//!
//! The API layer is a **thin facade** over the per-kind operations. It is the
//! entry point for every batch operation, whatever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Iterates** over the files of a batch, one at a time
//! - **Opens, mutates and writes** each document through [`crate::store`]
//! - **Isolates failures**: a file that fails to parse, match or write becomes a
//!   warning message and the batch moves on
//! - **Returns structured types** (`CmdResult`): tables, rendered records,
//!   changed files and messages
//!
//! ## What the API Does NOT Do
//!
//! - **Kind logic**: that belongs in `kinds/*.rs` and is passed in as a closure
//! - **Terminal output**: no stdout, stderr or colors
//! - **Exit codes**: the caller decides what a non-empty `changed_files` means

use crate::config::SfmdConfig;
use crate::document::Document;
use crate::error::{MdError, Result};
use crate::ops::tidy::{tidy, Manifest};
use crate::registry::Registry;
use crate::schema::KindSchema;
use crate::store;
use crate::xml::element::Element;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Rows for listing commands. Every row has one cell per header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// One record rendered as canonical XML, for `show` commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShownRecord {
    pub file: PathBuf,
    pub xml: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Files written successfully.
    pub affected_files: Vec<PathBuf>,
    /// Files tidy changed, or in check mode would change.
    pub changed_files: Vec<PathBuf>,
    pub table: Option<Table>,
    pub shown: Vec<ShownRecord>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    /// Number of files that ended in a warning.
    pub fn failures(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.level == MessageLevel::Warning)
            .count()
    }

    fn file_failed(&mut self, path: &Path, err: &MdError) {
        tracing::warn!(path = %path.display(), error = %err, "skipping file");
        self.add_message(CmdMessage::warning(format!("{}: {}", path.display(), err)));
    }
}

/// Batch operations over metadata files.
pub struct MetadataApi {
    registry: Registry,
    config: SfmdConfig,
}

impl MetadataApi {
    pub fn new(registry: Registry, config: SfmdConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &SfmdConfig {
        &self.config
    }

    /// Opens each file as `kind`, applies `op` and writes the result back.
    /// With `tidy_after_edit` configured the document is tidied first.
    pub fn edit<F>(&self, files: &[PathBuf], kind: &'static KindSchema, mut op: F) -> CmdResult
    where
        F: FnMut(&mut Document) -> Result<()>,
    {
        let mut result = CmdResult::default();
        for path in files {
            let outcome = store::open(path, kind).and_then(|mut doc| {
                op(&mut doc)?;
                if self.config.tidy_after_edit {
                    tidy(&mut doc, None)?;
                }
                store::write_to_file(&doc, path)
            });
            match outcome {
                Ok(()) => result.affected_files.push(path.clone()),
                Err(err) => result.file_failed(path, &err),
            }
        }
        result
    }

    /// Writes a freshly built document to each file.
    pub fn create<F>(&self, files: &[PathBuf], build: F) -> CmdResult
    where
        F: Fn() -> Document,
    {
        let mut result = CmdResult::default();
        for path in files {
            match store::write_to_file(&build(), path) {
                Ok(()) => result.affected_files.push(path.clone()),
                Err(err) => result.file_failed(path, &err),
            }
        }
        result
    }

    /// Builds one table across all files. `rows` gets the document name
    /// (the file name without its kind suffix) and the document.
    pub fn table<F>(&self, files: &[PathBuf], kind: &'static KindSchema, headers: &[&str], mut rows: F) -> CmdResult
    where
        F: FnMut(&str, &Document) -> Vec<Vec<String>>,
    {
        let mut result = CmdResult::default();
        let mut table = Table::new(headers);
        for path in files {
            match store::open(path, kind) {
                Ok(doc) => table.rows.extend(rows(document_name(path, kind), &doc)),
                Err(err) => result.file_failed(path, &err),
            }
        }
        result.table = Some(table);
        result
    }

    /// Renders the record `find` selects in each file.
    pub fn show<F>(&self, files: &[PathBuf], kind: &'static KindSchema, collection: &str, find: F) -> CmdResult
    where
        F: Fn(&Document) -> Result<&Element>,
    {
        let mut result = CmdResult::default();
        for path in files {
            let rendered = store::open(path, kind)
                .and_then(|doc| find(&doc).map(|record| doc.render_record(collection, record)));
            match rendered {
                Ok(xml) => result.shown.push(ShownRecord {
                    file: path.clone(),
                    xml,
                }),
                Err(err) => result.file_failed(path, &err),
            }
        }
        result
    }

    /// Tidies each file, whatever its kind. In `check` mode nothing is written
    /// and `changed_files` lists the files that would change.
    pub fn tidy(&self, files: &[PathBuf], reference: Option<&Path>, check: bool) -> Result<CmdResult> {
        let manifest: Option<Manifest> = reference.map(store::load_manifest).transpose()?;
        let mut result = CmdResult::default();
        for path in files {
            let outcome = if check {
                store::needs_tidy(path, &self.registry, manifest.as_ref())
            } else {
                store::tidy_file(path, &self.registry, manifest.as_ref())
            };
            match outcome {
                Ok(true) => result.changed_files.push(path.clone()),
                Ok(false) => {}
                Err(err) => result.file_failed(path, &err),
            }
        }
        Ok(result)
    }
}

fn document_name<'a>(path: &'a Path, kind: &KindSchema) -> &'a str {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    kind.document_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{application, permissions};
    use crate::schema::kinds::{CUSTOM_APPLICATION, PROFILE};
    use crate::test_utils::{application_with_overrides, profile_with_account, PROFILE_XML};
    use std::fs;
    use tempfile::TempDir;

    fn api() -> MetadataApi {
        MetadataApi::new(Registry::default(), SfmdConfig::default())
    }

    fn write_profile(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(format!("{name}.profile"));
        store::write_to_file(&profile_with_account(), &path).unwrap();
        path
    }

    #[test]
    fn edit_continues_past_failing_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_profile(&dir, "Admin");
        let missing = dir.path().join("Ghost.profile");
        let files = vec![missing.clone(), good.clone()];

        let flags = permissions::ObjectPermissionFlags {
            edit: Some(true),
            ..Default::default()
        };
        let result = api().edit(&files, &PROFILE, |doc| {
            permissions::update_object_permissions(doc, "Account", &flags)
        });

        assert_eq!(result.affected_files, vec![good.clone()]);
        assert_eq!(result.failures(), 1);
        assert!(result.messages[0].content.contains("Ghost.profile"));
        let doc = store::open(&good, &PROFILE).unwrap();
        let rec = permissions::show_object_permissions(&doc, "Account").unwrap();
        assert_eq!(rec.leaf("allowEdit").as_str(), Some("true"));
    }

    #[test]
    fn failed_operation_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_profile(&dir, "Admin");
        let before = fs::read(&path).unwrap();

        let result = api().edit(&[path.clone()], &PROFILE, |doc| {
            permissions::delete_object_permissions(doc, "Contact").map(|_| ())
        });
        assert!(result.affected_files.is_empty());
        assert_eq!(result.failures(), 1);
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn table_names_rows_by_document() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![write_profile(&dir, "Admin"), write_profile(&dir, "Standard")];
        let result = api().table(&files, &PROFILE, &["Profile", "Object"], |name, doc| {
            permissions::list_object_permissions(doc, &Default::default())
                .map(|r| vec![name.to_string(), permissions::record_name(r, "object").to_string()])
                .collect()
        });
        let table = result.table.unwrap();
        assert_eq!(table.headers, vec!["Profile", "Object"]);
        assert_eq!(
            table.rows,
            vec![vec!["Admin", "Account"], vec!["Standard", "Account"]]
        );
    }

    #[test]
    fn show_renders_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_profile(&dir, "Admin");
        let result = api().show(&[path], &PROFILE, permissions::OBJECT_PERMISSIONS, |doc| {
            permissions::show_object_permissions(doc, "account")
        });
        assert_eq!(result.shown.len(), 1);
        assert!(result.shown[0].xml.starts_with("<objectPermissions>\n    <allowCreate>"));
    }

    #[test]
    fn tidy_check_reports_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let clean = dir.path().join("Clean.profile");
        fs::write(&clean, PROFILE_XML).unwrap();
        let messy = dir.path().join("Messy.profile");
        let messy_text = PROFILE_XML.replace("    ", "\t");
        fs::write(&messy, &messy_text).unwrap();
        let files = vec![clean, messy.clone()];

        let result = api().tidy(&files, None, true).unwrap();
        assert_eq!(result.changed_files, vec![messy.clone()]);
        assert_eq!(fs::read_to_string(&messy).unwrap(), messy_text);

        let result = api().tidy(&files, None, false).unwrap();
        assert_eq!(result.changed_files, vec![messy.clone()]);
        assert_eq!(fs::read_to_string(&messy).unwrap(), PROFILE_XML);
    }

    #[test]
    fn tidy_after_edit_is_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Sales.app");
        let mut doc = application_with_overrides();
        doc.root_mut().push(Element::text_leaf("tabs", "b"));
        doc.root_mut().push(Element::text_leaf("tabs", "b"));
        store::write_to_file(&doc, &path).unwrap();

        let config = SfmdConfig {
            tidy_after_edit: true,
            ..Default::default()
        };
        let api = MetadataApi::new(Registry::default(), config);
        let query = application::ActionOverrideQuery {
            form_factor: Some(application::FormFactor::Small),
            ..Default::default()
        };
        let result = api.edit(&[path.clone()], &CUSTOM_APPLICATION, |doc| {
            application::delete_action_overrides(doc, &query).map(|_| ())
        });
        assert_eq!(result.affected_files.len(), 1);
        let doc = store::open(&path, &CUSTOM_APPLICATION).unwrap();
        assert_eq!(doc.records("tabs").count(), 1);
        assert_eq!(doc.records(application::PROFILE_ACTION_OVERRIDES).count(), 1);
    }

    #[test]
    fn create_writes_each_file() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![dir.path().join("a.xml"), dir.path().join("b.xml")];
        let result = api().create(&files, || crate::kinds::package::new("51.0"));
        assert_eq!(result.affected_files.len(), 2);
        assert!(fs::read_to_string(&files[1]).unwrap().contains("<version>51.0</version>"));
    }
}
