//! # CLI Dispatch
//!
//! Turns a parsed [`Cli`] into calls on [`MetadataApi`] and prints what comes
//! back. Kind logic stays in `sfmdapp::kinds`; each handler only builds the
//! option structs the kind functions take and picks the table columns.
//!
//! ## Structure
//!
//! - `run()`: loads configuration, installs logging, dispatches
//! - `handle_*()`: one per top-level command group
//! - `AppContext`: expands directories and reports results

use super::render::{print_messages, print_shown, print_table};
use super::setup::*;
use anyhow::{bail, Context, Result};
use clap::Parser;
use sfmdapp::api::{CmdMessage, CmdResult, MetadataApi};
use sfmdapp::config::SfmdConfig;
use sfmdapp::document::Document;
use sfmdapp::error::Result as MdResult;
use sfmdapp::kinds::application::{self, ActionOverrideQuery};
use sfmdapp::kinds::custom_object::{self, FieldEdit};
use sfmdapp::kinds::permission_set::{self, PermissionSetEdit};
use sfmdapp::kinds::permissions::{
    self, ApplicationVisibilityFlags, FieldPermissionFlags, ObjectPermissionFlags,
};
use sfmdapp::kinds::{custom_permission, package, profile};
use sfmdapp::ops::collection::Filtered;
use sfmdapp::ops::filter::Condition;
use sfmdapp::registry::Registry;
use sfmdapp::schema::kinds::{CUSTOM_APPLICATION, CUSTOM_OBJECT, CUSTOM_PERMISSION, PACKAGE, PERMISSION_SET, PROFILE};
use sfmdapp::schema::KindSchema;
use sfmdapp::xml::element::Element;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: MetadataApi,
    json: bool,
}

/// Parses arguments and runs the command. Returns the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    let config = SfmdConfig::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, &config.log_level);
    tracing::debug!(?config, "configuration loaded");

    let ctx = AppContext {
        api: MetadataApi::new(Registry::default(), config),
        json: cli.json,
    };

    match cli.command {
        Commands::Profile { command } => handle_profile(&ctx, command),
        Commands::PermissionSet { command } => handle_permission_set(&ctx, command),
        Commands::Package { command } => handle_package(&ctx, command),
        Commands::Application { command } => handle_application(&ctx, command),
        Commands::Objects { command } => handle_objects(&ctx, command),
        Commands::CustomPermission { command } => handle_custom_permission(&ctx, command),
        Commands::Tidy(args) => handle_tidy(&ctx, &args.files, args.reference.as_deref(), args.list),
    }
}

/// `RUST_LOG` wins; otherwise `-v` means debug and the configured level
/// applies. Logs go to stderr so they never mix with table or JSON output.
fn init_tracing(verbose: bool, configured: &str) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new(configured),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

impl AppContext {
    fn files_of(&self, files: &Files, kind: &'static KindSchema) -> Result<Vec<PathBuf>> {
        expand_files(&files.files, |path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| kind.matches_path(name))
        })
    }

    fn edit<F>(&self, files: &Files, kind: &'static KindSchema, op: F) -> Result<i32>
    where
        F: FnMut(&mut Document) -> MdResult<()>,
    {
        let files = self.files_of(files, kind)?;
        let result = self.api.edit(&files, kind, op);
        Ok(report_written(result, "Updated"))
    }

    fn create<F>(&self, files: &NewFiles, build: F) -> Result<i32>
    where
        F: Fn() -> Document,
    {
        let result = self.api.create(&files.files, build);
        Ok(report_written(result, "Created"))
    }

    fn table<F>(&self, files: &Files, kind: &'static KindSchema, headers: &[&str], rows: F) -> Result<i32>
    where
        F: FnMut(&str, &Document) -> Vec<Vec<String>>,
    {
        let files = self.files_of(files, kind)?;
        let result = self.api.table(&files, kind, headers, rows);
        print_messages(&result.messages);
        if let Some(table) = &result.table {
            print_table(table, self.json)?;
        }
        Ok(0)
    }

    fn show<F>(&self, files: &Files, kind: &'static KindSchema, collection: &str, find: F) -> Result<i32>
    where
        F: Fn(&Document) -> MdResult<&Element>,
    {
        let files = self.files_of(files, kind)?;
        let result = self.api.show(&files, kind, collection, find);
        print_messages(&result.messages);
        print_shown(&result.shown, self.json)?;
        Ok(0)
    }
}

fn report_written(mut result: CmdResult, verb: &str) -> i32 {
    let written: Vec<CmdMessage> = result
        .affected_files
        .iter()
        .map(|path| CmdMessage::success(format!("{verb} {}", path.display())))
        .collect();
    for message in written {
        result.add_message(message);
    }
    print_messages(&result.messages);
    0
}

/// Plain paths are kept as given. Directories are walked recursively, in
/// name order, for files `accept` likes.
fn expand_files(paths: &[PathBuf], accept: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_dir(path, &accept, &mut files)
                .with_context(|| format!("reading directory {}", path.display()))?;
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn collect_dir(dir: &Path, accept: &dyn Fn(&Path) -> bool, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    for path in entries {
        if path.is_dir() {
            collect_dir(&path, accept, out)?;
        } else if accept(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn text(record: &Element, field: &str) -> String {
    record.leaf(field).display_text().to_string()
}

// Profiles and permission sets

fn handle_profile(ctx: &AppContext, command: ProfileCommands) -> Result<i32> {
    match command {
        ProfileCommands::Permissions(cmd) => handle_permissions(ctx, &PROFILE, "Profile", cmd),
        ProfileCommands::Layout { command } => match command {
            LayoutCommands::Add {
                layout,
                record_type,
                files,
            } => ctx.edit(&files, &PROFILE, |doc| {
                profile::add_layout_assignment(doc, &layout, record_type.as_deref())
            }),
            LayoutCommands::Delete {
                layout,
                record_type,
                files,
            } => ctx.edit(&files, &PROFILE, |doc| {
                profile::delete_layout_assignments(doc, &layout, record_type.as_deref()).map(|_| ())
            }),
            LayoutCommands::List { files } => {
                ctx.table(&files, &PROFILE, &["Profile", "Layout", "Record Type"], |name, doc| {
                    profile::list_layout_assignments(doc)
                        .map(|r| vec![name.to_string(), text(r, "layout"), text(r, "recordType")])
                        .collect()
                })
            }
        },
        ProfileCommands::Tabs { command } => match command {
            TabCommands::Delete { tab, files } => {
                ctx.edit(&files, &PROFILE, |doc| profile::delete_tab_visibility(doc, &tab))
            }
            TabCommands::List { files } => ctx.table(&files, &PROFILE, &["Profile", "Tab", "Visibility"], |name, doc| {
                profile::list_tab_visibilities(doc)
                    .map(|r| vec![name.to_string(), text(r, "tab"), text(r, "visibility")])
                    .collect()
            }),
        },
    }
}

fn handle_permission_set(ctx: &AppContext, command: PermissionSetCommands) -> Result<i32> {
    match command {
        PermissionSetCommands::New {
            label,
            description,
            files,
        } => ctx.create(&files, || permission_set::new(&label, description.as_deref())),
        PermissionSetCommands::Edit {
            license,
            label,
            description,
            files,
        } => {
            let edit = PermissionSetEdit {
                license,
                description,
                label,
            };
            if edit == PermissionSetEdit::default() {
                bail!("nothing to change: pass --license, --label or --description");
            }
            ctx.edit(&files, &PERMISSION_SET, |doc| {
                permission_set::edit(doc, &edit);
                Ok(())
            })
        }
        PermissionSetCommands::Permissions(cmd) => handle_permissions(ctx, &PERMISSION_SET, "Permission Set", cmd),
    }
}

/// Commands shared by profiles and permission sets. `owner` heads the first
/// table column.
fn handle_permissions(
    ctx: &AppContext,
    kind: &'static KindSchema,
    owner: &str,
    command: PermissionCommands,
) -> Result<i32> {
    match command {
        PermissionCommands::ObjectPermissions { command } => match command {
            ObjectPermissionCommands::Add { object, files } => {
                ctx.edit(&files, kind, |doc| permissions::add_object_permissions(doc, &object))
            }
            ObjectPermissionCommands::Edit { object, flags, files } => {
                let flags = ObjectPermissionFlags::from(&flags);
                if flags.is_empty() {
                    bail!("nothing to change: pass at least one permission flag");
                }
                ctx.edit(&files, kind, |doc| {
                    permissions::update_object_permissions(doc, &object, &flags)
                })
            }
            ObjectPermissionCommands::Delete { object, files } => ctx.edit(&files, kind, |doc| {
                permissions::delete_object_permissions(doc, &object).map(|_| ())
            }),
            ObjectPermissionCommands::Show { object, files } => {
                ctx.show(&files, kind, permissions::OBJECT_PERMISSIONS, |doc| {
                    permissions::show_object_permissions(doc, &object)
                })
            }
            ObjectPermissionCommands::List { flags, files } => {
                let flags = ObjectPermissionFlags::from(&flags);
                ctx.table(&files, kind, &[owner, "Object", "Access"], |name, doc| {
                    permissions::list_object_permissions(doc, &flags)
                        .map(|r| {
                            vec![
                                name.to_string(),
                                text(r, "object"),
                                permissions::object_access_code(r),
                            ]
                        })
                        .collect()
                })
            }
        },
        PermissionCommands::FieldPermissions { command } => match command {
            FieldPermissionCommands::List { flags, files } => {
                let flags = FieldPermissionFlags::from(&flags);
                ctx.table(&files, kind, &[owner, "Field", "Readable", "Editable"], |name, doc| {
                    permissions::list_field_permissions(doc, &flags)
                        .map(|r| vec![name.to_string(), text(r, "field"), text(r, "readable"), text(r, "editable")])
                        .collect()
                })
            }
            FieldPermissionCommands::Edit { field, flags, files } => {
                let flags = FieldPermissionFlags::from(&flags);
                if flags == FieldPermissionFlags::default() {
                    bail!("nothing to change: pass --readable or --editable");
                }
                ctx.edit(&files, kind, |doc| {
                    permissions::update_field_permissions(doc, &field, &flags)
                })
            }
            FieldPermissionCommands::Clone { source, dest, files } => ctx.edit(&files, kind, |doc| {
                permissions::clone_field_permissions(doc, &source, &dest)
            }),
            FieldPermissionCommands::Delete { field, files } => {
                ctx.edit(&files, kind, |doc| permissions::delete_field_permissions(doc, &field))
            }
        },
        PermissionCommands::Application { command } => match command {
            ApplicationVisibilityCommands::Add { application, files } => ctx.edit(&files, kind, |doc| {
                permissions::add_application_visibility(doc, &application)
            }),
            ApplicationVisibilityCommands::Edit {
                application,
                default,
                visible,
                files,
            } => {
                let flags = ApplicationVisibilityFlags { default, visible };
                if flags == ApplicationVisibilityFlags::default() {
                    bail!("nothing to change: pass --default or --visible");
                }
                ctx.edit(&files, kind, |doc| {
                    permissions::update_application_visibility(doc, &application, &flags)
                })
            }
            ApplicationVisibilityCommands::Delete { application, files } => ctx.edit(&files, kind, |doc| {
                permissions::delete_application_visibility(doc, &application)
            }),
            ApplicationVisibilityCommands::List { visible_only, files } => {
                ctx.table(&files, kind, &[owner, "Application", "Default", "Visible"], |name, doc| {
                    permissions::list_applications(doc, visible_only)
                        .map(|r| {
                            vec![
                                name.to_string(),
                                text(r, "application"),
                                text(r, "default"),
                                text(r, "visible"),
                            ]
                        })
                        .collect()
                })
            }
            ApplicationVisibilityCommands::Show { application, files } => {
                ctx.show(&files, kind, permissions::APPLICATION_VISIBILITIES, |doc| {
                    permissions::show_application(doc, &application)
                })
            }
        },
        PermissionCommands::ApexClass { command } => match command {
            ClassAccessCommands::Add { class, files } => {
                ctx.edit(&files, kind, |doc| permissions::add_class_access(doc, &class))
            }
            ClassAccessCommands::Delete { class, files } => {
                ctx.edit(&files, kind, |doc| permissions::delete_class_access(doc, &class))
            }
            ClassAccessCommands::List { files } => ctx.table(&files, kind, &[owner, "Apex Class", "Access"], |name, doc| {
                permissions::list_class_accesses(doc)
                    .map(|r| vec![name.to_string(), text(r, "apexClass"), permissions::enabled_text(r).to_string()])
                    .collect()
            }),
        },
        PermissionCommands::Flow { command } => match command {
            FlowAccessCommands::Delete { flow, files } => {
                ctx.edit(&files, kind, |doc| permissions::delete_flow_access(doc, &flow))
            }
            FlowAccessCommands::List { files } => ctx.table(&files, kind, &[owner, "Flow", "Access"], |name, doc| {
                permissions::list_flow_accesses(doc)
                    .map(|r| vec![name.to_string(), text(r, "flow"), permissions::enabled_text(r).to_string()])
                    .collect()
            }),
        },
        PermissionCommands::UserPermissions { command } => match command {
            UserPermissionCommands::Add { name, files } => {
                ctx.edit(&files, kind, |doc| permissions::add_user_permission(doc, &name))
            }
            UserPermissionCommands::Delete { name, files } => {
                ctx.edit(&files, kind, |doc| permissions::delete_user_permission(doc, &name))
            }
            UserPermissionCommands::List { files } => ctx.table(&files, kind, &[owner, "Permission", "Access"], |name, doc| {
                permissions::list_user_permissions(doc)
                    .map(|r| vec![name.to_string(), text(r, "name"), permissions::enabled_text(r).to_string()])
                    .collect()
            }),
        },
    }
}

// Package manifests

fn handle_package(ctx: &AppContext, command: PackageCommands) -> Result<i32> {
    match command {
        PackageCommands::New { api_version, files } => {
            let version = api_version.unwrap_or_else(|| ctx.api.config().api_version.clone());
            ctx.create(&files, || package::new(&version))
        }
        PackageCommands::Add {
            type_name,
            member,
            files,
        } => ctx.edit(&files, &PACKAGE, |doc| package::add(doc, &type_name, &member)),
        PackageCommands::Delete {
            type_name,
            member,
            files,
        } => ctx.edit(&files, &PACKAGE, |doc| package::delete(doc, &type_name, &member)),
        PackageCommands::List { files } => ctx.table(&files, &PACKAGE, &["Package", "Type", "Member"], |name, doc| {
            package::list(doc)
                .into_iter()
                .map(|(type_name, member)| vec![name.to_string(), type_name, member])
                .collect()
        }),
        PackageCommands::Tidy { list, files } => {
            let files = Files {
                files: ctx.files_of(&files, &PACKAGE)?,
            };
            handle_tidy(ctx, &files, None, list)
        }
    }
}

// Custom applications

fn handle_application(ctx: &AppContext, command: ApplicationCommands) -> Result<i32> {
    let ApplicationCommands::Action { command } = command;
    match command {
        ActionCommands::Table { query, files } => {
            let query = ActionOverrideQuery::from(&query);
            let headers = [
                "Application",
                "Action",
                "Form Factor",
                "Object",
                "Record Type",
                "Profile",
                "Type",
                "Content",
            ];
            ctx.table(&files, &CUSTOM_APPLICATION, &headers, |name, doc| {
                application::list_action_overrides(doc, &query)
                    .map(|r| {
                        let mut row = vec![name.to_string()];
                        row.extend(
                            ["actionName", "formFactor", "pageOrSobjectType", "recordType", "profile", "type", "content"]
                                .iter()
                                .map(|field| text(r, field)),
                        );
                        row
                    })
                    .collect()
            })
        }
        ActionCommands::Delete { query, files } => {
            let query = ActionOverrideQuery::from(&query);
            ctx.edit(&files, &CUSTOM_APPLICATION, |doc| {
                application::delete_action_overrides(doc, &query).map(|_| ())
            })
        }
        ActionCommands::Reset { query, files } => {
            let query = ActionOverrideQuery::from(&query);
            ctx.edit(&files, &CUSTOM_APPLICATION, |doc| {
                application::reset_action_overrides(doc, &query).map(|_| ())
            })
        }
    }
}

// Custom objects

/// A custom object collection keyed by `fullName` that can be listed and
/// pruned.
struct NamedRecords {
    title: &'static str,
    /// Extra columns after the name: (header, field).
    columns: &'static [(&'static str, &'static str)],
    list: for<'a> fn(&'a Document) -> Filtered<'a, Element, Condition>,
    delete: fn(&mut Document, &str) -> MdResult<()>,
}

const FIELD_SETS: NamedRecords = NamedRecords {
    title: "Field Set",
    columns: &[("Label", "label")],
    list: custom_object::list_field_sets,
    delete: custom_object::delete_field_set,
};

const RECORD_TYPES: NamedRecords = NamedRecords {
    title: "Record Type",
    columns: &[("Label", "label"), ("Active", "active")],
    list: custom_object::list_record_types,
    delete: custom_object::delete_record_type,
};

const VALIDATION_RULES: NamedRecords = NamedRecords {
    title: "Rule",
    columns: &[("Active", "active"), ("Message", "errorMessage")],
    list: custom_object::list_validation_rules,
    delete: custom_object::delete_validation_rule,
};

fn handle_objects(ctx: &AppContext, command: ObjectCommands) -> Result<i32> {
    match command {
        ObjectCommands::Fields { command } => match command {
            FieldCommands::List { required, files } => {
                let headers = ["Object", "Field", "Type", "Label", "Required"];
                ctx.table(&files, &CUSTOM_OBJECT, &headers, |name, doc| {
                    custom_object::list_fields(doc, required)
                        .map(|f| {
                            vec![
                                name.to_string(),
                                text(f, "fullName"),
                                text(f, "type"),
                                text(f, "label"),
                                custom_object::is_required(f).to_string(),
                            ]
                        })
                        .collect()
                })
            }
            FieldCommands::Edit {
                field,
                label,
                unique,
                external_id,
                files,
            } => {
                let edit = FieldEdit {
                    label,
                    unique,
                    external_id,
                };
                if edit == FieldEdit::default() {
                    bail!("nothing to change: pass --label, --unique or --external-id");
                }
                ctx.edit(&files, &CUSTOM_OBJECT, |doc| custom_object::update_field(doc, &field, &edit))
            }
            FieldCommands::Delete { field, files } => {
                ctx.edit(&files, &CUSTOM_OBJECT, |doc| custom_object::delete_field(doc, &field))
            }
        },
        ObjectCommands::Fieldsets { command } => handle_named(ctx, &FIELD_SETS, command),
        ObjectCommands::RecordTypes { command } => handle_named(ctx, &RECORD_TYPES, command),
        ObjectCommands::ValidationRules { command } => handle_named(ctx, &VALIDATION_RULES, command),
    }
}

fn handle_named(ctx: &AppContext, records: &NamedRecords, command: NamedRecordCommands) -> Result<i32> {
    match command {
        NamedRecordCommands::List { files } => {
            let mut headers = vec!["Object", records.title];
            headers.extend(records.columns.iter().map(|(header, _)| *header));
            ctx.table(&files, &CUSTOM_OBJECT, &headers, |name, doc| {
                (records.list)(doc)
                    .map(|r| {
                        let mut row = vec![name.to_string(), text(r, "fullName")];
                        row.extend(records.columns.iter().map(|(_, field)| text(r, field)));
                        row
                    })
                    .collect()
            })
        }
        NamedRecordCommands::Delete { name, files } => {
            ctx.edit(&files, &CUSTOM_OBJECT, |doc| (records.delete)(doc, &name))
        }
    }
}

// Custom permissions

fn handle_custom_permission(ctx: &AppContext, command: CustomPermissionCommands) -> Result<i32> {
    match command {
        CustomPermissionCommands::New { label, files } => ctx.create(&files, || custom_permission::new(&label)),
        CustomPermissionCommands::Edit { description, files } => ctx.edit(&files, &CUSTOM_PERMISSION, |doc| {
            custom_permission::edit_description(doc, &description);
            Ok(())
        }),
    }
}

// Tidy

/// In check mode prints the files that are not tidy and returns 1 if there
/// are any. Otherwise rewrites them.
fn handle_tidy(ctx: &AppContext, files: &Files, reference: Option<&Path>, check: bool) -> Result<i32> {
    let registry = ctx.api.registry();
    let files = expand_files(&files.files, |path| registry.by_path(path).is_some())?;
    let result = ctx.api.tidy(&files, reference, check)?;

    print_messages(&result.messages);
    if check {
        for path in &result.changed_files {
            println!("{}", path.display());
        }
        return Ok(if result.changed_files.is_empty() { 0 } else { 1 });
    }

    let mut summary = CmdResult::default();
    for path in &result.changed_files {
        summary.add_message(CmdMessage::success(format!("Tidied {}", path.display())));
    }
    if result.changed_files.is_empty() && result.failures() == 0 {
        summary.add_message(CmdMessage::info("Already tidy"));
    }
    print_messages(&summary.messages);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn directories_expand_to_matching_files_in_order() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "profiles/B.profile-meta.xml");
        let a = touch(dir.path(), "profiles/A.profile-meta.xml");
        touch(dir.path(), "profiles/notes.txt");
        let nested = touch(dir.path(), "profiles/sub/C.profile");
        let explicit = dir.path().join("Explicit.txt");

        let files = expand_files(&[dir.path().join("profiles"), explicit.clone()], |p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| PROFILE.matches_path(n))
        })
        .unwrap();
        assert_eq!(files, vec![a, b, nested, explicit]);
    }

    #[test]
    fn tidy_accepts_every_registered_kind() {
        let dir = TempDir::new().unwrap();
        let pkg = touch(dir.path(), "src/package.xml");
        let app = touch(dir.path(), "src/applications/Sales.app");
        touch(dir.path(), "src/README.md");

        let registry = Registry::default();
        let files = expand_files(&[dir.path().join("src")], |p| registry.by_path(p).is_some()).unwrap();
        assert_eq!(files, vec![app, pkg]);
    }
}
