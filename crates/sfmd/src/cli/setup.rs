//! Command-line definitions: the clap parser, subcommand enums and the
//! argument structs shared between them.
//!
//! Boolean permission flags are `Option<bool>` so that a flag left off the
//! command line leaves the field untouched.

use clap::{Args, Parser, Subcommand, ValueEnum};
use sfmdapp::kinds::application::{ActionOverrideQuery, FormFactor, OverrideAction};
use sfmdapp::kinds::permissions::{FieldPermissionFlags, ObjectPermissionFlags};
use std::path::PathBuf;

/// Returns the version string, with the git hash for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0 (dev abc1234)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev {})", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "sfmd",
    bin_name = "sfmd",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Edit and tidy platform metadata XML files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Read configuration from this file before any other layer
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Print list and show output as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Edit profiles
    #[command(display_order = 1)]
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Edit permission sets
    #[command(name = "permissionset", alias = "ps", display_order = 2)]
    PermissionSet {
        #[command(subcommand)]
        command: PermissionSetCommands,
    },

    /// Edit package manifests
    #[command(display_order = 3)]
    Package {
        #[command(subcommand)]
        command: PackageCommands,
    },

    /// Edit custom applications
    #[command(alias = "app", display_order = 4)]
    Application {
        #[command(subcommand)]
        command: ApplicationCommands,
    },

    /// Edit custom objects
    #[command(display_order = 5)]
    Objects {
        #[command(subcommand)]
        command: ObjectCommands,
    },

    /// Create and edit custom permissions
    #[command(name = "custompermission", display_order = 6)]
    CustomPermission {
        #[command(subcommand)]
        command: CustomPermissionCommands,
    },

    /// Rewrite files of any known kind in canonical form
    #[command(display_order = 7)]
    Tidy(TidyArgs),
}

/// Files to operate on. Directories are searched for files of the kind.
#[derive(Args, Debug, Clone)]
pub struct Files {
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// Files to create.
#[derive(Args, Debug, Clone)]
pub struct NewFiles {
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct TidyArgs {
    /// Only list files that are not tidy; exit 1 if there are any
    #[arg(short, long)]
    pub list: bool,

    /// Package manifest whose member order sorts manifest-ordered collections
    #[arg(short, long, value_name = "PACKAGE_XML")]
    pub reference: Option<PathBuf>,

    #[command(flatten)]
    pub files: Files,
}

// Shared by profiles and permission sets

#[derive(Subcommand, Debug)]
pub enum PermissionCommands {
    /// Object permissions (CRUD, view all, modify all)
    #[command(name = "object-permissions", alias = "op")]
    ObjectPermissions {
        #[command(subcommand)]
        command: ObjectPermissionCommands,
    },

    /// Field-level security
    #[command(name = "field-permissions", alias = "fp")]
    FieldPermissions {
        #[command(subcommand)]
        command: FieldPermissionCommands,
    },

    /// Application visibility
    Application {
        #[command(subcommand)]
        command: ApplicationVisibilityCommands,
    },

    /// Apex class access
    #[command(name = "apex-class")]
    ApexClass {
        #[command(subcommand)]
        command: ClassAccessCommands,
    },

    /// Flow access
    Flow {
        #[command(subcommand)]
        command: FlowAccessCommands,
    },

    /// System user permissions
    #[command(name = "user-permissions")]
    UserPermissions {
        #[command(subcommand)]
        command: UserPermissionCommands,
    },
}

/// Object permission flags. Each flag is only touched when given.
#[derive(Args, Debug, Clone, Default)]
pub struct ObjectFlagArgs {
    #[arg(long, value_name = "BOOL")]
    pub create: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    pub read: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    pub edit: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    pub delete: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    pub view_all: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    pub modify_all: Option<bool>,
}

impl From<&ObjectFlagArgs> for ObjectPermissionFlags {
    fn from(args: &ObjectFlagArgs) -> Self {
        ObjectPermissionFlags {
            create: args.create,
            delete: args.delete,
            edit: args.edit,
            read: args.read,
            modify_all: args.modify_all,
            view_all: args.view_all,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ObjectPermissionCommands {
    /// Add permissions for an object, every flag off
    Add {
        object: String,
        #[command(flatten)]
        files: Files,
    },
    /// Set flags on an object's permissions
    Edit {
        object: String,
        #[command(flatten)]
        flags: ObjectFlagArgs,
        #[command(flatten)]
        files: Files,
    },
    /// Remove an object's permissions and its field permissions
    #[command(alias = "rm")]
    Delete {
        object: String,
        #[command(flatten)]
        files: Files,
    },
    /// Print an object's permission record
    Show {
        object: String,
        #[command(flatten)]
        files: Files,
    },
    /// List object permissions, optionally only those matching the flags
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        flags: ObjectFlagArgs,
        #[command(flatten)]
        files: Files,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FieldFlagArgs {
    #[arg(long, value_name = "BOOL")]
    pub readable: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    pub editable: Option<bool>,
}

impl From<&FieldFlagArgs> for FieldPermissionFlags {
    fn from(args: &FieldFlagArgs) -> Self {
        FieldPermissionFlags {
            readable: args.readable,
            editable: args.editable,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum FieldPermissionCommands {
    /// List field permissions, optionally only those matching the flags
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        flags: FieldFlagArgs,
        #[command(flatten)]
        files: Files,
    },
    /// Set flags on a field's permissions (field as Object.Field)
    Edit {
        field: String,
        #[command(flatten)]
        flags: FieldFlagArgs,
        #[command(flatten)]
        files: Files,
    },
    /// Copy a field's permissions to another field
    Clone {
        source: String,
        dest: String,
        #[command(flatten)]
        files: Files,
    },
    /// Remove a field's permissions
    #[command(alias = "rm")]
    Delete {
        field: String,
        #[command(flatten)]
        files: Files,
    },
}

#[derive(Subcommand, Debug)]
pub enum ApplicationVisibilityCommands {
    /// Make an application visible
    Add {
        application: String,
        #[command(flatten)]
        files: Files,
    },
    /// Change an application's default and visible flags
    Edit {
        application: String,
        #[arg(long, value_name = "BOOL")]
        default: Option<bool>,
        #[arg(long, value_name = "BOOL")]
        visible: Option<bool>,
        #[command(flatten)]
        files: Files,
    },
    /// Remove an application's visibility entry
    #[command(alias = "rm")]
    Delete {
        application: String,
        #[command(flatten)]
        files: Files,
    },
    /// List application visibilities
    #[command(alias = "ls")]
    List {
        /// Only visible applications
        #[arg(long)]
        visible_only: bool,
        #[command(flatten)]
        files: Files,
    },
    /// Print an application's visibility record
    Show {
        application: String,
        #[command(flatten)]
        files: Files,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClassAccessCommands {
    /// Grant access to an Apex class
    Add {
        class: String,
        #[command(flatten)]
        files: Files,
    },
    /// Remove access to an Apex class
    #[command(alias = "rm")]
    Delete {
        class: String,
        #[command(flatten)]
        files: Files,
    },
    /// List Apex class accesses
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        files: Files,
    },
}

#[derive(Subcommand, Debug)]
pub enum FlowAccessCommands {
    /// Remove access to a flow
    #[command(alias = "rm")]
    Delete {
        flow: String,
        #[command(flatten)]
        files: Files,
    },
    /// List flow accesses
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        files: Files,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserPermissionCommands {
    /// Enable a user permission
    Add {
        name: String,
        #[command(flatten)]
        files: Files,
    },
    /// Remove a user permission
    #[command(alias = "rm")]
    Delete {
        name: String,
        #[command(flatten)]
        files: Files,
    },
    /// List user permissions
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        files: Files,
    },
}

// Profile

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    #[command(flatten)]
    Permissions(PermissionCommands),

    /// Page layout assignments
    Layout {
        #[command(subcommand)]
        command: LayoutCommands,
    },

    /// Tab visibilities
    Tabs {
        #[command(subcommand)]
        command: TabCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum LayoutCommands {
    /// Assign a layout, optionally for one record type
    Add {
        layout: String,
        #[arg(long, value_name = "OBJECT.RECORD_TYPE")]
        record_type: Option<String>,
        #[command(flatten)]
        files: Files,
    },
    /// Remove a layout's assignments, or only the one for a record type
    #[command(alias = "rm")]
    Delete {
        layout: String,
        #[arg(long, value_name = "OBJECT.RECORD_TYPE")]
        record_type: Option<String>,
        #[command(flatten)]
        files: Files,
    },
    /// List layout assignments
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        files: Files,
    },
}

#[derive(Subcommand, Debug)]
pub enum TabCommands {
    /// Remove a tab's visibility setting
    #[command(alias = "rm")]
    Delete {
        tab: String,
        #[command(flatten)]
        files: Files,
    },
    /// List tab visibilities
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        files: Files,
    },
}

// Permission set

#[derive(Subcommand, Debug)]
pub enum PermissionSetCommands {
    /// Create empty permission sets
    New {
        label: String,
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        files: NewFiles,
    },

    /// Change a permission set's license, label or description
    Edit {
        #[arg(long)]
        license: Option<String>,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        files: Files,
    },

    #[command(flatten)]
    Permissions(PermissionCommands),
}

// Package

#[derive(Subcommand, Debug)]
pub enum PackageCommands {
    /// Create empty package manifests
    New {
        /// Defaults to the configured api_version
        #[arg(long, value_name = "VERSION")]
        api_version: Option<String>,
        #[command(flatten)]
        files: NewFiles,
    },
    /// Add a member to a type
    Add {
        #[arg(value_name = "TYPE")]
        type_name: String,
        member: String,
        #[command(flatten)]
        files: Files,
    },
    /// Remove a member from a type
    #[command(alias = "rm")]
    Delete {
        #[arg(value_name = "TYPE")]
        type_name: String,
        member: String,
        #[command(flatten)]
        files: Files,
    },
    /// List members by type
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        files: Files,
    },
    /// Merge, sort and de-duplicate manifests
    Tidy {
        /// Only list manifests that are not tidy; exit 1 if there are any
        #[arg(short, long)]
        list: bool,
        #[command(flatten)]
        files: Files,
    },
}

// Custom application

#[derive(Subcommand, Debug)]
pub enum ApplicationCommands {
    /// Profile action overrides
    Action {
        #[command(subcommand)]
        command: ActionCommands,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ActionArg {
    Tab,
    View,
}

impl From<ActionArg> for OverrideAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Tab => OverrideAction::Tab,
            ActionArg::View => OverrideAction::View,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum FormFactorArg {
    Large,
    Small,
}

impl From<FormFactorArg> for FormFactor {
    fn from(arg: FormFactorArg) -> Self {
        match arg {
            FormFactorArg::Large => FormFactor::Large,
            FormFactorArg::Small => FormFactor::Small,
        }
    }
}

/// Selects action overrides. Every option given must match.
#[derive(Args, Debug, Clone, Default)]
pub struct ActionQueryArgs {
    #[arg(long, value_enum)]
    pub action: Option<ActionArg>,
    #[arg(long, value_enum)]
    pub form_factor: Option<FormFactorArg>,
    #[arg(long)]
    pub profile: Option<String>,
    #[arg(long)]
    pub object: Option<String>,
    /// Record type, qualified with --object when given bare
    #[arg(long)]
    pub record_type: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
}

impl From<&ActionQueryArgs> for ActionOverrideQuery {
    fn from(args: &ActionQueryArgs) -> Self {
        ActionOverrideQuery {
            action: args.action.map(Into::into),
            form_factor: args.form_factor.map(Into::into),
            profile: args.profile.clone(),
            object: args.object.clone(),
            record_type: args.record_type.clone(),
            content: args.content.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ActionCommands {
    /// Tabulate action overrides
    #[command(alias = "ls")]
    Table {
        #[command(flatten)]
        query: ActionQueryArgs,
        #[command(flatten)]
        files: Files,
    },
    /// Remove matching action overrides
    #[command(alias = "rm")]
    Delete {
        #[command(flatten)]
        query: ActionQueryArgs,
        #[command(flatten)]
        files: Files,
    },
    /// Point matching action overrides back at the default page
    Reset {
        #[command(flatten)]
        query: ActionQueryArgs,
        #[command(flatten)]
        files: Files,
    },
}

// Custom object

#[derive(Subcommand, Debug)]
pub enum ObjectCommands {
    /// Fields
    Fields {
        #[command(subcommand)]
        command: FieldCommands,
    },
    /// Field sets
    Fieldsets {
        #[command(subcommand)]
        command: NamedRecordCommands,
    },
    /// Record types
    #[command(name = "recordtypes")]
    RecordTypes {
        #[command(subcommand)]
        command: NamedRecordCommands,
    },
    /// Validation rules
    #[command(name = "validationrules")]
    ValidationRules {
        #[command(subcommand)]
        command: NamedRecordCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum FieldCommands {
    /// List fields
    #[command(alias = "ls")]
    List {
        /// Only required fields
        #[arg(long)]
        required: bool,
        #[command(flatten)]
        files: Files,
    },
    /// Change a field's label, unique or external id flag
    Edit {
        field: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long, value_name = "BOOL")]
        unique: Option<bool>,
        #[arg(long, value_name = "BOOL")]
        external_id: Option<bool>,
        #[command(flatten)]
        files: Files,
    },
    /// Remove a field
    #[command(alias = "rm")]
    Delete {
        field: String,
        #[command(flatten)]
        files: Files,
    },
}

/// Listing and removal of records keyed by full name.
#[derive(Subcommand, Debug)]
pub enum NamedRecordCommands {
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        files: Files,
    },
    #[command(alias = "rm")]
    Delete {
        name: String,
        #[command(flatten)]
        files: Files,
    },
}

// Custom permission

#[derive(Subcommand, Debug)]
pub enum CustomPermissionCommands {
    /// Create custom permissions
    New {
        label: String,
        #[command(flatten)]
        files: NewFiles,
    },
    /// Set the description
    Edit {
        #[arg(long)]
        description: String,
        #[command(flatten)]
        files: Files,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sfmd").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn object_flags_are_tristate() {
        let cli = parse(&[
            "profile", "object-permissions", "edit", "Account", "--edit", "true", "--read", "false", "Admin.profile",
        ]);
        let Commands::Profile {
            command: ProfileCommands::Permissions(PermissionCommands::ObjectPermissions {
                command: ObjectPermissionCommands::Edit { object, flags, files },
            }),
        } = cli.command
        else {
            panic!("unexpected command");
        };
        assert_eq!(object, "Account");
        assert_eq!(files.files, vec![PathBuf::from("Admin.profile")]);
        let flags = ObjectPermissionFlags::from(&flags);
        assert_eq!(flags.edit, Some(true));
        assert_eq!(flags.read, Some(false));
        assert_eq!(flags.create, None);
    }

    #[test]
    fn permission_set_shares_permission_commands() {
        let cli = parse(&["ps", "user-permissions", "add", "ApiEnabled", "A.permissionset", "B.permissionset"]);
        assert!(matches!(
            cli.command,
            Commands::PermissionSet {
                command: PermissionSetCommands::Permissions(PermissionCommands::UserPermissions {
                    command: UserPermissionCommands::Add { .. }
                })
            }
        ));
    }

    #[test]
    fn action_query_maps_value_enums() {
        let cli = parse(&[
            "application", "action", "delete", "--form-factor", "small", "--object", "Account", "--record-type",
            "Partner", "Sales.app",
        ]);
        let Commands::Application {
            command: ApplicationCommands::Action {
                command: ActionCommands::Delete { query, .. },
            },
        } = cli.command
        else {
            panic!("unexpected command");
        };
        let query = ActionOverrideQuery::from(&query);
        assert_eq!(query.form_factor, Some(FormFactor::Small));
        assert_eq!(query.object.as_deref(), Some("Account"));
        assert_eq!(query.action, None);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["tidy", "--list", "package.xml", "--json", "-v"]);
        assert!(cli.json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Tidy(TidyArgs { list: true, .. })));
    }

    #[test]
    fn files_are_required() {
        assert!(Cli::try_parse_from(["sfmd", "package", "list"]).is_err());
    }
}
