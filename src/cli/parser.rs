use clap::{Parser, Subcommand};

/// Command-line interface definition for vesseltreat
/// CLI application to record ballast-water dye-treatment logs with SQLite
#[derive(Parser)]
#[command(
    name = "vesseltreat",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record ballast-water dye-treatment logs: draft autosave, validation and submission using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Work on the treatment-log form draft
    Form {
        #[command(subcommand)]
        action: FormAction,
    },

    /// List submitted treatment logs
    List {
        /// Only logs for this vessel id (e.g. vessel-001)
        #[arg(long)]
        vessel: Option<String>,
    },

    /// Show the vessels, ballast tanks and dye colors available on the form
    Vessels,

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Store the copy inside a zip archive
        #[arg(long)]
        compress: bool,

        /// Overwrite an existing file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum FormAction {
    /// Show the current draft
    Show,

    /// Set one or more fields and save the draft
    ///
    /// Fields: vessel, tankNumber, dyeColor, dischargeRate, quantityDischarged, comments
    Set {
        /// FIELD VALUE pairs, e.g. `vessel vessel-001 dischargeRate 10`
        #[arg(
            required = true,
            num_args = 2..,
            allow_hyphen_values = true,
            value_name = "FIELD VALUE"
        )]
        pairs: Vec<String>,
    },

    /// Capture or remove signatures and save the draft
    Sign {
        /// Technician signature (literal value or @FILE)
        #[arg(long)]
        technician: Option<String>,

        /// Terminal operator signature (literal value or @FILE)
        #[arg(long)]
        operator: Option<String>,

        #[arg(long = "clear-technician", conflicts_with = "technician")]
        clear_technician: bool,

        #[arg(long = "clear-operator", conflicts_with = "operator")]
        clear_operator: bool,
    },

    /// Check the draft without submitting it
    Validate,

    /// Submit the draft for supervisor approval
    Submit,

    /// Clear every field, both signatures and the stored draft
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Interactive session reading commands from stdin (autosaves while open)
    Fill,
}
