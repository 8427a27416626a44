use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rStationRota
/// CLI application to rotate workers across stations with SQLite
#[derive(Parser)]
#[command(
    name = "rstationrota",
    version = env!("CARGO_PKG_VERSION"),
    about = "Distribute a daily pool of workers across work stations, rotating them fairly (SQLite backed)",
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

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration for problems")]
        check: bool,

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

        #[arg(
            long = "check",
            help = "Check database integrity and that the ledger mirrors the assignments"
        )]
        check: bool,

        #[arg(
            long = "date",
            requires = "check",
            help = "Restrict the ledger check to one date (YYYY-MM-DD)"
        )]
        date: Option<String>,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Export the placement ledger
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_name = "DATE", help = "First date to export (YYYY-MM-DD)")]
        since: Option<String>,

        #[arg(long, value_name = "DATE", help = "Last date to export (YYYY-MM-DD)")]
        until: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Roster: add or list workers
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },

    /// Set or list station headcount needs
    Need {
        #[command(subcommand)]
        action: NeedAction,
    },

    /// Distribute the selected workers across stations for a date
    Plan {
        #[arg(
            long = "workers",
            value_delimiter = ',',
            conflicts_with = "all",
            help = "Comma separated worker ids, in priority order"
        )]
        workers: Vec<String>,

        #[arg(long = "all", help = "Select every active worker")]
        all: bool,

        #[arg(long = "manual", help = "Free text for the manual station")]
        manual: Option<String>,

        #[arg(long = "date", help = "Planning date (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// Show the assignment of a date
    Show {
        #[arg(long = "date", help = "Date (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// Move a worker to another station or lane
    Move {
        /// Worker id
        worker: String,

        #[arg(long = "from", value_name = "SLOT", help = "Current slot: STATION or STATION:LANE")]
        from: String,

        #[arg(long = "to", value_name = "SLOT", help = "Target slot: STATION or STATION:LANE")]
        to: String,

        #[arg(long = "date", help = "Date (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// Apply a move held back by the overuse warning
    Confirm {
        /// Token printed by `move`
        token: i64,
    },

    /// Discard a move held back by the overuse warning
    Cancel {
        /// Token printed by `move`
        token: i64,
    },

    /// List moves waiting for confirmation
    Pending {
        #[arg(long = "date", help = "Only moves for this date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// List stations, or the stations a worker may go to
    Stations {
        #[arg(long = "worker", help = "Show rotation availability for this worker")]
        worker: Option<String>,

        #[arg(long = "date", help = "Date (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// Show a worker's station visits over the history window
    History {
        /// Worker id
        worker: String,

        #[arg(long = "date", help = "Window ends before this date (default today)")]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Add a worker to the roster
    Add {
        id: String,
        name: String,
        #[arg(long = "shift", default_value = "")]
        shift: String,
    },

    /// List workers
    List {
        #[arg(long = "all", help = "Include inactive workers")]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum NeedAction {
    /// Set the headcount needed at a station
    Set {
        station: String,
        count: u32,
        #[arg(long = "date", help = "Date (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// List the needs of a date
    List {
        #[arg(long = "date", help = "Date (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },
}
