use clap::{Parser, Subcommand};

/// Command-line interface definition for timebook
/// CLI application to track working time with SQLite and an Excel workbook
#[derive(Parser)]
#[command(
    name = "timebook",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track employee working time and keep an Excel workbook in sync with SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override workbook path (useful for tests or custom workbook)
    #[arg(global = true, long = "workbook")]
    pub workbook: Option<String>,

    /// Override the workbook timezone (IANA name or 'system')
    #[arg(global = true, long = "tz")]
    pub tz: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration, database and workbook
    Init,

    /// Inspect the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "path", help = "Print the configuration file path")]
        path: bool,
    },

    /// Start a timer for an employee
    Start {
        /// Employee identifier
        #[arg(long = "employee")]
        employee: String,

        /// Employee display name (copied onto the record)
        #[arg(long = "name")]
        name: String,

        /// Task label
        #[arg(long = "task")]
        task: String,

        /// Project identifier (productive records only)
        #[arg(long = "project-id")]
        project_id: Option<String>,

        /// Project display name (productive records only)
        #[arg(long = "project-name")]
        project_name: Option<String>,

        /// Record as non-productive time (no project)
        #[arg(long = "non-productive")]
        non_productive: bool,

        /// Backfill the start instant (RFC 3339, e.g. 2024-01-01T08:00:00Z)
        #[arg(long = "at")]
        at: Option<String>,
    },

    /// Stop the employee's active timer
    Stop {
        #[arg(long = "employee")]
        employee: String,

        /// Backfill the stop instant (RFC 3339)
        #[arg(long = "at")]
        at: Option<String>,
    },

    /// Show the employee's active timer, if any
    Status {
        #[arg(long = "employee")]
        employee: String,
    },

    /// List completed records
    List {
        #[arg(long, short, help = "Filter by year (YYYY), month (YYYY-MM) or day (YYYY-MM-DD)")]
        period: Option<String>,

        #[arg(long, help = "Filter by employee id")]
        employee: Option<String>,
    },

    /// Delete a record by id
    Del {
        #[arg(long = "id", help = "Record id (UUID)")]
        id: String,
    },

    /// Synchronize the database and the workbook (both directions)
    Sync {
        #[arg(long, help = "Emit the structured outcome as JSON")]
        json: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
