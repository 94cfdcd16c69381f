use crate::export::ReportFormat;
use crate::models::StatKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for vlbisummary
/// Station summary reports and schedule statistics for VLBI antennas
#[derive(Parser)]
#[command(
    name = "vlbisummary",
    version = env!("CARGO_PKG_VERSION"),
    about = "VLBI station reports (PDF/HTML) and schedule pie charts",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Enable debug logging
    #[arg(global = true, long = "debug")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file
    Init {
        #[arg(long = "force", help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

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

    /// Inspect the station database
    Db {
        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Build a station summary report from the correlation database
    Report {
        /// Two-letter station code (e.g. Hb, Ke, Yg)
        station: String,

        /// First day (YYYY:DDD, YYYY-MM-DD or MJD)
        start: String,

        /// Last day, inclusive (YYYY:DDD, YYYY-MM-DD or MJD)
        stop: String,

        /// Output file (extension replaced per format)
        #[arg(long = "out")]
        out: Option<String>,

        #[arg(long = "format", value_enum, default_value_t = ReportFormat::Pdf)]
        format: ReportFormat,

        /// SQL LIKE pattern on the experiment ID
        #[arg(long = "search", default_value = "%")]
        search: String,

        /// Keep experiments NOT matching --search
        #[arg(long = "reverse")]
        reverse: bool,

        /// Also write every chart as PNG into this directory
        #[arg(long = "save-charts")]
        save_charts: Option<String>,

        /// Append the session table to the PDF
        #[arg(long = "table")]
        table: bool,

        /// Dump the session rows (.csv or .json)
        #[arg(long = "data")]
        data: Option<String>,

        /// Overwrite existing files without asking
        #[arg(long = "force")]
        force: bool,
    },

    /// Pie charts of scheduled sessions, scans and observations per program
    Schedule {
        /// Station code (default: `default_station` from the config)
        station: Option<String>,

        #[arg(default_value = "2015:001")]
        start: String,

        #[arg(default_value = "2025:001")]
        stop: String,

        /// Statistic to chart (repeatable, default: all)
        #[arg(long = "kind", value_enum)]
        kind: Vec<StatKind>,

        #[arg(long = "out-dir")]
        out_dir: Option<String>,

        /// Read the station response from a saved JSON file
        #[arg(long = "station-json")]
        station_json: Option<String>,

        /// Read the station-stats response from a saved JSON file
        #[arg(long = "stats-json", requires = "station_json")]
        stats_json: Option<String>,

        /// Override the scheduling API base URL
        #[arg(long = "api-url")]
        api_url: Option<String>,
    },
}
