use crate::export::ExportFormat;
use crate::utils::date::DateTimeInput;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for skedjit
#[derive(Parser)]
#[command(
    name = "skedjit",
    version = env!("CARGO_PKG_VERSION"),
    about = "Create events, share them through short links and protect changes with an access code",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update, cheapest access hashing)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Start date/time fields, as entered on the event form
#[derive(Args, Debug, Clone, Default)]
pub struct StartArgs {
    #[arg(long, allow_hyphen_values = true, help = "Year (e.g. 2017)")]
    pub year: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Month (1-12)")]
    pub month: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Day of month")]
    pub day: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Hour (1-12, see --ampm)")]
    pub hour: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Minute (0-59)")]
    pub minute: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "AM or PM")]
    pub ampm: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Offset from UTC in hours, -12 to 14"
    )]
    pub timezone: Option<String>,
}

/// End date/time fields (optional as a whole)
#[derive(Args, Debug, Clone, Default)]
pub struct EndArgs {
    #[arg(long = "end-year", allow_hyphen_values = true)]
    pub end_year: Option<String>,
    #[arg(long = "end-month", allow_hyphen_values = true)]
    pub end_month: Option<String>,
    #[arg(long = "end-day", allow_hyphen_values = true)]
    pub end_day: Option<String>,
    #[arg(long = "end-hour", allow_hyphen_values = true)]
    pub end_hour: Option<String>,
    #[arg(long = "end-minute", allow_hyphen_values = true)]
    pub end_minute: Option<String>,
    #[arg(long = "end-ampm", allow_hyphen_values = true)]
    pub end_ampm: Option<String>,
    #[arg(long = "end-timezone", allow_hyphen_values = true)]
    pub end_timezone: Option<String>,
}

impl From<&StartArgs> for DateTimeInput {
    fn from(a: &StartArgs) -> Self {
        DateTimeInput {
            year: a.year.clone(),
            month: a.month.clone(),
            day: a.day.clone(),
            hour: a.hour.clone(),
            minute: a.minute.clone(),
            ampm: a.ampm.clone(),
            timezone: a.timezone.clone(),
        }
    }
}

impl From<&EndArgs> for DateTimeInput {
    fn from(a: &EndArgs) -> Self {
        DateTimeInput {
            year: a.end_year.clone(),
            month: a.end_month.clone(),
            day: a.end_day.clone(),
            hour: a.end_hour.clone(),
            minute: a.end_minute.clone(),
            ampm: a.end_ampm.clone(),
            timezone: a.end_timezone.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
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

    /// Create an event and print its link
    Create {
        #[arg(long, help = "Event name (required)")]
        name: Option<String>,

        #[arg(long, help = "Event description")]
        description: Option<String>,

        #[arg(long, help = "Access code needed to change or delete the event")]
        access: Option<String>,

        #[command(flatten)]
        start: StartArgs,

        #[command(flatten)]
        end: EndArgs,
    },

    /// Show the event behind a link
    Show {
        link: String,

        #[arg(long, help = "Print the event as JSON")]
        json: bool,
    },

    /// Change an event (requires its access code)
    Update {
        link: String,

        #[arg(long)]
        access: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[command(flatten)]
        start: StartArgs,

        #[command(flatten)]
        end: EndArgs,

        /// Remove the end date
        #[arg(long)]
        clear_end: bool,
    },

    /// Delete an event (requires its access code)
    Delete {
        link: String,

        #[arg(long)]
        access: Option<String>,
    },

    /// Export an event to a calendar or JSON file
    Export {
        link: String,

        #[arg(long, value_enum, default_value = "ics")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f', help = "Overwrite an existing file")]
        force: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
