//! Command line definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use leaddesk_core::models::{LeadStatus, DEFAULT_DAILY_STATS_DAYS};
use leaddesk_core::StorageBackend;

#[derive(Parser, Debug)]
#[command(name = "leaddesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Triage leads, chat with contacts and administer LeadDesk projects")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API base URL (overrides LEADDESK_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in profile
    Whoami,

    /// Overview numbers and recent activity
    Dashboard {
        /// Days of daily history to show
        #[arg(long, default_value_t = DEFAULT_DAILY_STATS_DAYS)]
        days: u32,
    },

    /// Work with leads
    #[command(subcommand)]
    Leads(LeadsCommand),

    /// Manage projects (admin)
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Manage a project's bots (admin)
    #[command(subcommand)]
    Bots(BotsCommand),

    /// Manage manager accounts (admin)
    #[command(subcommand)]
    Managers(ManagersCommand),

    /// Statistics
    #[command(subcommand)]
    Stats(StatsCommand),

    /// Show or change the saved configuration
    Config(ConfigArgs),
}

#[derive(Subcommand, Debug)]
pub enum LeadsCommand {
    /// List leads, newest first
    List {
        /// new, read, in_progress or closed
        #[arg(short, long, value_parser = parse_lead_status)]
        status: Option<LeadStatus>,
    },
    /// Show a lead and its conversation (marks new leads as read)
    Show { id: i64 },
    /// Close a lead
    Close { id: i64 },
    /// Mark a lead as read
    Read { id: i64 },
    /// Send a message to a lead
    Send {
        id: i64,
        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectsCommand {
    List,
    Show { id: i64 },
    Create { name: String },
    Rename { id: i64, name: String },
    Delete { id: i64 },
    /// Assign managers to a project
    AddManagers {
        id: i64,
        #[arg(required = true, num_args = 1..)]
        manager_ids: Vec<i64>,
    },
    /// Unassign a manager from a project
    RemoveManager { id: i64, manager_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum BotsCommand {
    List {
        project_id: i64,
    },
    Create {
        project_id: i64,
        #[arg(long)]
        identifier: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        token: String,
        #[arg(long)]
        auto_reply: String,
    },
    Update {
        project_id: i64,
        bot_id: i64,
        #[arg(long)]
        identifier: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        auto_reply: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        project_id: i64,
        bot_id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ManagersCommand {
    List,
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        full_name: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum StatsCommand {
    Overview,
    /// Totals per manager
    Managers,
    /// Totals for one manager
    Manager { id: i64 },
    /// Totals for the last 24 hours
    Last24h,
    /// Per-manager totals for the last 24 hours
    Last24hManagers,
    Daily {
        #[arg(long, default_value_t = DEFAULT_DAILY_STATS_DAYS)]
        days: u32,
    },
    DailyManagers {
        #[arg(long)]
        days: Option<u32>,
        /// YYYY-MM-DD
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// YYYY-MM-DD
        #[arg(long)]
        end_date: Option<NaiveDate>,
        #[arg(long)]
        manager_id: Option<i64>,
    },
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Save this API URL
    #[arg(long)]
    pub set_api_url: Option<String>,

    /// Session storage: file, keyring or memory
    #[arg(long, value_parser = parse_storage)]
    pub set_storage: Option<StorageBackend>,

    /// Request timeout in seconds
    #[arg(long)]
    pub set_timeout: Option<u64>,
}

fn parse_lead_status(s: &str) -> Result<LeadStatus, String> {
    s.parse()
}

fn parse_storage(s: &str) -> Result<StorageBackend, String> {
    match s.trim().to_lowercase().as_str() {
        "file" => Ok(StorageBackend::File),
        "keyring" => Ok(StorageBackend::Keyring),
        "memory" => Ok(StorageBackend::Memory),
        other => Err(format!("unknown storage '{}' (expected file, keyring or memory)", other)),
    }
}
