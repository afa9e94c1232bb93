//! Command-line interface definitions.
//!
//! The verb surface: `login`, `logout`, `me`, `projects`, `issues`,
//! `aliases`. Anywhere a numeric ID is accepted, a previously defined
//! alias works too.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::api::types::StatusFilter;

/// A command-line client for Redmine.
#[derive(Debug, Parser)]
#[command(name = "rmine", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Connect to a Redmine server and store credentials
    Login {
        /// Server URL (prompted for if omitted)
        #[arg(long)]
        url: Option<String>,
        /// API key (prompted for if omitted)
        #[arg(long)]
        key: Option<String>,
    },

    /// Remove stored credentials
    Logout,

    /// Show the authenticated account
    Me,

    /// Work with projects
    #[command(visible_alias = "p")]
    Projects {
        #[command(subcommand)]
        action: ProjectCommands,
    },

    /// Work with issues
    #[command(visible_alias = "i")]
    Issues {
        #[command(subcommand)]
        action: IssueCommands,
    },

    /// Words that can be used instead of issue or project ids
    #[command(visible_aliases = ["a", "alias"])]
    Aliases {
        #[command(subcommand)]
        action: AliasCommands,
    },
}

/// Project subcommands.
#[derive(Debug, Subcommand)]
pub enum ProjectCommands {
    /// List projects visible to you
    #[command(visible_aliases = ["ls", "all"])]
    List {
        /// Maximum number of projects to show
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show details of one project
    Show {
        /// Project ID or alias
        id: String,
        /// Open the project in the browser instead
        #[arg(long)]
        web: bool,
    },
}

/// Issue subcommands.
#[derive(Debug, Subcommand)]
pub enum IssueCommands {
    /// List issues (defaults to your open issues)
    #[command(visible_aliases = ["ls", "all"])]
    List(IssueListArgs),

    /// Show details of one issue
    Show {
        /// Issue ID or alias
        id: String,
        /// Open the issue in the browser instead
        #[arg(long)]
        web: bool,
    },
}

/// Filters for `issues list`.
#[derive(Debug, Args)]
pub struct IssueListArgs {
    /// Only issues in this project (ID or alias)
    #[arg(long)]
    pub project: Option<String>,

    /// Only issues assigned to this user ("me", an ID, or an alias)
    #[arg(long)]
    pub assignee: Option<String>,

    /// Filter by status
    #[arg(long, value_enum, default_value_t = StatusArg::Open)]
    pub status: StatusArg,

    /// Only issues whose subject contains this text
    #[arg(long)]
    pub query: Option<String>,

    /// Maximum number of issues to show
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Status filter values accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Open issues only
    Open,
    /// Closed issues only
    Closed,
    /// All issues
    All,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Open => StatusFilter::Open,
            StatusArg::Closed => StatusFilter::Closed,
            StatusArg::All => StatusFilter::All,
        }
    }
}

/// Alias subcommands.
#[derive(Debug, Subcommand)]
pub enum AliasCommands {
    /// List all aliases
    #[command(visible_aliases = ["ls", "all"])]
    List,

    /// Add an alias entry
    #[command(visible_aliases = ["set", "new"])]
    Add {
        /// The alias name (1-30 letters, digits, '-' or '_')
        key: String,
        /// The numeric ID it stands for
        id: i64,
    },

    /// Remove an alias entry
    #[command(visible_aliases = ["remove", "rm", "del"])]
    Delete {
        /// The alias name
        key: String,
    },
}
