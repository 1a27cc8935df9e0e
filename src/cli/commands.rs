use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "projai",
    version = VERSION,
    about = "Project tracking with critical path, burndown, Gantt export and deadline alerts",
    after_help = "\
NOTE:
  DB is stored at <git-root>/.worktoolai/projai/projai.db (override with PROJAI_DB).
  Run `projai init` before any other command.
  Log level: PROJAI_LOG=<off|error|warn|info|debug|trace> (default warn, logs go to stderr).

EXIT CODES:
  0  Success
  1  Error (DB, validation, not found, etc.)

CRITICAL PATH:
  Longest chain by story points through task dependencies.
  Dependencies on unknown task ids are ignored.
  If dependencies form a cycle, all tasks are listed by priority instead."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Specify project by name or ID
    #[arg(long, global = true)]
    pub project: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize projai in this repository
    Init,

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Reports for the active project
    #[command(subcommand)]
    Report(ReportCommands),

    /// Deadline alerts across all active projects and open tasks
    Alerts {
        /// Alert window in days (default from config, 7)
        #[arg(long, allow_negative_numbers = true)]
        days_ahead: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        name: String,
        #[arg(long)]
        owner: String,
        /// Deadline as YYYY-MM-DD
        #[arg(long)]
        deadline: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List projects by deadline
    List {
        /// Only projects with this status (active|on_hold|completed|cancelled)
        #[arg(long)]
        status: Option<String>,
    },
    /// Show project details
    Show {
        /// Project name or ID
        reference: String,
    },
    /// Set active project
    Activate {
        /// Project name or ID
        reference: String,
    },
    /// Change project status
    Status {
        /// Project name or ID
        reference: String,
        /// active|on_hold|completed|cancelled
        status: String,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to the active project
    Add {
        /// Task title
        title: String,
        #[arg(long)]
        assignee: String,
        /// 1 (critical) to 4 (low)
        #[arg(long, default_value = "3")]
        priority: i32,
        /// Story points
        #[arg(long, default_value = "1")]
        points: i64,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
        /// Add dependency: task runs after this task ID
        #[arg(long)]
        after: Vec<String>,
    },
    /// List tasks in the active project
    List,
    /// Show task details
    Show {
        /// Task ID or prefix
        id: String,
    },
    /// Set task status (todo|in_progress|review|done|blocked)
    Status {
        id: String,
        status: String,
    },
    /// Add a dependency: <id> depends on <dep_id>
    Dep {
        /// Task ID
        id: String,
        /// Dependency task ID
        dep_id: String,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Longest dependency chain by story points
    CriticalPath,
    /// Ideal vs actual remaining story points per day
    Burndown {
        /// Sprint length in days (default from config, 14)
        #[arg(long)]
        sprint_days: Option<u32>,
    },
    /// Gantt CSV export
    Gantt {
        /// Write CSV to this file instead of stdout
        #[arg(long)]
        output: Option<std::path::PathBuf>,
    },
    /// Task and story point statistics
    Stats,
}
