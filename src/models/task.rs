use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "review" => Some(Self::Review),
            "done" => Some(Self::Done),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

/// Priority 1 is critical, 4 is low.
pub const PRIORITY_CRITICAL: i32 = 1;
pub const PRIORITY_LOW: i32 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub assignee: String,
    pub priority: i32,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub story_points: i64,
    /// Ids this task depends on. Entries need not resolve to a stored task.
    pub dependencies: Vec<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        project_id: impl Into<String>,
        title: impl Into<String>,
        assignee: impl Into<String>,
        priority: i32,
    ) -> Self {
        Self {
            id: super::new_id(),
            project_id: project_id.into(),
            title: title.into(),
            assignee: assignee.into(),
            priority,
            status: TaskStatus::Todo,
            due_date: None,
            story_points: 1,
            dependencies: Vec::new(),
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_story_points(mut self, points: i64) -> Self {
        self.story_points = points;
        self
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn depends_on(mut self, dep: &Task) -> Self {
        self.dependencies.push(dep.id.clone());
        self
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}
