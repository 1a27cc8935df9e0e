use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "on_hold" => Some(Self::OnHold),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub deadline: NaiveDate,
    pub status: ProjectStatus,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>, owner: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            id: super::new_id(),
            name: name.into(),
            owner: owner.into(),
            deadline,
            status: ProjectStatus::Active,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Past the deadline and still open. Completed and cancelled projects are never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_terminal() && today > self.deadline
    }

    /// Whole days until the deadline; negative once it has passed.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }
}
