use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Project, ProjectStatus, Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Overdue,
    Today,
    Upcoming,
}

impl Urgency {
    pub fn from_days_remaining(days: i64) -> Self {
        match days {
            d if d < 0 => Self::Overdue,
            0 => Self::Today,
            _ => Self::Upcoming,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Today => "today",
            Self::Upcoming => "upcoming",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AlertSubject {
    Project {
        id: String,
        name: String,
        owner: String,
        deadline: NaiveDate,
    },
    Task {
        id: String,
        title: String,
        assignee: String,
        due_date: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeadlineAlert {
    #[serde(flatten)]
    pub subject: AlertSubject,
    pub days_remaining: i64,
    pub urgency: Urgency,
}

/// Alerts for active projects and open tasks whose date is at most
/// `days_ahead` days away (overdue included). Any `days_ahead` is accepted.
///
/// Done and blocked tasks never alert. The result is sorted by days remaining,
/// most urgent first; entries with equal days keep projects before tasks.
pub fn deadline_alerts(
    projects: &[Project],
    tasks: &[Task],
    days_ahead: i64,
    today: NaiveDate,
) -> Vec<DeadlineAlert> {
    let mut alerts = Vec::new();

    for project in projects.iter().filter(|p| p.status == ProjectStatus::Active) {
        let delta = project.days_remaining(today);
        if delta <= days_ahead {
            alerts.push(DeadlineAlert {
                subject: AlertSubject::Project {
                    id: project.id.clone(),
                    name: project.name.clone(),
                    owner: project.owner.clone(),
                    deadline: project.deadline,
                },
                days_remaining: delta,
                urgency: Urgency::from_days_remaining(delta),
            });
        }
    }

    for task in tasks {
        if matches!(task.status, TaskStatus::Done | TaskStatus::Blocked) {
            continue;
        }
        let Some(due) = task.due_date else { continue };
        let delta = (due - today).num_days();
        if delta > days_ahead {
            continue;
        }
        alerts.push(DeadlineAlert {
            subject: AlertSubject::Task {
                id: task.id.clone(),
                title: task.title.clone(),
                assignee: task.assignee.clone(),
                due_date: due,
            },
            days_remaining: delta,
            urgency: Urgency::from_days_remaining(delta),
        });
    }

    alerts.sort_by_key(|a| a.days_remaining);
    alerts
}
