use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Task;

use super::round_to;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStats {
    pub total_tasks: usize,
    pub done_tasks: usize,
    pub pct_done: f64,
    pub total_story_points: i64,
    pub done_story_points: i64,
    /// Story points assigned per person, across all statuses.
    pub by_assignee: BTreeMap<String, i64>,
}

pub fn project_stats(tasks: &[Task]) -> ProjectStats {
    let total_tasks = tasks.len();
    let done_tasks = tasks.iter().filter(|t| t.is_done()).count();
    let pct_done = if total_tasks > 0 {
        round_to(done_tasks as f64 / total_tasks as f64 * 100.0, 1)
    } else {
        0.0
    };

    let mut by_assignee: BTreeMap<String, i64> = BTreeMap::new();
    for task in tasks {
        *by_assignee.entry(task.assignee.clone()).or_default() += task.story_points;
    }

    ProjectStats {
        total_tasks,
        done_tasks,
        pct_done,
        total_story_points: tasks.iter().map(|t| t.story_points).sum(),
        done_story_points: tasks.iter().filter(|t| t.is_done()).map(|t| t.story_points).sum(),
        by_assignee,
    }
}
