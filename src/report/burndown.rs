use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::Task;

use super::round_to;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurndownPoint {
    pub day: u32,
    pub date: NaiveDate,
    pub ideal: f64,
    pub actual: i64,
}

/// Ideal vs actual remaining story points for each day of the window
/// `today - sprint_days ..= today`.
///
/// `actual` starts at the total and drops on each day by the points of tasks
/// completed that day; days without completions carry the previous value.
/// Returns an empty chart when there is nothing to burn down (no story
/// points) or when `sprint_days` is zero.
pub fn burndown(tasks: &[Task], sprint_days: u32, today: NaiveDate) -> Vec<BurndownPoint> {
    let total: i64 = tasks.iter().map(|t| t.story_points).sum();
    if total == 0 || sprint_days == 0 {
        return Vec::new();
    }

    let Some(start) = today.checked_sub_days(Days::new(u64::from(sprint_days))) else {
        return Vec::new();
    };
    let ideal_per_day = total as f64 / f64::from(sprint_days);

    let mut completed_by_day: HashMap<NaiveDate, i64> = HashMap::new();
    for task in tasks.iter().filter(|t| t.is_done()) {
        if let Some(completed_at) = task.completed_at {
            let day = completed_at.date_naive();
            if day >= start {
                *completed_by_day.entry(day).or_default() += task.story_points;
            }
        }
    }

    let mut remaining = total;
    (0..=sprint_days)
        .filter_map(|i| {
            let date = start.checked_add_days(Days::new(u64::from(i)))?;
            remaining -= completed_by_day.get(&date).copied().unwrap_or(0);
            Some(BurndownPoint {
                day: i,
                date,
                ideal: round_to(total as f64 - ideal_per_day * f64::from(i), 2),
                actual: remaining,
            })
        })
        .collect()
}
