//! Read-only reports derived from a project's task snapshot.
//!
//! Every function here is pure: callers pass the tasks (and "today") in, so
//! the reports never touch the store and are deterministic under test.

pub mod burndown;
pub mod deadlines;
pub mod gantt;
pub mod stats;

pub use burndown::{burndown, BurndownPoint};
pub use deadlines::{deadline_alerts, AlertSubject, DeadlineAlert, Urgency};
pub use gantt::{gantt_csv, GANTT_HEADER};
pub use stats::{project_stats, ProjectStats};

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
