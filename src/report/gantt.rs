use std::collections::HashSet;

use crate::error::ProjaiError;
use crate::models::Task;

pub const GANTT_HEADER: [&str; 9] = [
    "Task ID",
    "Title",
    "Assignee",
    "Priority",
    "Status",
    "Story Points",
    "Due Date",
    "Dependencies",
    "Critical Path",
];

/// Display length of task ids in the export.
pub const SHORT_ID_LEN: usize = 8;

/// Render one CSV row per task, flagging members of `critical` with `YES`.
pub fn gantt_csv(tasks: &[Task], critical: &[Task]) -> Result<String, ProjaiError> {
    let critical_ids: HashSet<&str> = critical.iter().map(|t| t.id.as_str()).collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(GANTT_HEADER)?;
    for task in tasks {
        let deps = task
            .dependencies
            .iter()
            .map(|d| short_id(d))
            .collect::<Vec<_>>()
            .join("|");
        writer.write_record([
            short_id(&task.id).to_string(),
            task.title.clone(),
            task.assignee.clone(),
            task.priority.to_string(),
            task.status.as_str().to_string(),
            task.story_points.to_string(),
            task.due_date.map(|d| d.to_string()).unwrap_or_default(),
            deps,
            if critical_ids.contains(task.id.as_str()) { "YES" } else { "no" }.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ProjaiError::io(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ProjaiError::io(e.to_string()))
}

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
