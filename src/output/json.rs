use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ProjaiError;
use crate::models::{Project, Task};
use crate::report::ProjectStats;

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &ProjaiError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn print(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Error: failed to encode output: {e}"),
    }
}

/// Serialize a report row type; falls back to `null` on encoder failure.
pub fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

pub fn project_json(p: &Project) -> Value {
    json!({
        "id": p.id,
        "name": p.name,
        "owner": p.owner,
        "deadline": p.deadline.to_string(),
        "status": p.status.as_str(),
        "description": p.description,
        "created_at": p.created_at.to_rfc3339()
    })
}

pub fn task_summary(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "assignee": t.assignee,
        "priority": t.priority,
        "status": t.status.as_str(),
        "story_points": t.story_points
    })
}

pub fn task_detail(t: &Task) -> Value {
    let mut v = task_summary(t);
    v["project_id"] = json!(t.project_id);
    v["due_date"] = json!(t.due_date.map(|d| d.to_string()));
    v["dependencies"] = json!(t.dependencies);
    v["completed_at"] = json!(t.completed_at.map(|c| c.to_rfc3339()));
    v["created_at"] = json!(t.created_at.to_rfc3339());
    v
}

pub fn stats_json(s: &ProjectStats) -> Value {
    json!({
        "total_tasks": s.total_tasks,
        "done_tasks": s.done_tasks,
        "pct_done": s.pct_done,
        "total_story_points": s.total_story_points,
        "done_story_points": s.done_story_points,
        "by_assignee": s.by_assignee
    })
}
