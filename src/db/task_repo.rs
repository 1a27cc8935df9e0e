use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::ProjaiError;
use crate::models::{Task, TaskStatus};

use super::dependency_repo;

const TASK_COLUMNS: &str = "id, project_id, title, assignee, priority, status, due_date,
                story_points, completed_at, created_at";

/// Insert the task row only; edges are written by the caller.
pub fn insert_task(conn: &Connection, task: &Task) -> Result<(), ProjaiError> {
    conn.execute(
        "INSERT INTO tasks (id, project_id, title, assignee, priority, status, due_date,
                            story_points, completed_at, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            task.id,
            task.project_id,
            task.title,
            task.assignee,
            task.priority,
            task.status.as_str(),
            task.due_date,
            task.story_points,
            task.completed_at,
            task.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_task(conn: &Connection, id: &str) -> Result<Option<Task>, ProjaiError> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
    let task = conn.query_row(&sql, params![id], row_to_task).optional()?;
    match task {
        Some(mut task) => {
            task.dependencies = dependency_repo::get_dependencies(conn, &task.id)?;
            Ok(Some(task))
        }
        None => Ok(None),
    }
}

/// Tasks of a project ordered by priority, then due date (missing dates last),
/// then insertion order. This order is the tie-break input of the critical path.
pub fn list_tasks_by_project(conn: &Connection, project_id: &str) -> Result<Vec<Task>, ProjaiError> {
    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE project_id = ?1
         ORDER BY priority ASC, due_date IS NULL, due_date ASC, rowid ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut tasks = stmt
        .query_map(params![project_id], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut deps = dependency_repo::dependency_map_for_project(conn, project_id)?;
    for task in &mut tasks {
        task.dependencies = deps.remove(&task.id).unwrap_or_default();
    }
    Ok(tasks)
}

/// Sets `completed_at` to now when the new status is done and clears it otherwise.
/// Returns false when no task has that id.
pub fn update_task_status(conn: &Connection, id: &str, status: TaskStatus) -> Result<bool, ProjaiError> {
    let completed_at = (status == TaskStatus::Done).then(Utc::now);
    let changed = conn.execute(
        "UPDATE tasks SET status = ?1, completed_at = ?2 WHERE id = ?3",
        params![status.as_str(), completed_at, id],
    )?;
    Ok(changed > 0)
}

/// Open tasks (not done, not blocked) with a due date, in any project.
pub fn open_dated_tasks(conn: &Connection) -> Result<Vec<Task>, ProjaiError> {
    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE status NOT IN ('done', 'blocked') AND due_date IS NOT NULL
         ORDER BY due_date ASC, rowid ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let tasks = stmt
        .query_map([], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

/// Resolve task by ID prefix within a project.
pub fn resolve_task(conn: &Connection, project_id: &str, reference: &str) -> Result<Task, ProjaiError> {
    // Exact ID match first
    if let Some(task) = get_task(conn, reference)? {
        if task.project_id == project_id {
            return Ok(task);
        }
    }

    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = ?1 AND id LIKE ?2 ORDER BY rowid"
    );
    let mut stmt = conn.prepare(&sql)?;
    let prefix = format!("{reference}%");
    let mut tasks: Vec<Task> = stmt
        .query_map(params![project_id, prefix], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;

    match tasks.len() {
        0 => Err(ProjaiError::task_not_found(reference)),
        1 => {
            let mut task = tasks.remove(0);
            task.dependencies = dependency_repo::get_dependencies(conn, &task.id)?;
            Ok(task)
        }
        _ => {
            let candidates: Vec<String> = tasks.iter().map(|t| format!("{} ({})", t.title, t.id)).collect();
            Err(ProjaiError::ambiguous_ref(reference, &candidates))
        }
    }
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        assignee: row.get(3)?,
        priority: row.get(4)?,
        status: TaskStatus::from_str(&row.get::<_, String>(5)?).unwrap_or(TaskStatus::Todo),
        due_date: row.get(6)?,
        story_points: row.get(7)?,
        dependencies: Vec::new(),
        completed_at: row.get(8)?,
        created_at: row.get(9)?,
    })
}
