use std::collections::HashMap;

use rusqlite::{params, Connection};

use crate::error::ProjaiError;
use crate::models::TaskDependency;

/// Idempotent: inserting an existing edge is a no-op. The target need not exist.
pub fn add_dependency(conn: &Connection, task_id: &str, depends_on: &str) -> Result<(), ProjaiError> {
    conn.execute(
        "INSERT OR IGNORE INTO dependencies (task_id, depends_on) VALUES (?1, ?2)",
        params![task_id, depends_on],
    )?;
    Ok(())
}

/// Get all dependencies (predecessors) of a task, in insertion order.
pub fn get_dependencies(conn: &Connection, task_id: &str) -> Result<Vec<String>, ProjaiError> {
    let mut stmt = conn.prepare(
        "SELECT depends_on FROM dependencies WHERE task_id = ?1 ORDER BY rowid",
    )?;
    let deps = stmt
        .query_map(params![task_id], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(deps)
}

/// All edges whose dependent task belongs to the project.
pub fn get_all_dependencies_for_project(
    conn: &Connection,
    project_id: &str,
) -> Result<Vec<TaskDependency>, ProjaiError> {
    let mut stmt = conn.prepare(
        "SELECT d.task_id, d.depends_on
         FROM dependencies d
         JOIN tasks t ON d.task_id = t.id
         WHERE t.project_id = ?1
         ORDER BY d.rowid",
    )?;
    let deps = stmt
        .query_map(params![project_id], |row| {
            Ok(TaskDependency {
                task_id: row.get(0)?,
                depends_on: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(deps)
}

/// Group a project's edges by dependent task id.
pub fn dependency_map_for_project(
    conn: &Connection,
    project_id: &str,
) -> Result<HashMap<String, Vec<String>>, ProjaiError> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for edge in get_all_dependencies_for_project(conn, project_id)? {
        map.entry(edge.task_id).or_default().push(edge.depends_on);
    }
    Ok(map)
}
