use log::info;
use rusqlite::Connection;

use crate::error::ProjaiError;

pub fn run_migrations(conn: &Connection) -> Result<(), ProjaiError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            owner TEXT NOT NULL,
            deadline TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'active',
            description TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL REFERENCES projects(id),
            title TEXT NOT NULL,
            assignee TEXT NOT NULL,
            priority INTEGER NOT NULL DEFAULT 3,
            status TEXT NOT NULL DEFAULT 'todo',
            due_date TEXT,
            story_points INTEGER NOT NULL DEFAULT 1,
            completed_at TEXT,
            created_at TEXT NOT NULL
        );

        -- depends_on is not a foreign key: dangling targets are allowed.
        CREATE TABLE IF NOT EXISTS dependencies (
            task_id TEXT NOT NULL REFERENCES tasks(id),
            depends_on TEXT NOT NULL,
            PRIMARY KEY (task_id, depends_on)
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id);
        CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
        CREATE INDEX IF NOT EXISTS idx_deps_task ON dependencies(task_id);
        ",
    )?;
    info!("event=migrations module=db status=ok");
    Ok(())
}
