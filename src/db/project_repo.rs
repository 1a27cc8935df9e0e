use rusqlite::{params, Connection, OptionalExtension};

use crate::error::ProjaiError;
use crate::models::{Project, ProjectStatus};

const PROJECT_COLUMNS: &str = "id, name, owner, deadline, status, description, created_at";

pub fn insert_project(conn: &Connection, project: &Project) -> Result<(), ProjaiError> {
    conn.execute(
        "INSERT INTO projects (id, name, owner, deadline, status, description, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            project.id,
            project.name,
            project.owner,
            project.deadline,
            project.status.as_str(),
            project.description,
            project.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_project(conn: &Connection, id: &str) -> Result<Option<Project>, ProjaiError> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1");
    let project = conn
        .query_row(&sql, params![id], row_to_project)
        .optional()?;
    Ok(project)
}

/// Projects ordered by deadline, optionally restricted to one status.
pub fn list_projects(
    conn: &Connection,
    status: Option<ProjectStatus>,
) -> Result<Vec<Project>, ProjaiError> {
    let projects = match status {
        Some(status) => {
            let sql = format!(
                "SELECT {PROJECT_COLUMNS} FROM projects WHERE status = ?1 ORDER BY deadline ASC, rowid ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![status.as_str()], row_to_project)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
        None => {
            let sql = format!(
                "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY deadline ASC, rowid ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], row_to_project)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
    };
    Ok(projects)
}

/// Returns false when no project has that id.
pub fn update_project_status(
    conn: &Connection,
    id: &str,
    status: ProjectStatus,
) -> Result<bool, ProjaiError> {
    let changed = conn.execute(
        "UPDATE projects SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(changed > 0)
}

/// Resolve a project reference: exact ID → ID prefix → exact name → name partial match.
pub fn resolve_project(conn: &Connection, reference: &str) -> Result<Project, ProjaiError> {
    if let Some(project) = get_project(conn, reference)? {
        return Ok(project);
    }

    let by_prefix = query_projects(conn, "id LIKE ?1", &format!("{reference}%"))?;
    if let Some(project) = pick_unique(reference, by_prefix)? {
        return Ok(project);
    }

    let by_name = query_projects(conn, "name = ?1", reference)?;
    if let Some(project) = pick_unique(reference, by_name)? {
        return Ok(project);
    }

    let by_partial = query_projects(conn, "name LIKE ?1", &format!("%{reference}%"))?;
    pick_unique(reference, by_partial)?.ok_or_else(|| ProjaiError::project_not_found(reference))
}

fn query_projects(conn: &Connection, filter: &str, arg: &str) -> Result<Vec<Project>, ProjaiError> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE {filter} ORDER BY rowid");
    let mut stmt = conn.prepare(&sql)?;
    let projects = stmt
        .query_map(params![arg], row_to_project)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(projects)
}

fn pick_unique(reference: &str, mut projects: Vec<Project>) -> Result<Option<Project>, ProjaiError> {
    match projects.len() {
        0 => Ok(None),
        1 => Ok(projects.pop()),
        _ => {
            let candidates: Vec<String> = projects
                .iter()
                .map(|p| format!("{} ({})", p.name, p.id))
                .collect();
            Err(ProjaiError::ambiguous_ref(reference, &candidates))
        }
    }
}

fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        owner: row.get(2)?,
        deadline: row.get(3)?,
        status: ProjectStatus::from_str(&row.get::<_, String>(4)?).unwrap_or(ProjectStatus::Active),
        description: row.get(5)?,
        created_at: row.get(6)?,
    })
}
