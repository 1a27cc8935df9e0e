use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};
use rusqlite::Connection;

use crate::error::{ErrorCode, ProjaiError};

use super::migrations;

/// Overrides the database location; `config.json` then lives next to it.
pub const DB_PATH_ENV: &str = "PROJAI_DB";

/// Find the .git root by walking up from current directory.
pub fn find_git_root() -> Result<PathBuf, ProjaiError> {
    let mut dir = env::current_dir()?;
    loop {
        if dir.join(".git").exists() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(ProjaiError::new(
                ErrorCode::NotInitialized,
                "Not inside a git repository. Set PROJAI_DB or run projai inside a git repository.",
            ));
        }
    }
}

/// Get the path to the projai database.
pub fn db_path() -> Result<PathBuf, ProjaiError> {
    if let Some(path) = env::var_os(DB_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let root = find_git_root()?;
    Ok(root.join(".worktoolai").join("projai").join("projai.db"))
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf, ProjaiError> {
    let db = db_path()?;
    let dir = db.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(dir.join("config.json"))
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db() -> Result<Connection, ProjaiError> {
    let path = db_path()?;
    if !path.exists() {
        return Err(ProjaiError::not_initialized());
    }
    open_at(&path)
}

/// Open (creating if needed) a database file and apply migrations.
pub fn open_at(path: &Path) -> Result<Connection, ProjaiError> {
    let conn = Connection::open(path).map_err(|e| {
        error!("event=db_open module=db status=error mode=file error={e}");
        ProjaiError::from(e)
    })?;
    configure_connection(&conn, true)?;
    migrations::run_migrations(&conn)?;
    info!("event=db_open module=db status=ok mode=file");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection, ProjaiError> {
    let conn = Connection::open_in_memory()?;
    configure_connection(&conn, false)?;
    migrations::run_migrations(&conn)?;
    info!("event=db_open module=db status=ok mode=memory");
    Ok(conn)
}

/// Initialize the database: create directories, database, and run migrations.
pub fn init_db() -> Result<PathBuf, ProjaiError> {
    let path = db_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    open_at(&path)?;
    Ok(path)
}

fn configure_connection(conn: &Connection, file_backed: bool) -> Result<(), ProjaiError> {
    if file_backed {
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;",
        )?;
    }
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(())
}
