pub mod commands;
pub mod init;
pub mod project;
pub mod task;
pub mod report;
pub mod alerts;

pub use commands::*;

use chrono::NaiveDate;

use crate::db::connection;
use crate::error::ProjaiError;
use crate::manager::ProjectManager;
use crate::output;

/// Turn a command result into an exit code, printing the error envelope on failure.
pub(crate) fn finish(result: Result<i32, ProjaiError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            log::debug!("event=command module=cli status=error code={}", e.code.as_str());
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

pub(crate) fn open_manager() -> Result<ProjectManager, ProjaiError> {
    Ok(ProjectManager::from_connection(connection::open_db()?))
}

pub(crate) fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ProjaiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ProjaiError::validation(format!("{field} must be a date as YYYY-MM-DD, got '{value}'"))
    })
}
