use serde_json::json;

use crate::cli::{finish, open_manager};
use crate::config::Config;
use crate::error::ProjaiError;
use crate::output;

pub fn run(days_ahead: Option<i64>, json_output: bool) -> i32 {
    finish(run_inner(days_ahead, json_output), json_output)
}

fn run_inner(days_ahead: Option<i64>, json_output: bool) -> Result<i32, ProjaiError> {
    let days_ahead = days_ahead.unwrap_or_else(|| Config::load().days_ahead);
    let pm = open_manager()?;
    let alerts = pm.check_deadlines(days_ahead)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "days_ahead": days_ahead,
            "alerts": output::json::to_value(&alerts)
        })));
    } else {
        output::text::print_alerts(&alerts);
    }
    Ok(0)
}
