use std::fs;
use std::path::Path;

use serde_json::json;

use crate::cli::commands::ReportCommands;
use crate::cli::project::resolve_project_id;
use crate::cli::{finish, open_manager};
use crate::config::Config;
use crate::error::ProjaiError;
use crate::output;

pub fn run(cmd: ReportCommands, json_output: bool, project_flag: Option<&str>) -> i32 {
    let result = match cmd {
        ReportCommands::CriticalPath => run_critical_path(json_output, project_flag),
        ReportCommands::Burndown { sprint_days } => run_burndown(sprint_days, json_output, project_flag),
        ReportCommands::Gantt { output } => run_gantt(output.as_deref(), json_output, project_flag),
        ReportCommands::Stats => run_stats(json_output, project_flag),
    };
    finish(result, json_output)
}

fn run_critical_path(json_output: bool, project_flag: Option<&str>) -> Result<i32, ProjaiError> {
    let pm = open_manager()?;
    let project_id = resolve_project_id(&pm, project_flag)?;
    let path = pm.get_critical_path(&project_id)?;
    let total: i64 = path.iter().map(|t| t.story_points).sum();

    if json_output {
        let path_json: Vec<_> = path.iter().map(output::json::task_summary).collect();
        output::json::print(&output::json::success(json!({
            "project_id": project_id,
            "path": path_json,
            "total_story_points": total
        })));
    } else if path.is_empty() {
        println!("No tasks.");
    } else {
        println!("Critical path ({total} points):");
        for (i, t) in path.iter().enumerate() {
            println!("  {}. {} ({}) sp={}", i + 1, t.title, t.id, t.story_points);
        }
    }
    Ok(0)
}

fn run_burndown(sprint_days: Option<u32>, json_output: bool, project_flag: Option<&str>) -> Result<i32, ProjaiError> {
    let sprint_days = sprint_days.unwrap_or_else(|| Config::load().sprint_days);
    let pm = open_manager()?;
    let project_id = resolve_project_id(&pm, project_flag)?;
    let chart = pm.calculate_burndown(&project_id, sprint_days)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "project_id": project_id,
            "sprint_days": sprint_days,
            "chart": output::json::to_value(&chart)
        })));
    } else {
        output::text::print_burndown(&chart);
    }
    Ok(0)
}

fn run_gantt(target: Option<&Path>, json_output: bool, project_flag: Option<&str>) -> Result<i32, ProjaiError> {
    let pm = open_manager()?;
    let project_id = resolve_project_id(&pm, project_flag)?;
    let csv = pm.export_gantt_csv(&project_id)?;

    if let Some(path) = target {
        fs::write(path, &csv)?;
    }

    if json_output {
        let mut data = json!({ "project_id": project_id, "csv": csv });
        if let Some(path) = target {
            data["path"] = json!(path.to_string_lossy());
        }
        output::json::print(&output::json::success(data));
    } else if let Some(path) = target {
        println!("Wrote Gantt CSV to {}", path.display());
    } else {
        print!("{csv}");
    }
    Ok(0)
}

fn run_stats(json_output: bool, project_flag: Option<&str>) -> Result<i32, ProjaiError> {
    let pm = open_manager()?;
    let project_id = resolve_project_id(&pm, project_flag)?;
    let stats = pm.project_stats(&project_id)?;

    if json_output {
        output::json::print(&output::json::success(output::json::stats_json(&stats)));
    } else {
        output::text::print_stats(&stats);
    }
    Ok(0)
}
