use serde_json::json;

use crate::cli::commands::ProjectCommands;
use crate::cli::{finish, open_manager, parse_date};
use crate::config::Config;
use crate::error::ProjaiError;
use crate::manager::ProjectManager;
use crate::models::ProjectStatus;
use crate::output;

pub fn run(cmd: ProjectCommands, json_output: bool) -> i32 {
    let result = match cmd {
        ProjectCommands::Create { name, owner, deadline, description } => {
            run_create(&name, &owner, &deadline, description.as_deref(), json_output)
        }
        ProjectCommands::List { status } => run_list(status.as_deref(), json_output),
        ProjectCommands::Show { reference } => run_show(&reference, json_output),
        ProjectCommands::Activate { reference } => run_activate(&reference, json_output),
        ProjectCommands::Status { reference, status } => run_status(&reference, &status, json_output),
    };
    finish(result, json_output)
}

fn parse_status(value: &str) -> Result<ProjectStatus, ProjaiError> {
    ProjectStatus::from_str(value).ok_or_else(|| {
        ProjaiError::validation(format!(
            "Unknown project status '{value}'. Expected active|on_hold|completed|cancelled"
        ))
    })
}

fn run_create(
    name: &str,
    owner: &str,
    deadline: &str,
    description: Option<&str>,
    json_output: bool,
) -> Result<i32, ProjaiError> {
    if name.trim().is_empty() {
        return Err(ProjaiError::validation("Project name is required"));
    }
    let deadline = parse_date(deadline, "deadline")?;
    let pm = open_manager()?;
    let project = pm.create_project(name, owner, deadline, description)?;

    // First project becomes the active one.
    let mut config = Config::load();
    let activated = match config.active_project_id.as_deref() {
        None => true,
        Some(id) => pm.get_project(id)?.is_none(),
    };
    if activated {
        config.active_project_id = Some(project.id.clone());
        config.save()?;
    }

    if json_output {
        let mut data = output::json::project_json(&project);
        data["active"] = json!(activated);
        output::json::print(&output::json::success(data));
    } else {
        println!("Created project: {} ({})", project.name, project.id);
        if activated {
            println!("Activated project: {}", project.name);
        }
    }
    Ok(0)
}

fn run_list(status: Option<&str>, json_output: bool) -> Result<i32, ProjaiError> {
    let status = status.map(parse_status).transpose()?;
    let pm = open_manager()?;
    let projects = pm.list_projects(status)?;
    let active_id = Config::load().active_project_id;

    if json_output {
        let projects_json: Vec<_> = projects
            .iter()
            .map(|p| {
                let mut v = output::json::project_json(p);
                if Some(&p.id) == active_id.as_ref() {
                    v["active"] = json!(true);
                }
                v
            })
            .collect();
        output::json::print(&output::json::success(json!({ "projects": projects_json })));
    } else {
        output::text::print_project_list(&projects, active_id.as_deref());
    }
    Ok(0)
}

fn run_show(reference: &str, json_output: bool) -> Result<i32, ProjaiError> {
    let pm = open_manager()?;
    let project = pm.resolve_project(reference)?;
    let tasks = pm.get_project_tasks(&project.id)?;
    let stats = pm.project_stats(&project.id)?;
    let today = pm.today();

    if json_output {
        let tasks_json: Vec<_> = tasks.iter().map(output::json::task_summary).collect();
        output::json::print(&output::json::success(json!({
            "project": output::json::project_json(&project),
            "overdue": project.is_overdue(today),
            "days_remaining": project.days_remaining(today),
            "tasks": tasks_json,
            "stats": output::json::stats_json(&stats)
        })));
    } else {
        output::text::print_project(&project);
        if project.is_overdue(today) {
            println!("  OVERDUE by {} days", -project.days_remaining(today));
        }
        println!();
        output::text::print_stats(&stats);
        println!("\nTasks:");
        output::text::print_task_list(&tasks);
    }
    Ok(0)
}

fn run_activate(reference: &str, json_output: bool) -> Result<i32, ProjaiError> {
    let pm = open_manager()?;
    let project = pm.resolve_project(reference)?;

    let mut config = Config::load();
    config.active_project_id = Some(project.id.clone());
    config.save()?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "activated": { "id": project.id, "name": project.name }
        })));
    } else {
        println!("Activated project: {} ({})", project.name, project.id);
    }
    Ok(0)
}

fn run_status(reference: &str, status: &str, json_output: bool) -> Result<i32, ProjaiError> {
    let status = parse_status(status)?;
    let pm = open_manager()?;
    let project = pm.resolve_project(reference)?;
    if !pm.update_project_status(&project.id, status)? {
        return Err(ProjaiError::project_not_found(reference));
    }

    if json_output {
        output::json::print(&output::json::success(json!({
            "project": { "id": project.id, "name": project.name, "status": status.as_str() }
        })));
    } else {
        println!("Project {} → {}", project.name, status.as_str());
    }
    Ok(0)
}

/// `--project` wins; otherwise the active project from config, which must still exist.
pub fn resolve_project_id(pm: &ProjectManager, project_flag: Option<&str>) -> Result<String, ProjaiError> {
    if let Some(reference) = project_flag {
        return Ok(pm.resolve_project(reference)?.id);
    }
    let id = Config::load()
        .active_project_id
        .ok_or_else(ProjaiError::no_active_project)?;
    match pm.get_project(&id)? {
        Some(project) => Ok(project.id),
        None => Err(ProjaiError::project_not_found(&id)),
    }
}
