use serde_json::json;

use crate::cli::commands::TaskCommands;
use crate::cli::project::resolve_project_id;
use crate::cli::{finish, open_manager, parse_date};
use crate::error::{ErrorCode, ProjaiError};
use crate::manager::ProjectManager;
use crate::models::{Task, TaskStatus, PRIORITY_CRITICAL, PRIORITY_LOW};
use crate::output;

pub fn run(cmd: TaskCommands, json_output: bool, project_flag: Option<&str>) -> i32 {
    let result = match cmd {
        TaskCommands::Add { title, assignee, priority, points, due, after } => run_add(
            &title,
            &assignee,
            priority,
            points,
            due.as_deref(),
            &after,
            json_output,
            project_flag,
        ),
        TaskCommands::List => run_list(json_output, project_flag),
        TaskCommands::Show { id } => run_show(&id, json_output, project_flag),
        TaskCommands::Status { id, status } => run_status(&id, &status, json_output, project_flag),
        TaskCommands::Dep { id, dep_id } => run_dep(&id, &dep_id, json_output, project_flag),
    };
    finish(result, json_output)
}

fn parse_status(value: &str) -> Result<TaskStatus, ProjaiError> {
    TaskStatus::from_str(value).ok_or_else(|| {
        ProjaiError::validation(format!(
            "Unknown task status '{value}'. Expected todo|in_progress|review|done|blocked"
        ))
    })
}

/// Resolve a dependency reference inside the project. Unknown references are
/// kept verbatim as dangling ids; ambiguity and other errors still fail.
fn resolve_dependency(pm: &ProjectManager, project_id: &str, reference: &str) -> Result<(String, bool), ProjaiError> {
    match pm.resolve_task(project_id, reference) {
        Ok(task) => Ok((task.id, true)),
        Err(e) if e.code == ErrorCode::TaskNotFound => {
            log::warn!("event=dependency_resolve module=cli status=dangling project={project_id}");
            Ok((reference.to_string(), false))
        }
        Err(e) => Err(e),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_add(
    title: &str,
    assignee: &str,
    priority: i32,
    points: i64,
    due: Option<&str>,
    after: &[String],
    json_output: bool,
    project_flag: Option<&str>,
) -> Result<i32, ProjaiError> {
    if title.trim().is_empty() {
        return Err(ProjaiError::validation("Task title is required"));
    }
    if !(PRIORITY_CRITICAL..=PRIORITY_LOW).contains(&priority) {
        return Err(ProjaiError::validation(format!(
            "Priority must be between {PRIORITY_CRITICAL} and {PRIORITY_LOW}, got {priority}"
        )));
    }
    if points < 0 {
        return Err(ProjaiError::validation("Story points cannot be negative"));
    }
    let due = due.map(|d| parse_date(d, "due")).transpose()?;

    let pm = open_manager()?;
    let project_id = resolve_project_id(&pm, project_flag)?;

    // Resolve deps first (before any writes) to fail fast
    let mut deps = Vec::new();
    let mut dangling = Vec::new();
    for dep_ref in after {
        let (id, resolved) = resolve_dependency(&pm, &project_id, dep_ref)?;
        if !resolved {
            dangling.push(id.clone());
        }
        deps.push(id);
    }

    let mut task = Task::new(&project_id, title, assignee, priority)
        .with_story_points(points)
        .with_dependencies(deps);
    task.due_date = due;
    let task = pm.add_task(task)?;

    if json_output {
        let mut data = json!({ "task": output::json::task_detail(&task) });
        if !dangling.is_empty() {
            data["dangling_dependencies"] = json!(dangling);
        }
        output::json::print(&output::json::success(data));
    } else {
        println!("Added task: {} ({})", task.title, task.id);
        for d in &dangling {
            println!("  warning: dependency {d} does not match a task in this project");
        }
    }
    Ok(0)
}

fn run_list(json_output: bool, project_flag: Option<&str>) -> Result<i32, ProjaiError> {
    let pm = open_manager()?;
    let project_id = resolve_project_id(&pm, project_flag)?;
    let tasks = pm.get_project_tasks(&project_id)?;

    if json_output {
        let tasks_json: Vec<_> = tasks.iter().map(output::json::task_summary).collect();
        output::json::print(&output::json::success(json!({ "tasks": tasks_json })));
    } else {
        output::text::print_task_list(&tasks);
    }
    Ok(0)
}

fn run_show(id: &str, json_output: bool, project_flag: Option<&str>) -> Result<i32, ProjaiError> {
    let pm = open_manager()?;
    let project_id = resolve_project_id(&pm, project_flag)?;
    let task = pm.resolve_task(&project_id, id)?;
    let deps: Vec<(String, Option<Task>)> = task
        .dependencies
        .iter()
        .map(|d| -> Result<_, ProjaiError> { Ok((d.clone(), pm.get_task(d)?)) })
        .collect::<Result<_, _>>()?;

    if json_output {
        let deps_json: Vec<_> = deps
            .iter()
            .map(|(id, t)| match t {
                Some(t) => output::json::task_summary(t),
                None => json!({ "id": id, "missing": true }),
            })
            .collect();
        output::json::print(&output::json::success(json!({
            "task": output::json::task_detail(&task),
            "dependencies": deps_json
        })));
    } else {
        output::text::print_task(&task);
        if !deps.is_empty() {
            println!("\nDependencies:");
            for (id, t) in &deps {
                match t {
                    Some(t) => println!("  [{}] {} ({})", t.status.as_str(), t.title, t.id),
                    None => println!("  [missing] {id}"),
                }
            }
        }
    }
    Ok(0)
}

fn run_status(id: &str, status: &str, json_output: bool, project_flag: Option<&str>) -> Result<i32, ProjaiError> {
    let status = parse_status(status)?;
    let pm = open_manager()?;
    let project_id = resolve_project_id(&pm, project_flag)?;
    let task = pm.resolve_task(&project_id, id)?;
    if !pm.update_task_status(&task.id, status)? {
        return Err(ProjaiError::task_not_found(id));
    }
    let updated = pm.get_task(&task.id)?.ok_or_else(|| ProjaiError::task_not_found(id))?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_detail(&updated)
        })));
    } else {
        println!("Task {} → {}", updated.id, updated.status.as_str());
    }
    Ok(0)
}

fn run_dep(id: &str, dep_id: &str, json_output: bool, project_flag: Option<&str>) -> Result<i32, ProjaiError> {
    let pm = open_manager()?;
    let project_id = resolve_project_id(&pm, project_flag)?;
    let task = pm.resolve_task(&project_id, id)?;
    let (dep, resolved) = resolve_dependency(&pm, &project_id, dep_id)?;

    pm.add_dependency(&task.id, &dep)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "added": { "task_id": task.id, "depends_on": dep, "resolved": resolved }
        })));
    } else {
        println!("Added dependency: {} depends on {}", task.id, dep);
        if !resolved {
            println!("  warning: {dep} does not match a task in this project");
        }
    }
    Ok(0)
}
