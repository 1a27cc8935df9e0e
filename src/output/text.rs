use crate::models::{Project, Task};
use crate::report::gantt::short_id;
use crate::report::{BurndownPoint, DeadlineAlert, AlertSubject, ProjectStats};

pub fn print_project(p: &Project) {
    println!("Project: {} ({})", p.name, p.id);
    println!("  Owner: {}", p.owner);
    println!("  Deadline: {}", p.deadline);
    println!("  Status: {}", p.status.as_str());
    if !p.description.is_empty() {
        println!("  Description: {}", p.description);
    }
    println!("  Created: {}", p.created_at.to_rfc3339());
}

pub fn print_project_list(projects: &[Project], active_id: Option<&str>) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }
    for p in projects {
        let marker = if Some(p.id.as_str()) == active_id { " *" } else { "" };
        println!(
            "  {} ({}) [{}] due {} @{}{}",
            p.name,
            short_id(&p.id),
            p.status.as_str(),
            p.deadline,
            p.owner,
            marker
        );
    }
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    println!("  Assignee: {}", t.assignee);
    println!("  Status: {}", t.status.as_str());
    println!("  Priority: {}", t.priority);
    println!("  Story points: {}", t.story_points);
    if let Some(due) = t.due_date {
        println!("  Due: {due}");
    }
    if let Some(completed) = t.completed_at {
        println!("  Completed: {}", completed.to_rfc3339());
    }
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        let due = t.due_date.map(|d| format!(" due {d}")).unwrap_or_default();
        println!(
            "  [{}] {} ({}) p={} sp={} @{}{}",
            t.status.as_str(),
            t.title,
            short_id(&t.id),
            t.priority,
            t.story_points,
            t.assignee,
            due
        );
    }
}

pub fn print_stats(s: &ProjectStats) {
    println!(
        "Progress: {:.1}% ({}/{} tasks, {}/{} points)",
        s.pct_done, s.done_tasks, s.total_tasks, s.done_story_points, s.total_story_points
    );
    for (assignee, points) in &s.by_assignee {
        println!("  @{assignee}: {points} points");
    }
}

pub fn print_burndown(chart: &[BurndownPoint]) {
    if chart.is_empty() {
        println!("Nothing to chart (no story points).");
        return;
    }
    println!("  day  date        ideal   actual");
    for p in chart {
        println!("  {:>3}  {}  {:>6.2}  {:>6}", p.day, p.date, p.ideal, p.actual);
    }
}

pub fn print_alerts(alerts: &[DeadlineAlert]) {
    if alerts.is_empty() {
        println!("No upcoming deadlines.");
        return;
    }
    for a in alerts {
        let label = match &a.subject {
            AlertSubject::Project { name, owner, deadline, .. } => {
                format!("project {name} (@{owner}) due {deadline}")
            }
            AlertSubject::Task { title, assignee, due_date, .. } => {
                format!("task {title} (@{assignee}) due {due_date}")
            }
        };
        println!("  [{}] {} ({} days)", a.urgency.as_str(), label, a.days_remaining);
    }
}
