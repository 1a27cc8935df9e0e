//! Single entry point over the entity store, the critical-path engine and the reports.
//!
//! `ProjectManager` owns one SQLite connection and is meant for single-writer,
//! in-process use. Lookups return `Option`; only the Gantt export turns an
//! unknown project into an error.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use rusqlite::Connection;

use crate::db::{connection, dependency_repo, project_repo, task_repo};
use crate::error::ProjaiError;
use crate::graph;
use crate::models::{Project, ProjectStatus, Task, TaskStatus};
use crate::report::{self, BurndownPoint, DeadlineAlert, ProjectStats};

pub struct ProjectManager {
    conn: Connection,
    today: Option<NaiveDate>,
}

impl ProjectManager {
    /// Open (creating if needed) a database file and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ProjaiError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self::from_connection(connection::open_at(path)?))
    }

    pub fn open_in_memory() -> Result<Self, ProjaiError> {
        Ok(Self::from_connection(connection::open_in_memory()?))
    }

    /// Wrap an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn, today: None }
    }

    /// Pin the date reports treat as "today". Defaults to the current UTC date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    // --- projects ---

    pub fn create_project(
        &self,
        name: &str,
        owner: &str,
        deadline: NaiveDate,
        description: Option<&str>,
    ) -> Result<Project, ProjaiError> {
        let mut project = Project::new(name, owner, deadline);
        project.description = description.unwrap_or_default().to_string();
        project_repo::insert_project(&self.conn, &project)?;
        info!("event=project_create module=manager status=ok id={}", project.id);
        Ok(project)
    }

    pub fn get_project(&self, id: &str) -> Result<Option<Project>, ProjaiError> {
        project_repo::get_project(&self.conn, id)
    }

    /// Projects ordered by deadline ascending.
    pub fn list_projects(&self, status: Option<ProjectStatus>) -> Result<Vec<Project>, ProjaiError> {
        project_repo::list_projects(&self.conn, status)
    }

    pub fn update_project_status(&self, id: &str, status: ProjectStatus) -> Result<bool, ProjaiError> {
        let found = project_repo::update_project_status(&self.conn, id, status)?;
        info!(
            "event=project_status module=manager status={} id={id} found={found}",
            status.as_str()
        );
        Ok(found)
    }

    pub fn resolve_project(&self, reference: &str) -> Result<Project, ProjaiError> {
        project_repo::resolve_project(&self.conn, reference)
    }

    // --- tasks ---

    /// Store a task and one edge per listed dependency, whether or not the
    /// dependency resolves. Fails only if the owning project does not exist.
    pub fn add_task(&self, task: Task) -> Result<Task, ProjaiError> {
        if project_repo::get_project(&self.conn, &task.project_id)?.is_none() {
            return Err(ProjaiError::project_not_found(&task.project_id));
        }

        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        let result = (|| -> Result<(), ProjaiError> {
            task_repo::insert_task(&self.conn, &task)?;
            for dep in &task.dependencies {
                dependency_repo::add_dependency(&self.conn, &task.id, dep)?;
            }
            Ok(())
        })();

        match result {
            Ok(()) => self.conn.execute_batch("COMMIT")?,
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                return Err(e);
            }
        }
        info!(
            "event=task_add module=manager status=ok id={} deps={}",
            task.id,
            task.dependencies.len()
        );
        Ok(task)
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>, ProjaiError> {
        task_repo::get_task(&self.conn, id)
    }

    /// Tasks ordered by priority, then due date with undated tasks last.
    pub fn get_project_tasks(&self, project_id: &str) -> Result<Vec<Task>, ProjaiError> {
        task_repo::list_tasks_by_project(&self.conn, project_id)
    }

    /// Entering `done` stamps the completion time; any other status clears it.
    pub fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<bool, ProjaiError> {
        let found = task_repo::update_task_status(&self.conn, id, status)?;
        info!(
            "event=task_status module=manager status={} id={id} found={found}",
            status.as_str()
        );
        Ok(found)
    }

    /// `task_id` must name a stored task; `depends_on` may dangle.
    pub fn add_dependency(&self, task_id: &str, depends_on: &str) -> Result<(), ProjaiError> {
        if task_repo::get_task(&self.conn, task_id)?.is_none() {
            return Err(ProjaiError::task_not_found(task_id));
        }
        dependency_repo::add_dependency(&self.conn, task_id, depends_on)
    }

    pub fn resolve_task(&self, project_id: &str, reference: &str) -> Result<Task, ProjaiError> {
        task_repo::resolve_task(&self.conn, project_id, reference)
    }

    // --- analysis and reports ---

    pub fn get_critical_path(&self, project_id: &str) -> Result<Vec<Task>, ProjaiError> {
        let tasks = self.get_project_tasks(project_id)?;
        Ok(Self::critical_path_of(project_id, &tasks))
    }

    fn critical_path_of(project_id: &str, tasks: &[Task]) -> Vec<Task> {
        let analysis = graph::analyze(tasks);
        if analysis.is_cycle() {
            warn!(
                "event=critical_path module=graph status=cycle project={project_id} tasks={}",
                tasks.len()
            );
        }
        analysis.tasks(tasks)
    }

    pub fn calculate_burndown(
        &self,
        project_id: &str,
        sprint_days: u32,
    ) -> Result<Vec<BurndownPoint>, ProjaiError> {
        if sprint_days == 0 {
            return Err(ProjaiError::validation("sprint_days must be at least 1"));
        }
        let tasks = self.get_project_tasks(project_id)?;
        let chart = report::burndown(&tasks, sprint_days, self.today());
        debug!(
            "event=burndown module=report status=ok project={project_id} points={}",
            chart.len()
        );
        Ok(chart)
    }

    pub fn export_gantt_csv(&self, project_id: &str) -> Result<String, ProjaiError> {
        if self.get_project(project_id)?.is_none() {
            return Err(ProjaiError::project_not_found(project_id));
        }
        let tasks = self.get_project_tasks(project_id)?;
        let critical = Self::critical_path_of(project_id, &tasks);
        report::gantt_csv(&tasks, &critical)
    }

    /// Active projects and open tasks (any project) due within `days_ahead` days.
    pub fn check_deadlines(&self, days_ahead: i64) -> Result<Vec<DeadlineAlert>, ProjaiError> {
        let today = self.today();
        let projects = self.list_projects(Some(ProjectStatus::Active))?;
        let tasks = task_repo::open_dated_tasks(&self.conn)?;
        let alerts = report::deadline_alerts(&projects, &tasks, days_ahead, today);
        debug!(
            "event=deadlines module=report status=ok days_ahead={days_ahead} alerts={}",
            alerts.len()
        );
        Ok(alerts)
    }

    pub fn project_stats(&self, project_id: &str) -> Result<ProjectStats, ProjaiError> {
        let tasks = self.get_project_tasks(project_id)?;
        Ok(report::project_stats(&tasks))
    }
}
