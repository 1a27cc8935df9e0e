#[allow(deprecated)]
use assert_cmd::Command;
use chrono::{Days, NaiveDate, Utc};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

// ─── helpers ───────────────────────────────────────────────────────

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("create tempdir");
        std::process::Command::new("git")
            .args(["init"])
            .current_dir(dir.path())
            .output()
            .expect("git init");
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("projai").expect("binary");
        cmd.current_dir(self.dir.path())
            .env_remove("PROJAI_DB")
            .env_remove("PROJAI_LOG");
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut a: Vec<&str> = args.to_vec();
        a.push("--json");
        let output = self.cmd().args(&a).output().expect("run");
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nstdout: {stdout}"))
    }

    fn run_ok(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], true, "expected success=true: {v}");
        v
    }

    fn run_err(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], false, "expected success=false: {v}");
        v
    }

    fn add_task(&self, title: &str, points: &str, after: &[&str]) -> String {
        let mut args = vec!["task", "add", title, "--assignee", "alice", "--points", points];
        for a in after {
            args.push("--after");
            args.push(a);
        }
        let v = self.run_ok(&args);
        v["data"]["task"]["id"].as_str().unwrap().to_string()
    }
}

fn days_from_today(days: u64) -> NaiveDate {
    Utc::now().date_naive().checked_add_days(Days::new(days)).unwrap()
}

fn setup_with_project(env: &TestEnv) -> String {
    env.run_ok(&["init"]);
    let v = env.run_ok(&[
        "project", "create", "Apollo", "--owner", "dana", "--deadline", "2030-06-30",
    ]);
    v["data"]["id"].as_str().unwrap().to_string()
}

fn path_titles(v: &Value) -> Vec<String> {
    v["data"]["path"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect()
}

// ─── init ──────────────────────────────────────────────────────────

#[test]
fn test_init() {
    let env = TestEnv::new();
    let v = env.run_ok(&["init"]);
    let path = v["data"]["path"].as_str().unwrap();
    assert!(path.ends_with("projai.db"));
    assert!(env.dir.path().join(".worktoolai/projai/projai.db").exists());
}

#[test]
fn test_init_idempotent() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    env.run_ok(&["init"]);
}

#[test]
fn test_init_required_before_commands() {
    let env = TestEnv::new();
    let v = env.run_err(&["project", "list"]);
    assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
    let v = env.run_err(&["alerts"]);
    assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
}

#[test]
fn test_db_path_env_override() {
    let env = TestEnv::new();
    let custom = env.dir.path().join("elsewhere").join("custom.db");
    fs::create_dir_all(custom.parent().unwrap()).unwrap();
    env.cmd()
        .env("PROJAI_DB", &custom)
        .args(["init", "--json"])
        .assert()
        .success();
    assert!(custom.exists());
    assert!(!env.dir.path().join(".worktoolai").exists());
}

#[test]
fn test_error_exit_code_and_text_mode() {
    let env = TestEnv::new();
    env.cmd()
        .args(["project", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

// ─── projects ──────────────────────────────────────────────────────

#[test]
fn test_project_create_auto_activates_first() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&[
        "project", "create", "Apollo", "--owner", "dana", "--deadline", "2030-06-30",
        "--description", "Moon",
    ]);
    assert_eq!(v["data"]["name"], "Apollo");
    assert_eq!(v["data"]["status"], "active");
    assert_eq!(v["data"]["deadline"], "2030-06-30");
    assert_eq!(v["data"]["description"], "Moon");
    assert_eq!(v["data"]["active"], true);

    let v = env.run_ok(&[
        "project", "create", "Gemini", "--owner", "eli", "--deadline", "2029-01-01",
    ]);
    assert_eq!(v["data"]["active"], false);
}

#[test]
fn test_project_list_orders_by_deadline() {
    let env = TestEnv::new();
    setup_with_project(&env);
    env.run_ok(&["project", "create", "Gemini", "--owner", "eli", "--deadline", "2029-01-01"]);

    let v = env.run_ok(&["project", "list"]);
    let projects = v["data"]["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["name"], "Gemini");
    assert_eq!(projects[1]["name"], "Apollo");
    assert_eq!(projects[1]["active"], true);
}

#[test]
fn test_project_invalid_deadline() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_err(&["project", "create", "X", "--owner", "o", "--deadline", "30/06/2030"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_project_show_and_status() {
    let env = TestEnv::new();
    let id = setup_with_project(&env);
    env.add_task("Design", "3", &[]);

    let v = env.run_ok(&["project", "show", "Apollo"]);
    assert_eq!(v["data"]["project"]["id"], id.as_str());
    assert_eq!(v["data"]["overdue"], false);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(v["data"]["stats"]["total_story_points"], 3);

    let v = env.run_ok(&["project", "status", &id[..8], "on_hold"]);
    assert_eq!(v["data"]["project"]["status"], "on_hold");

    let v = env.run_ok(&["project", "list", "--status", "on_hold"]);
    assert_eq!(v["data"]["projects"].as_array().unwrap().len(), 1);

    let v = env.run_err(&["project", "status", "Apollo", "paused"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_project_activate_switches_scope() {
    let env = TestEnv::new();
    setup_with_project(&env);
    env.add_task("Apollo task", "1", &[]);
    env.run_ok(&["project", "create", "Gemini", "--owner", "eli", "--deadline", "2029-01-01"]);

    let v = env.run_ok(&["project", "activate", "Gemini"]);
    assert_eq!(v["data"]["activated"]["name"], "Gemini");
    let v = env.run_ok(&["task", "list"]);
    assert!(v["data"]["tasks"].as_array().unwrap().is_empty());

    let v = env.run_ok(&["task", "list", "--project", "Apollo"]);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 1);
}

#[test]
fn test_project_not_found() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let v = env.run_err(&["project", "show", "nonexistent"]);
    assert_eq!(v["error"]["code"], "PROJECT_NOT_FOUND");
    let v = env.run_err(&["report", "gantt", "--project", "nonexistent"]);
    assert_eq!(v["error"]["code"], "PROJECT_NOT_FOUND");
}

#[test]
fn test_no_active_project() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_err(&["task", "list"]);
    assert_eq!(v["error"]["code"], "NO_ACTIVE_PROJECT");
}

// ─── tasks ─────────────────────────────────────────────────────────

#[test]
fn test_task_add_and_show() {
    let env = TestEnv::new();
    let project_id = setup_with_project(&env);
    let a = env.add_task("Design", "3", &[]);

    let v = env.run_ok(&[
        "task", "add", "Build", "--assignee", "bob", "--priority", "1", "--points", "5",
        "--due", "2030-05-01", "--after", &a[..8],
    ]);
    let task = &v["data"]["task"];
    assert_eq!(task["project_id"], project_id.as_str());
    assert_eq!(task["priority"], 1);
    assert_eq!(task["story_points"], 5);
    assert_eq!(task["status"], "todo");
    assert_eq!(task["due_date"], "2030-05-01");
    assert_eq!(task["dependencies"], serde_json::json!([a]));
    assert!(task["completed_at"].is_null());

    let b = task["id"].as_str().unwrap();
    let v = env.run_ok(&["task", "show", b]);
    assert_eq!(v["data"]["dependencies"][0]["title"], "Design");
}

#[test]
fn test_task_add_validation() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let v = env.run_err(&["task", "add", "X", "--assignee", "a", "--priority", "7"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["task", "add", "  ", "--assignee", "a"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["task", "add", "X", "--assignee", "a", "--due", "tomorrow"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_task_add_keeps_dangling_dependency() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let v = env.run_ok(&["task", "add", "X", "--assignee", "a", "--after", "ghost-id"]);
    assert_eq!(v["data"]["dangling_dependencies"], serde_json::json!(["ghost-id"]));

    let id = v["data"]["task"]["id"].as_str().unwrap();
    let v = env.run_ok(&["task", "show", id]);
    assert_eq!(v["data"]["dependencies"][0]["id"], "ghost-id");
    assert_eq!(v["data"]["dependencies"][0]["missing"], true);
}

#[test]
fn test_task_list_orders_by_priority_then_due() {
    let env = TestEnv::new();
    setup_with_project(&env);
    env.run_ok(&["task", "add", "low", "--assignee", "a", "--priority", "4"]);
    env.run_ok(&["task", "add", "late", "--assignee", "a", "--priority", "2", "--due", "2030-02-01"]);
    env.run_ok(&["task", "add", "undated", "--assignee", "a", "--priority", "2"]);
    env.run_ok(&["task", "add", "early", "--assignee", "a", "--priority", "2", "--due", "2030-01-01"]);

    let v = env.run_ok(&["task", "list"]);
    let titles: Vec<&str> = v["data"]["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["early", "late", "undated", "low"]);
}

#[test]
fn test_task_status_sets_and_clears_completed_at() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let id = env.add_task("Design", "3", &[]);

    let v = env.run_ok(&["task", "status", &id, "done"]);
    assert_eq!(v["data"]["task"]["status"], "done");
    assert!(v["data"]["task"]["completed_at"].is_string());

    let v = env.run_ok(&["task", "status", &id, "in_progress"]);
    assert_eq!(v["data"]["task"]["status"], "in_progress");
    assert!(v["data"]["task"]["completed_at"].is_null());

    let v = env.run_err(&["task", "status", &id, "finished"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_task_not_found() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let v = env.run_err(&["task", "show", "nonexistent"]);
    assert_eq!(v["error"]["code"], "TASK_NOT_FOUND");
}

#[test]
fn test_task_dep() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let a = env.add_task("A", "1", &[]);
    let b = env.add_task("B", "1", &[]);

    let v = env.run_ok(&["task", "dep", &b, &a]);
    assert_eq!(v["data"]["added"]["depends_on"], a.as_str());
    assert_eq!(v["data"]["added"]["resolved"], true);

    // adding the same edge again is a no-op
    env.run_ok(&["task", "dep", &b, &a]);
    let v = env.run_ok(&["task", "show", &b]);
    assert_eq!(v["data"]["task"]["dependencies"], serde_json::json!([a]));
}

// ─── reports ───────────────────────────────────────────────────────

#[test]
fn test_critical_path_linear_chain() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let a = env.add_task("A", "2", &[]);
    let b = env.add_task("B", "5", &[&a]);
    env.add_task("C", "1", &[&b]);

    let v = env.run_ok(&["report", "critical-path"]);
    assert_eq!(path_titles(&v), ["A", "B", "C"]);
    assert_eq!(v["data"]["total_story_points"], 8);
}

#[test]
fn test_critical_path_picks_heavier_branch() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let a = env.add_task("A", "1", &[]);
    let b = env.add_task("B", "5", &[&a]);
    let c = env.add_task("C", "2", &[&a]);
    env.add_task("D", "1", &[&b, &c]);

    let v = env.run_ok(&["report", "critical-path"]);
    assert_eq!(path_titles(&v), ["A", "B", "D"]);
}

#[test]
fn test_critical_path_cycle_falls_back_to_priority() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let a = env
        .run_ok(&["task", "add", "A", "--assignee", "x", "--priority", "3"])["data"]["task"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let b = env
        .run_ok(&["task", "add", "B", "--assignee", "x", "--priority", "1", "--after", &a])["data"]
        ["task"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    env.run_ok(&["task", "dep", &a, &b]);

    let v = env.run_ok(&["report", "critical-path"]);
    assert_eq!(path_titles(&v), ["B", "A"]);
}

#[test]
fn test_critical_path_empty_project() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let v = env.run_ok(&["report", "critical-path"]);
    assert!(v["data"]["path"].as_array().unwrap().is_empty());
    assert_eq!(v["data"]["total_story_points"], 0);
}

#[test]
fn test_burndown() {
    let env = TestEnv::new();
    setup_with_project(&env);
    env.add_task("A", "4", &[]);
    let b = env.add_task("B", "6", &[]);
    env.run_ok(&["task", "status", &b, "done"]);

    let v = env.run_ok(&["report", "burndown", "--sprint-days", "5"]);
    let chart = v["data"]["chart"].as_array().unwrap();
    assert_eq!(chart.len(), 6);
    assert_eq!(chart[0]["day"], 0);
    assert_eq!(chart[0]["ideal"], 10.0);
    assert_eq!(chart[5]["ideal"], 0.0);
    assert_eq!(chart[0]["actual"], 10);
    assert_eq!(chart[5]["actual"], 4);
    assert_eq!(chart[5]["date"], Utc::now().date_naive().to_string());
}

#[test]
fn test_burndown_empty_and_invalid() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let v = env.run_ok(&["report", "burndown"]);
    assert!(v["data"]["chart"].as_array().unwrap().is_empty());
    assert_eq!(v["data"]["sprint_days"], 14);

    let v = env.run_err(&["report", "burndown", "--sprint-days", "0"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_gantt_csv_stdout_and_file() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let a = env.add_task("A", "3", &[]);
    let b = env.add_task("B", "1", &[&a]);
    env.run_ok(&["task", "add", "Side", "--assignee", "y", "--priority", "4", "--points", "1"]);

    let v = env.run_ok(&["report", "gantt"]);
    let csv = v["data"]["csv"].as_str().unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Task ID,Title,Assignee,Priority,Status,Story Points,Due Date,Dependencies,Critical Path"
    );
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], format!("{},A,alice,3,todo,3,,,YES", &a[..8]));
    assert_eq!(lines[2], format!("{},B,alice,3,todo,1,,{},YES", &b[..8], &a[..8]));
    assert!(lines[3].ends_with(",Side,y,4,todo,1,,,no"));

    env.cmd()
        .args(["report", "gantt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Task ID,Title,Assignee"));

    let out = env.dir.path().join("gantt.csv");
    env.run_ok(&["report", "gantt", "--output", out.to_str().unwrap()]);
    assert_eq!(fs::read_to_string(&out).unwrap(), csv);
}

#[test]
fn test_stats() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let a = env.add_task("A", "3", &[]);
    env.run_ok(&["task", "add", "B", "--assignee", "bob", "--points", "1"]);
    env.run_ok(&["task", "status", &a, "done"]);

    let v = env.run_ok(&["report", "stats"]);
    let s = &v["data"];
    assert_eq!(s["total_tasks"], 2);
    assert_eq!(s["done_tasks"], 1);
    assert_eq!(s["pct_done"], 50.0);
    assert_eq!(s["total_story_points"], 4);
    assert_eq!(s["done_story_points"], 3);
    assert_eq!(s["by_assignee"]["alice"], 3);
    assert_eq!(s["by_assignee"]["bob"], 1);
}

// ─── alerts ────────────────────────────────────────────────────────

#[test]
fn test_alerts_window() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let soon = days_from_today(2).to_string();
    let later = days_from_today(60).to_string();
    env.run_ok(&["project", "create", "Soon", "--owner", "o", "--deadline", &soon]);
    env.run_ok(&["project", "create", "Later", "--owner", "o", "--deadline", &later]);
    env.run_ok(&["task", "add", "Due soon", "--assignee", "a", "--due", &soon]);
    env.run_ok(&["task", "add", "Due later", "--assignee", "a", "--due", &later]);

    let v = env.run_ok(&["alerts"]);
    assert_eq!(v["data"]["days_ahead"], 7);
    let alerts = v["data"]["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| a["days_remaining"] == 2));
    assert!(alerts.iter().all(|a| a["urgency"] == "upcoming"));
    assert!(alerts.iter().any(|a| a["type"] == "project" && a["name"] == "Soon"));
    assert!(alerts.iter().any(|a| a["type"] == "task" && a["title"] == "Due soon"));

    let v = env.run_ok(&["alerts", "--days-ahead", "90"]);
    assert_eq!(v["data"]["alerts"].as_array().unwrap().len(), 4);
}

#[test]
fn test_alerts_skip_done_tasks_and_inactive_projects() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let soon = days_from_today(1).to_string();
    env.run_ok(&["project", "create", "Soon", "--owner", "o", "--deadline", &soon]);
    let id = env
        .run_ok(&["task", "add", "T", "--assignee", "a", "--due", &soon])["data"]["task"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    env.run_ok(&["task", "status", &id, "done"]);
    env.run_ok(&["project", "status", "Soon", "completed"]);

    let v = env.run_ok(&["alerts"]);
    assert!(v["data"]["alerts"].as_array().unwrap().is_empty());
}
