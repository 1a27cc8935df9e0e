pub mod project;
pub mod task;
pub mod dependency;

pub use project::*;
pub use task::*;
pub use dependency::*;

/// Fresh opaque identifier for projects and tasks.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
