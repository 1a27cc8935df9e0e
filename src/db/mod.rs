pub mod connection;
pub mod migrations;
pub mod project_repo;
pub mod task_repo;
pub mod dependency_repo;

pub use connection::*;
