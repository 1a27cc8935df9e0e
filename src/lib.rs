pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod graph;
pub mod logging;
pub mod manager;
pub mod models;
pub mod output;
pub mod report;

pub use error::{ErrorCode, ProjaiError};
pub use manager::ProjectManager;
