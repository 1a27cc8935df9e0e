pub mod critical_path;

pub use critical_path::{analyze, critical_path, PathAnalysis};
