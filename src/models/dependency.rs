use serde::{Deserialize, Serialize};

/// Edge `task_id` depends on `depends_on`. The target may not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDependency {
    pub task_id: String,
    pub depends_on: String,
}
