use serde::{Deserialize, Serialize};

use crate::domain::TaskStatus;

/// Number of tasks per status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub created: usize,
    pub in_progress: usize,
    pub ready: usize,
    pub failed: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Created => self.created += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Ready => self.ready += 1,
            TaskStatus::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.in_progress + self.ready + self.failed
    }
}
