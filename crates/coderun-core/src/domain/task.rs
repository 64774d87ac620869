//! Task record: submitted program + lifecycle state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{TaskId, TaskStatus};

/// One submitted unit of work.
///
/// Design:
/// - `id` / `program` / `compiler` は作成後に変わらない（getter のみ公開）
/// - 状態の変更は store 内部からのみ（`pub(crate)` の mark_* 系）
/// - store から返るのは常に clone したスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    program: String,
    compiler: String,
    status: TaskStatus,
    result: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        id: TaskId,
        program: impl Into<String>,
        compiler: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            program: program.into(),
            compiler: compiler.into(),
            status: TaskStatus::Created,
            result: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Output for `ready`, diagnostic for `failed`, empty otherwise.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn set_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    /// result と ready を同時に設定
    pub(crate) fn mark_ready(&mut self, result: String, now: DateTime<Utc>) {
        self.result = result;
        self.status = TaskStatus::Ready;
        self.updated_at = now;
    }

    pub(crate) fn mark_failed(&mut self, diagnostic: String, now: DateTime<Utc>) {
        self.result = diagnostic;
        self.status = TaskStatus::Failed;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use ulid::Ulid;

    fn sample() -> (Task, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let task = Task::new(TaskId::from_ulid(Ulid::new()), "print(1)", "py", now);
        (task, now)
    }

    #[test]
    fn new_task_starts_created_with_empty_result() {
        let (task, now) = sample();
        assert_eq!(task.status(), TaskStatus::Created);
        assert_eq!(task.result(), "");
        assert_eq!(task.program(), "print(1)");
        assert_eq!(task.compiler(), "py");
        assert_eq!(task.created_at(), now);
        assert_eq!(task.updated_at(), now);
    }

    #[test]
    fn mark_ready_sets_result_and_status_together() {
        let (mut task, now) = sample();
        let later = now + Duration::seconds(1);

        task.set_status(TaskStatus::InProgress, now);
        task.mark_ready("1\n".to_string(), later);

        assert_eq!(task.status(), TaskStatus::Ready);
        assert_eq!(task.result(), "1\n");
        assert_eq!(task.updated_at(), later);
        assert_eq!(task.created_at(), now);
    }

    #[test]
    fn mark_failed_keeps_diagnostic() {
        let (mut task, now) = sample();
        task.mark_failed("boom".to_string(), now);

        assert_eq!(task.status(), TaskStatus::Failed);
        assert_eq!(task.result(), "boom");
    }
}
