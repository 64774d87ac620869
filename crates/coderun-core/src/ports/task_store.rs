//! TaskStore port - タスク状態の正本（source of truth）
//!
//! # 実装
//! - **InMemoryTaskStore**: プロセス内メモリ（再起動で消える）
//! - 永続化したい場合は同じ trait を別クレートで実装する

use async_trait::async_trait;

use crate::domain::{StoreError, Task, TaskId, TaskStatus};
use crate::observability::StatusCounts;

/// TaskStore はタスクの作成・参照・状態更新を提供
///
/// # 設計原則
/// - すべての操作は互いに linearizable（部分的な更新は見えない）
/// - 読み取りはスナップショット（clone）を返す
/// - 失敗時に部分的な状態を残さない、リトライもしない
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Allocate an id and insert a `created` record with an empty result.
    async fn create_task(&self, program: &str, compiler: &str) -> Result<TaskId, StoreError>;

    async fn get_task(&self, id: TaskId) -> Result<Task, StoreError>;

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> Result<(), StoreError>;

    /// Store `result` and move to `ready` in one step.
    async fn set_result(&self, id: TaskId, result: String) -> Result<(), StoreError>;

    /// Store `diagnostic` and move to `failed` in one step.
    async fn set_failed(&self, id: TaskId, diagnostic: String) -> Result<(), StoreError>;

    async fn counts_by_status(&self) -> StatusCounts;

    async fn get_result(&self, id: TaskId) -> Result<String, StoreError> {
        let task = self.get_task(id).await?;
        Ok(task.result().to_string())
    }
}
