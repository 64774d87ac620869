//! InMemoryTaskStore - プロセス内メモリの TaskStore
//!
//! # 実装詳細
//! - HashMap<TaskId, Task> を 1 つの tokio::sync::RwLock で保護
//! - 読み取り同士はブロックしない、書き込みは 1 レコードの更新の間だけ排他
//! - ロックを保持したまま await しない（ID 生成・時刻取得はロック外）

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::{StoreError, Task, TaskId, TaskStatus, TransitionPolicy};
use crate::observability::StatusCounts;
use crate::ports::{Clock, IdGenerator, SystemClock, TaskStore, UlidGenerator};

/// InMemoryTaskStore はタスクの正本をメモリに保持
///
/// # 使用例
/// ```ignore
/// let store = InMemoryTaskStore::new();
/// let id = store.create_task("print(1)", "py").await?;
/// let task = store.get_task(id).await?;
/// ```
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
    id_gen: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    policy: TransitionPolicy,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::with_policy(TransitionPolicy::default())
    }

    pub fn with_policy(policy: TransitionPolicy) -> Self {
        Self::with_parts(
            Arc::new(UlidGenerator::new(SystemClock)),
            Arc::new(SystemClock),
            policy,
        )
    }

    /// ID 生成器と Clock を差し替えて作成（テスト用）
    pub fn with_parts(
        id_gen: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            id_gen,
            clock,
            policy,
        }
    }

    /// Strict のときだけ遷移表で検証する
    fn check_transition(&self, task: &Task, next: TaskStatus) -> Result<(), StoreError> {
        if self.policy == TransitionPolicy::Permissive || task.status().can_transition_to(next) {
            return Ok(());
        }
        warn!(
            task_id = %task.id(),
            from = %task.status(),
            to = %next,
            "rejected status transition"
        );
        Err(StoreError::InvalidTransition {
            id: task.id(),
            from: task.status(),
            to: next,
        })
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create_task(&self, program: &str, compiler: &str) -> Result<TaskId, StoreError> {
        let id = self.id_gen.generate_task_id();
        let task = Task::new(id, program, compiler, self.clock.now());

        let mut tasks = self.tasks.write().await;
        match tasks.entry(id) {
            Entry::Occupied(_) => Err(StoreError::Internal(format!("task id collision: {id}"))),
            Entry::Vacant(slot) => {
                slot.insert(task);
                debug!(task_id = %id, compiler, "task created");
                Ok(id)
            }
        }
    }

    async fn get_task(&self, id: TaskId) -> Result<Task, StoreError> {
        let tasks = self.tasks.read().await;
        tasks.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> Result<(), StoreError> {
        let now = self.clock.now();
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        // ready は result と一緒にしか設定できない
        if self.policy == TransitionPolicy::Strict && status == TaskStatus::Ready {
            return Err(StoreError::InvalidTransition {
                id,
                from: task.status(),
                to: status,
            });
        }
        self.check_transition(task, status)?;

        task.set_status(status, now);
        debug!(task_id = %id, %status, "status updated");
        Ok(())
    }

    async fn set_result(&self, id: TaskId, result: String) -> Result<(), StoreError> {
        let now = self.clock.now();
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if result.is_empty() {
            return Err(StoreError::EmptyResult(id));
        }
        self.check_transition(task, TaskStatus::Ready)?;

        task.mark_ready(result, now);
        debug!(task_id = %id, "result stored");
        Ok(())
    }

    async fn set_failed(&self, id: TaskId, diagnostic: String) -> Result<(), StoreError> {
        let now = self.clock.now();
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        self.check_transition(task, TaskStatus::Failed)?;

        task.mark_failed(diagnostic, now);
        debug!(task_id = %id, "failure stored");
        Ok(())
    }

    async fn counts_by_status(&self) -> StatusCounts {
        let tasks = self.tasks.read().await;
        let mut counts = StatusCounts::default();
        for task in tasks.values() {
            counts.record(task.status());
        }
        counts
    }
}
