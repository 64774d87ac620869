//! TaskRunner - 1 タスクをライフサイクルに沿って進める
//!
//! # フロー
//! 1. TaskStore::update_status(in_progress)
//! 2. compiler から Executor を解決
//! 3. Executor 実行（別タスク上で、timeout があれば制限付き）
//! 4. 成功: TaskStore::set_result（→ ready）
//!    失敗: TaskStore::set_failed（→ failed + diagnostic）
//!
//! 実行側の失敗（panic・timeout を含む）はすべて failed として記録し、
//! タスクが in_progress のまま残らないようにする。

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::registry::ExecutorRegistry;
use crate::domain::{ExecError, StoreError, Task, TaskId, TaskStatus};
use crate::ports::TaskStore;

pub struct TaskRunner {
    store: Arc<dyn TaskStore>,
    executors: Arc<ExecutorRegistry>,
    timeout: Option<Duration>,
}

impl TaskRunner {
    pub fn new(store: Arc<dyn TaskStore>, executors: Arc<ExecutorRegistry>) -> Self {
        Self {
            store,
            executors,
            timeout: None,
        }
    }

    /// `None` means the work may run for as long as it takes.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Drive one task to a terminal status and return it.
    ///
    /// Errors are store errors only (unknown id, rejected transition);
    /// execution errors end up as `failed`.
    pub async fn run(&self, id: TaskId) -> Result<TaskStatus, StoreError> {
        self.store.update_status(id, TaskStatus::InProgress).await?;
        let task = self.store.get_task(id).await?;
        info!(task_id = %id, compiler = task.compiler(), "task started");

        match self.perform(task).await {
            Ok(output) => {
                self.store.set_result(id, output).await?;
                info!(task_id = %id, "task ready");
                Ok(TaskStatus::Ready)
            }
            Err(err) => {
                warn!(task_id = %id, error = %err, "task failed");
                self.store.set_failed(id, err.to_string()).await?;
                Ok(TaskStatus::Failed)
            }
        }
    }

    async fn perform(&self, task: Task) -> Result<String, ExecError> {
        let executor = self
            .executors
            .resolve(task.compiler())
            .ok_or_else(|| ExecError::UnsupportedCompiler(task.compiler().to_string()))?;

        // panic を JoinError として受け取るため別タスクで実行
        let handle = tokio::spawn(async move { executor.execute(&task).await });
        let abort = handle.abort_handle();

        let joined = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    abort.abort();
                    return Err(ExecError::TimedOut(limit));
                }
            },
            None => handle.await,
        };

        let output = match joined {
            Ok(result) => result?,
            Err(e) if e.is_panic() => {
                return Err(ExecError::Panicked(panic_message(e.into_panic())));
            }
            Err(e) => return Err(ExecError::Failed(e.to_string())),
        };

        if output.is_empty() {
            return Err(ExecError::EmptyOutput);
        }
        Ok(output)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
