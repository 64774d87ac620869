//! TaskService - transport から呼ばれる submit / status / result の窓口
//!
//! HTTP adapter などはここを呼び、戻り値の条件（not found / not ready / ...）を
//! 自分のプロトコルに写すだけでよい。`status_code()` は HTTP ステータスコードへの対応表。

use std::sync::Arc;

use super::dispatcher::Dispatcher;
use crate::domain::{
    ErrorResponse, IdResponse, ResultResponse, StatusResponse, StoreError, SubmitRequest, Task,
    TaskId, TaskStatus,
};
use crate::observability::StatusCounts;
use crate::ports::TaskStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("{0} field is required")]
    MissingField(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmitError {
    pub fn status_code(&self) -> u16 {
        match self {
            SubmitError::MissingField(_) => 400,
            SubmitError::Store(_) => 500,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("task not found: {0}")]
    NotFound(String),

    /// The task exists but has not reached a terminal status.
    #[error("task is not ready yet: {id} is {status}")]
    NotReady { id: TaskId, status: TaskStatus },

    #[error("task {id} failed: {diagnostic}")]
    Failed { id: TaskId, diagnostic: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl QueryError {
    pub fn status_code(&self) -> u16 {
        match self {
            QueryError::NotFound(_) => 404,
            QueryError::NotReady { .. } => 425,
            QueryError::Failed { .. } => 422,
            QueryError::Internal(_) => 500,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self)
    }
}

impl From<StoreError> for QueryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => QueryError::NotFound(id.to_string()),
            other => QueryError::Internal(other.to_string()),
        }
    }
}

pub struct TaskService {
    store: Arc<dyn TaskStore>,
    dispatcher: Dispatcher,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, dispatcher: Dispatcher) -> Self {
        Self { store, dispatcher }
    }

    /// Create the task and dispatch exactly one runner for it.
    pub async fn submit(&self, program: &str, compiler: &str) -> Result<TaskId, SubmitError> {
        if program.is_empty() {
            return Err(SubmitError::MissingField("program"));
        }
        if compiler.is_empty() {
            return Err(SubmitError::MissingField("compiler"));
        }

        let id = self.store.create_task(program, compiler).await?;
        self.dispatcher.dispatch(id).await;
        Ok(id)
    }

    pub async fn submit_request(&self, req: &SubmitRequest) -> Result<IdResponse, SubmitError> {
        let id = self.submit(&req.program, &req.compiler).await?;
        Ok(IdResponse { id })
    }

    pub async fn task(&self, id: &str) -> Result<Task, QueryError> {
        // パースできない ID は発行されていない ID と同じ扱い
        let parsed: TaskId = id
            .parse()
            .map_err(|_| QueryError::NotFound(id.to_string()))?;
        Ok(self.store.get_task(parsed).await?)
    }

    pub async fn status(&self, id: &str) -> Result<TaskStatus, QueryError> {
        Ok(self.task(id).await?.status())
    }

    pub async fn status_response(&self, id: &str) -> Result<StatusResponse, QueryError> {
        let status = self.status(id).await?;
        Ok(StatusResponse { status })
    }

    /// Result of a finished task; repeated calls return the same text.
    pub async fn result(&self, id: &str) -> Result<String, QueryError> {
        let task = self.task(id).await?;
        match task.status() {
            TaskStatus::Ready => Ok(task.result().to_string()),
            TaskStatus::Failed => Err(QueryError::Failed {
                id: task.id(),
                diagnostic: task.result().to_string(),
            }),
            status => Err(QueryError::NotReady {
                id: task.id(),
                status,
            }),
        }
    }

    pub async fn result_response(&self, id: &str) -> Result<ResultResponse, QueryError> {
        let result = self.result(id).await?;
        Ok(ResultResponse { result })
    }

    pub async fn counts(&self) -> StatusCounts {
        self.store.counts_by_status().await
    }

    pub async fn in_flight(&self) -> usize {
        self.dispatcher.in_flight().await
    }

    /// Wait for all dispatched runners, including any dispatched while waiting.
    pub async fn shutdown(&self) {
        self.dispatcher.drain().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::registry::ExecutorRegistry;
    use crate::app::runner::TaskRunner;
    use crate::impls::{InMemoryTaskStore, SimulatedExecutor};
    use std::time::Duration;
    use ulid::Ulid;

    fn service() -> TaskService {
        let store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
        let mut reg = ExecutorRegistry::new();
        reg.set_fallback(Arc::new(SimulatedExecutor::new(Duration::from_secs(1))));
        let runner = Arc::new(TaskRunner::new(Arc::clone(&store), Arc::new(reg)));
        TaskService::new(store, Dispatcher::new(runner))
    }

    #[tokio::test]
    async fn empty_fields_are_rejected_without_creating_tasks() {
        let svc = service();

        assert_eq!(
            svc.submit("", "py").await,
            Err(SubmitError::MissingField("program"))
        );
        assert_eq!(
            svc.submit("print(1)", "").await,
            Err(SubmitError::MissingField("compiler"))
        );
        assert_eq!(svc.counts().await.total(), 0);
        assert_eq!(svc.in_flight().await, 0);

        let err = svc.submit("", "py").await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_response().error, "program field is required");
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_and_unknown_ids_are_not_found() {
        let svc = service();
        let unknown = TaskId::from_ulid(Ulid::new()).to_string();

        for id in ["", "nope", "task-xyz", unknown.as_str()] {
            let err = svc.status(id).await.unwrap_err();
            assert!(matches!(err, QueryError::NotFound(_)));
            assert_eq!(err.status_code(), 404);

            let err = svc.result(id).await.unwrap_err();
            assert!(matches!(err, QueryError::NotFound(_)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn result_is_not_ready_until_runner_finishes() {
        let svc = service();
        let id = svc.submit("print(1)", "py").await.unwrap().to_string();

        let err = svc.result(&id).await.unwrap_err();
        assert!(matches!(
            err,
            QueryError::NotReady {
                status: TaskStatus::Created,
                ..
            }
        ));
        assert_eq!(err.status_code(), 425);

        svc.shutdown().await;

        let first = svc.result(&id).await.unwrap();
        let second = svc.result(&id).await.unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn failed_task_reports_diagnostic() {
        let store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
        // fallback なし: どの compiler も失敗する
        let runner = Arc::new(TaskRunner::new(
            Arc::clone(&store),
            Arc::new(ExecutorRegistry::new()),
        ));
        let svc = TaskService::new(store, Dispatcher::new(runner));

        let id = svc.submit("main", "cobol").await.unwrap().to_string();
        svc.shutdown().await;

        assert_eq!(svc.status(&id).await, Ok(TaskStatus::Failed));
        let err = svc.result(&id).await.unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert!(matches!(
            err,
            QueryError::Failed { diagnostic, .. } if diagnostic.contains("cobol")
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn dto_wrappers_carry_the_same_values() {
        let svc = service();
        let resp = svc
            .submit_request(&SubmitRequest {
                program: "print(1)".to_string(),
                compiler: "py".to_string(),
            })
            .await
            .unwrap();
        let id = resp.id.to_string();

        assert_eq!(
            svc.status_response(&id).await.unwrap().status,
            TaskStatus::Created
        );
        svc.shutdown().await;
        assert_eq!(
            svc.result_response(&id).await.unwrap().result,
            svc.result(&id).await.unwrap()
        );
    }

    #[test]
    fn store_errors_map_to_query_errors() {
        let id = TaskId::from_ulid(Ulid::new());
        assert_eq!(
            QueryError::from(StoreError::NotFound(id)),
            QueryError::NotFound(id.to_string())
        );
        assert!(matches!(
            QueryError::from(StoreError::Internal("disk".to_string())),
            QueryError::Internal(_)
        ));
    }
}
