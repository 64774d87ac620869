//! Errors - ストアと実行のエラー分類
//!
//! - StoreError: TaskStore の操作エラー（呼び出し側に同期的に返す、リトライしない）
//! - ExecError: Executor の実行エラー（runner が failed として記録する）

use std::time::Duration;

use super::{TaskId, TaskStatus};

/// StoreError は TaskStore の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// ID 生成やストレージ層の失敗
    #[error("internal storage failure: {0}")]
    Internal(String),

    #[error("invalid transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },

    #[error("empty result for {0}")]
    EmptyResult(TaskId),
}

/// ExecError は program の実行エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
    #[error("no executor for compiler={0}")]
    UnsupportedCompiler(String),

    #[error("execution failed: {0}")]
    Failed(String),

    #[error("executor produced empty output")]
    EmptyOutput,

    #[error("execution timed out after {0:?}")]
    TimedOut(Duration),

    #[error("executor panicked: {0}")]
    Panicked(String),
}
