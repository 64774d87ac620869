//! State - タスクの状態と遷移表

use serde::{Deserialize, Serialize};
use std::fmt;

/// TaskStatus はタスクの状態を表現
///
/// # 状態遷移
/// - created -> in_progress: runner が作業を開始
/// - in_progress -> ready: 成功（result と同時に設定）
/// - in_progress -> failed: 失敗（diagnostic を result に記録）
///
/// ready / failed は終端状態（以降の遷移なし）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Accepted, no work started yet.
    Created,

    /// A runner is performing the work.
    InProgress,

    /// Finished successfully; result is available.
    Ready,

    /// Finished with an error; result holds the diagnostic.
    Failed,
}

impl TaskStatus {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Ready | TaskStatus::Failed)
    }

    /// Forward-only transition table.
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Created, TaskStatus::InProgress)
                | (TaskStatus::InProgress, TaskStatus::Ready)
                | (TaskStatus::InProgress, TaskStatus::Failed)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Created => "created",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Ready => "ready",
            TaskStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TransitionPolicy はストアが遷移を検証するかどうか
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// 遷移表に従わない更新を拒否する
    #[default]
    Strict,

    /// 任意の status を受け入れる（呼び出し側が正しく呼ぶ前提）
    Permissive,
}
