//! Executor port - program を実際に「実行」する部分
//!
//! Runner のライフサイクル（in_progress → ready/failed）は変えずに、
//! 実行方法だけを差し替えられるようにするための seam。
//!
//! # 実装
//! - **SimulatedExecutor**: 一定時間待って結果文字列を合成する（デフォルト）

use async_trait::async_trait;

use crate::domain::{ExecError, Task};

/// Executor は 1 タスク分の作業を行い、出力を返す
///
/// - 成功: 空でない出力文字列
/// - 失敗: ExecError（runner が failed + diagnostic として記録）
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, task: &Task) -> Result<String, ExecError>;
}
