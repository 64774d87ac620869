//! SimulatedExecutor - 実際には何も実行しない Executor
//!
//! 一定時間待ってから `processed task <id> at <RFC3339>` を返します。
//! 本物の実行系（プロセス分離・リソース制限・出力キャプチャ）は
//! 別の Executor 実装として差し込む想定。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::SecondsFormat;

use crate::domain::{ExecError, Task};
use crate::ports::{Clock, Executor, SystemClock};

pub struct SimulatedExecutor {
    delay: Duration,
    clock: Arc<dyn Clock>,
}

impl SimulatedExecutor {
    pub fn new(delay: Duration) -> Self {
        Self::with_clock(delay, Arc::new(SystemClock))
    }

    pub fn with_clock(delay: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { delay, clock }
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl Executor for SimulatedExecutor {
    async fn execute(&self, task: &Task) -> Result<String, ExecError> {
        tokio::time::sleep(self.delay).await;
        let at = self.clock.now().to_rfc3339_opts(SecondsFormat::Secs, true);
        Ok(format!("processed task {} at {}", task.id(), at))
    }
}
