//! Dispatcher - 作成済みタスク 1 件につき runner を 1 つ起動する
//!
//! - dispatch() は spawn するだけで、runner の完了は待たない（fire-and-forget）
//! - 完了済みの runner は次の dispatch 時に回収する
//! - drain() で実行中の runner をすべて待つ（graceful shutdown 用）
//! - runner は detached な tokio task。Dispatcher を drop しても中断されない

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::{JoinError, JoinHandle};
use tracing::{Instrument, debug, error, info_span, warn};

use super::runner::TaskRunner;
use crate::domain::TaskId;

pub struct Dispatcher {
    runner: Arc<TaskRunner>,
    inflight: Mutex<Vec<JoinHandle<()>>>,
}

impl Dispatcher {
    pub fn new(runner: Arc<TaskRunner>) -> Self {
        Self {
            runner,
            inflight: Mutex::new(Vec::new()),
        }
    }

    /// Spawn the runner for `id` and return without waiting for it.
    pub async fn dispatch(&self, id: TaskId) {
        let runner = Arc::clone(&self.runner);
        let span = info_span!("runner", task_id = %id);

        let handle = tokio::spawn(
            async move {
                match runner.run(id).await {
                    Ok(status) => debug!(%status, "runner finished"),
                    Err(e) => error!(error = %e, "runner could not record task progress"),
                }
            }
            .instrument(span),
        );

        let mut inflight = self.inflight.lock().await;
        let (done, running): (Vec<_>, Vec<_>) = inflight.drain(..).partition(|h| h.is_finished());
        *inflight = running;
        inflight.push(handle);
        drop(inflight);

        for h in done {
            log_join(h.await);
        }
    }

    /// Runners spawned and not yet reaped.
    pub async fn in_flight(&self) -> usize {
        self.inflight.lock().await.len()
    }

    /// Wait until no runner is in flight, including ones dispatched while waiting.
    pub async fn drain(&self) {
        loop {
            // ロックを持ったまま待たない（drain 中も dispatch できるように）
            let batch = std::mem::take(&mut *self.inflight.lock().await);
            if batch.is_empty() {
                return;
            }
            for h in batch {
                log_join(h.await);
            }
        }
    }
}

fn log_join(done: Result<(), JoinError>) {
    if let Err(e) = done {
        warn!(error = %e, "runner did not complete");
    }
}
