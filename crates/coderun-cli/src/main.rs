use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use serde::Serialize;
use tokio::time::{Duration, sleep};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coderun_core::domain::{ExecError, SubmitRequest, Task, TaskStatus};
use coderun_core::observability::StatusCounts;
use coderun_core::ports::Executor;
use coderun_core::{AppBuilder, QueryError, ServiceConfig};

/// Submit programs to an in-process coderun service and poll them to completion.
#[derive(Parser, Debug)]
#[command(name = "coderun")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Program text to submit
    #[arg(short, long, default_value = "print(1)")]
    program: String,

    /// Compiler identifier ("echo" returns the program itself)
    #[arg(short, long, default_value = "py")]
    compiler: String,

    /// How many copies to submit concurrently
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// program をそのまま返す Executor（実行系の差し替え例）
struct EchoExecutor;

#[async_trait]
impl Executor for EchoExecutor {
    async fn execute(&self, task: &Task) -> Result<String, ExecError> {
        Ok(task.program().to_string())
    }
}

#[derive(Debug, Serialize)]
struct Report {
    id: String,
    status: TaskStatus,
    result: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct Summary {
    tasks: Vec<Report>,
    counts: StatusCounts,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    // (A) 設定を読み込んでサービスを組み立てる
    let config = match &args.config {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    let service = Arc::new(
        AppBuilder::new()
            .config(config)
            .executor("echo", Arc::new(EchoExecutor))
            .build()
            .context("building service")?,
    );

    // (B) タスク投入（submit はすぐに ID を返す）
    let request = SubmitRequest {
        program: args.program.clone(),
        compiler: args.compiler.clone(),
    };
    let mut ids = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let resp = service
            .submit_request(&request)
            .await
            .map_err(|e| anyhow::anyhow!("submit rejected ({}): {e}", e.status_code()))?;
        info!(task_id = %resp.id, "submitted");
        ids.push(resp.id.to_string());
    }

    // (C) 終端状態になるまでポーリング（Ctrl-C で中断）
    let poll = Duration::from_millis(args.poll_ms);
    let mut reports = Vec::with_capacity(ids.len());
    for id in &ids {
        let status = loop {
            let status = service.status(id).await?;
            if status.is_terminal() {
                break status;
            }
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    warn!("interrupted, waiting for in-flight runners");
                    service.shutdown().await;
                    anyhow::bail!("interrupted");
                }
                _ = sleep(poll) => {}
            }
        };

        let report = match service.result(id).await {
            Ok(result) => Report {
                id: id.clone(),
                status,
                result: Some(result),
                error: None,
            },
            Err(err @ QueryError::Failed { .. }) => Report {
                id: id.clone(),
                status,
                result: None,
                error: Some(err.to_response().error),
            },
            Err(err) => return Err(err.into()),
        };
        reports.push(report);
    }

    // (D) まとめを JSON で出力
    service.shutdown().await;
    let summary = Summary {
        tasks: reports,
        counts: service.counts().await,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
