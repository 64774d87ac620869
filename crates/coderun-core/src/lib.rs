//! coderun-core
//!
//! 非同期タスク実行サービスのコア。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（TaskId, Task, TaskStatus, errors, DTO）
//! - **ports**: 抽象化レイヤー（TaskStore, Executor, IdGenerator, Clock）
//! - **impls**: 実装（InMemoryTaskStore, SimulatedExecutor）
//! - **app**: アプリケーションロジック（builder, runner, dispatcher, service）
//! - **config**: TOML 設定
//! - **observability**: 状態ごとの件数

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;

pub use app::{AppBuilder, QueryError, SubmitError, TaskService};
pub use config::ServiceConfig;
pub use domain::{Task, TaskId, TaskStatus};
