//! App - アプリケーション層
//!
//! ports を組み合わせてタスクのライフサイクルを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: 構築とワイヤリング（起動時検証つき）
//! - **ExecutorRegistry**: compiler → Executor の対応
//! - **TaskRunner**: 1 タスクを created → in_progress → ready/failed へ進める
//! - **Dispatcher**: タスクごとに runner を 1 つ spawn（fire-and-forget）
//! - **TaskService**: transport から呼ばれる submit / status / result

pub mod builder;
pub mod dispatcher;
pub mod registry;
pub mod runner;
pub mod service;

pub use self::builder::{AppBuilder, BuildError};
pub use self::dispatcher::Dispatcher;
pub use self::registry::{ExecutorRegistry, RegistryError};
pub use self::runner::TaskRunner;
pub use self::service::{QueryError, SubmitError, TaskService};
