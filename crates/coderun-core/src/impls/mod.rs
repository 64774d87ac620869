//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryTaskStore**: プロセス内メモリの TaskStore
//! - **SimulatedExecutor**: 遅延 + 合成結果の Executor（デフォルト）
//!
//! 永続ストアや本物の実行系は別クレートで同じ trait を実装する。

pub mod inmem_store;
pub mod simulated;

pub use self::inmem_store::InMemoryTaskStore;
pub use self::simulated::SimulatedExecutor;
