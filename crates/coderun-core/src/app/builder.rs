//! AppBuilder - TaskService の構築とワイヤリング
//!
//! - 設定・ストア・Executor を受け取り、runner / dispatcher を組み立てる
//! - 起動時検証（Fail-fast）: 期待される compiler が登録されているか

use std::sync::Arc;

use super::dispatcher::Dispatcher;
use super::registry::{ExecutorRegistry, RegistryError};
use super::runner::TaskRunner;
use super::service::TaskService;
use crate::config::ServiceConfig;
use crate::impls::{InMemoryTaskStore, SimulatedExecutor};
use crate::ports::{Clock, Executor, SystemClock, TaskStore, UlidGenerator};

/// AppBuilder は TaskService を構築
///
/// # 使用例
/// ```ignore
/// let service = AppBuilder::new()
///     .config(ServiceConfig::load("coderun.toml")?)
///     .executor("py", Arc::new(MyPythonExecutor))
///     .expect_compilers(&["py"])
///     .build()?;
/// ```
///
/// # デフォルト
/// - store 未指定: config の遷移ポリシーで InMemoryTaskStore を作成
/// - fallback 未指定: config の遅延で SimulatedExecutor を fallback にする
pub struct AppBuilder {
    config: ServiceConfig,
    store: Option<Arc<dyn TaskStore>>,
    clock: Arc<dyn Clock>,
    executors: Vec<(String, Arc<dyn Executor>)>,
    fallback: Option<Arc<dyn Executor>>,
    expected_compilers: Option<Vec<String>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("missing compilers: {0:?}. These compilers were expected but have no executor.")]
    MissingCompilers(Vec<String>),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
            store: None,
            clock: Arc::new(SystemClock),
            executors: Vec::new(),
            fallback: None,
            expected_compilers: None,
        }
    }

    pub fn config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an existing store instead of a fresh in-memory one.
    pub fn store(mut self, store: Arc<dyn TaskStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn executor(mut self, compiler: impl Into<String>, executor: Arc<dyn Executor>) -> Self {
        self.executors.push((compiler.into(), executor));
        self
    }

    pub fn fallback(mut self, executor: Arc<dyn Executor>) -> Self {
        self.fallback = Some(executor);
        self
    }

    pub fn expect_compilers(mut self, compilers: &[&str]) -> Self {
        self.expected_compilers = Some(compilers.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn build(self) -> Result<TaskService, BuildError> {
        let mut registry = ExecutorRegistry::new();
        for (compiler, executor) in self.executors {
            registry.register(compiler, executor)?;
        }

        if let Some(expected) = &self.expected_compilers {
            let registered = registry.compilers();
            let missing: Vec<String> = expected
                .iter()
                .filter(|c| !registered.contains(c))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingCompilers(missing));
            }
        }

        let fallback: Arc<dyn Executor> = match self.fallback {
            Some(executor) => executor,
            None => Arc::new(SimulatedExecutor::with_clock(
                self.config.runner.work_delay(),
                Arc::clone(&self.clock),
            )),
        };
        registry.set_fallback(fallback);

        let store: Arc<dyn TaskStore> = match self.store {
            Some(store) => store,
            None => Arc::new(InMemoryTaskStore::with_parts(
                Arc::new(UlidGenerator::new(SystemClock)),
                Arc::clone(&self.clock),
                self.config.store.transitions,
            )),
        };

        let runner = TaskRunner::new(Arc::clone(&store), Arc::new(registry))
            .with_timeout(self.config.runner.timeout());
        let dispatcher = Dispatcher::new(Arc::new(runner));

        Ok(TaskService::new(store, dispatcher))
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
