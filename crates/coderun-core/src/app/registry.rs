use std::collections::HashMap;
use std::sync::Arc;

use crate::ports::Executor;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("executor for compiler '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// Registry of executors (compiler -> executor).
///
/// Design:
/// - Built during initialization (mutable).
/// - Used during runtime (immutable, shared via Arc).
/// - A fallback executor handles every compiler without its own entry.
#[derive(Default)]
pub struct ExecutorRegistry {
    executors: HashMap<String, Arc<dyn Executor>>,
    fallback: Option<Arc<dyn Executor>>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self {
            executors: HashMap::new(),
            fallback: None,
        }
    }

    pub fn register(
        &mut self,
        compiler: impl Into<String>,
        executor: Arc<dyn Executor>,
    ) -> Result<(), RegistryError> {
        let compiler = compiler.into();
        if self.executors.contains_key(&compiler) {
            return Err(RegistryError::AlreadyRegistered(compiler));
        }
        self.executors.insert(compiler, executor);
        Ok(())
    }

    /// Last call wins.
    pub fn set_fallback(&mut self, executor: Arc<dyn Executor>) {
        self.fallback = Some(executor);
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Exact match first, then the fallback.
    pub fn resolve(&self, compiler: &str) -> Option<Arc<dyn Executor>> {
        self.executors
            .get(compiler)
            .or(self.fallback.as_ref())
            .cloned()
    }

    pub fn compilers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.executors.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.executors.is_empty() && self.fallback.is_none()
    }
}
