//! ServiceConfig - TOML 設定
//!
//! ```toml
//! [store]
//! transitions = "strict"   # or "permissive"
//!
//! [runner]
//! work_delay_ms = 1000
//! timeout_ms = 30000       # 省略時は無制限
//! ```
//!
//! 省略したキーはデフォルト値、未知のキーはエラー。

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::TransitionPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub store: StoreConfig,
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub transitions: TransitionPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Delay of the simulated executor.
    pub work_delay_ms: u64,

    /// Upper bound for one execution; unset means no bound.
    pub timeout_ms: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            work_delay_ms: 1000,
            timeout_ms: None,
        }
    }
}

impl RunnerConfig {
    pub fn work_delay(&self) -> Duration {
        Duration::from_millis(self.work_delay_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl ServiceConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}
