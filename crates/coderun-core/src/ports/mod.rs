//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! app 層はこれらの trait だけに依存し、実装（impls）は起動時に注入します。

pub mod clock;
pub mod executor;
pub mod id_generator;
pub mod task_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::executor::Executor;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::task_store::TaskStore;
