//! Domain model (ids, task record, status, errors, transport DTOs).

pub mod dto;
pub mod errors;
pub mod ids;
pub mod state;
pub mod task;

pub use dto::{ErrorResponse, IdResponse, ResultResponse, StatusResponse, SubmitRequest};
pub use errors::{ExecError, StoreError};
pub use ids::{ParseTaskIdError, TaskId};
pub use state::{TaskStatus, TransitionPolicy};
pub use task::Task;
