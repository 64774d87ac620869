//! Transport-facing request/response shapes.
//!
//! HTTP などの adapter はこれらを JSON にエンコードするだけでよい。
//! フィールド名は wire 上の名前そのもの。

use serde::{Deserialize, Serialize};

use super::{TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub compiler: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: TaskId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultResponse {
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use ulid::Ulid;

    #[test]
    fn submit_request_missing_fields_default_to_empty() {
        let req: SubmitRequest = serde_json::from_value(json!({ "program": "print(1)" })).unwrap();
        assert_eq!(req.program, "print(1)");
        assert_eq!(req.compiler, "");
    }

    #[test]
    fn responses_use_wire_field_names() {
        let id = TaskId::from_ulid(Ulid::new());

        let value = serde_json::to_value(IdResponse { id }).unwrap();
        assert_eq!(value, json!({ "id": id.to_string() }));

        let value = serde_json::to_value(StatusResponse {
            status: TaskStatus::InProgress,
        })
        .unwrap();
        assert_eq!(value, json!({ "status": "in_progress" }));

        let value = serde_json::to_value(ErrorResponse::new("task is not ready yet")).unwrap();
        assert_eq!(value, json!({ "error": "task is not ready yet" }));
    }
}
