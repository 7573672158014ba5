use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub teacher_id: RecordId,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
