use serde::{Deserialize, Serialize};

use super::RecordId;

/// A student record. Only the identifier is interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: RecordId,
    /// Name, contact details, and anything else the server sends.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
