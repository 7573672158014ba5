use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Enrolled,
    Dropped,
    Completed,
    #[serde(untagged)]
    Other(String),
}

/// A student's seat in a course, with its grade once one is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub enrollment_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<RecordId>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EnrollmentStatus>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Enrollment {
    pub fn is_dropped(&self) -> bool {
        self.status == Some(EnrollmentStatus::Dropped)
    }
}

/// Body of `POST /enrollments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    pub student_id: RecordId,
    pub course_id: RecordId,
}

impl EnrollmentRequest {
    pub fn new(student_id: impl Into<RecordId>, course_id: impl Into<RecordId>) -> Self {
        Self {
            student_id: student_id.into(),
            course_id: course_id.into(),
        }
    }
}
