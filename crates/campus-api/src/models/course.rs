use std::fmt;

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Lifecycle state of a course offering.
///
/// Values the server adds later land in [`Other`](Self::Other) and
/// serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    Open,
    Closed,
    Full,
    Cancelled,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("OPEN"),
            Self::Closed => f.write_str("CLOSED"),
            Self::Full => f.write_str("FULL"),
            Self::Cancelled => f.write_str("CANCELLED"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: RecordId,
    pub status: CourseStatus,
    #[serde(default)]
    pub current_enrollment: u32,
    #[serde(default)]
    pub max_students: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Course {
    /// Open for enrollment and below capacity.
    pub fn is_available(&self) -> bool {
        self.status == CourseStatus::Open && self.current_enrollment < self.max_students
    }

    /// Seats left before the course reaches capacity.
    pub fn remaining_seats(&self) -> u32 {
        self.max_students.saturating_sub(self.current_enrollment)
    }
}
