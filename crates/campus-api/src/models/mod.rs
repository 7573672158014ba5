// Wire models
//
// Every endpoint wraps its payload in `Envelope`. Record types model the
// fields this client reasons about; everything else the server sends is
// carried through untouched in `extra`.

mod course;
mod enrollment;
mod id;
mod student;
mod teacher;

use serde::Deserialize;

pub use course::{Course, CourseStatus};
pub use enrollment::{Enrollment, EnrollmentRequest, EnrollmentStatus};
pub use id::RecordId;
pub use student::Student;
pub use teacher::Teacher;

/// Uniform response envelope.
///
/// ```json
/// { "success": true, "data": [...], "message": "optional" }
/// ```
///
/// `data` is kept as raw JSON until `success` has been checked, so a
/// failure envelope never trips over a payload shape mismatch.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub message: Option<String>,
}
