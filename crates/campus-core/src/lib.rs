//! Reactive record store between `campus-api` and UI consumers.
//!
//! - **[`CourseStore`]**: explicitly constructed state container holding
//!   the student, course, enrollment, and teacher lists plus a shared
//!   `loading` flag. Fetch actions replace a list wholesale; write actions
//!   call the API and then refetch the affected list.
//!
//! - **[`ListView<T>`]**: subscription handle vended by the store. Reads
//!   one list together with the `loading` flag; `changed()`, `settled()`,
//!   and `into_stream()` drive reactive rendering.
//!
//! - **[`CoreError`]**: consumer-facing error; `Rejected` when the server
//!   declined, transport-flavoured variants otherwise.

pub mod error;
pub mod store;

pub use error::CoreError;
pub use store::{CourseStore, ListState, ListStateStream, ListView, Snapshot};

// Re-export record types at the crate root for ergonomics.
pub use campus_api::{
    ApiClient, Course, CourseStatus, Enrollment, EnrollmentRequest, EnrollmentStatus, RecordId,
    Student, Teacher,
};
