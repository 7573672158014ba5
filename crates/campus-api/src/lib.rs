// campus-api: Async Rust client for the campus student / course / enrollment backend

pub mod auth;
pub mod client;
mod endpoints;
pub mod error;
pub mod models;
pub mod notify;
pub mod transport;

pub use auth::{MemoryTokenStore, NoToken, StaticToken, TokenSource};
pub use client::{ApiClient, ClientConfig};
pub use error::{Error, ErrorKind};
pub use models::{
    Course, CourseStatus, Enrollment, EnrollmentRequest, EnrollmentStatus, Envelope, RecordId,
    Student, Teacher,
};
pub use notify::{BroadcastNotifier, LogNotifier, Notification, NotificationLevel, Notifier};
pub use transport::{TlsMode, TransportConfig};
