// ── Record store ──
//
// In-memory mirror of the server's lists, replaced wholesale after every
// round trip.

mod course_store;
mod list;
mod view;

pub use course_store::CourseStore;
pub use list::Snapshot;
pub use view::{ListState, ListStateStream, ListView};
