// Endpoint groups
//
// One inherent-method group on `ApiClient` per entity. Each method maps a
// single domain action to a single HTTP call and returns the unwrapped
// payload. Writes return `Option<T>`: the backend may acknowledge a write
// with `data: null` or no `data` at all, and that is still a success.

mod courses;
mod enrollments;
mod students;
mod teachers;
