// ── Central record store ──
//
// Holds the four entity lists and the shared `loading` flag. Writes go
// through the API first and are then mirrored by refetching the affected
// list; nothing is ever patched locally.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use campus_api::{ApiClient, Course, Enrollment, EnrollmentRequest, RecordId, Student, Teacher};

use super::list::{EntityList, Snapshot};
use super::view::ListView;
use crate::error::CoreError;

/// State container for students, courses, enrollments, and teachers.
///
/// Construct once at startup and share it (typically behind an `Arc`).
/// Actions take `&self`; overlapping actions are not serialized, and when
/// two fetches of the same list race, whichever response lands last wins.
///
/// `loading` is a single advisory flag shared by all four fetch actions,
/// so overlapping fetches of different lists clear each other's signal.
pub struct CourseStore {
    api: ApiClient,
    students: EntityList<Student>,
    courses: EntityList<Course>,
    enrollments: EntityList<Enrollment>,
    teachers: EntityList<Teacher>,
    loading: watch::Sender<bool>,
}

/// Raises `loading` on creation and clears it on drop, so the flag is
/// reset on success, on failure, and when the action's future is dropped.
struct LoadingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> LoadingGuard<'a> {
    fn begin(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl CourseStore {
    pub fn new(api: ApiClient) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            api,
            students: EntityList::new(),
            courses: EntityList::new(),
            enrollments: EntityList::new(),
            teachers: EntityList::new(),
            loading,
        }
    }

    /// The client this store issues its requests through.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn students(&self) -> Snapshot<Student> {
        self.students.snapshot()
    }

    pub fn courses(&self) -> Snapshot<Course> {
        self.courses.snapshot()
    }

    pub fn enrollments(&self) -> Snapshot<Enrollment> {
        self.enrollments.snapshot()
    }

    pub fn teachers(&self) -> Snapshot<Teacher> {
        self.teachers.snapshot()
    }

    /// One flag for every list. With overlapping actions it drops back to
    /// `false` as soon as the first one finishes.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    // ── Derived views (computed on every call) ───────────────────────

    /// Courses that are `OPEN` and below capacity, in list order.
    pub fn available_courses(&self) -> Vec<Arc<Course>> {
        self.courses.filter(Course::is_available)
    }

    pub fn student_by_id(&self, id: &RecordId) -> Option<Arc<Student>> {
        self.students.find(|s| s.student_id == *id)
    }

    pub fn course_by_id(&self, id: &RecordId) -> Option<Arc<Course>> {
        self.courses.find(|c| c.course_id == *id)
    }

    // ── Subscriptions ────────────────────────────────────────────────
    //
    // Every list view also carries the shared `loading` flag.

    pub fn subscribe_students(&self) -> ListView<Student> {
        ListView::new(self.students.subscribe(), self.loading.subscribe())
    }

    pub fn subscribe_courses(&self) -> ListView<Course> {
        ListView::new(self.courses.subscribe(), self.loading.subscribe())
    }

    pub fn subscribe_enrollments(&self) -> ListView<Enrollment> {
        ListView::new(self.enrollments.subscribe(), self.loading.subscribe())
    }

    pub fn subscribe_teachers(&self) -> ListView<Teacher> {
        ListView::new(self.teachers.subscribe(), self.loading.subscribe())
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    // ── Fetch-all actions ────────────────────────────────────────────

    pub async fn fetch_students(&self) -> Result<(), CoreError> {
        let _loading = LoadingGuard::begin(&self.loading);
        let students = self.api.list_students().await?;
        debug!(count = students.len(), "students refreshed");
        self.students.replace(students);
        Ok(())
    }

    pub async fn fetch_courses(&self) -> Result<(), CoreError> {
        let _loading = LoadingGuard::begin(&self.loading);
        let courses = self.api.list_courses().await?;
        debug!(count = courses.len(), "courses refreshed");
        self.courses.replace(courses);
        Ok(())
    }

    pub async fn fetch_enrollments(&self) -> Result<(), CoreError> {
        let _loading = LoadingGuard::begin(&self.loading);
        let enrollments = self.api.list_enrollments().await?;
        debug!(count = enrollments.len(), "enrollments refreshed");
        self.enrollments.replace(enrollments);
        Ok(())
    }

    pub async fn fetch_teachers(&self) -> Result<(), CoreError> {
        let _loading = LoadingGuard::begin(&self.loading);
        let teachers = self.api.list_teachers().await?;
        debug!(count = teachers.len(), "teachers refreshed");
        self.teachers.replace(teachers);
        Ok(())
    }

    // ── Mutate-then-refetch actions ──────────────────────────────────
    //
    // A failed mutation returns before the refetch. A failed refetch
    // after a successful mutation is returned as-is. The returned record is
    // whatever the server echoed back, `None` when it sent no `data`.

    pub async fn create_student(
        &self,
        payload: &(impl Serialize + Sync),
    ) -> Result<Option<Student>, CoreError> {
        let created = self.api.create_student(payload).await?;
        self.fetch_students().await?;
        Ok(created)
    }

    pub async fn update_student(
        &self,
        id: &RecordId,
        payload: &(impl Serialize + Sync),
    ) -> Result<Option<Student>, CoreError> {
        let updated = self.api.update_student(id, payload).await?;
        self.fetch_students().await?;
        Ok(updated)
    }

    pub async fn delete_student(&self, id: &RecordId) -> Result<(), CoreError> {
        self.api.delete_student(id).await?;
        self.fetch_students().await
    }

    pub async fn create_course(
        &self,
        payload: &(impl Serialize + Sync),
    ) -> Result<Option<Course>, CoreError> {
        let created = self.api.create_course(payload).await?;
        self.fetch_courses().await?;
        Ok(created)
    }

    pub async fn enroll_student(
        &self,
        request: &EnrollmentRequest,
    ) -> Result<Option<Enrollment>, CoreError> {
        let enrollment = self.api.enroll(request).await?;
        self.fetch_enrollments().await?;
        Ok(enrollment)
    }

    pub async fn update_grade(
        &self,
        enrollment_id: &RecordId,
        score: f64,
    ) -> Result<Option<Enrollment>, CoreError> {
        let graded = self.api.update_grade(enrollment_id, score).await?;
        self.fetch_enrollments().await?;
        Ok(graded)
    }
}

impl std::fmt::Debug for CourseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourseStore")
            .field("students", &self.students.len())
            .field("courses", &self.courses.len())
            .field("enrollments", &self.enrollments.len())
            .field("teachers", &self.teachers.len())
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}
