// Enrollment endpoints under `/enrollments`.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Enrollment, EnrollmentRequest, RecordId};

impl ApiClient {
    /// `GET /enrollments`
    pub async fn list_enrollments(&self) -> Result<Vec<Enrollment>, Error> {
        let url = self.url(&["enrollments"])?;
        self.get(url).await
    }

    /// `POST /enrollments`
    pub async fn enroll(
        &self,
        request: &EnrollmentRequest,
    ) -> Result<Option<Enrollment>, Error> {
        let url = self.url(&["enrollments"])?;
        debug!(student = %request.student_id, course = %request.course_id, "enrolling student");
        self.post(url, request).await
    }

    /// `PUT /enrollments/{id}/grade?score=` (no body)
    pub async fn update_grade(
        &self,
        id: &RecordId,
        score: f64,
    ) -> Result<Option<Enrollment>, Error> {
        let id = id.to_string();
        let url = self.url(&["enrollments", id.as_str(), "grade"])?;
        debug!(%id, score, "updating grade");
        self.put_with_params(url, &[("score", score)]).await
    }

    /// `PUT /enrollments/{id}/drop` (no body)
    pub async fn drop_enrollment(
        &self,
        id: &RecordId,
    ) -> Result<Option<Enrollment>, Error> {
        let id = id.to_string();
        let url = self.url(&["enrollments", id.as_str(), "drop"])?;
        debug!(%id, "dropping course");
        self.put_empty(url).await
    }

    /// `GET /enrollments/student/{id}`
    pub async fn enrollments_by_student(
        &self,
        student_id: &RecordId,
    ) -> Result<Vec<Enrollment>, Error> {
        let student_id = student_id.to_string();
        let url = self.url(&["enrollments", "student", student_id.as_str()])?;
        self.get(url).await
    }

    /// `GET /enrollments/course/{id}`
    pub async fn enrollments_by_course(
        &self,
        course_id: &RecordId,
    ) -> Result<Vec<Enrollment>, Error> {
        let course_id = course_id.to_string();
        let url = self.url(&["enrollments", "course", course_id.as_str()])?;
        self.get(url).await
    }
}
