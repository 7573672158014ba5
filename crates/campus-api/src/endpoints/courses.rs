// Course endpoints under `/courses`.
//
// `available_courses` asks the server for its own notion of availability;
// the store computes the same view locally from the full list.

use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Course, RecordId};

impl ApiClient {
    /// `GET /courses`
    pub async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        let url = self.url(&["courses"])?;
        self.get(url).await
    }

    /// `GET /courses/{id}`
    pub async fn get_course(&self, id: &RecordId) -> Result<Course, Error> {
        let id = id.to_string();
        let url = self.url(&["courses", id.as_str()])?;
        self.get(url).await
    }

    /// `GET /courses/semester/{semester}`
    pub async fn courses_by_semester(&self, semester: &str) -> Result<Vec<Course>, Error> {
        let url = self.url(&["courses", "semester", semester])?;
        self.get(url).await
    }

    /// `GET /courses/available`
    pub async fn available_courses(&self) -> Result<Vec<Course>, Error> {
        let url = self.url(&["courses", "available"])?;
        self.get(url).await
    }

    /// `POST /courses`
    pub async fn create_course(
        &self,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<Course>, Error> {
        let url = self.url(&["courses"])?;
        debug!("creating course");
        self.post(url, body).await
    }

    /// `PUT /courses/{id}`
    pub async fn update_course(
        &self,
        id: &RecordId,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<Course>, Error> {
        let id = id.to_string();
        let url = self.url(&["courses", id.as_str()])?;
        debug!(%id, "updating course");
        self.put(url, body).await
    }

    /// `DELETE /courses/{id}`
    pub async fn delete_course(&self, id: &RecordId) -> Result<(), Error> {
        let id = id.to_string();
        let url = self.url(&["courses", id.as_str()])?;
        debug!(%id, "deleting course");
        let _: serde_json::Value = self.delete(url).await?;
        Ok(())
    }
}
