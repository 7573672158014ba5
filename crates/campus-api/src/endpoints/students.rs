// Student endpoints under `/students`.

use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{RecordId, Student};

impl ApiClient {
    /// `GET /students`
    pub async fn list_students(&self) -> Result<Vec<Student>, Error> {
        let url = self.url(&["students"])?;
        self.get(url).await
    }

    /// `GET /students/{id}`
    pub async fn get_student(&self, id: &RecordId) -> Result<Student, Error> {
        let id = id.to_string();
        let url = self.url(&["students", id.as_str()])?;
        self.get(url).await
    }

    /// `POST /students`. The body is passed through as-is.
    pub async fn create_student(
        &self,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<Student>, Error> {
        let url = self.url(&["students"])?;
        debug!("creating student");
        self.post(url, body).await
    }

    /// `PUT /students/{id}`
    pub async fn update_student(
        &self,
        id: &RecordId,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<Student>, Error> {
        let id = id.to_string();
        let url = self.url(&["students", id.as_str()])?;
        debug!(%id, "updating student");
        self.put(url, body).await
    }

    /// `DELETE /students/{id}`
    pub async fn delete_student(&self, id: &RecordId) -> Result<(), Error> {
        let id = id.to_string();
        let url = self.url(&["students", id.as_str()])?;
        debug!(%id, "deleting student");
        let _: serde_json::Value = self.delete(url).await?;
        Ok(())
    }

    /// `GET /students/search?keyword=`
    pub async fn search_students(&self, keyword: &str) -> Result<Vec<Student>, Error> {
        let url = self.url(&["students", "search"])?;
        self.get_with_params(url, &[("keyword", keyword)]).await
    }
}
