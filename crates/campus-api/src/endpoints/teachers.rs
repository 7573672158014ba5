// Teacher endpoints under `/teachers`.

use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{RecordId, Teacher};

impl ApiClient {
    /// `GET /teachers`
    pub async fn list_teachers(&self) -> Result<Vec<Teacher>, Error> {
        let url = self.url(&["teachers"])?;
        self.get(url).await
    }

    /// `GET /teachers/{id}`
    pub async fn get_teacher(&self, id: &RecordId) -> Result<Teacher, Error> {
        let id = id.to_string();
        let url = self.url(&["teachers", id.as_str()])?;
        self.get(url).await
    }

    /// `POST /teachers`
    pub async fn create_teacher(
        &self,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<Teacher>, Error> {
        let url = self.url(&["teachers"])?;
        debug!("creating teacher");
        self.post(url, body).await
    }

    /// `PUT /teachers/{id}`
    pub async fn update_teacher(
        &self,
        id: &RecordId,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<Teacher>, Error> {
        let id = id.to_string();
        let url = self.url(&["teachers", id.as_str()])?;
        debug!(%id, "updating teacher");
        self.put(url, body).await
    }

    /// `DELETE /teachers/{id}`
    pub async fn delete_teacher(&self, id: &RecordId) -> Result<(), Error> {
        let id = id.to_string();
        let url = self.url(&["teachers", id.as_str()])?;
        debug!(%id, "deleting teacher");
        let _: serde_json::Value = self.delete(url).await?;
        Ok(())
    }
}
