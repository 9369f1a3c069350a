pub mod memory;

use std::env;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use uuid::Uuid;

use crate::domain;
use crate::error::StoreError;
use crate::models::{Course, CourseUpdate, NewCourse, NewNote};

pub use memory::MemoryCourseStore;

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub base_url: String,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn new_from_env() -> Result<Self, StoreError> {
        let base_url = env::var("BRAINBOOST_API_URL")
            .map_err(|_| StoreError::Validation("BRAINBOOST_API_URL is not set".to_string()))?;
        Ok(Self::new(base_url))
    }
}

/// The remote course store contract. Every mutation is fire-and-forget from
/// the client's point of view: callers observe effects by re-fetching.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError>;
    async fn get_course(&self, id: &str) -> Result<Course, StoreError>;
    async fn add_course(&self, new: NewCourse) -> Result<Course, StoreError>;
    async fn update_course(&self, id: &str, update: CourseUpdate) -> Result<Course, StoreError>;
    async fn delete_course(&self, id: &str) -> Result<(), StoreError>;
    async fn enroll(&self, id: &str) -> Result<(), StoreError>;
    async fn update_progress(&self, id: &str, progress: u8) -> Result<(), StoreError>;
    async fn add_note(&self, id: &str, note: NewNote) -> Result<(), StoreError>;
    async fn toggle_note(&self, id: &str, note_id: Uuid) -> Result<(), StoreError>;
    async fn delete_note(&self, id: &str, note_id: Uuid) -> Result<(), StoreError>;
}

pub struct HttpCourseStore {
    client: Client,
    config: StoreConfig,
}

impl HttpCourseStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::Network(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Server {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Network(format!("failed to parse response: {e}")))
    }
}

#[async_trait]
impl CourseStore for HttpCourseStore {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        let response = self.send(self.client.get(self.url("/courses"))).await?;
        Self::parse(response).await
    }

    async fn get_course(&self, id: &str) -> Result<Course, StoreError> {
        let response = self
            .send(self.client.get(self.url(&format!("/courses/{id}"))))
            .await?;
        Self::parse(response).await
    }

    async fn add_course(&self, new: NewCourse) -> Result<Course, StoreError> {
        domain::validate_new_course(&new)?;
        let response = self
            .send(self.client.post(self.url("/courses")).json(&new))
            .await?;
        Self::parse(response).await
    }

    async fn update_course(&self, id: &str, update: CourseUpdate) -> Result<Course, StoreError> {
        let response = self
            .send(
                self.client
                    .put(self.url(&format!("/courses/{id}")))
                    .json(&update),
            )
            .await?;
        Self::parse(response).await
    }

    async fn delete_course(&self, id: &str) -> Result<(), StoreError> {
        self.send(self.client.delete(self.url(&format!("/courses/{id}"))))
            .await?;
        Ok(())
    }

    async fn enroll(&self, id: &str) -> Result<(), StoreError> {
        self.send(self.client.put(self.url(&format!("/courses/enroll/{id}"))))
            .await?;
        Ok(())
    }

    async fn update_progress(&self, id: &str, progress: u8) -> Result<(), StoreError> {
        // Clamp before send; the store clamps again and its echo wins.
        let progress = progress.min(100);
        self.send(
            self.client
                .put(self.url(&format!("/courses/progress/{id}")))
                .query(&[("progress", progress)]),
        )
        .await?;
        Ok(())
    }

    async fn add_note(&self, id: &str, note: NewNote) -> Result<(), StoreError> {
        let text = domain::validate_note_text(&note.text)?.to_string();
        let note = NewNote { text, ..note };
        self.send(
            self.client
                .post(self.url(&format!("/courses/{id}/notes")))
                .json(&note),
        )
        .await?;
        Ok(())
    }

    async fn toggle_note(&self, id: &str, note_id: Uuid) -> Result<(), StoreError> {
        self.send(
            self.client
                .put(self.url(&format!("/courses/{id}/notes/{note_id}/toggle"))),
        )
        .await?;
        Ok(())
    }

    async fn delete_note(&self, id: &str, note_id: Uuid) -> Result<(), StoreError> {
        self.send(
            self.client
                .delete(self.url(&format!("/courses/{id}/notes/{note_id}"))),
        )
        .await?;
        Ok(())
    }
}
