use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::{AppError, ErrorResponse};
use crate::models::{MessageResponse, NewTodoRequest, Todo, UpdateTodoRequest};

/// HTTP client for the todo API, used by the dashboard.
#[derive(Clone, Debug)]
pub struct TodoApiClient {
    client: Client,
    base_url: String,
}

impl TodoApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn welcome(&self) -> Result<MessageResponse, AppError> {
        let response = self.client.get(self.url("/")).send().await?;
        parse(response).await
    }

    pub async fn list(&self) -> Result<Vec<Todo>, AppError> {
        let response = self.client.get(self.url("/read/")).send().await?;
        parse(response).await
    }

    pub async fn create(&self, req: &NewTodoRequest) -> Result<Todo, AppError> {
        let response = self
            .client
            .post(self.url("/add/"))
            .json(req)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn update(&self, id: i64, req: &UpdateTodoRequest) -> Result<Todo, AppError> {
        let response = self
            .client
            .put(self.url(&format!("/update/{}", id)))
            .json(req)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn delete(&self, id: i64) -> Result<MessageResponse, AppError> {
        let response = self
            .client
            .delete(self.url(&format!("/delete/{}", id)))
            .send()
            .await?;
        parse(response).await
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.detail)
        .unwrap_or(body);

    tracing::debug!("API error {}: {}", status, message);
    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}
