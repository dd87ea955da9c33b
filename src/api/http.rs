use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::{ApiClient, ApiError, ApiResult};
use crate::models::expense::{Expense, ExpenseDraft};
use crate::models::group::Group;
use crate::models::user::User;

/// JSON-over-HTTP client for the expense backend.
///
/// Endpoints, relative to the base URL:
/// `GET groups`, `GET users/{id}`, `GET expenses/user/{id}`, `POST expenses`.
pub struct HttpApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Network(format!("Invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Network(format!("Invalid base URL '{base_url}'")));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Network(format!("Invalid base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, segments: &[&str]) -> ApiResult<Value> {
        let url = self.endpoint(segments)?;
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Decode a JSON array. Any other shape is logged and read as an empty list.
fn list_from_value<T: DeserializeOwned>(value: Value, what: &str) -> ApiResult<Vec<T>> {
    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string())),
        other => {
            log::warn!("Expected a list of {what}, got {}; treating as empty", kind_of(&other));
            Ok(Vec::new())
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get_groups(&self) -> ApiResult<Vec<Group>> {
        let value = self.get_json(&["groups"]).await?;
        list_from_value(value, "groups")
    }

    async fn get_user_by_id(&self, user_id: &str) -> ApiResult<User> {
        let value = self.get_json(&["users", user_id]).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get_expenses_by_user_id(&self, user_id: &str) -> ApiResult<Vec<Expense>> {
        let value = self.get_json(&["expenses", "user", user_id]).await?;
        list_from_value(value, "expenses")
    }

    async fn request_expense(&self, draft: &ExpenseDraft) -> ApiResult<()> {
        let url = self.endpoint(&["expenses"])?;
        log::debug!("POST {url}");
        let response = self
            .client
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::Status(response.status().as_u16()))
        }
    }
}
