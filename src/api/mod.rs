//! Client side of the expense backend.
//!
//! Handlers only see the [`ApiClient`] trait. `main` injects either the
//! HTTP client or the in-memory demo client; tests inject [`mock::MockApiClient`].

use async_trait::async_trait;
use std::fmt;

use crate::models::expense::{Expense, ExpenseDraft};
use crate::models::group::Group;
use crate::models::user::User;

pub mod http;
pub mod memory;
pub mod mock;

pub use http::HttpApiClient;
pub use memory::InMemoryApiClient;
pub use mock::MockApiClient;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Network(String),
    Status(u16),
    Parse(String),
    Unavailable(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Network error: {e}"),
            ApiError::Status(code) => write!(f, "Server responded with status {code}"),
            ApiError::Parse(e) => write!(f, "Could not parse response: {e}"),
            ApiError::Unavailable(e) => write!(f, "Service unavailable: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get_groups(&self) -> ApiResult<Vec<Group>>;

    async fn get_user_by_id(&self, user_id: &str) -> ApiResult<User>;

    /// Expenses of one user, in backend order.
    async fn get_expenses_by_user_id(&self, user_id: &str) -> ApiResult<Vec<Expense>>;

    async fn request_expense(&self, draft: &ExpenseDraft) -> ApiResult<()>;
}
