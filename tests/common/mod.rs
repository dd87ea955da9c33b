//! Shared test infrastructure for HTTP-level tests.
//!
//! # App Setup
//! - `init_app!(api)` - full route table wired to the given `Arc<dyn ApiClient>`
//! - `session_cookie()` / `csrf_token()` - carry a session into form posts
#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use chrono::NaiveDate;
use regex::Regex;

use expense_desk::SESSION_COOKIE;
use expense_desk::config::AppConfig;
use expense_desk::models::expense::{Expense, ExpenseStatus};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TEST_USER: &str = "test-user";
pub const PAGE_URI: &str = "/users/test-user/expenses";

// ============================================================================
// APP SETUP
// ============================================================================

pub fn test_config() -> AppConfig {
    AppConfig {
        default_user_id: Some(TEST_USER.to_string()),
        ..AppConfig::default()
    }
}

/// Build the application around an injected API client.
macro_rules! init_app {
    ($api:expr) => {{
        let api: std::sync::Arc<dyn expense_desk::api::ApiClient> = $api;
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(expense_desk::session_middleware(actix_web::cookie::Key::generate()))
                .app_data(actix_web::web::Data::from(api))
                .app_data(actix_web::web::Data::new($crate::common::test_config()))
                .configure(expense_desk::routes)
                .default_service(actix_web::web::to(expense_desk::handlers::not_found)),
        )
        .await
    }};
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn expense(id: &str, description: &str, amount: f64, date: &str, status: ExpenseStatus) -> Expense {
    Expense {
        id: id.to_string(),
        description: description.to_string(),
        amount,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("fixture date"),
        status,
        category: None,
    }
}

/// Three expenses spread across 2024.
pub fn expenses_2024() -> Vec<Expense> {
    vec![
        expense("e1", "Conference ticket", 300.0, "2024-01-01", ExpenseStatus::Approved),
        expense("e2", "Team lunch", 64.5, "2024-06-15", ExpenseStatus::Pending),
        expense("e3", "Taxi", 23.0, "2024-12-31", ExpenseStatus::Rejected),
    ]
}

// ============================================================================
// RESPONSE HELPERS
// ============================================================================

pub async fn body_string<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let body = test::read_body(resp).await;
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("response should set the session cookie")
        .into_owned()
}

pub fn csrf_token(html: &str) -> String {
    let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).expect("regex");
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .expect("page should embed a CSRF token")
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// The rendered "Your Expenses" section (everything after its heading).
pub fn expense_section(html: &str) -> &str {
    html.split_once("<h2>Your Expenses</h2>")
        .map(|(_, rest)| rest)
        .expect("page should contain the expense list section")
}

pub fn form_body(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).expect("form encoding")
}
