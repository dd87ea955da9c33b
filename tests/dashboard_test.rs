//! Dashboard and stats panel tests.
//!
//! - StatsPanel renders zero for missing counts, in fixed card order
//! - Dashboard derives counts from the group list
//! - A failed group fetch still renders the panel

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service};
use askama::Template;

use expense_desk::api::{ApiError, MockApiClient};
use expense_desk::models::group::Group;
use expense_desk::models::stats::StatsCounts;
use expense_desk::templates_structs::StatsPanel;

#[macro_use]
mod common;
use common::*;

fn group(name: &str, manager: &str, members: &[&str]) -> Group {
    Group {
        id: name.to_lowercase(),
        name: name.to_string(),
        manager: Some(manager.to_string()),
        members: members.iter().map(|m| m.to_string()).collect(),
    }
}

// ---------------------------------------------------------------------------
// StatsPanel
// ---------------------------------------------------------------------------

#[test]
fn test_stats_panel_missing_counts_render_zero() {
    let html = StatsPanel::new(None, None, None).render().expect("render");
    assert_eq!(html.matches(r#"<div class="stat-value">0</div>"#).count(), 3);
    assert!(html.contains("Employees Analysis"));
}

#[test]
fn test_stats_panel_mixed_counts() {
    let html = StatsPanel::new(Some(12), None, Some(3)).render().expect("render");
    assert!(html.contains(r#"<div class="stat-value">12</div>"#));
    assert!(html.contains(r#"<div class="stat-value">0</div>"#));
    assert!(html.contains(r#"<div class="stat-value">3</div>"#));
}

#[test]
fn test_stats_panel_card_order() {
    let html = StatsPanel::new(Some(1), Some(2), Some(3)).render().expect("render");
    let employees = html.find(">Employees<").expect("employees card");
    let managers = html.find(">Managers<").expect("managers card");
    let groups = html.find(">Groups<").expect("groups card");
    assert!(employees < managers && managers < groups);

    let again = StatsPanel::new(Some(1), Some(2), Some(3)).render().expect("render");
    assert_eq!(html, again);
}

#[test]
fn test_stats_panel_from_counts() {
    assert_eq!(StatsPanel::from(StatsCounts::default()), StatsPanel::new(None, None, None));
}

// ---------------------------------------------------------------------------
// Dashboard page
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_dashboard_counts_from_groups() {
    let groups = vec![
        group("Sales", "m1", &["e1", "e2"]),
        group("Support", "m2", &["e2", "e3", "e4"]),
    ];
    let mock = Arc::new(MockApiClient::new().with_groups(groups));
    let app = init_app!(mock.clone());

    let resp = call_service(&app, TestRequest::get().uri("/dashboard").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_string(resp).await;
    assert!(html.contains(r#"<div class="stat-value">4</div>"#));
    assert_eq!(html.matches(r#"<div class="stat-value">2</div>"#).count(), 2);
    assert!(html.contains("<td>Sales</td>"));
    assert!(html.contains("<td>Support</td>"));
}

#[actix_rt::test]
async fn test_dashboard_without_groups() {
    let mock = Arc::new(MockApiClient::new());
    let app = init_app!(mock.clone());

    let html = body_string(call_service(&app, TestRequest::get().uri("/dashboard").to_request()).await).await;
    assert_eq!(html.matches(r#"<div class="stat-value">0</div>"#).count(), 3);
    assert!(html.contains("No groups yet"));
}

#[actix_rt::test]
async fn test_dashboard_group_fetch_failure() {
    let mock = Arc::new(MockApiClient::new());
    mock.fail_groups(ApiError::Network("timed out".into()));
    let app = init_app!(mock.clone());

    let resp = call_service(&app, TestRequest::get().uri("/dashboard").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_string(resp).await;
    assert!(html.contains("Unable to load group statistics right now."));
    assert_eq!(html.matches(r#"<div class="stat-value">0</div>"#).count(), 3);
}
