// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::take_flash;
use crate::config::AppConfig;

mod dashboard;
mod expense;

pub use dashboard::*;
pub use expense::*;

/// Common context shared by all pages.
/// Templates access these as `ctx.app_name`, `ctx.flash`, etc.
pub struct PageContext {
    pub app_name: String,
    pub flash: Option<String>,
    pub csrf_token: String,
    pub current_path: String,
    pub default_user_id: Option<String>,
}

impl PageContext {
    pub fn build(session: &Session, config: &AppConfig, current_path: &str) -> Self {
        Self {
            app_name: config.app_name.clone(),
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            current_path: current_path.to_string(),
            default_user_id: config.default_user_id.clone(),
        }
    }

    pub fn is_active(&self, prefix: &str) -> bool {
        self.current_path.starts_with(prefix)
    }
}
