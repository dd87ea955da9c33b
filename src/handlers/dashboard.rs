use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::stats::StatsCounts;
use crate::templates_structs::{DashboardTemplate, PageContext, StatsPanel};

pub async fn index(
    api: web::Data<dyn ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config, "/dashboard");

    let tmpl = match api.get_groups().await {
        Ok(groups) => DashboardTemplate {
            ctx,
            stats: StatsPanel::from(StatsCounts::from_groups(&groups)),
            groups,
            load_error: None,
        },
        Err(e) => {
            log::error!("Could not load groups for dashboard: {e}");
            DashboardTemplate {
                ctx,
                stats: StatsPanel::from(StatsCounts::default()),
                groups: vec![],
                load_error: Some("Unable to load group statistics right now.".to_string()),
            }
        }
    };
    render(tmpl)
}
