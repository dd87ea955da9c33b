use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{HttpResponse, cookie::Key, web};

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod templates_structs;
pub mod validate;

pub const SESSION_COOKIE: &str = "expense_desk_session";

/// Cookie-backed session used for flash messages and CSRF tokens.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}

/// Page routes. The caller provides `web::Data<dyn ApiClient>` and `web::Data<AppConfig>`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(|| async {
        HttpResponse::SeeOther()
            .insert_header(("Location", "/dashboard"))
            .finish()
    }))
    .route("/dashboard", web::get().to(handlers::dashboard::index))
    .route("/expenses", web::get().to(handlers::expense_handlers::my_expenses))
    .route("/users/{user_id}/expenses", web::get().to(handlers::expense_handlers::page))
    .route("/users/{user_id}/expenses", web::post().to(handlers::expense_handlers::request));
}
