use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any
/// client. Read-only content handlers in this module must only release
/// published rows; the published filter is enforced at the Repository level,
/// not left to the frontend.
///
/// The session endpoints live here too: login and logout obviously cannot sit
/// behind the gate, and session introspection answers with its own
/// `{"authenticated": false}` shape instead of the gate's generic 401.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated liveness probe for monitors and load balancers.
        .route("/health", get(|| async { "ok" }))
        // --- Session endpoints ---
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/session", get(handlers::auth::session))
        .route("/api/auth/logout", post(handlers::auth::logout))
        // GET /admin/login
        // The login page shell; the redirect target for unauthenticated
        // navigational requests into the admin area.
        .route("/admin/login", get(handlers::pages::login_page))
        // --- Published content ---
        .route("/api/articles", get(handlers::public::get_articles))
        .route("/api/articles/{id}", get(handlers::public::get_article))
        .route("/api/testimonials", get(handlers::public::get_testimonials))
        .route("/api/media", get(handlers::public::get_media))
        .route("/api/vacancies", get(handlers::public::get_vacancies))
        .route("/api/vacancies/{id}", get(handlers::public::get_vacancy))
        .route("/api/tenders", get(handlers::public::get_tenders))
        .route("/api/tenders/{id}", get(handlers::public::get_tender))
        .route("/api/reports", get(handlers::public::get_reports))
        .route("/api/staff", get(handlers::public::get_staff))
        .route("/api/galleries", get(handlers::public::get_galleries))
        .route(
            "/api/galleries/{id}/images",
            get(handlers::public::get_gallery_images),
        )
        // POST /api/subscribers
        // Mailing-list signup; the only public write. Duplicates are a 409.
        .route("/api/subscribers", post(handlers::public::subscribe))
}
