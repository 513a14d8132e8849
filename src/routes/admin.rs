use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Admin Router Module
///
/// Every route in this module requires a valid admin session. The routers are
/// returned *without* the gate attached — `create_router` wraps them in the
/// session-gate layer so the protection is applied in exactly one place — but
/// each handler additionally re-derives the principal through the
/// `AdminSession` extractor.
///
/// Paths are written out in full and merged into the top-level router rather
/// than nested, so the gate's programmatic-vs-navigational classification sees
/// the original request path.
///
/// The navigable admin pages. An unauthenticated hit redirects to /admin/login.
pub fn admin_page_routes() -> Router<AppState> {
    Router::new()
        // GET /admin
        // Dashboard landing page.
        .route("/admin", get(handlers::pages::dashboard))
}

/// admin_api_routes
///
/// The protected JSON surface: full CRUD per content domain, the principal
/// listing, and dashboard counters. An unauthenticated hit is a structured 401.
pub fn admin_api_routes() -> Router<AppState> {
    Router::new()
        // --- Dashboard & principals ---
        .route("/api/admin/stats", get(handlers::admin::get_stats))
        .route("/api/admin/admins", get(handlers::admin::list_admins))
        // --- Articles ---
        .route(
            "/api/admin/articles",
            get(handlers::admin::list_articles).post(handlers::admin::create_article),
        )
        .route(
            "/api/admin/articles/{id}",
            get(handlers::admin::get_article)
                .put(handlers::admin::update_article)
                .delete(handlers::admin::delete_article),
        )
        // --- Testimonials ---
        .route(
            "/api/admin/testimonials",
            get(handlers::admin::list_testimonials).post(handlers::admin::create_testimonial),
        )
        .route(
            "/api/admin/testimonials/{id}",
            get(handlers::admin::get_testimonial)
                .put(handlers::admin::update_testimonial)
                .delete(handlers::admin::delete_testimonial),
        )
        // --- Media items ---
        .route(
            "/api/admin/media",
            get(handlers::admin::list_media).post(handlers::admin::create_media_item),
        )
        .route(
            "/api/admin/media/{id}",
            get(handlers::admin::get_media_item)
                .put(handlers::admin::update_media_item)
                .delete(handlers::admin::delete_media_item),
        )
        // --- Vacancies ---
        .route(
            "/api/admin/vacancies",
            get(handlers::admin::list_vacancies).post(handlers::admin::create_vacancy),
        )
        .route(
            "/api/admin/vacancies/{id}",
            get(handlers::admin::get_vacancy)
                .put(handlers::admin::update_vacancy)
                .delete(handlers::admin::delete_vacancy),
        )
        // --- Tenders ---
        .route(
            "/api/admin/tenders",
            get(handlers::admin::list_tenders).post(handlers::admin::create_tender),
        )
        .route(
            "/api/admin/tenders/{id}",
            get(handlers::admin::get_tender)
                .put(handlers::admin::update_tender)
                .delete(handlers::admin::delete_tender),
        )
        // --- Reports ---
        .route(
            "/api/admin/reports",
            get(handlers::admin::list_reports).post(handlers::admin::create_report),
        )
        .route(
            "/api/admin/reports/{id}",
            get(handlers::admin::get_report)
                .put(handlers::admin::update_report)
                .delete(handlers::admin::delete_report),
        )
        // --- Staff profiles ---
        .route(
            "/api/admin/staff",
            get(handlers::admin::list_staff).post(handlers::admin::create_staff_profile),
        )
        .route(
            "/api/admin/staff/{id}",
            get(handlers::admin::get_staff_profile)
                .put(handlers::admin::update_staff_profile)
                .delete(handlers::admin::delete_staff_profile),
        )
        // --- Galleries & images ---
        .route(
            "/api/admin/galleries",
            get(handlers::admin::list_galleries).post(handlers::admin::create_gallery),
        )
        .route(
            "/api/admin/galleries/{id}",
            get(handlers::admin::get_gallery)
                .put(handlers::admin::update_gallery)
                .delete(handlers::admin::delete_gallery),
        )
        .route(
            "/api/admin/galleries/{id}/images",
            post(handlers::admin::add_gallery_image),
        )
        .route(
            "/api/admin/gallery-images/{id}",
            delete(handlers::admin::delete_gallery_image),
        )
        // --- Subscribers ---
        .route(
            "/api/admin/subscribers",
            get(handlers::admin::list_subscribers),
        )
        .route(
            "/api/admin/subscribers/{id}",
            delete(handlers::admin::delete_subscriber),
        )
}
