use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    middleware,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod token;

// Module for routing segregation (Public, Admin pages, Admin API).
pub mod routes;
use routes::{admin, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use repository::{MemoryRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application, aggregating all annotated paths and schemas. The resulting
/// JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login, handlers::auth::session, handlers::auth::logout,
        handlers::public::get_articles, handlers::public::get_article,
        handlers::public::get_testimonials, handlers::public::get_media,
        handlers::public::get_vacancies, handlers::public::get_vacancy,
        handlers::public::get_tenders, handlers::public::get_tender,
        handlers::public::get_reports, handlers::public::get_staff,
        handlers::public::get_galleries, handlers::public::get_gallery_images,
        handlers::public::subscribe,
        handlers::admin::get_stats, handlers::admin::list_admins,
        handlers::admin::list_articles, handlers::admin::get_article,
        handlers::admin::create_article, handlers::admin::update_article,
        handlers::admin::delete_article,
        handlers::admin::list_testimonials, handlers::admin::get_testimonial,
        handlers::admin::create_testimonial, handlers::admin::update_testimonial,
        handlers::admin::delete_testimonial,
        handlers::admin::list_media, handlers::admin::get_media_item,
        handlers::admin::create_media_item, handlers::admin::update_media_item,
        handlers::admin::delete_media_item,
        handlers::admin::list_vacancies, handlers::admin::get_vacancy,
        handlers::admin::create_vacancy, handlers::admin::update_vacancy,
        handlers::admin::delete_vacancy,
        handlers::admin::list_tenders, handlers::admin::get_tender,
        handlers::admin::create_tender, handlers::admin::update_tender,
        handlers::admin::delete_tender,
        handlers::admin::list_reports, handlers::admin::get_report,
        handlers::admin::create_report, handlers::admin::update_report,
        handlers::admin::delete_report,
        handlers::admin::list_staff, handlers::admin::get_staff_profile,
        handlers::admin::create_staff_profile, handlers::admin::update_staff_profile,
        handlers::admin::delete_staff_profile,
        handlers::admin::list_galleries, handlers::admin::get_gallery,
        handlers::admin::create_gallery, handlers::admin::update_gallery,
        handlers::admin::delete_gallery, handlers::admin::add_gallery_image,
        handlers::admin::delete_gallery_image,
        handlers::admin::list_subscribers, handlers::admin::delete_subscriber,
    ),
    components(
        schemas(
            models::AdminSummary, models::LoginRequest, models::SessionUser,
            models::Article, models::CreateArticleRequest, models::UpdateArticleRequest,
            models::Testimonial, models::CreateTestimonialRequest, models::UpdateTestimonialRequest,
            models::MediaItem, models::CreateMediaItemRequest, models::UpdateMediaItemRequest,
            models::Vacancy, models::CreateVacancyRequest, models::UpdateVacancyRequest,
            models::Tender, models::CreateTenderRequest, models::UpdateTenderRequest,
            models::Report, models::CreateReportRequest, models::UpdateReportRequest,
            models::StaffProfile, models::CreateStaffProfileRequest, models::UpdateStaffProfileRequest,
            models::Gallery, models::CreateGalleryRequest, models::UpdateGalleryRequest,
            models::GalleryImage, models::CreateGalleryImageRequest,
            models::Subscriber, models::SubscribeRequest, models::DashboardStats,
        )
    ),
    tags(
        (name = "civic-portal", description = "Civic Portal content management API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Implements the **Unified State Pattern**: the single, thread-safe,
/// immutable container holding the application's services and configuration,
/// shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Repository Layer: abstracts database access (and the schema guarantees
    /// that precede every query).
    pub repo: RepositoryState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These allow extractors to selectively pull components from the shared
// AppState rather than taking the whole state.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
///
/// Layering, innermost out:
/// 1. Public routes, ungated.
/// 2. Admin page + API routes behind the session gate (`route_layer`, so the
///    gate runs only for routes that actually matched).
/// 3. Request-id generation/propagation and tracing.
/// 4. CORS.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let session_gate =
        middleware::from_fn_with_state(state.clone(), auth::session_gate);

    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes: no middleware applied.
        .merge(public::public_routes())
        // Protected routes: the single place the session gate is attached.
        // Handlers behind it still re-derive the principal themselves.
        .merge(admin::admin_page_routes().route_layer(session_gate.clone()))
        .merge(admin::admin_api_routes().route_layer(session_gate))
        .with_state(state);

    // Observability and correlation layers (outermost).
    base_router
        .layer(
            ServiceBuilder::new()
                // Request ID generation: a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // Request tracing: wraps the request/response lifecycle in a span
                // correlated by the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Request ID propagation back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Customizes `TraceLayer` span creation: extracts the `x-request-id` header
/// (if present) and includes it in the structured logging metadata alongside
/// the HTTP method and URI, so every log line of a request is correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
