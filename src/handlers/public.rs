use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    models::{
        Article, Gallery, GalleryImage, MediaItem, Report, StaffProfile, Subscriber,
        SubscribeRequest, Tender, Testimonial, Vacancy,
    },
};

// The public surface is read-only over published content. Every handler here
// goes through the repository's published/open filters; unpublished rows are
// indistinguishable from absent ones.

/// get_articles
///
/// [Public Route] Lists published articles, newest first.
#[utoipa::path(
    get,
    path = "/api/articles",
    responses((status = 200, description = "Published articles", body = [Article]))
)]
pub async fn get_articles(State(state): State<AppState>) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state
        .repo
        .list_articles(true)
        .await
        .map_err(|e| ApiError::internal("load articles", e))?;
    Ok(Json(articles))
}

/// get_article
///
/// [Public Route] Single published article. An unpublished or unknown id is a
/// 404 either way.
#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(("id" = Uuid, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Found", body = Article),
        (status = 404, description = "Not published or unknown")
    )
)]
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Article>, ApiError> {
    let article = state
        .repo
        .get_article(id)
        .await
        .map_err(|e| ApiError::internal("load article", e))?
        .filter(|a| a.is_published)
        .ok_or(ApiError::NotFound("Article"))?;
    Ok(Json(article))
}

/// get_testimonials
///
/// [Public Route] Published testimonials.
#[utoipa::path(
    get,
    path = "/api/testimonials",
    responses((status = 200, description = "Published testimonials", body = [Testimonial]))
)]
pub async fn get_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let testimonials = state
        .repo
        .list_testimonials(true)
        .await
        .map_err(|e| ApiError::internal("load testimonials", e))?;
    Ok(Json(testimonials))
}

/// get_media
///
/// [Public Route] Published media items.
#[utoipa::path(
    get,
    path = "/api/media",
    responses((status = 200, description = "Published media", body = [MediaItem]))
)]
pub async fn get_media(State(state): State<AppState>) -> Result<Json<Vec<MediaItem>>, ApiError> {
    let media = state
        .repo
        .list_media(true)
        .await
        .map_err(|e| ApiError::internal("load media", e))?;
    Ok(Json(media))
}

/// get_vacancies
///
/// [Public Route] Open job vacancies.
#[utoipa::path(
    get,
    path = "/api/vacancies",
    responses((status = 200, description = "Open vacancies", body = [Vacancy]))
)]
pub async fn get_vacancies(State(state): State<AppState>) -> Result<Json<Vec<Vacancy>>, ApiError> {
    let vacancies = state
        .repo
        .list_vacancies(true)
        .await
        .map_err(|e| ApiError::internal("load vacancies", e))?;
    Ok(Json(vacancies))
}

/// get_vacancy
///
/// [Public Route] Single open vacancy.
#[utoipa::path(
    get,
    path = "/api/vacancies/{id}",
    params(("id" = Uuid, Path, description = "Vacancy ID")),
    responses((status = 200, description = "Found", body = Vacancy))
)]
pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vacancy>, ApiError> {
    let vacancy = state
        .repo
        .get_vacancy(id)
        .await
        .map_err(|e| ApiError::internal("load vacancy", e))?
        .filter(|v| v.is_open)
        .ok_or(ApiError::NotFound("Vacancy"))?;
    Ok(Json(vacancy))
}

/// get_tenders
///
/// [Public Route] Published procurement notices.
#[utoipa::path(
    get,
    path = "/api/tenders",
    responses((status = 200, description = "Published tenders", body = [Tender]))
)]
pub async fn get_tenders(State(state): State<AppState>) -> Result<Json<Vec<Tender>>, ApiError> {
    let tenders = state
        .repo
        .list_tenders(true)
        .await
        .map_err(|e| ApiError::internal("load tenders", e))?;
    Ok(Json(tenders))
}

/// get_tender
///
/// [Public Route] Single published procurement notice.
#[utoipa::path(
    get,
    path = "/api/tenders/{id}",
    params(("id" = Uuid, Path, description = "Tender ID")),
    responses((status = 200, description = "Found", body = Tender))
)]
pub async fn get_tender(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Tender>, ApiError> {
    let tender = state
        .repo
        .get_tender(id)
        .await
        .map_err(|e| ApiError::internal("load tender", e))?
        .filter(|t| t.is_published)
        .ok_or(ApiError::NotFound("Tender"))?;
    Ok(Json(tender))
}

/// get_reports
///
/// [Public Route] Published annual/periodic reports, newest year first.
#[utoipa::path(
    get,
    path = "/api/reports",
    responses((status = 200, description = "Published reports", body = [Report]))
)]
pub async fn get_reports(State(state): State<AppState>) -> Result<Json<Vec<Report>>, ApiError> {
    let reports = state
        .repo
        .list_reports(true)
        .await
        .map_err(|e| ApiError::internal("load reports", e))?;
    Ok(Json(reports))
}

/// get_staff
///
/// [Public Route] The published team listing, in display order.
#[utoipa::path(
    get,
    path = "/api/staff",
    responses((status = 200, description = "Published staff profiles", body = [StaffProfile]))
)]
pub async fn get_staff(
    State(state): State<AppState>,
) -> Result<Json<Vec<StaffProfile>>, ApiError> {
    let staff = state
        .repo
        .list_staff(true)
        .await
        .map_err(|e| ApiError::internal("load staff profiles", e))?;
    Ok(Json(staff))
}

/// get_galleries
///
/// [Public Route] All image galleries.
#[utoipa::path(
    get,
    path = "/api/galleries",
    responses((status = 200, description = "Galleries", body = [Gallery]))
)]
pub async fn get_galleries(
    State(state): State<AppState>,
) -> Result<Json<Vec<Gallery>>, ApiError> {
    let galleries = state
        .repo
        .list_galleries()
        .await
        .map_err(|e| ApiError::internal("load galleries", e))?;
    Ok(Json(galleries))
}

/// get_gallery_images
///
/// [Public Route] Images of one gallery, in display order. The gallery must
/// exist; an empty gallery returns an empty list, not a 404.
#[utoipa::path(
    get,
    path = "/api/galleries/{id}/images",
    params(("id" = Uuid, Path, description = "Gallery ID")),
    responses((status = 200, description = "Images", body = [GalleryImage]))
)]
pub async fn get_gallery_images(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<GalleryImage>>, ApiError> {
    state
        .repo
        .get_gallery(id)
        .await
        .map_err(|e| ApiError::internal("load gallery", e))?
        .ok_or(ApiError::NotFound("Gallery"))?;

    let images = state
        .repo
        .list_gallery_images(id)
        .await
        .map_err(|e| ApiError::internal("load gallery images", e))?;
    Ok(Json(images))
}

/// subscribe
///
/// [Public Route] Mailing-list signup. The email is normalized before insert;
/// a duplicate surfaces as a 409 from the storage layer's unique constraint.
#[utoipa::path(
    post,
    path = "/api/subscribers",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = Subscriber),
        (status = 409, description = "Already subscribed")
    )
)]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<Subscriber>), ApiError> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::Validation("email"));
    }

    let subscriber = state.repo.add_subscriber(&email).await?;
    Ok((StatusCode::CREATED, Json(subscriber)))
}
