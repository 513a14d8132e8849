use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    auth::AdminSession,
    error::ApiError,
    models::{
        AdminSummary, Article, CreateArticleRequest, CreateGalleryImageRequest,
        CreateGalleryRequest, CreateMediaItemRequest, CreateReportRequest,
        CreateStaffProfileRequest, CreateTenderRequest, CreateTestimonialRequest,
        CreateVacancyRequest, DashboardStats, Gallery, GalleryImage, MediaItem, Report,
        StaffProfile, Subscriber, Tender, Testimonial, UpdateArticleRequest, UpdateGalleryRequest,
        UpdateMediaItemRequest, UpdateReportRequest, UpdateStaffProfileRequest,
        UpdateTenderRequest, UpdateTestimonialRequest, UpdateVacancyRequest, Vacancy,
    },
    seed,
};

// Every handler in this file sits behind the session gate AND re-derives the
// principal through the `AdminSession` extractor. The repeated shape is
// deliberate: list-all (drafts included), get, create, update, delete per
// content domain, each touching its own schema domain through the repository.

/// require
///
/// The one validation rule this surface enforces: a required text field must
/// be present and non-blank.
fn require(value: &str, field: &'static str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::Validation(field))
    } else {
        Ok(())
    }
}

// --- Dashboard & principals ---

/// get_stats
///
/// [Admin Route] Core counters for the dashboard landing page.
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses((status = 200, description = "Dashboard counters", body = DashboardStats))
)]
pub async fn get_stats(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = state
        .repo
        .get_stats()
        .await
        .map_err(|e| ApiError::internal("load dashboard stats", e))?;
    Ok(Json(stats))
}

/// list_admins
///
/// [Admin Route] Lists administrator principals. This is one of the two
/// first-touch points of a fresh deployment, so it runs the bootstrap seed
/// before reading.
#[utoipa::path(
    get,
    path = "/api/admin/admins",
    responses((status = 200, description = "Administrators", body = [AdminSummary]))
)]
pub async fn list_admins(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminSummary>>, ApiError> {
    seed::ensure_default_admin(&state.repo, &state.config).await?;
    let admins = state
        .repo
        .list_admins()
        .await
        .map_err(|e| ApiError::internal("load administrators", e))?;
    Ok(Json(admins.into_iter().map(AdminSummary::from).collect()))
}

// --- Articles ---

#[utoipa::path(
    get,
    path = "/api/admin/articles",
    responses((status = 200, description = "All articles, drafts included", body = [Article]))
)]
pub async fn list_articles(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state
        .repo
        .list_articles(false)
        .await
        .map_err(|e| ApiError::internal("load articles", e))?;
    Ok(Json(articles))
}

#[utoipa::path(
    get,
    path = "/api/admin/articles/{id}",
    params(("id" = Uuid, Path, description = "Article ID")),
    responses((status = 200, description = "Found", body = Article))
)]
pub async fn get_article(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Article>, ApiError> {
    let article = state
        .repo
        .get_article(id)
        .await
        .map_err(|e| ApiError::internal("load article", e))?
        .ok_or(ApiError::NotFound("Article"))?;
    Ok(Json(article))
}

/// create_article
///
/// [Admin Route] New articles start as drafts; the creating principal is
/// recorded as the author.
#[utoipa::path(
    post,
    path = "/api/admin/articles",
    request_body = CreateArticleRequest,
    responses((status = 201, description = "Created as draft", body = Article))
)]
pub async fn create_article(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateArticleRequest>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    require(&payload.title, "title")?;
    require(&payload.body, "body")?;
    let article = state
        .repo
        .create_article(payload, admin.id)
        .await
        .map_err(|e| ApiError::internal("create article", e))?;
    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    put,
    path = "/api/admin/articles/{id}",
    params(("id" = Uuid, Path, description = "Article ID")),
    request_body = UpdateArticleRequest,
    responses((status = 200, description = "Updated", body = Article))
)]
pub async fn update_article(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateArticleRequest>,
) -> Result<Json<Article>, ApiError> {
    let article = state
        .repo
        .update_article(id, payload)
        .await
        .map_err(|e| ApiError::internal("update article", e))?
        .ok_or(ApiError::NotFound("Article"))?;
    Ok(Json(article))
}

#[utoipa::path(
    delete,
    path = "/api/admin/articles/{id}",
    params(("id" = Uuid, Path, description = "Article ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_article(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_article(id)
        .await
        .map_err(|e| ApiError::internal("delete article", e))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Article"))
    }
}

// --- Testimonials ---

#[utoipa::path(
    get,
    path = "/api/admin/testimonials",
    responses((status = 200, description = "All testimonials", body = [Testimonial]))
)]
pub async fn list_testimonials(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let testimonials = state
        .repo
        .list_testimonials(false)
        .await
        .map_err(|e| ApiError::internal("load testimonials", e))?;
    Ok(Json(testimonials))
}

#[utoipa::path(
    get,
    path = "/api/admin/testimonials/{id}",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    responses((status = 200, description = "Found", body = Testimonial))
)]
pub async fn get_testimonial(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Testimonial>, ApiError> {
    let testimonial = state
        .repo
        .get_testimonial(id)
        .await
        .map_err(|e| ApiError::internal("load testimonial", e))?
        .ok_or(ApiError::NotFound("Testimonial"))?;
    Ok(Json(testimonial))
}

#[utoipa::path(
    post,
    path = "/api/admin/testimonials",
    request_body = CreateTestimonialRequest,
    responses((status = 201, description = "Created", body = Testimonial))
)]
pub async fn create_testimonial(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateTestimonialRequest>,
) -> Result<(StatusCode, Json<Testimonial>), ApiError> {
    require(&payload.author_name, "author_name")?;
    require(&payload.quote, "quote")?;
    let testimonial = state
        .repo
        .create_testimonial(payload)
        .await
        .map_err(|e| ApiError::internal("create testimonial", e))?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

#[utoipa::path(
    put,
    path = "/api/admin/testimonials/{id}",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    request_body = UpdateTestimonialRequest,
    responses((status = 200, description = "Updated", body = Testimonial))
)]
pub async fn update_testimonial(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTestimonialRequest>,
) -> Result<Json<Testimonial>, ApiError> {
    let testimonial = state
        .repo
        .update_testimonial(id, payload)
        .await
        .map_err(|e| ApiError::internal("update testimonial", e))?
        .ok_or(ApiError::NotFound("Testimonial"))?;
    Ok(Json(testimonial))
}

#[utoipa::path(
    delete,
    path = "/api/admin/testimonials/{id}",
    params(("id" = Uuid, Path, description = "Testimonial ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_testimonial(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_testimonial(id)
        .await
        .map_err(|e| ApiError::internal("delete testimonial", e))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Testimonial"))
    }
}

// --- Media items ---

#[utoipa::path(
    get,
    path = "/api/admin/media",
    responses((status = 200, description = "All media items", body = [MediaItem]))
)]
pub async fn list_media(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<MediaItem>>, ApiError> {
    let media = state
        .repo
        .list_media(false)
        .await
        .map_err(|e| ApiError::internal("load media", e))?;
    Ok(Json(media))
}

#[utoipa::path(
    get,
    path = "/api/admin/media/{id}",
    params(("id" = Uuid, Path, description = "Media item ID")),
    responses((status = 200, description = "Found", body = MediaItem))
)]
pub async fn get_media_item(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MediaItem>, ApiError> {
    let item = state
        .repo
        .get_media_item(id)
        .await
        .map_err(|e| ApiError::internal("load media item", e))?
        .ok_or(ApiError::NotFound("Media item"))?;
    Ok(Json(item))
}

/// create_media_item
///
/// [Admin Route] Registers an already-uploaded object. The upload itself goes
/// straight to object storage; this surface only ever sees the resulting key.
#[utoipa::path(
    post,
    path = "/api/admin/media",
    request_body = CreateMediaItemRequest,
    responses((status = 201, description = "Created", body = MediaItem))
)]
pub async fn create_media_item(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateMediaItemRequest>,
) -> Result<(StatusCode, Json<MediaItem>), ApiError> {
    require(&payload.title, "title")?;
    require(&payload.object_key, "object_key")?;
    let item = state
        .repo
        .create_media_item(payload)
        .await
        .map_err(|e| ApiError::internal("create media item", e))?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/admin/media/{id}",
    params(("id" = Uuid, Path, description = "Media item ID")),
    request_body = UpdateMediaItemRequest,
    responses((status = 200, description = "Updated", body = MediaItem))
)]
pub async fn update_media_item(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMediaItemRequest>,
) -> Result<Json<MediaItem>, ApiError> {
    let item = state
        .repo
        .update_media_item(id, payload)
        .await
        .map_err(|e| ApiError::internal("update media item", e))?
        .ok_or(ApiError::NotFound("Media item"))?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/admin/media/{id}",
    params(("id" = Uuid, Path, description = "Media item ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_media_item(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_media_item(id)
        .await
        .map_err(|e| ApiError::internal("delete media item", e))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Media item"))
    }
}

// --- Vacancies ---

#[utoipa::path(
    get,
    path = "/api/admin/vacancies",
    responses((status = 200, description = "All vacancies", body = [Vacancy]))
)]
pub async fn list_vacancies(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Vacancy>>, ApiError> {
    let vacancies = state
        .repo
        .list_vacancies(false)
        .await
        .map_err(|e| ApiError::internal("load vacancies", e))?;
    Ok(Json(vacancies))
}

#[utoipa::path(
    get,
    path = "/api/admin/vacancies/{id}",
    params(("id" = Uuid, Path, description = "Vacancy ID")),
    responses((status = 200, description = "Found", body = Vacancy))
)]
pub async fn get_vacancy(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vacancy>, ApiError> {
    let vacancy = state
        .repo
        .get_vacancy(id)
        .await
        .map_err(|e| ApiError::internal("load vacancy", e))?
        .ok_or(ApiError::NotFound("Vacancy"))?;
    Ok(Json(vacancy))
}

#[utoipa::path(
    post,
    path = "/api/admin/vacancies",
    request_body = CreateVacancyRequest,
    responses((status = 201, description = "Created", body = Vacancy))
)]
pub async fn create_vacancy(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateVacancyRequest>,
) -> Result<(StatusCode, Json<Vacancy>), ApiError> {
    require(&payload.title, "title")?;
    require(&payload.description, "description")?;
    let vacancy = state
        .repo
        .create_vacancy(payload)
        .await
        .map_err(|e| ApiError::internal("create vacancy", e))?;
    Ok((StatusCode::CREATED, Json(vacancy)))
}

#[utoipa::path(
    put,
    path = "/api/admin/vacancies/{id}",
    params(("id" = Uuid, Path, description = "Vacancy ID")),
    request_body = UpdateVacancyRequest,
    responses((status = 200, description = "Updated", body = Vacancy))
)]
pub async fn update_vacancy(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVacancyRequest>,
) -> Result<Json<Vacancy>, ApiError> {
    let vacancy = state
        .repo
        .update_vacancy(id, payload)
        .await
        .map_err(|e| ApiError::internal("update vacancy", e))?
        .ok_or(ApiError::NotFound("Vacancy"))?;
    Ok(Json(vacancy))
}

#[utoipa::path(
    delete,
    path = "/api/admin/vacancies/{id}",
    params(("id" = Uuid, Path, description = "Vacancy ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_vacancy(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_vacancy(id)
        .await
        .map_err(|e| ApiError::internal("delete vacancy", e))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Vacancy"))
    }
}

// --- Tenders ---

#[utoipa::path(
    get,
    path = "/api/admin/tenders",
    responses((status = 200, description = "All tenders", body = [Tender]))
)]
pub async fn list_tenders(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Tender>>, ApiError> {
    let tenders = state
        .repo
        .list_tenders(false)
        .await
        .map_err(|e| ApiError::internal("load tenders", e))?;
    Ok(Json(tenders))
}

#[utoipa::path(
    get,
    path = "/api/admin/tenders/{id}",
    params(("id" = Uuid, Path, description = "Tender ID")),
    responses((status = 200, description = "Found", body = Tender))
)]
pub async fn get_tender(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Tender>, ApiError> {
    let tender = state
        .repo
        .get_tender(id)
        .await
        .map_err(|e| ApiError::internal("load tender", e))?
        .ok_or(ApiError::NotFound("Tender"))?;
    Ok(Json(tender))
}

#[utoipa::path(
    post,
    path = "/api/admin/tenders",
    request_body = CreateTenderRequest,
    responses((status = 201, description = "Created", body = Tender))
)]
pub async fn create_tender(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateTenderRequest>,
) -> Result<(StatusCode, Json<Tender>), ApiError> {
    require(&payload.title, "title")?;
    require(&payload.description, "description")?;
    let tender = state
        .repo
        .create_tender(payload)
        .await
        .map_err(|e| ApiError::internal("create tender", e))?;
    Ok((StatusCode::CREATED, Json(tender)))
}

#[utoipa::path(
    put,
    path = "/api/admin/tenders/{id}",
    params(("id" = Uuid, Path, description = "Tender ID")),
    request_body = UpdateTenderRequest,
    responses((status = 200, description = "Updated", body = Tender))
)]
pub async fn update_tender(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTenderRequest>,
) -> Result<Json<Tender>, ApiError> {
    let tender = state
        .repo
        .update_tender(id, payload)
        .await
        .map_err(|e| ApiError::internal("update tender", e))?
        .ok_or(ApiError::NotFound("Tender"))?;
    Ok(Json(tender))
}

#[utoipa::path(
    delete,
    path = "/api/admin/tenders/{id}",
    params(("id" = Uuid, Path, description = "Tender ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_tender(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_tender(id)
        .await
        .map_err(|e| ApiError::internal("delete tender", e))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Tender"))
    }
}

// --- Reports ---

#[utoipa::path(
    get,
    path = "/api/admin/reports",
    responses((status = 200, description = "All reports", body = [Report]))
)]
pub async fn list_reports(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Report>>, ApiError> {
    let reports = state
        .repo
        .list_reports(false)
        .await
        .map_err(|e| ApiError::internal("load reports", e))?;
    Ok(Json(reports))
}

#[utoipa::path(
    get,
    path = "/api/admin/reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses((status = 200, description = "Found", body = Report))
)]
pub async fn get_report(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Report>, ApiError> {
    let report = state
        .repo
        .get_report(id)
        .await
        .map_err(|e| ApiError::internal("load report", e))?
        .ok_or(ApiError::NotFound("Report"))?;
    Ok(Json(report))
}

#[utoipa::path(
    post,
    path = "/api/admin/reports",
    request_body = CreateReportRequest,
    responses((status = 201, description = "Created", body = Report))
)]
pub async fn create_report(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    require(&payload.title, "title")?;
    require(&payload.document_key, "document_key")?;
    let report = state
        .repo
        .create_report(payload)
        .await
        .map_err(|e| ApiError::internal("create report", e))?;
    Ok((StatusCode::CREATED, Json(report)))
}

#[utoipa::path(
    put,
    path = "/api/admin/reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    request_body = UpdateReportRequest,
    responses((status = 200, description = "Updated", body = Report))
)]
pub async fn update_report(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReportRequest>,
) -> Result<Json<Report>, ApiError> {
    let report = state
        .repo
        .update_report(id, payload)
        .await
        .map_err(|e| ApiError::internal("update report", e))?
        .ok_or(ApiError::NotFound("Report"))?;
    Ok(Json(report))
}

#[utoipa::path(
    delete,
    path = "/api/admin/reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_report(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_report(id)
        .await
        .map_err(|e| ApiError::internal("delete report", e))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Report"))
    }
}

// --- Staff profiles ---

#[utoipa::path(
    get,
    path = "/api/admin/staff",
    responses((status = 200, description = "All staff profiles", body = [StaffProfile]))
)]
pub async fn list_staff(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<StaffProfile>>, ApiError> {
    let staff = state
        .repo
        .list_staff(false)
        .await
        .map_err(|e| ApiError::internal("load staff profiles", e))?;
    Ok(Json(staff))
}

#[utoipa::path(
    get,
    path = "/api/admin/staff/{id}",
    params(("id" = Uuid, Path, description = "Staff profile ID")),
    responses((status = 200, description = "Found", body = StaffProfile))
)]
pub async fn get_staff_profile(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StaffProfile>, ApiError> {
    let profile = state
        .repo
        .get_staff_profile(id)
        .await
        .map_err(|e| ApiError::internal("load staff profile", e))?
        .ok_or(ApiError::NotFound("Staff profile"))?;
    Ok(Json(profile))
}

#[utoipa::path(
    post,
    path = "/api/admin/staff",
    request_body = CreateStaffProfileRequest,
    responses((status = 201, description = "Created", body = StaffProfile))
)]
pub async fn create_staff_profile(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateStaffProfileRequest>,
) -> Result<(StatusCode, Json<StaffProfile>), ApiError> {
    require(&payload.full_name, "full_name")?;
    require(&payload.position, "position")?;
    let profile = state
        .repo
        .create_staff_profile(payload)
        .await
        .map_err(|e| ApiError::internal("create staff profile", e))?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    put,
    path = "/api/admin/staff/{id}",
    params(("id" = Uuid, Path, description = "Staff profile ID")),
    request_body = UpdateStaffProfileRequest,
    responses((status = 200, description = "Updated", body = StaffProfile))
)]
pub async fn update_staff_profile(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStaffProfileRequest>,
) -> Result<Json<StaffProfile>, ApiError> {
    let profile = state
        .repo
        .update_staff_profile(id, payload)
        .await
        .map_err(|e| ApiError::internal("update staff profile", e))?
        .ok_or(ApiError::NotFound("Staff profile"))?;
    Ok(Json(profile))
}

#[utoipa::path(
    delete,
    path = "/api/admin/staff/{id}",
    params(("id" = Uuid, Path, description = "Staff profile ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_staff_profile(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_staff_profile(id)
        .await
        .map_err(|e| ApiError::internal("delete staff profile", e))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Staff profile"))
    }
}

// --- Galleries & images ---

#[utoipa::path(
    get,
    path = "/api/admin/galleries",
    responses((status = 200, description = "All galleries", body = [Gallery]))
)]
pub async fn list_galleries(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Gallery>>, ApiError> {
    let galleries = state
        .repo
        .list_galleries()
        .await
        .map_err(|e| ApiError::internal("load galleries", e))?;
    Ok(Json(galleries))
}

#[utoipa::path(
    get,
    path = "/api/admin/galleries/{id}",
    params(("id" = Uuid, Path, description = "Gallery ID")),
    responses((status = 200, description = "Found", body = Gallery))
)]
pub async fn get_gallery(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Gallery>, ApiError> {
    let gallery = state
        .repo
        .get_gallery(id)
        .await
        .map_err(|e| ApiError::internal("load gallery", e))?
        .ok_or(ApiError::NotFound("Gallery"))?;
    Ok(Json(gallery))
}

#[utoipa::path(
    post,
    path = "/api/admin/galleries",
    request_body = CreateGalleryRequest,
    responses((status = 201, description = "Created", body = Gallery))
)]
pub async fn create_gallery(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateGalleryRequest>,
) -> Result<(StatusCode, Json<Gallery>), ApiError> {
    require(&payload.title, "title")?;
    let gallery = state
        .repo
        .create_gallery(payload)
        .await
        .map_err(|e| ApiError::internal("create gallery", e))?;
    Ok((StatusCode::CREATED, Json(gallery)))
}

#[utoipa::path(
    put,
    path = "/api/admin/galleries/{id}",
    params(("id" = Uuid, Path, description = "Gallery ID")),
    request_body = UpdateGalleryRequest,
    responses((status = 200, description = "Updated", body = Gallery))
)]
pub async fn update_gallery(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGalleryRequest>,
) -> Result<Json<Gallery>, ApiError> {
    let gallery = state
        .repo
        .update_gallery(id, payload)
        .await
        .map_err(|e| ApiError::internal("update gallery", e))?
        .ok_or(ApiError::NotFound("Gallery"))?;
    Ok(Json(gallery))
}

#[utoipa::path(
    delete,
    path = "/api/admin/galleries/{id}",
    params(("id" = Uuid, Path, description = "Gallery ID")),
    responses((status = 204, description = "Gallery and its images deleted"))
)]
pub async fn delete_gallery(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_gallery(id)
        .await
        .map_err(|e| ApiError::internal("delete gallery", e))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Gallery"))
    }
}

/// add_gallery_image
///
/// [Admin Route] Attaches an image to an existing gallery. The parent gallery
/// is checked first so a typo'd id is a 404 rather than an orphan row.
#[utoipa::path(
    post,
    path = "/api/admin/galleries/{id}/images",
    params(("id" = Uuid, Path, description = "Gallery ID")),
    request_body = CreateGalleryImageRequest,
    responses((status = 201, description = "Image added", body = GalleryImage))
)]
pub async fn add_gallery_image(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(gallery_id): Path<Uuid>,
    Json(payload): Json<CreateGalleryImageRequest>,
) -> Result<(StatusCode, Json<GalleryImage>), ApiError> {
    require(&payload.image_key, "image_key")?;
    state
        .repo
        .get_gallery(gallery_id)
        .await
        .map_err(|e| ApiError::internal("load gallery", e))?
        .ok_or(ApiError::NotFound("Gallery"))?;

    let image = state
        .repo
        .add_gallery_image(gallery_id, payload)
        .await
        .map_err(|e| ApiError::internal("add gallery image", e))?;
    Ok((StatusCode::CREATED, Json(image)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/gallery-images/{id}",
    params(("id" = Uuid, Path, description = "Gallery image ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_gallery_image(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_gallery_image(id)
        .await
        .map_err(|e| ApiError::internal("delete gallery image", e))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Gallery image"))
    }
}

// --- Subscribers ---

#[utoipa::path(
    get,
    path = "/api/admin/subscribers",
    responses((status = 200, description = "All subscribers", body = [Subscriber]))
)]
pub async fn list_subscribers(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Subscriber>>, ApiError> {
    let subscribers = state
        .repo
        .list_subscribers()
        .await
        .map_err(|e| ApiError::internal("load subscribers", e))?;
    Ok(Json(subscribers))
}

#[utoipa::path(
    delete,
    path = "/api/admin/subscribers/{id}",
    params(("id" = Uuid, Path, description = "Subscriber ID")),
    responses((status = 204, description = "Removed"))
)]
pub async fn delete_subscriber(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .repo
        .delete_subscriber(id)
        .await
        .map_err(|e| ApiError::internal("remove subscriber", e))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Subscriber"))
    }
}
