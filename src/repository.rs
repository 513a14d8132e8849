use crate::{
    error::{RepositoryError, is_unique_violation},
    models::{
        Admin, Article, CreateArticleRequest, CreateGalleryImageRequest, CreateGalleryRequest,
        CreateMediaItemRequest, CreateReportRequest, CreateStaffProfileRequest,
        CreateTenderRequest, CreateTestimonialRequest, CreateVacancyRequest, DashboardStats,
        Gallery, GalleryImage, MediaItem, Report, StaffProfile, Subscriber, Tender, Testimonial,
        UpdateArticleRequest, UpdateGalleryRequest, UpdateMediaItemRequest, UpdateReportRequest,
        UpdateStaffProfileRequest, UpdateTenderRequest, UpdateTestimonialRequest,
        UpdateVacancyRequest, Vacancy,
    },
    schema::{SchemaDomain, SchemaGuard},
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. Handlers
/// interact with the data layer through this trait only, so the Postgres
/// implementation and the in-memory test double are interchangeable behind
/// `Arc<dyn Repository>`.
///
/// Every method returns `Result`: storage failures are typed
/// (`RepositoryError`) and mapped to opaque client responses at the handler
/// boundary, never swallowed into empty defaults.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Principals ---
    async fn count_admins(&self) -> Result<i64, RepositoryError>;
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError>;
    async fn get_admin(&self, id: Uuid) -> Result<Option<Admin>, RepositoryError>;
    /// Insert fails with `RepositoryError::Conflict` when the email is taken;
    /// the bootstrap seed relies on that to resolve its first-request race.
    async fn create_admin(&self, admin: Admin) -> Result<Admin, RepositoryError>;
    async fn list_admins(&self) -> Result<Vec<Admin>, RepositoryError>;

    // --- Articles ---
    async fn list_articles(&self, published_only: bool) -> Result<Vec<Article>, RepositoryError>;
    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, RepositoryError>;
    async fn create_article(
        &self,
        req: CreateArticleRequest,
        author_id: Uuid,
    ) -> Result<Article, RepositoryError>;
    async fn update_article(
        &self,
        id: Uuid,
        req: UpdateArticleRequest,
    ) -> Result<Option<Article>, RepositoryError>;
    async fn delete_article(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Testimonials ---
    async fn list_testimonials(
        &self,
        published_only: bool,
    ) -> Result<Vec<Testimonial>, RepositoryError>;
    async fn get_testimonial(&self, id: Uuid) -> Result<Option<Testimonial>, RepositoryError>;
    async fn create_testimonial(
        &self,
        req: CreateTestimonialRequest,
    ) -> Result<Testimonial, RepositoryError>;
    async fn update_testimonial(
        &self,
        id: Uuid,
        req: UpdateTestimonialRequest,
    ) -> Result<Option<Testimonial>, RepositoryError>;
    async fn delete_testimonial(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Media items ---
    async fn list_media(&self, published_only: bool) -> Result<Vec<MediaItem>, RepositoryError>;
    async fn get_media_item(&self, id: Uuid) -> Result<Option<MediaItem>, RepositoryError>;
    async fn create_media_item(
        &self,
        req: CreateMediaItemRequest,
    ) -> Result<MediaItem, RepositoryError>;
    async fn update_media_item(
        &self,
        id: Uuid,
        req: UpdateMediaItemRequest,
    ) -> Result<Option<MediaItem>, RepositoryError>;
    async fn delete_media_item(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Vacancies ---
    async fn list_vacancies(&self, open_only: bool) -> Result<Vec<Vacancy>, RepositoryError>;
    async fn get_vacancy(&self, id: Uuid) -> Result<Option<Vacancy>, RepositoryError>;
    async fn create_vacancy(&self, req: CreateVacancyRequest) -> Result<Vacancy, RepositoryError>;
    async fn update_vacancy(
        &self,
        id: Uuid,
        req: UpdateVacancyRequest,
    ) -> Result<Option<Vacancy>, RepositoryError>;
    async fn delete_vacancy(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Tenders ---
    async fn list_tenders(&self, published_only: bool) -> Result<Vec<Tender>, RepositoryError>;
    async fn get_tender(&self, id: Uuid) -> Result<Option<Tender>, RepositoryError>;
    async fn create_tender(&self, req: CreateTenderRequest) -> Result<Tender, RepositoryError>;
    async fn update_tender(
        &self,
        id: Uuid,
        req: UpdateTenderRequest,
    ) -> Result<Option<Tender>, RepositoryError>;
    async fn delete_tender(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Reports ---
    async fn list_reports(&self, published_only: bool) -> Result<Vec<Report>, RepositoryError>;
    async fn get_report(&self, id: Uuid) -> Result<Option<Report>, RepositoryError>;
    async fn create_report(&self, req: CreateReportRequest) -> Result<Report, RepositoryError>;
    async fn update_report(
        &self,
        id: Uuid,
        req: UpdateReportRequest,
    ) -> Result<Option<Report>, RepositoryError>;
    async fn delete_report(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Staff profiles ---
    async fn list_staff(&self, published_only: bool) -> Result<Vec<StaffProfile>, RepositoryError>;
    async fn get_staff_profile(&self, id: Uuid) -> Result<Option<StaffProfile>, RepositoryError>;
    async fn create_staff_profile(
        &self,
        req: CreateStaffProfileRequest,
    ) -> Result<StaffProfile, RepositoryError>;
    async fn update_staff_profile(
        &self,
        id: Uuid,
        req: UpdateStaffProfileRequest,
    ) -> Result<Option<StaffProfile>, RepositoryError>;
    async fn delete_staff_profile(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Galleries ---
    async fn list_galleries(&self) -> Result<Vec<Gallery>, RepositoryError>;
    async fn get_gallery(&self, id: Uuid) -> Result<Option<Gallery>, RepositoryError>;
    async fn create_gallery(&self, req: CreateGalleryRequest) -> Result<Gallery, RepositoryError>;
    async fn update_gallery(
        &self,
        id: Uuid,
        req: UpdateGalleryRequest,
    ) -> Result<Option<Gallery>, RepositoryError>;
    async fn delete_gallery(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Gallery images ---
    async fn list_gallery_images(
        &self,
        gallery_id: Uuid,
    ) -> Result<Vec<GalleryImage>, RepositoryError>;
    async fn add_gallery_image(
        &self,
        gallery_id: Uuid,
        req: CreateGalleryImageRequest,
    ) -> Result<GalleryImage, RepositoryError>;
    async fn delete_gallery_image(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Subscribers ---
    /// Fails with `RepositoryError::Conflict` on a duplicate email.
    async fn add_subscriber(&self, email: &str) -> Result<Subscriber, RepositoryError>;
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, RepositoryError>;
    async fn delete_subscriber(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Dashboard ---
    async fn get_stats(&self) -> Result<DashboardStats, RepositoryError>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// conflict_on_unique
///
/// Translates a raw driver error into `Conflict` when it is a uniqueness
/// violation, leaving every other failure as an opaque database error.
fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if is_unique_violation(&e) {
        RepositoryError::Conflict(what.to_string())
    } else {
        RepositoryError::Database(e)
    }
}

/// PostgresRepository
///
/// The concrete implementation backed by PostgreSQL. Every method first runs
/// the schema guarantee for its domain, so the backing table is created on
/// first touch and queries never race an absent table.
pub struct PostgresRepository {
    pool: PgPool,
    schema: SchemaGuard,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        let schema = SchemaGuard::new(pool.clone());
        Self { pool, schema }
    }
}

const ADMIN_COLS: &str = "id, email, password_hash, full_name, role, is_active, created_at";
const ARTICLE_COLS: &str = "id, title, summary, body, cover_image, category, is_published, published_at, author_id, created_at, updated_at";
const TESTIMONIAL_COLS: &str =
    "id, author_name, author_title, quote, photo, is_published, created_at, updated_at";
const MEDIA_COLS: &str = "id, title, kind, object_key, caption, is_published, created_at";
const VACANCY_COLS: &str = "id, title, department, location, description, requirements, closing_date, is_open, created_at, updated_at";
const TENDER_COLS: &str = "id, title, reference_no, description, document_key, opens_at, closes_at, is_published, created_at, updated_at";
const REPORT_COLS: &str = "id, title, year, summary, document_key, is_published, created_at";
const STAFF_COLS: &str =
    "id, full_name, position, bio, photo, sort_order, is_published, created_at, updated_at";
const GALLERY_COLS: &str = "id, title, description, event_date, created_at";
const GALLERY_IMAGE_COLS: &str = "id, gallery_id, image_key, caption, sort_order, created_at";
const SUBSCRIBER_COLS: &str = "id, email, subscribed_at";

#[async_trait]
impl Repository for PostgresRepository {
    // --- Principals ---

    async fn count_admins(&self) -> Result<i64, RepositoryError> {
        self.schema.ensure(SchemaDomain::Admins).await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Admins).await?;
        let row = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLS} FROM admins WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_admin(&self, id: Uuid) -> Result<Option<Admin>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Admins).await?;
        let row =
            sqlx::query_as::<_, Admin>(&format!("SELECT {ADMIN_COLS} FROM admins WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn create_admin(&self, admin: Admin) -> Result<Admin, RepositoryError> {
        self.schema.ensure(SchemaDomain::Admins).await?;
        sqlx::query_as::<_, Admin>(&format!(
            "INSERT INTO admins (id, email, password_hash, full_name, role, is_active, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {ADMIN_COLS}"
        ))
        .bind(admin.id)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(&admin.full_name)
        .bind(&admin.role)
        .bind(admin.is_active)
        .bind(admin.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "An administrator with this email already exists"))
    }

    async fn list_admins(&self) -> Result<Vec<Admin>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Admins).await?;
        let rows = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLS} FROM admins ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // --- Articles ---

    async fn list_articles(&self, published_only: bool) -> Result<Vec<Article>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Articles).await?;
        let sql = if published_only {
            format!(
                "SELECT {ARTICLE_COLS} FROM articles WHERE is_published = TRUE \
                 ORDER BY published_at DESC NULLS LAST, created_at DESC"
            )
        } else {
            format!("SELECT {ARTICLE_COLS} FROM articles ORDER BY created_at DESC")
        };
        Ok(sqlx::query_as::<_, Article>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Articles).await?;
        Ok(sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLS} FROM articles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_article(
        &self,
        req: CreateArticleRequest,
        author_id: Uuid,
    ) -> Result<Article, RepositoryError> {
        self.schema.ensure(SchemaDomain::Articles).await?;
        Ok(sqlx::query_as::<_, Article>(&format!(
            "INSERT INTO articles (id, title, summary, body, cover_image, category, is_published, author_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, NOW(), NOW()) RETURNING {ARTICLE_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.title)
        .bind(&req.summary)
        .bind(&req.body)
        .bind(&req.cover_image)
        .bind(&req.category)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?)
    }

    /// Partial update via COALESCE: only provided fields are written. First
    /// publication stamps `published_at`.
    async fn update_article(
        &self,
        id: Uuid,
        req: UpdateArticleRequest,
    ) -> Result<Option<Article>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Articles).await?;
        Ok(sqlx::query_as::<_, Article>(&format!(
            "UPDATE articles SET \
                title = COALESCE($2, title), \
                summary = COALESCE($3, summary), \
                body = COALESCE($4, body), \
                cover_image = COALESCE($5, cover_image), \
                category = COALESCE($6, category), \
                is_published = COALESCE($7, is_published), \
                published_at = CASE \
                    WHEN COALESCE($7, is_published) AND published_at IS NULL THEN NOW() \
                    ELSE published_at END, \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {ARTICLE_COLS}"
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.summary)
        .bind(&req.body)
        .bind(&req.cover_image)
        .bind(&req.category)
        .bind(req.is_published)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_article(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.schema.ensure(SchemaDomain::Articles).await?;
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Testimonials ---

    async fn list_testimonials(
        &self,
        published_only: bool,
    ) -> Result<Vec<Testimonial>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Testimonials).await?;
        let sql = if published_only {
            format!(
                "SELECT {TESTIMONIAL_COLS} FROM testimonials WHERE is_published = TRUE ORDER BY created_at DESC"
            )
        } else {
            format!("SELECT {TESTIMONIAL_COLS} FROM testimonials ORDER BY created_at DESC")
        };
        Ok(sqlx::query_as::<_, Testimonial>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_testimonial(&self, id: Uuid) -> Result<Option<Testimonial>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Testimonials).await?;
        Ok(sqlx::query_as::<_, Testimonial>(&format!(
            "SELECT {TESTIMONIAL_COLS} FROM testimonials WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_testimonial(
        &self,
        req: CreateTestimonialRequest,
    ) -> Result<Testimonial, RepositoryError> {
        self.schema.ensure(SchemaDomain::Testimonials).await?;
        Ok(sqlx::query_as::<_, Testimonial>(&format!(
            "INSERT INTO testimonials (id, author_name, author_title, quote, photo, is_published, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, FALSE, NOW(), NOW()) RETURNING {TESTIMONIAL_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.author_name)
        .bind(&req.author_title)
        .bind(&req.quote)
        .bind(&req.photo)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_testimonial(
        &self,
        id: Uuid,
        req: UpdateTestimonialRequest,
    ) -> Result<Option<Testimonial>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Testimonials).await?;
        Ok(sqlx::query_as::<_, Testimonial>(&format!(
            "UPDATE testimonials SET \
                author_name = COALESCE($2, author_name), \
                author_title = COALESCE($3, author_title), \
                quote = COALESCE($4, quote), \
                photo = COALESCE($5, photo), \
                is_published = COALESCE($6, is_published), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {TESTIMONIAL_COLS}"
        ))
        .bind(id)
        .bind(&req.author_name)
        .bind(&req.author_title)
        .bind(&req.quote)
        .bind(&req.photo)
        .bind(req.is_published)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.schema.ensure(SchemaDomain::Testimonials).await?;
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Media items ---

    async fn list_media(&self, published_only: bool) -> Result<Vec<MediaItem>, RepositoryError> {
        self.schema.ensure(SchemaDomain::MediaItems).await?;
        let sql = if published_only {
            format!(
                "SELECT {MEDIA_COLS} FROM media_items WHERE is_published = TRUE ORDER BY created_at DESC"
            )
        } else {
            format!("SELECT {MEDIA_COLS} FROM media_items ORDER BY created_at DESC")
        };
        Ok(sqlx::query_as::<_, MediaItem>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_media_item(&self, id: Uuid) -> Result<Option<MediaItem>, RepositoryError> {
        self.schema.ensure(SchemaDomain::MediaItems).await?;
        Ok(sqlx::query_as::<_, MediaItem>(&format!(
            "SELECT {MEDIA_COLS} FROM media_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_media_item(
        &self,
        req: CreateMediaItemRequest,
    ) -> Result<MediaItem, RepositoryError> {
        self.schema.ensure(SchemaDomain::MediaItems).await?;
        Ok(sqlx::query_as::<_, MediaItem>(&format!(
            "INSERT INTO media_items (id, title, kind, object_key, caption, is_published, created_at) \
             VALUES ($1, $2, $3, $4, $5, FALSE, NOW()) RETURNING {MEDIA_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.title)
        .bind(req.kind.as_deref().unwrap_or("image"))
        .bind(&req.object_key)
        .bind(&req.caption)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_media_item(
        &self,
        id: Uuid,
        req: UpdateMediaItemRequest,
    ) -> Result<Option<MediaItem>, RepositoryError> {
        self.schema.ensure(SchemaDomain::MediaItems).await?;
        Ok(sqlx::query_as::<_, MediaItem>(&format!(
            "UPDATE media_items SET \
                title = COALESCE($2, title), \
                kind = COALESCE($3, kind), \
                object_key = COALESCE($4, object_key), \
                caption = COALESCE($5, caption), \
                is_published = COALESCE($6, is_published) \
             WHERE id = $1 RETURNING {MEDIA_COLS}"
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.kind)
        .bind(&req.object_key)
        .bind(&req.caption)
        .bind(req.is_published)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_media_item(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.schema.ensure(SchemaDomain::MediaItems).await?;
        let result = sqlx::query("DELETE FROM media_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Vacancies ---

    async fn list_vacancies(&self, open_only: bool) -> Result<Vec<Vacancy>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Vacancies).await?;
        let sql = if open_only {
            format!(
                "SELECT {VACANCY_COLS} FROM vacancies WHERE is_open = TRUE ORDER BY created_at DESC"
            )
        } else {
            format!("SELECT {VACANCY_COLS} FROM vacancies ORDER BY created_at DESC")
        };
        Ok(sqlx::query_as::<_, Vacancy>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_vacancy(&self, id: Uuid) -> Result<Option<Vacancy>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Vacancies).await?;
        Ok(sqlx::query_as::<_, Vacancy>(&format!(
            "SELECT {VACANCY_COLS} FROM vacancies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_vacancy(&self, req: CreateVacancyRequest) -> Result<Vacancy, RepositoryError> {
        self.schema.ensure(SchemaDomain::Vacancies).await?;
        Ok(sqlx::query_as::<_, Vacancy>(&format!(
            "INSERT INTO vacancies (id, title, department, location, description, requirements, closing_date, is_open, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, NOW(), NOW()) RETURNING {VACANCY_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.title)
        .bind(&req.department)
        .bind(&req.location)
        .bind(&req.description)
        .bind(&req.requirements)
        .bind(req.closing_date)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_vacancy(
        &self,
        id: Uuid,
        req: UpdateVacancyRequest,
    ) -> Result<Option<Vacancy>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Vacancies).await?;
        Ok(sqlx::query_as::<_, Vacancy>(&format!(
            "UPDATE vacancies SET \
                title = COALESCE($2, title), \
                department = COALESCE($3, department), \
                location = COALESCE($4, location), \
                description = COALESCE($5, description), \
                requirements = COALESCE($6, requirements), \
                closing_date = COALESCE($7, closing_date), \
                is_open = COALESCE($8, is_open), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {VACANCY_COLS}"
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.department)
        .bind(&req.location)
        .bind(&req.description)
        .bind(&req.requirements)
        .bind(req.closing_date)
        .bind(req.is_open)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_vacancy(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.schema.ensure(SchemaDomain::Vacancies).await?;
        let result = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Tenders ---

    async fn list_tenders(&self, published_only: bool) -> Result<Vec<Tender>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Tenders).await?;
        let sql = if published_only {
            format!(
                "SELECT {TENDER_COLS} FROM tenders WHERE is_published = TRUE ORDER BY created_at DESC"
            )
        } else {
            format!("SELECT {TENDER_COLS} FROM tenders ORDER BY created_at DESC")
        };
        Ok(sqlx::query_as::<_, Tender>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_tender(&self, id: Uuid) -> Result<Option<Tender>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Tenders).await?;
        Ok(sqlx::query_as::<_, Tender>(&format!(
            "SELECT {TENDER_COLS} FROM tenders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_tender(&self, req: CreateTenderRequest) -> Result<Tender, RepositoryError> {
        self.schema.ensure(SchemaDomain::Tenders).await?;
        Ok(sqlx::query_as::<_, Tender>(&format!(
            "INSERT INTO tenders (id, title, reference_no, description, document_key, opens_at, closes_at, is_published, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, NOW(), NOW()) RETURNING {TENDER_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.title)
        .bind(&req.reference_no)
        .bind(&req.description)
        .bind(&req.document_key)
        .bind(req.opens_at)
        .bind(req.closes_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_tender(
        &self,
        id: Uuid,
        req: UpdateTenderRequest,
    ) -> Result<Option<Tender>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Tenders).await?;
        Ok(sqlx::query_as::<_, Tender>(&format!(
            "UPDATE tenders SET \
                title = COALESCE($2, title), \
                reference_no = COALESCE($3, reference_no), \
                description = COALESCE($4, description), \
                document_key = COALESCE($5, document_key), \
                opens_at = COALESCE($6, opens_at), \
                closes_at = COALESCE($7, closes_at), \
                is_published = COALESCE($8, is_published), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {TENDER_COLS}"
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.reference_no)
        .bind(&req.description)
        .bind(&req.document_key)
        .bind(req.opens_at)
        .bind(req.closes_at)
        .bind(req.is_published)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_tender(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.schema.ensure(SchemaDomain::Tenders).await?;
        let result = sqlx::query("DELETE FROM tenders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Reports ---

    async fn list_reports(&self, published_only: bool) -> Result<Vec<Report>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Reports).await?;
        let sql = if published_only {
            format!(
                "SELECT {REPORT_COLS} FROM reports WHERE is_published = TRUE ORDER BY year DESC, created_at DESC"
            )
        } else {
            format!("SELECT {REPORT_COLS} FROM reports ORDER BY year DESC, created_at DESC")
        };
        Ok(sqlx::query_as::<_, Report>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_report(&self, id: Uuid) -> Result<Option<Report>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Reports).await?;
        Ok(sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLS} FROM reports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_report(&self, req: CreateReportRequest) -> Result<Report, RepositoryError> {
        self.schema.ensure(SchemaDomain::Reports).await?;
        Ok(sqlx::query_as::<_, Report>(&format!(
            "INSERT INTO reports (id, title, year, summary, document_key, is_published, created_at) \
             VALUES ($1, $2, $3, $4, $5, FALSE, NOW()) RETURNING {REPORT_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.title)
        .bind(req.year)
        .bind(&req.summary)
        .bind(&req.document_key)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_report(
        &self,
        id: Uuid,
        req: UpdateReportRequest,
    ) -> Result<Option<Report>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Reports).await?;
        Ok(sqlx::query_as::<_, Report>(&format!(
            "UPDATE reports SET \
                title = COALESCE($2, title), \
                year = COALESCE($3, year), \
                summary = COALESCE($4, summary), \
                document_key = COALESCE($5, document_key), \
                is_published = COALESCE($6, is_published) \
             WHERE id = $1 RETURNING {REPORT_COLS}"
        ))
        .bind(id)
        .bind(&req.title)
        .bind(req.year)
        .bind(&req.summary)
        .bind(&req.document_key)
        .bind(req.is_published)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_report(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.schema.ensure(SchemaDomain::Reports).await?;
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Staff profiles ---

    async fn list_staff(
        &self,
        published_only: bool,
    ) -> Result<Vec<StaffProfile>, RepositoryError> {
        self.schema.ensure(SchemaDomain::StaffProfiles).await?;
        let sql = if published_only {
            format!(
                "SELECT {STAFF_COLS} FROM staff_profiles WHERE is_published = TRUE ORDER BY sort_order ASC, full_name ASC"
            )
        } else {
            format!("SELECT {STAFF_COLS} FROM staff_profiles ORDER BY sort_order ASC, full_name ASC")
        };
        Ok(sqlx::query_as::<_, StaffProfile>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_staff_profile(&self, id: Uuid) -> Result<Option<StaffProfile>, RepositoryError> {
        self.schema.ensure(SchemaDomain::StaffProfiles).await?;
        Ok(sqlx::query_as::<_, StaffProfile>(&format!(
            "SELECT {STAFF_COLS} FROM staff_profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_staff_profile(
        &self,
        req: CreateStaffProfileRequest,
    ) -> Result<StaffProfile, RepositoryError> {
        self.schema.ensure(SchemaDomain::StaffProfiles).await?;
        Ok(sqlx::query_as::<_, StaffProfile>(&format!(
            "INSERT INTO staff_profiles (id, full_name, position, bio, photo, sort_order, is_published, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, TRUE, NOW(), NOW()) RETURNING {STAFF_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.full_name)
        .bind(&req.position)
        .bind(&req.bio)
        .bind(&req.photo)
        .bind(req.sort_order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_staff_profile(
        &self,
        id: Uuid,
        req: UpdateStaffProfileRequest,
    ) -> Result<Option<StaffProfile>, RepositoryError> {
        self.schema.ensure(SchemaDomain::StaffProfiles).await?;
        Ok(sqlx::query_as::<_, StaffProfile>(&format!(
            "UPDATE staff_profiles SET \
                full_name = COALESCE($2, full_name), \
                position = COALESCE($3, position), \
                bio = COALESCE($4, bio), \
                photo = COALESCE($5, photo), \
                sort_order = COALESCE($6, sort_order), \
                is_published = COALESCE($7, is_published), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {STAFF_COLS}"
        ))
        .bind(id)
        .bind(&req.full_name)
        .bind(&req.position)
        .bind(&req.bio)
        .bind(&req.photo)
        .bind(req.sort_order)
        .bind(req.is_published)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_staff_profile(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.schema.ensure(SchemaDomain::StaffProfiles).await?;
        let result = sqlx::query("DELETE FROM staff_profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Galleries ---

    async fn list_galleries(&self) -> Result<Vec<Gallery>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Galleries).await?;
        Ok(sqlx::query_as::<_, Gallery>(&format!(
            "SELECT {GALLERY_COLS} FROM galleries ORDER BY event_date DESC NULLS LAST, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_gallery(&self, id: Uuid) -> Result<Option<Gallery>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Galleries).await?;
        Ok(sqlx::query_as::<_, Gallery>(&format!(
            "SELECT {GALLERY_COLS} FROM galleries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_gallery(&self, req: CreateGalleryRequest) -> Result<Gallery, RepositoryError> {
        self.schema.ensure(SchemaDomain::Galleries).await?;
        Ok(sqlx::query_as::<_, Gallery>(&format!(
            "INSERT INTO galleries (id, title, description, event_date, created_at) \
             VALUES ($1, $2, $3, $4, NOW()) RETURNING {GALLERY_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.event_date)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_gallery(
        &self,
        id: Uuid,
        req: UpdateGalleryRequest,
    ) -> Result<Option<Gallery>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Galleries).await?;
        Ok(sqlx::query_as::<_, Gallery>(&format!(
            "UPDATE galleries SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                event_date = COALESCE($4, event_date) \
             WHERE id = $1 RETURNING {GALLERY_COLS}"
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.event_date)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// Gallery deletion also removes its images; the two statements are not
    /// transactional because an orphaned image row is harmless and invisible.
    async fn delete_gallery(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.schema.ensure(SchemaDomain::Galleries).await?;
        self.schema.ensure(SchemaDomain::GalleryImages).await?;
        sqlx::query("DELETE FROM gallery_images WHERE gallery_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        let result = sqlx::query("DELETE FROM galleries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Gallery images ---

    async fn list_gallery_images(
        &self,
        gallery_id: Uuid,
    ) -> Result<Vec<GalleryImage>, RepositoryError> {
        self.schema.ensure(SchemaDomain::GalleryImages).await?;
        Ok(sqlx::query_as::<_, GalleryImage>(&format!(
            "SELECT {GALLERY_IMAGE_COLS} FROM gallery_images WHERE gallery_id = $1 \
             ORDER BY sort_order ASC, created_at ASC"
        ))
        .bind(gallery_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn add_gallery_image(
        &self,
        gallery_id: Uuid,
        req: CreateGalleryImageRequest,
    ) -> Result<GalleryImage, RepositoryError> {
        self.schema.ensure(SchemaDomain::GalleryImages).await?;
        Ok(sqlx::query_as::<_, GalleryImage>(&format!(
            "INSERT INTO gallery_images (id, gallery_id, image_key, caption, sort_order, created_at) \
             VALUES ($1, $2, $3, $4, $5, NOW()) RETURNING {GALLERY_IMAGE_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(gallery_id)
        .bind(&req.image_key)
        .bind(&req.caption)
        .bind(req.sort_order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_gallery_image(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.schema.ensure(SchemaDomain::GalleryImages).await?;
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Subscribers ---

    async fn add_subscriber(&self, email: &str) -> Result<Subscriber, RepositoryError> {
        self.schema.ensure(SchemaDomain::Subscribers).await?;
        sqlx::query_as::<_, Subscriber>(&format!(
            "INSERT INTO subscribers (id, email, subscribed_at) \
             VALUES ($1, $2, NOW()) RETURNING {SUBSCRIBER_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "This email is already subscribed"))
    }

    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        self.schema.ensure(SchemaDomain::Subscribers).await?;
        Ok(sqlx::query_as::<_, Subscriber>(&format!(
            "SELECT {SUBSCRIBER_COLS} FROM subscribers ORDER BY subscribed_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete_subscriber(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.schema.ensure(SchemaDomain::Subscribers).await?;
        let result = sqlx::query("DELETE FROM subscribers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Dashboard ---

    async fn get_stats(&self) -> Result<DashboardStats, RepositoryError> {
        self.schema.ensure(SchemaDomain::Articles).await?;
        self.schema.ensure(SchemaDomain::Vacancies).await?;
        self.schema.ensure(SchemaDomain::Tenders).await?;
        self.schema.ensure(SchemaDomain::Subscribers).await?;

        let total_articles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await?;
        let published_articles: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE is_published = TRUE")
                .fetch_one(&self.pool)
                .await?;
        let open_vacancies: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM vacancies WHERE is_open = TRUE")
                .fetch_one(&self.pool)
                .await?;
        let published_tenders: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tenders WHERE is_published = TRUE")
                .fetch_one(&self.pool)
                .await?;
        let total_subscribers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscribers")
            .fetch_one(&self.pool)
            .await?;

        Ok(DashboardStats {
            total_articles,
            published_articles,
            open_vacancies,
            published_tenders,
            total_subscribers,
        })
    }
}

/// MemoryRepository
///
/// An in-process implementation of `Repository` used by the integration test
/// suite. Behavior matches the Postgres implementation where it matters for
/// callers: uniqueness of admin and subscriber emails is enforced (so the
/// bootstrap race is reproducible), partial updates apply only provided
/// fields, and listings honor the published filters and orderings.
#[derive(Default)]
pub struct MemoryRepository {
    admins: Mutex<Vec<Admin>>,
    articles: Mutex<Vec<Article>>,
    testimonials: Mutex<Vec<Testimonial>>,
    media: Mutex<Vec<MediaItem>>,
    vacancies: Mutex<Vec<Vacancy>>,
    tenders: Mutex<Vec<Tender>>,
    reports: Mutex<Vec<Report>>,
    staff: Mutex<Vec<StaffProfile>>,
    galleries: Mutex<Vec<Gallery>>,
    gallery_images: Mutex<Vec<GalleryImage>>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn count_admins(&self) -> Result<i64, RepositoryError> {
        Ok(self.admins.lock().unwrap().len() as i64)
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn get_admin(&self, id: Uuid) -> Result<Option<Admin>, RepositoryError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create_admin(&self, admin: Admin) -> Result<Admin, RepositoryError> {
        let mut admins = self.admins.lock().unwrap();
        if admins.iter().any(|a| a.email == admin.email) {
            return Err(RepositoryError::Conflict(
                "An administrator with this email already exists".to_string(),
            ));
        }
        admins.push(admin.clone());
        Ok(admin)
    }

    async fn list_admins(&self) -> Result<Vec<Admin>, RepositoryError> {
        Ok(self.admins.lock().unwrap().clone())
    }

    async fn list_articles(&self, published_only: bool) -> Result<Vec<Article>, RepositoryError> {
        let mut rows: Vec<Article> = self
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|a| !published_only || a.is_published)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, RepositoryError> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create_article(
        &self,
        req: CreateArticleRequest,
        author_id: Uuid,
    ) -> Result<Article, RepositoryError> {
        let now = Utc::now();
        let article = Article {
            id: Uuid::new_v4(),
            title: req.title,
            summary: req.summary,
            body: req.body,
            cover_image: req.cover_image,
            category: req.category,
            is_published: false,
            published_at: None,
            author_id: Some(author_id),
            created_at: now,
            updated_at: now,
        };
        self.articles.lock().unwrap().push(article.clone());
        Ok(article)
    }

    async fn update_article(
        &self,
        id: Uuid,
        req: UpdateArticleRequest,
    ) -> Result<Option<Article>, RepositoryError> {
        let mut articles = self.articles.lock().unwrap();
        let Some(article) = articles.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(title) = req.title {
            article.title = title;
        }
        if let Some(summary) = req.summary {
            article.summary = Some(summary);
        }
        if let Some(body) = req.body {
            article.body = body;
        }
        if let Some(cover_image) = req.cover_image {
            article.cover_image = Some(cover_image);
        }
        if let Some(category) = req.category {
            article.category = Some(category);
        }
        if let Some(is_published) = req.is_published {
            article.is_published = is_published;
            if is_published && article.published_at.is_none() {
                article.published_at = Some(Utc::now());
            }
        }
        article.updated_at = Utc::now();
        Ok(Some(article.clone()))
    }

    async fn delete_article(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut articles = self.articles.lock().unwrap();
        let before = articles.len();
        articles.retain(|a| a.id != id);
        Ok(articles.len() < before)
    }

    async fn list_testimonials(
        &self,
        published_only: bool,
    ) -> Result<Vec<Testimonial>, RepositoryError> {
        let mut rows: Vec<Testimonial> = self
            .testimonials
            .lock()
            .unwrap()
            .iter()
            .filter(|t| !published_only || t.is_published)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_testimonial(&self, id: Uuid) -> Result<Option<Testimonial>, RepositoryError> {
        Ok(self
            .testimonials
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn create_testimonial(
        &self,
        req: CreateTestimonialRequest,
    ) -> Result<Testimonial, RepositoryError> {
        let now = Utc::now();
        let testimonial = Testimonial {
            id: Uuid::new_v4(),
            author_name: req.author_name,
            author_title: req.author_title,
            quote: req.quote,
            photo: req.photo,
            is_published: false,
            created_at: now,
            updated_at: now,
        };
        self.testimonials.lock().unwrap().push(testimonial.clone());
        Ok(testimonial)
    }

    async fn update_testimonial(
        &self,
        id: Uuid,
        req: UpdateTestimonialRequest,
    ) -> Result<Option<Testimonial>, RepositoryError> {
        let mut testimonials = self.testimonials.lock().unwrap();
        let Some(t) = testimonials.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(author_name) = req.author_name {
            t.author_name = author_name;
        }
        if let Some(author_title) = req.author_title {
            t.author_title = Some(author_title);
        }
        if let Some(quote) = req.quote {
            t.quote = quote;
        }
        if let Some(photo) = req.photo {
            t.photo = Some(photo);
        }
        if let Some(is_published) = req.is_published {
            t.is_published = is_published;
        }
        t.updated_at = Utc::now();
        Ok(Some(t.clone()))
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut testimonials = self.testimonials.lock().unwrap();
        let before = testimonials.len();
        testimonials.retain(|t| t.id != id);
        Ok(testimonials.len() < before)
    }

    async fn list_media(&self, published_only: bool) -> Result<Vec<MediaItem>, RepositoryError> {
        let mut rows: Vec<MediaItem> = self
            .media
            .lock()
            .unwrap()
            .iter()
            .filter(|m| !published_only || m.is_published)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_media_item(&self, id: Uuid) -> Result<Option<MediaItem>, RepositoryError> {
        Ok(self
            .media
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn create_media_item(
        &self,
        req: CreateMediaItemRequest,
    ) -> Result<MediaItem, RepositoryError> {
        let item = MediaItem {
            id: Uuid::new_v4(),
            title: req.title,
            kind: req.kind.unwrap_or_else(|| "image".to_string()),
            object_key: req.object_key,
            caption: req.caption,
            is_published: false,
            created_at: Utc::now(),
        };
        self.media.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn update_media_item(
        &self,
        id: Uuid,
        req: UpdateMediaItemRequest,
    ) -> Result<Option<MediaItem>, RepositoryError> {
        let mut media = self.media.lock().unwrap();
        let Some(m) = media.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(title) = req.title {
            m.title = title;
        }
        if let Some(kind) = req.kind {
            m.kind = kind;
        }
        if let Some(object_key) = req.object_key {
            m.object_key = object_key;
        }
        if let Some(caption) = req.caption {
            m.caption = Some(caption);
        }
        if let Some(is_published) = req.is_published {
            m.is_published = is_published;
        }
        Ok(Some(m.clone()))
    }

    async fn delete_media_item(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut media = self.media.lock().unwrap();
        let before = media.len();
        media.retain(|m| m.id != id);
        Ok(media.len() < before)
    }

    async fn list_vacancies(&self, open_only: bool) -> Result<Vec<Vacancy>, RepositoryError> {
        let mut rows: Vec<Vacancy> = self
            .vacancies
            .lock()
            .unwrap()
            .iter()
            .filter(|v| !open_only || v.is_open)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_vacancy(&self, id: Uuid) -> Result<Option<Vacancy>, RepositoryError> {
        Ok(self
            .vacancies
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    async fn create_vacancy(&self, req: CreateVacancyRequest) -> Result<Vacancy, RepositoryError> {
        let now = Utc::now();
        let vacancy = Vacancy {
            id: Uuid::new_v4(),
            title: req.title,
            department: req.department,
            location: req.location,
            description: req.description,
            requirements: req.requirements,
            closing_date: req.closing_date,
            is_open: true,
            created_at: now,
            updated_at: now,
        };
        self.vacancies.lock().unwrap().push(vacancy.clone());
        Ok(vacancy)
    }

    async fn update_vacancy(
        &self,
        id: Uuid,
        req: UpdateVacancyRequest,
    ) -> Result<Option<Vacancy>, RepositoryError> {
        let mut vacancies = self.vacancies.lock().unwrap();
        let Some(v) = vacancies.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };
        if let Some(title) = req.title {
            v.title = title;
        }
        if let Some(department) = req.department {
            v.department = Some(department);
        }
        if let Some(location) = req.location {
            v.location = Some(location);
        }
        if let Some(description) = req.description {
            v.description = description;
        }
        if let Some(requirements) = req.requirements {
            v.requirements = Some(requirements);
        }
        if let Some(closing_date) = req.closing_date {
            v.closing_date = Some(closing_date);
        }
        if let Some(is_open) = req.is_open {
            v.is_open = is_open;
        }
        v.updated_at = Utc::now();
        Ok(Some(v.clone()))
    }

    async fn delete_vacancy(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut vacancies = self.vacancies.lock().unwrap();
        let before = vacancies.len();
        vacancies.retain(|v| v.id != id);
        Ok(vacancies.len() < before)
    }

    async fn list_tenders(&self, published_only: bool) -> Result<Vec<Tender>, RepositoryError> {
        let mut rows: Vec<Tender> = self
            .tenders
            .lock()
            .unwrap()
            .iter()
            .filter(|t| !published_only || t.is_published)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_tender(&self, id: Uuid) -> Result<Option<Tender>, RepositoryError> {
        Ok(self
            .tenders
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn create_tender(&self, req: CreateTenderRequest) -> Result<Tender, RepositoryError> {
        let now = Utc::now();
        let tender = Tender {
            id: Uuid::new_v4(),
            title: req.title,
            reference_no: req.reference_no,
            description: req.description,
            document_key: req.document_key,
            opens_at: req.opens_at,
            closes_at: req.closes_at,
            is_published: false,
            created_at: now,
            updated_at: now,
        };
        self.tenders.lock().unwrap().push(tender.clone());
        Ok(tender)
    }

    async fn update_tender(
        &self,
        id: Uuid,
        req: UpdateTenderRequest,
    ) -> Result<Option<Tender>, RepositoryError> {
        let mut tenders = self.tenders.lock().unwrap();
        let Some(t) = tenders.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(title) = req.title {
            t.title = title;
        }
        if let Some(reference_no) = req.reference_no {
            t.reference_no = Some(reference_no);
        }
        if let Some(description) = req.description {
            t.description = description;
        }
        if let Some(document_key) = req.document_key {
            t.document_key = Some(document_key);
        }
        if let Some(opens_at) = req.opens_at {
            t.opens_at = Some(opens_at);
        }
        if let Some(closes_at) = req.closes_at {
            t.closes_at = Some(closes_at);
        }
        if let Some(is_published) = req.is_published {
            t.is_published = is_published;
        }
        t.updated_at = Utc::now();
        Ok(Some(t.clone()))
    }

    async fn delete_tender(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut tenders = self.tenders.lock().unwrap();
        let before = tenders.len();
        tenders.retain(|t| t.id != id);
        Ok(tenders.len() < before)
    }

    async fn list_reports(&self, published_only: bool) -> Result<Vec<Report>, RepositoryError> {
        let mut rows: Vec<Report> = self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !published_only || r.is_published)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(rows)
    }

    async fn get_report(&self, id: Uuid) -> Result<Option<Report>, RepositoryError> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn create_report(&self, req: CreateReportRequest) -> Result<Report, RepositoryError> {
        let report = Report {
            id: Uuid::new_v4(),
            title: req.title,
            year: req.year,
            summary: req.summary,
            document_key: req.document_key,
            is_published: false,
            created_at: Utc::now(),
        };
        self.reports.lock().unwrap().push(report.clone());
        Ok(report)
    }

    async fn update_report(
        &self,
        id: Uuid,
        req: UpdateReportRequest,
    ) -> Result<Option<Report>, RepositoryError> {
        let mut reports = self.reports.lock().unwrap();
        let Some(r) = reports.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(title) = req.title {
            r.title = title;
        }
        if let Some(year) = req.year {
            r.year = year;
        }
        if let Some(summary) = req.summary {
            r.summary = Some(summary);
        }
        if let Some(document_key) = req.document_key {
            r.document_key = document_key;
        }
        if let Some(is_published) = req.is_published {
            r.is_published = is_published;
        }
        Ok(Some(r.clone()))
    }

    async fn delete_report(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut reports = self.reports.lock().unwrap();
        let before = reports.len();
        reports.retain(|r| r.id != id);
        Ok(reports.len() < before)
    }

    async fn list_staff(
        &self,
        published_only: bool,
    ) -> Result<Vec<StaffProfile>, RepositoryError> {
        let mut rows: Vec<StaffProfile> = self
            .staff
            .lock()
            .unwrap()
            .iter()
            .filter(|s| !published_only || s.is_published)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.full_name.cmp(&b.full_name))
        });
        Ok(rows)
    }

    async fn get_staff_profile(&self, id: Uuid) -> Result<Option<StaffProfile>, RepositoryError> {
        Ok(self
            .staff
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn create_staff_profile(
        &self,
        req: CreateStaffProfileRequest,
    ) -> Result<StaffProfile, RepositoryError> {
        let now = Utc::now();
        let profile = StaffProfile {
            id: Uuid::new_v4(),
            full_name: req.full_name,
            position: req.position,
            bio: req.bio,
            photo: req.photo,
            sort_order: req.sort_order.unwrap_or(0),
            is_published: true,
            created_at: now,
            updated_at: now,
        };
        self.staff.lock().unwrap().push(profile.clone());
        Ok(profile)
    }

    async fn update_staff_profile(
        &self,
        id: Uuid,
        req: UpdateStaffProfileRequest,
    ) -> Result<Option<StaffProfile>, RepositoryError> {
        let mut staff = self.staff.lock().unwrap();
        let Some(s) = staff.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(full_name) = req.full_name {
            s.full_name = full_name;
        }
        if let Some(position) = req.position {
            s.position = position;
        }
        if let Some(bio) = req.bio {
            s.bio = Some(bio);
        }
        if let Some(photo) = req.photo {
            s.photo = Some(photo);
        }
        if let Some(sort_order) = req.sort_order {
            s.sort_order = sort_order;
        }
        if let Some(is_published) = req.is_published {
            s.is_published = is_published;
        }
        s.updated_at = Utc::now();
        Ok(Some(s.clone()))
    }

    async fn delete_staff_profile(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut staff = self.staff.lock().unwrap();
        let before = staff.len();
        staff.retain(|s| s.id != id);
        Ok(staff.len() < before)
    }

    async fn list_galleries(&self) -> Result<Vec<Gallery>, RepositoryError> {
        let mut rows = self.galleries.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_gallery(&self, id: Uuid) -> Result<Option<Gallery>, RepositoryError> {
        Ok(self
            .galleries
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id)
            .cloned())
    }

    async fn create_gallery(&self, req: CreateGalleryRequest) -> Result<Gallery, RepositoryError> {
        let gallery = Gallery {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            event_date: req.event_date,
            created_at: Utc::now(),
        };
        self.galleries.lock().unwrap().push(gallery.clone());
        Ok(gallery)
    }

    async fn update_gallery(
        &self,
        id: Uuid,
        req: UpdateGalleryRequest,
    ) -> Result<Option<Gallery>, RepositoryError> {
        let mut galleries = self.galleries.lock().unwrap();
        let Some(g) = galleries.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };
        if let Some(title) = req.title {
            g.title = title;
        }
        if let Some(description) = req.description {
            g.description = Some(description);
        }
        if let Some(event_date) = req.event_date {
            g.event_date = Some(event_date);
        }
        Ok(Some(g.clone()))
    }

    async fn delete_gallery(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.gallery_images
            .lock()
            .unwrap()
            .retain(|i| i.gallery_id != id);
        let mut galleries = self.galleries.lock().unwrap();
        let before = galleries.len();
        galleries.retain(|g| g.id != id);
        Ok(galleries.len() < before)
    }

    async fn list_gallery_images(
        &self,
        gallery_id: Uuid,
    ) -> Result<Vec<GalleryImage>, RepositoryError> {
        let mut rows: Vec<GalleryImage> = self
            .gallery_images
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.gallery_id == gallery_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.sort_order.cmp(&b.sort_order));
        Ok(rows)
    }

    async fn add_gallery_image(
        &self,
        gallery_id: Uuid,
        req: CreateGalleryImageRequest,
    ) -> Result<GalleryImage, RepositoryError> {
        let image = GalleryImage {
            id: Uuid::new_v4(),
            gallery_id,
            image_key: req.image_key,
            caption: req.caption,
            sort_order: req.sort_order.unwrap_or(0),
            created_at: Utc::now(),
        };
        self.gallery_images.lock().unwrap().push(image.clone());
        Ok(image)
    }

    async fn delete_gallery_image(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut images = self.gallery_images.lock().unwrap();
        let before = images.len();
        images.retain(|i| i.id != id);
        Ok(images.len() < before)
    }

    async fn add_subscriber(&self, email: &str) -> Result<Subscriber, RepositoryError> {
        let mut subscribers = self.subscribers.lock().unwrap();
        if subscribers.iter().any(|s| s.email == email) {
            return Err(RepositoryError::Conflict(
                "This email is already subscribed".to_string(),
            ));
        }
        let subscriber = Subscriber {
            id: Uuid::new_v4(),
            email: email.to_string(),
            subscribed_at: Utc::now(),
        };
        subscribers.push(subscriber.clone());
        Ok(subscriber)
    }

    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        let mut rows = self.subscribers.lock().unwrap().clone();
        rows.sort_by(|a, b| b.subscribed_at.cmp(&a.subscribed_at));
        Ok(rows)
    }

    async fn delete_subscriber(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut subscribers = self.subscribers.lock().unwrap();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        Ok(subscribers.len() < before)
    }

    async fn get_stats(&self) -> Result<DashboardStats, RepositoryError> {
        let articles = self.articles.lock().unwrap();
        Ok(DashboardStats {
            total_articles: articles.len() as i64,
            published_articles: articles.iter().filter(|a| a.is_published).count() as i64,
            open_vacancies: self
                .vacancies
                .lock()
                .unwrap()
                .iter()
                .filter(|v| v.is_open)
                .count() as i64,
            published_tenders: self
                .tenders
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.is_published)
                .count() as i64,
            total_subscribers: self.subscribers.lock().unwrap().len() as i64,
        })
    }
}
