use sqlx::PgPool;
use std::{
    collections::HashSet,
    sync::Mutex,
};

/// SchemaDomain
///
/// The registry of logical content tables. Each variant maps to exactly one
/// backing table and one fixed column definition. The guarantee operation only
/// ever creates a missing table — it never alters or drops existing columns;
/// schema evolution beyond initial creation belongs to a deliberate migration
/// path, not to this registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaDomain {
    Admins,
    Articles,
    Testimonials,
    MediaItems,
    Vacancies,
    Tenders,
    Reports,
    StaffProfiles,
    Galleries,
    GalleryImages,
    Subscribers,
}

impl SchemaDomain {
    pub const ALL: [SchemaDomain; 11] = [
        SchemaDomain::Admins,
        SchemaDomain::Articles,
        SchemaDomain::Testimonials,
        SchemaDomain::MediaItems,
        SchemaDomain::Vacancies,
        SchemaDomain::Tenders,
        SchemaDomain::Reports,
        SchemaDomain::StaffProfiles,
        SchemaDomain::Galleries,
        SchemaDomain::GalleryImages,
        SchemaDomain::Subscribers,
    ];

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            SchemaDomain::Admins => "admins",
            SchemaDomain::Articles => "articles",
            SchemaDomain::Testimonials => "testimonials",
            SchemaDomain::MediaItems => "media_items",
            SchemaDomain::Vacancies => "vacancies",
            SchemaDomain::Tenders => "tenders",
            SchemaDomain::Reports => "reports",
            SchemaDomain::StaffProfiles => "staff_profiles",
            SchemaDomain::Galleries => "galleries",
            SchemaDomain::GalleryImages => "gallery_images",
            SchemaDomain::Subscribers => "subscribers",
        }
    }

    /// ddl
    ///
    /// The domain's creation statement. A single conditional DDL statement so
    /// that concurrent cold-start requests racing on the same domain resolve at
    /// the storage layer, not in application code.
    pub fn ddl(self) -> &'static str {
        match self {
            SchemaDomain::Admins => {
                r#"
                CREATE TABLE IF NOT EXISTS admins (
                    id UUID PRIMARY KEY,
                    email TEXT NOT NULL UNIQUE,
                    password_hash TEXT NOT NULL,
                    full_name TEXT NOT NULL,
                    role TEXT NOT NULL DEFAULT 'admin',
                    is_active BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            SchemaDomain::Articles => {
                r#"
                CREATE TABLE IF NOT EXISTS articles (
                    id UUID PRIMARY KEY,
                    title TEXT NOT NULL,
                    summary TEXT,
                    body TEXT NOT NULL,
                    cover_image TEXT,
                    category TEXT,
                    is_published BOOLEAN NOT NULL DEFAULT FALSE,
                    published_at TIMESTAMPTZ,
                    author_id UUID,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            SchemaDomain::Testimonials => {
                r#"
                CREATE TABLE IF NOT EXISTS testimonials (
                    id UUID PRIMARY KEY,
                    author_name TEXT NOT NULL,
                    author_title TEXT,
                    quote TEXT NOT NULL,
                    photo TEXT,
                    is_published BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            SchemaDomain::MediaItems => {
                r#"
                CREATE TABLE IF NOT EXISTS media_items (
                    id UUID PRIMARY KEY,
                    title TEXT NOT NULL,
                    kind TEXT NOT NULL DEFAULT 'image',
                    object_key TEXT NOT NULL,
                    caption TEXT,
                    is_published BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            SchemaDomain::Vacancies => {
                r#"
                CREATE TABLE IF NOT EXISTS vacancies (
                    id UUID PRIMARY KEY,
                    title TEXT NOT NULL,
                    department TEXT,
                    location TEXT,
                    description TEXT NOT NULL,
                    requirements TEXT,
                    closing_date TIMESTAMPTZ,
                    is_open BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            SchemaDomain::Tenders => {
                r#"
                CREATE TABLE IF NOT EXISTS tenders (
                    id UUID PRIMARY KEY,
                    title TEXT NOT NULL,
                    reference_no TEXT,
                    description TEXT NOT NULL,
                    document_key TEXT,
                    opens_at TIMESTAMPTZ,
                    closes_at TIMESTAMPTZ,
                    is_published BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            SchemaDomain::Reports => {
                r#"
                CREATE TABLE IF NOT EXISTS reports (
                    id UUID PRIMARY KEY,
                    title TEXT NOT NULL,
                    year INTEGER NOT NULL,
                    summary TEXT,
                    document_key TEXT NOT NULL,
                    is_published BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            SchemaDomain::StaffProfiles => {
                r#"
                CREATE TABLE IF NOT EXISTS staff_profiles (
                    id UUID PRIMARY KEY,
                    full_name TEXT NOT NULL,
                    position TEXT NOT NULL,
                    bio TEXT,
                    photo TEXT,
                    sort_order INTEGER NOT NULL DEFAULT 0,
                    is_published BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            SchemaDomain::Galleries => {
                r#"
                CREATE TABLE IF NOT EXISTS galleries (
                    id UUID PRIMARY KEY,
                    title TEXT NOT NULL,
                    description TEXT,
                    event_date TIMESTAMPTZ,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            SchemaDomain::GalleryImages => {
                r#"
                CREATE TABLE IF NOT EXISTS gallery_images (
                    id UUID PRIMARY KEY,
                    gallery_id UUID NOT NULL,
                    image_key TEXT NOT NULL,
                    caption TEXT,
                    sort_order INTEGER NOT NULL DEFAULT 0,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            SchemaDomain::Subscribers => {
                r#"
                CREATE TABLE IF NOT EXISTS subscribers (
                    id UUID PRIMARY KEY,
                    email TEXT NOT NULL UNIQUE,
                    subscribed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
        }
    }
}

/// EnsuredSet
///
/// The per-process "domain already ensured" memo. Purely an optimization: it
/// bounds the DDL overhead to one statement per domain per process lifetime,
/// and losing it (restart) or racing on it (two cold-start requests) costs at
/// most one redundant no-op statement.
#[derive(Default)]
pub struct EnsuredSet {
    inner: Mutex<HashSet<SchemaDomain>>,
}

impl EnsuredSet {
    pub fn contains(&self, domain: SchemaDomain) -> bool {
        self.inner.lock().expect("ensured-set poisoned").contains(&domain)
    }

    /// Marks the domain ensured. Returns true only for the call that actually
    /// inserted it.
    pub fn mark(&self, domain: SchemaDomain) -> bool {
        self.inner.lock().expect("ensured-set poisoned").insert(domain)
    }
}

/// SchemaGuard
///
/// Guarantees a domain's backing table exists before any query touches it.
/// Every repository method calls `ensure` for its domain first; the creation
/// statement is a no-op when the table is already present, so repeated and
/// concurrent calls are correct, and the memo makes them effectively free.
pub struct SchemaGuard {
    pool: PgPool,
    ensured: EnsuredSet,
}

impl SchemaGuard {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            ensured: EnsuredSet::default(),
        }
    }

    /// ensure
    ///
    /// Issues the domain's `CREATE TABLE IF NOT EXISTS` unless this process has
    /// already done so. Two connections racing the same cold-start DDL can
    /// still collide inside Postgres on the catalog's uniqueness constraints;
    /// that collision means the other caller won, so it is treated as success.
    /// Any other failure leaves the domain unmarked and is retried by the next
    /// request.
    pub async fn ensure(&self, domain: SchemaDomain) -> Result<(), sqlx::Error> {
        if self.ensured.contains(domain) {
            return Ok(());
        }

        match sqlx::query(domain.ddl()).execute(&self.pool).await {
            Ok(_) => {
                self.ensured.mark(domain);
                Ok(())
            }
            Err(e) if crate::error::is_unique_violation(&e) => {
                self.ensured.mark(domain);
                Ok(())
            }
            Err(e) => {
                tracing::error!(table = domain.table(), %e, "schema guarantee failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn every_domain_has_conditional_creation_ddl() {
        for domain in SchemaDomain::ALL {
            let ddl = domain.ddl();
            assert!(
                ddl.contains(&format!("CREATE TABLE IF NOT EXISTS {}", domain.table())),
                "{} DDL is not conditional",
                domain.table()
            );
            // The guarantee never evolves an existing table.
            assert!(!ddl.contains("ALTER"));
            assert!(!ddl.contains("DROP"));
        }
    }

    #[test]
    fn table_names_are_unique() {
        let names: HashSet<_> = SchemaDomain::ALL.iter().map(|d| d.table()).collect();
        assert_eq!(names.len(), SchemaDomain::ALL.len());
    }

    #[test]
    fn concurrent_first_marks_yield_exactly_one_winner() {
        let set = Arc::new(EnsuredSet::default());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let set = Arc::clone(&set);
                std::thread::spawn(move || set.mark(SchemaDomain::Articles))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(winners, 1);
        assert!(set.contains(SchemaDomain::Articles));
        // Other domains are unaffected.
        assert!(!set.contains(SchemaDomain::Reports));
    }
}
