use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    credentials,
    error::{ApiError, RepositoryError},
    models::Admin,
    repository::RepositoryState,
};

/// ensure_default_admin
///
/// One-time convenience bootstrap: when the principal store is empty, inserts a
/// single default administrator so the very first login can succeed. Invoked
/// from the login handler and from the principal listing — the two first
/// administrative touches a fresh deployment sees.
///
/// Two concurrent first requests can both observe an empty store and both
/// attempt the insert. The storage layer's unique constraint on email makes
/// the loser's insert fail with a conflict, which is benign here: the
/// principal now exists, which is all this function promises.
pub async fn ensure_default_admin(
    repo: &RepositoryState,
    config: &AppConfig,
) -> Result<(), ApiError> {
    let count = repo
        .count_admins()
        .await
        .map_err(|e| ApiError::internal("initialize administrator account", e))?;
    if count > 0 {
        return Ok(());
    }

    let password_hash = credentials::hash_password(&config.default_admin_password)?;
    let admin = Admin {
        id: Uuid::new_v4(),
        email: config.default_admin_email.clone(),
        password_hash,
        full_name: "Site Administrator".to_string(),
        role: "admin".to_string(),
        is_active: true,
        created_at: Utc::now(),
    };

    match repo.create_admin(admin).await {
        Ok(created) => {
            tracing::info!(email = %created.email, "seeded default administrator");
            Ok(())
        }
        // A concurrent bootstrap won the insert race; the principal exists.
        Err(RepositoryError::Conflict(_)) => Ok(()),
        Err(e) => Err(ApiError::internal("initialize administrator account", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use std::sync::Arc;

    fn setup() -> (RepositoryState, AppConfig) {
        (
            Arc::new(MemoryRepository::new()) as RepositoryState,
            AppConfig::default(),
        )
    }

    #[tokio::test]
    async fn seeds_exactly_one_admin_on_an_empty_store() {
        let (repo, config) = setup();
        ensure_default_admin(&repo, &config).await.unwrap();
        assert_eq!(repo.count_admins().await.unwrap(), 1);

        let admin = repo
            .find_admin_by_email(&config.default_admin_email)
            .await
            .unwrap()
            .expect("default admin exists");
        assert_eq!(admin.role, "admin");
        assert!(admin.is_active);
        assert!(crate::credentials::verify_password(
            &config.default_admin_password,
            &admin.password_hash
        ));
    }

    #[tokio::test]
    async fn repeated_calls_do_not_duplicate() {
        let (repo, config) = setup();
        ensure_default_admin(&repo, &config).await.unwrap();
        ensure_default_admin(&repo, &config).await.unwrap();
        assert_eq!(repo.count_admins().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_bootstraps_tolerate_the_insert_race() {
        let (repo, config) = setup();
        // Both tasks observe the empty store before either inserts.
        let results = tokio::join!(
            ensure_default_admin(&repo, &config),
            ensure_default_admin(&repo, &config),
        );
        results.0.unwrap();
        results.1.unwrap();
        assert_eq!(repo.count_admins().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn does_not_touch_a_populated_store() {
        let (repo, config) = setup();
        let existing = Admin {
            id: Uuid::new_v4(),
            email: "director@civicportal.org".to_string(),
            password_hash: credentials::hash_password("pw").unwrap(),
            full_name: "The Director".to_string(),
            role: "admin".to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        repo.create_admin(existing).await.unwrap();

        ensure_default_admin(&repo, &config).await.unwrap();
        assert_eq!(repo.count_admins().await.unwrap(), 1);
        assert!(
            repo.find_admin_by_email(&config.default_admin_email)
                .await
                .unwrap()
                .is_none()
        );
    }
}
