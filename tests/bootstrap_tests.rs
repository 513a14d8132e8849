mod common;

use civic_portal::repository::Repository;
use common::{client, spawn_app};

#[tokio::test]
async fn first_login_seeds_the_default_admin() {
    let app = spawn_app().await;
    assert_eq!(app.repo.count_admins().await.unwrap(), 0);

    common::login(&client(), &app).await;

    assert_eq!(app.repo.count_admins().await.unwrap(), 1);
    let admin = app
        .repo
        .find_admin_by_email(&app.config.default_admin_email)
        .await
        .unwrap()
        .expect("seeded admin exists");
    assert_eq!(admin.role, "admin");
    assert!(admin.is_active);
}

#[tokio::test]
async fn concurrent_first_logins_store_exactly_one_principal() {
    let app = spawn_app().await;

    let payload = serde_json::json!({
        "email": app.config.default_admin_email,
        "password": app.config.default_admin_password,
    });
    let url = format!("{}/api/auth/login", app.address);

    // Two fresh clients race the cold-start bootstrap.
    let (a, b) = tokio::join!(
        client().post(&url).json(&payload).send(),
        client().post(&url).json(&payload).send(),
    );

    assert_eq!(a.unwrap().status(), 200);
    assert_eq!(b.unwrap().status(), 200);
    assert_eq!(app.repo.count_admins().await.unwrap(), 1);

    // Both losers and winners can authenticate against the surviving row.
    let response = client().post(&url).json(&payload).send().await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn listing_principals_also_triggers_the_seed() {
    let app = spawn_app().await;
    let client = client();
    common::login(&client, &app).await;

    let response = client
        .get(format!("{}/api/admin/admins", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let admins: serde_json::Value = response.json().await.unwrap();
    let admins = admins.as_array().unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0]["email"], app.config.default_admin_email);
    // Credential material never appears on the wire.
    assert!(admins[0].get("password_hash").is_none());
}
