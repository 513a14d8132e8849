mod common;

use common::{client, login, spawn_app};
use jsonwebtoken::{EncodingKey, Header, encode};
use civic_portal::token::{ADMIN_SESSION_TOKEN_TYPE, Claims, unix_now};
use uuid::Uuid;

/// Signs an arbitrary claim set with the app's configured secret, for tests
/// that need credentials the server itself would never issue.
fn forge_credential(app: &common::TestApp, claims: &Claims) -> String {
    let secret = app.config.session_secret.as_deref().unwrap();
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn admin_claims(exp_offset: i64, token_type: &str) -> Claims {
    let now = unix_now();
    Claims {
        sub: Uuid::from_u128(42),
        email: "admin@civicportal.org".to_string(),
        name: "Site Administrator".to_string(),
        role: "admin".to_string(),
        token_type: token_type.to_string(),
        iat: now.saturating_sub(60),
        exp: (now as i64 + exp_offset) as usize,
    }
}

#[tokio::test]
async fn login_with_wrong_password_is_401_without_detail() {
    let app = spawn_app().await;
    let response = client()
        .post(format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({
            "email": app.config.default_admin_email,
            "password": "definitely-wrong",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn login_with_unknown_email_is_the_same_401() {
    let app = spawn_app().await;
    let response = client()
        .post(format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({
            "email": "nobody@civicportal.org",
            "password": "whatever",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn blank_email_is_a_validation_error() {
    let app = spawn_app().await;
    let response = client()
        .post(format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({"email": "  ", "password": "pw"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "email is required");
}

#[tokio::test]
async fn login_sets_a_session_cookie_with_the_right_attributes() {
    let app = spawn_app().await;
    let response = client()
        .post(format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({
            "email": app.config.default_admin_email,
            "password": app.config.default_admin_password,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("login must set the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("admin_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Max-Age=86400"));

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], app.config.default_admin_email);
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"]["fullName"].is_string());
}

#[tokio::test]
async fn session_lifecycle_login_introspect_logout() {
    let app = spawn_app().await;
    let client = client();

    // Before login: introspection says unauthenticated.
    let response = client
        .get(format!("{}/api/auth/session", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["authenticated"], false);

    login(&client, &app).await;

    // After login: authenticated, with the matching identity.
    let response = client
        .get(format!("{}/api/auth/session", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["email"], app.config.default_admin_email);

    // Gate admits the cookie.
    let response = client
        .get(format!("{}/api/admin/articles", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Logout always succeeds and clears the cookie.
    let response = client
        .post(format!("{}/api/auth/logout", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/api/auth/session", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn protected_api_without_cookie_is_a_structured_401() {
    let app = spawn_app().await;
    let response = client()
        .get(format!("{}/api/admin/articles", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn protected_page_without_cookie_redirects_to_login() {
    let app = spawn_app().await;
    let response = client()
        .get(format!("{}/admin", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers().get("location").unwrap().to_str().unwrap(),
        "/admin/login"
    );
    // The failed navigation also drops any stale cookie.
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn the_login_page_itself_is_not_gated() {
    let app = spawn_app().await;
    let response = client()
        .get(format!("{}/admin/login", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn tampered_credential_is_rejected() {
    let app = spawn_app().await;
    let credential = forge_credential(&app, &admin_claims(3600, ADMIN_SESSION_TOKEN_TYPE));

    // Flip one character of the signature.
    let mut tampered = credential.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });
    assert_ne!(credential, tampered);

    let response = client()
        .get(format!("{}/api/admin/articles", app.address))
        .header("Cookie", format!("admin_session={tampered}"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn expired_credential_is_rejected_everywhere() {
    let app = spawn_app().await;
    // Correctly signed, but expired an hour ago — as if 24h have passed.
    let credential = forge_credential(&app, &admin_claims(-3600, ADMIN_SESSION_TOKEN_TYPE));
    let cookie = format!("admin_session={credential}");

    let response = client()
        .get(format!("{}/api/auth/session", app.address))
        .header("Cookie", &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["authenticated"], false);

    let response = client()
        .get(format!("{}/api/admin/articles", app.address))
        .header("Cookie", &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = client()
        .get(format!("{}/admin", app.address))
        .header("Cookie", &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
}

#[tokio::test]
async fn credential_of_another_kind_is_rejected_even_when_fresh() {
    let app = spawn_app().await;
    // Same secret, valid signature, unexpired — but not an admin-session token.
    let credential = forge_credential(&app, &admin_claims(3600, "password-reset"));

    let response = client()
        .get(format!("{}/api/admin/articles", app.address))
        .header("Cookie", format!("admin_session={credential}"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");
}
