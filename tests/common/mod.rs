use civic_portal::{AppState, MemoryRepository, RepositoryState, config::AppConfig, create_router};
use std::sync::Arc;
use tokio::net::TcpListener;

/// TestApp
///
/// A running application instance bound to an ephemeral port, backed by the
/// in-memory repository so tests need no database. The repository handle is
/// kept so tests can assert on stored state directly.
pub struct TestApp {
    pub address: String,
    pub repo: Arc<MemoryRepository>,
    pub config: AppConfig,
}

pub async fn spawn_app() -> TestApp {
    let repo = Arc::new(MemoryRepository::new());
    let config = AppConfig::default();

    let state = AppState {
        repo: repo.clone() as RepositoryState,
        config: config.clone(),
    };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        address,
        repo,
        config,
    }
}

/// client
///
/// A reqwest client with a cookie store (so the session cookie round-trips
/// like a browser's) and redirects disabled (so tests can observe the gate's
/// 303 responses instead of following them).
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// login
///
/// Logs in as the bootstrap default administrator and asserts success. The
/// session cookie lands in the client's cookie store.
pub async fn login(client: &reqwest::Client, app: &TestApp) {
    let response = client
        .post(format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({
            "email": app.config.default_admin_email,
            "password": app.config.default_admin_password,
        }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(response.status(), 200, "default admin login should succeed");
}
