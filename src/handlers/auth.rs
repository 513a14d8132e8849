use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    AppState,
    auth::{OptionalAdminSession, clear_session_cookie, session_cookie},
    config::Env,
    credentials,
    error::ApiError,
    models::{LoginRequest, SessionUser},
    seed, token,
};

/// login
///
/// [Public Route] Authenticates an administrator and issues the session
/// cookie. The very first login on a fresh deployment triggers the bootstrap
/// seed so the default principal exists to log in as.
///
/// A failed login is always `401 Invalid email or password` — unknown email
/// and wrong password are indistinguishable by design.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated; session cookie set", body = SessionUser),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::Validation("email"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation("password"));
    }

    seed::ensure_default_admin(&state.repo, &state.config).await?;

    let admin = credentials::verify_credentials(&state.repo, payload.email.trim(), &payload.password)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let credential = token::issue(&admin, state.config.session_secret.as_deref())?;
    let cookie = session_cookie(&credential, state.config.env == Env::Production);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({
            "success": true,
            "user": SessionUser::from(&admin),
        })),
    )
        .into_response())
}

/// session
///
/// [Public Route] Session introspection: reports whether the request carries a
/// valid admin session, and for whom. Unlike gated endpoints this one answers
/// `401 {"authenticated": false}` rather than the generic unauthorized shape,
/// so the admin frontend can branch without special-casing.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Active session", body = SessionUser),
        (status = 401, description = "No valid session")
    )
)]
pub async fn session(
    OptionalAdminSession(admin): OptionalAdminSession,
) -> Result<Response, ApiError> {
    Ok(match admin {
        Some(admin) => Json(json!({
            "authenticated": true,
            "user": SessionUser {
                email: admin.email,
                full_name: admin.name,
                role: admin.role,
            },
        }))
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"authenticated": false})),
        )
            .into_response(),
    })
}

/// logout
///
/// [Public Route] Clears the session cookie. Stateless sessions mean there is
/// nothing to revoke server-side; dropping the cookie is the whole operation,
/// so this always succeeds — even without a cookie to clear.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Session cookie cleared"))
)]
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({"success": true})),
    )
}
