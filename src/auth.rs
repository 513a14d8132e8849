use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    AppState,
    config::AppConfig,
    error::{ApiError, AuthError},
    token::{self, Claims, SESSION_TTL_SECS},
};

/// Name of the cookie carrying the signed admin session credential.
pub const SESSION_COOKIE: &str = "admin_session";

/// Where navigational requests are sent when they lack a valid session.
pub const LOGIN_PAGE: &str = "/admin/login";

/// CurrentAdmin
///
/// The resolved identity of an authenticated request: the claims snapshot
/// recovered from the session credential. Attached to request extensions by
/// the gate and re-derived by handlers through the `AdminSession` extractor.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentAdmin {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<Claims> for CurrentAdmin {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        }
    }
}

/// session_cookie
///
/// Builds the Set-Cookie value for a freshly issued credential: HTTP-only,
/// SameSite=Lax, site-wide, expiring with the credential itself. `Secure` is
/// appended in production only, so local HTTP development still works.
pub fn session_cookie(credential: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={credential}; HttpOnly; SameSite=Lax; Path=/; Max-Age={SESSION_TTL_SECS}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// clear_session_cookie
///
/// The Set-Cookie value that removes the session cookie (logout, or a failed
/// verification on a page navigation).
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// extract_session_cookie
///
/// Pulls the session credential out of the request's Cookie header(s), if any.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{SESSION_COOKIE}=");
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(prefix.as_str()))
        .map(str::to_string)
}

/// is_programmatic
///
/// Classifies a request path: API routes expect structured JSON errors,
/// everything else is a page navigation that expects a redirect.
pub fn is_programmatic(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

/// GateRejection
///
/// How the session gate answers an unauthenticated or failed request. The
/// shape depends on the request's declared interface, never on *why* the
/// credential was rejected — that distinction stays server-side.
pub enum GateRejection {
    /// Page navigation: send the browser to the login page and drop the stale
    /// cookie so it does not keep replaying a dead credential.
    RedirectToLogin,
    /// API call: structured 401 body.
    Unauthorized,
    /// Not an auth decision at all (e.g. the signing secret is missing);
    /// rendered as the underlying error's own response.
    Failure(ApiError),
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => (
                [(header::SET_COOKIE, clear_session_cookie())],
                Redirect::to(LOGIN_PAGE),
            )
                .into_response(),
            Self::Unauthorized => ApiError::Auth(AuthError::MissingToken).into_response(),
            Self::Failure(err) => err.into_response(),
        }
    }
}

/// rejection_for
///
/// Maps a failed verification to the response shape this request expects.
/// Configuration failures are never downgraded to an auth rejection.
fn rejection_for(programmatic: bool, err: ApiError) -> GateRejection {
    match err {
        ApiError::Configuration => GateRejection::Failure(ApiError::Configuration),
        _ if programmatic => GateRejection::Unauthorized,
        _ => GateRejection::RedirectToLogin,
    }
}

/// AdminSession Extractor
///
/// Resolves the authenticated administrator for a handler. Prefers the
/// context value the gate attached; when absent (handler invoked without the
/// gate, or defense-in-depth re-derivation) it parses and verifies the cookie
/// itself, so both call sites share one `AuthError` taxonomy.
pub struct AdminSession(pub CurrentAdmin);

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(admin) = parts.extensions.get::<CurrentAdmin>() {
            return Ok(Self(admin.clone()));
        }

        let programmatic = is_programmatic(parts.uri.path());
        let config = AppConfig::from_ref(state);

        let credential = extract_session_cookie(&parts.headers).ok_or_else(|| {
            rejection_for(programmatic, ApiError::Auth(AuthError::MissingToken))
        })?;

        let claims = token::verify(&credential, config.session_secret.as_deref())
            .map_err(|e| rejection_for(programmatic, e))?;

        Ok(Self(claims.into()))
    }
}

/// OptionalAdminSession Extractor
///
/// Like `AdminSession` but resolves to `None` instead of rejecting when the
/// request carries no usable credential. Used by session introspection, which
/// has its own `{"authenticated": false}` response shape. A missing signing
/// secret is still a hard failure.
pub struct OptionalAdminSession(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdminSession
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(admin) = parts.extensions.get::<CurrentAdmin>() {
            return Ok(Self(Some(admin.clone())));
        }

        let Some(credential) = extract_session_cookie(&parts.headers) else {
            return Ok(Self(None));
        };

        let config = AppConfig::from_ref(state);
        match token::verify(&credential, config.session_secret.as_deref()) {
            Ok(claims) => Ok(Self(Some(claims.into()))),
            Err(ApiError::Configuration) => Err(ApiError::Configuration),
            Err(_) => Ok(Self(None)),
        }
    }
}

/// session_gate
///
/// The middleware in front of every protected route. Runs once per request,
/// before the target handler: extracts the cookie, verifies the credential,
/// and either attaches the recovered principal to the request context or
/// answers in the shape the request expects (redirect vs. structured 401).
/// Verification results are never cached across requests — re-verifying a
/// small signed credential is cheap and keeps the session model stateless.
pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, GateRejection> {
    let programmatic = is_programmatic(request.uri().path());

    let credential = extract_session_cookie(request.headers()).ok_or_else(|| {
        rejection_for(programmatic, ApiError::Auth(AuthError::MissingToken))
    })?;

    let claims = token::verify(&credential, state.config.session_secret.as_deref())
        .map_err(|e| rejection_for(programmatic, e))?;

    request.extensions_mut().insert(CurrentAdmin::from(claims));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_cookie_carries_the_required_attributes() {
        let cookie = session_cookie("tok123", false);
        assert!(cookie.starts_with("admin_session=tok123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));

        assert!(session_cookie("tok123", true).contains("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie();
        assert!(cookie.starts_with("admin_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn cookie_extraction_finds_the_session_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; admin_session=abc.def.ghi; lang=en"),
        );
        assert_eq!(
            extract_session_cookie(&headers).as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn cookie_extraction_handles_absence() {
        let mut headers = HeaderMap::new();
        assert!(extract_session_cookie(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(extract_session_cookie(&headers).is_none());
    }

    #[test]
    fn api_paths_are_programmatic_pages_are_not() {
        assert!(is_programmatic("/api/admin/articles"));
        assert!(is_programmatic("/api/auth/session"));
        assert!(!is_programmatic("/admin"));
        assert!(!is_programmatic("/admin/login"));
        assert!(!is_programmatic("/apiary")); // prefix must be a path segment
    }

    #[test]
    fn configuration_failures_are_never_downgraded() {
        assert!(matches!(
            rejection_for(true, ApiError::Configuration),
            GateRejection::Failure(ApiError::Configuration)
        ));
        assert!(matches!(
            rejection_for(false, ApiError::Configuration),
            GateRejection::Failure(ApiError::Configuration)
        ));
        assert!(matches!(
            rejection_for(true, ApiError::Auth(AuthError::Expired)),
            GateRejection::Unauthorized
        ));
        assert!(matches!(
            rejection_for(false, ApiError::Auth(AuthError::Expired)),
            GateRejection::RedirectToLogin
        ));
    }
}
