/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated modules.
/// Access control is applied explicitly at the module level (via Axum layers),
/// preventing accidental exposure of protected endpoints.
///
/// The split also drives the gate's response shape: everything under `/api` is
/// programmatic (structured JSON errors), everything else is navigational
/// (redirects). Admin routers are assembled with their full paths and merged —
/// never nested — so the gate and extractors always classify against the real
/// request URI.

/// Routes accessible to anonymous clients: published content, the login page,
/// and the session endpoints themselves.
pub mod public;

/// Routes restricted to authenticated administrators, both the JSON API and
/// the admin page shells. Wrapped in the session-gate layer at assembly time.
pub mod admin;
