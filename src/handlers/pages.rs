use axum::response::Html;

use crate::auth::AdminSession;

// The admin frontend proper is a separate application; these shells exist so
// the admin area has navigable pages to gate and to land redirects on.

/// login_page
///
/// [Public Route] The login form shell. This is where navigational requests
/// are redirected when they arrive without a valid session.
pub async fn login_page() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html>
  <head><title>Civic Portal Admin — Sign in</title></head>
  <body>
    <h1>Sign in</h1>
    <form method="post" action="/api/auth/login" id="login-form">
      <label>Email <input type="email" name="email" autocomplete="username"></label>
      <label>Password <input type="password" name="password" autocomplete="current-password"></label>
      <button type="submit">Sign in</button>
    </form>
  </body>
</html>"#,
    )
}

/// dashboard
///
/// [Admin Route] The admin landing page. Sits behind the session gate and
/// still re-derives the principal itself, like every other protected handler.
pub async fn dashboard(AdminSession(admin): AdminSession) -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html>
  <head><title>Civic Portal Admin</title></head>
  <body>
    <h1>Dashboard</h1>
    <p>Signed in as {} ({}).</p>
  </body>
</html>"#,
        admin.name, admin.email
    ))
}
