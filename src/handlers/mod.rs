/// Handler Module Index
///
/// Handlers are grouped by audience rather than by domain: the session
/// endpoints, the public read-only surface, the protected admin CRUD surface,
/// and the small set of HTML page shells the admin area serves.
///
/// Every admin handler takes the `AdminSession` extractor itself, even though
/// the session gate already ran: the principal is re-derived at the call site
/// instead of trusted blindly from middleware ordering.
pub mod admin;
pub mod auth;
pub mod pages;
pub mod public;
