//! Backend endpoint paths.

use leadforge_core::{ValidationError, ValidationResult};

/// `POST` credentials, returns an access/refresh pair.
pub const LOGIN: &str = "/api/auth/login/";
/// `POST` a new account. Does not issue tokens.
pub const REGISTER: &str = "/api/auth/register/";
/// `POST` a refresh token, returns a new access token.
pub const TOKEN_REFRESH: &str = "/api/auth/token/refresh/";
/// `GET` the current user.
pub const PROFILE: &str = "/api/auth/profile/";
/// `GET` dashboard stats.
pub const DASHBOARD: &str = "/api/dashboard/";
/// `GET` the user's lead magnets.
pub const LEAD_MAGNETS: &str = "/api/lead-magnets/";
/// `GET` available templates.
pub const TEMPLATES: &str = "/api/templates/";
/// `GET`/`PUT` the firm profile.
pub const FIRM_PROFILE: &str = "/api/firm-profile/";
/// `POST` slogan generation.
pub const GENERATE_SLOGAN: &str = "/api/generate-slogan/";
/// `POST` PDF generation, returns `application/pdf`.
pub const GENERATE_PDF: &str = "/api/generate-pdf/";

/// Endpoints reachable without a session.
pub const PUBLIC: [&str; 3] = [LOGIN, REGISTER, TOKEN_REFRESH];

/// `/api/lead-magnets/:id/`
///
/// The id becomes a single path segment, so only ASCII letters, digits, `-`
/// and `_` are accepted.
pub fn lead_magnet(id: &str) -> ValidationResult<String> {
    if id.is_empty() {
        return Err(ValidationError::missing("id"));
    }
    if !id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
        return Err(ValidationError::invalid("id", format!("{:?} is not a lead magnet id", id)));
    }
    Ok(format!("{}{}/", LEAD_MAGNETS, id))
}

/// Strip the query string and make sure the path ends in a slash, so
/// `/api/auth/login?next=x` and `/api/auth/login/` compare equal.
pub(crate) fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}
