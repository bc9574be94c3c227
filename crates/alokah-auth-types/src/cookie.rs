//! Refresh-token cookie builder.
//!
//! Only the refresh token travels in a cookie; access tokens are returned in
//! the response body and sent back as a bearer header. The cookie is http-only
//! and secure with `SameSite=None` so browser clients on the app domains can
//! refresh cross-site.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Cookie Max-Age in seconds (7 days).
pub const REFRESH_COOKIE_MAX_AGE: i64 = 604_800;

/// Set the refresh-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use alokah_auth_types::cookie::{set_refresh_token_cookie, REFRESH_TOKEN_COOKIE};
///
/// let jar = CookieJar::new();
/// let jar = set_refresh_token_cookie(jar, "refresh_value".to_string(), "alokah.app".to_string());
/// let cookie = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("alokah.app"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_refresh_token_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    let cookie = Cookie::build((REFRESH_TOKEN_COOKIE, value))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(REFRESH_COOKIE_MAX_AGE))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build();
    jar.add(cookie)
}

/// Clear the refresh-token cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use alokah_auth_types::cookie::{
///     clear_refresh_cookie, set_refresh_token_cookie, REFRESH_TOKEN_COOKIE,
/// };
///
/// let jar = CookieJar::new();
/// let jar = set_refresh_token_cookie(jar, "r".to_string(), "alokah.app".to_string());
/// let jar = clear_refresh_cookie(jar, "alokah.app".to_string());
/// let cookie = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_refresh_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((REFRESH_TOKEN_COOKIE, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build();
    jar.add(cookie)
}
