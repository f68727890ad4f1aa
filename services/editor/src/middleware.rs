//! Authentication guard for session-protected routes
//!
//! The guard resolves the `sid` cookie through the session manager and
//! attaches the identity snapshot to the request as explicit context. A
//! missing, expired, or corrupted session is uniformly anonymous and is
//! rejected here, before any store operation runs. Ownership enforcement
//! lives one layer down, folded into the project repository's conditional
//! statements.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{error::ApiError, session::SESSION_COOKIE, AppState};

/// Reject the request unless it carries a valid session; on success, insert
/// the bound [`SessionUser`](crate::models::SessionUser) into the request
/// extensions for handlers to consume.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(ApiError::Unauthorized)?;

    let user = state
        .sessions
        .validate(&token)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Build the HTTP-only session cookie carrying the opaque token.
///
/// Not readable by page scripts and restricted to same-site requests. No
/// client-side expiry is set; the server-side TTL in the session store is
/// authoritative, and a stale cookie simply validates as anonymous.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Build the removal cookie that clears the session cookie on logout.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_script_inaccessible() {
        let cookie = session_cookie("token-value".to_string());
        assert_eq!(cookie.name(), "sid");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn clear_cookie_targets_the_same_name_and_path() {
        let cookie = clear_session_cookie();
        assert_eq!(cookie.name(), "sid");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
    }
}
