//! Walks one browser through login, a guarded API call, a page render
//! and logout, logging what the server sends at each step.
//!
//! ```text
//! cargo run -p login-gate            # run the walkthrough
//! cargo run -p login-gate -- keygen  # print a fresh JWT_SECRET
//! ```

use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue, Request, Uri};
use tessera::prelude::*;
use tessera::{CookieError, SigningSecret};

#[tokio::main]
async fn main() -> Result<(), TesseraError> {
    if std::env::args().nth(1).as_deref() == Some("keygen") {
        println!("{}", SigningSecret::generate().to_base64());
        return Ok(());
    }

    init_logging(LogConfig::default())?;

    let settings = SessionSettings::from_env()?;
    tracing::info!(environment = %settings.environment, "starting walkthrough");
    let sessions = SessionService::new(&settings);
    let guard = RouteGuard::new(sessions.verifier(), GuardConfig::default());

    // -- Anonymous visitor hits a protected API ---------------------------
    let decision = guard.check(&get("/api/projects", None)?).await;
    report("anonymous /api/projects", decision);

    // -- Login ------------------------------------------------------------
    let jar = ResponseJar::new();
    sessions
        .create_session(&jar, "user-1", "demo@example.com")
        .await?;
    let mut login_response = HeaderMap::new();
    jar.apply_to(&mut login_response).await?;
    for value in login_response.get_all(SET_COOKIE) {
        tracing::info!(set_cookie = ?value, "login response");
    }
    let cookie = browser_cookie(&login_response);

    // -- Logged-in visitor hits the same API ------------------------------
    let decision = guard.check(&get("/api/projects", Some(&cookie))?).await;
    report("logged-in /api/projects", decision);

    // -- Server-rendered page reads the session ---------------------------
    let page = get("/", Some(&cookie))?;
    let page_jar = ResponseJar::from_headers(page.headers());
    match sessions.get_session(&page_jar).await? {
        Some(claims) => tracing::info!(
            user_id = %claims.user_id,
            email = %claims.email,
            expires_at = %claims.expires_at(),
            "page rendered for signed-in user"
        ),
        None => tracing::info!("page rendered for anonymous visitor"),
    }

    // -- Logout -----------------------------------------------------------
    let logout = get("/api/logout", Some(&cookie))?;
    let logout_jar = ResponseJar::from_headers(logout.headers());
    sessions.delete_session(&logout_jar).await?;
    let mut logout_response = HeaderMap::new();
    logout_jar.apply_to(&mut logout_response).await?;
    for value in logout_response.get_all(SET_COOKIE) {
        tracing::info!(set_cookie = ?value, "logout response");
    }

    let after = browser_cookie(&logout_response);
    let decision = guard.check(&get("/api/projects", Some(&after))?).await;
    report("logged-out /api/projects", decision);

    Ok(())
}

/// A GET request for `path`, optionally carrying a `Cookie` header.
fn get(path: &'static str, cookie: Option<&str>) -> Result<Request<()>, TesseraError> {
    let mut request = Request::new(());
    *request.uri_mut() = Uri::from_static(path);
    if let Some(cookie) = cookie {
        let value = HeaderValue::from_str(cookie)
            .map_err(|e| CookieError::InvalidHeader(e.to_string()))?;
        request.headers_mut().insert(COOKIE, value);
    }
    Ok(request)
}

/// What a browser would send back after receiving `response`.
fn browser_cookie(response: &HeaderMap) -> String {
    response
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

fn report(step: &str, decision: Decision) {
    match &decision {
        Decision::Admit(Some(claims)) => {
            tracing::info!(step, user_id = %claims.user_id, "admitted with session");
        }
        Decision::Admit(None) => tracing::info!(step, "admitted anonymously"),
        Decision::Unauthorized | Decision::Redirect(_) => {
            let status = decision
                .clone()
                .into_response()
                .map(|r| r.status().as_u16())
                .unwrap_or_default();
            tracing::info!(step, status, "rejected");
        }
    }
}
