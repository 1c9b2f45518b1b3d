mod admin;
mod auth;
mod blog;
mod marketplace;
mod profile;
pub mod request;

use crate::auth::sessions::SESSION_COOKIE;
use crate::auth::SessionContext;
use crate::errors::ServerError;
use crate::responses::{html_response, redirect, toast_error_response, toast_response, ResultResp};
use crate::state::AppState;
use crate::templates::pages;
use astra::Request;
use request::{cookie, unix_now};
use tracing::debug;

/// Result of a successful mutation: the toast text and the htmx events
/// that make the page refetch what changed.
pub(crate) struct Done {
    message: String,
    events: Vec<&'static str>,
}

impl Done {
    pub(crate) fn new(message: impl Into<String>, events: &[&'static str]) -> Self {
        Self {
            message: message.into(),
            events: events.to_vec(),
        }
    }
}

/// Every form post ends here: success or failure becomes a single toast.
fn mutation(result: Result<Done, ServerError>) -> ResultResp {
    match result {
        Ok(done) => toast_response(&done.message, true, &done.events),
        Err(err) => Ok(toast_error_response(err)),
    }
}

/// The signed-in profile, if the session cookie is live.
pub(crate) fn current_session(req: &Request, state: &AppState) -> Result<Option<SessionContext>, ServerError> {
    let Some(token) = cookie(req, SESSION_COOKIE) else {
        return Ok(None);
    };
    let now = unix_now();
    state
        .db
        .with_conn(|conn| SessionContext::resolve(conn, &token, now))
}

pub(crate) fn require_session(session: Option<SessionContext>) -> Result<SessionContext, ServerError> {
    session.ok_or_else(|| ServerError::Unauthorized("sign in required".into()))
}

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    debug!(%method, %path, "request");

    let segments: Vec<&str> = path.trim_matches('/').split('/').filter(|s| !s.is_empty()).collect();
    let session = current_session(&req, state)?;

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => html_response(pages::home_page(session.as_ref())),

        ("GET", ["login"]) => auth::login(&req, session),
        ("POST", ["auth", "request-link"]) => {
            auth::request_link(&mut req, state).or_else(|err| Ok(toast_error_response(err)))
        }
        ("GET", ["auth", "magic"]) => auth::redeem(&req, state),
        ("POST", ["logout"]) => auth::logout(&req, state),

        ("GET", ["dashboard"]) => match session {
            Some(s) => marketplace::dashboard(state, &s),
            None => redirect("/login"),
        },
        ("GET", ["dashboard", "leads"]) => marketplace::dashboard_leads(state, &require_session(session)?),
        ("POST", ["leads"]) => mutation(
            require_session(session).and_then(|s| marketplace::post_lead(&mut req, state, &s)),
        ),

        ("GET", ["trades-crm"]) => match session {
            Some(s) => marketplace::trades_crm(state, &s),
            None => redirect("/login?role=trade"),
        },
        ("GET", ["trades-crm", "leads"]) => marketplace::trades_crm_leads(state, &require_session(session)?),
        ("POST", ["leads", id, "purchase"]) => mutation(
            require_session(session).and_then(|s| marketplace::purchase(state, &s, id)),
        ),
        ("POST", ["leads", id, "quote"]) => mutation(
            require_session(session).and_then(|s| marketplace::quote(&mut req, state, &s, id)),
        ),
        ("POST", ["bids", id, "accept"]) => mutation(
            require_session(session).and_then(|s| marketplace::accept(state, &s, id)),
        ),

        ("GET", ["jobs"]) => match session {
            Some(s) => marketplace::jobs(state, &s),
            None => redirect("/login"),
        },
        ("GET", ["jobs", "board"]) => marketplace::jobs_board(state, &require_session(session)?),
        ("POST", ["jobs", id, "status"]) => mutation(
            require_session(session).and_then(|s| marketplace::move_job(&mut req, state, &s, id)),
        ),

        ("GET", ["profile"]) => match session {
            Some(s) => html_response(pages::profile_page(&s)),
            None => redirect("/login"),
        },
        ("POST", ["profile"]) => mutation(
            require_session(session).and_then(|s| profile::save(&mut req, state, &s)),
        ),

        ("GET", ["blog"]) => blog::index(&req, state, session.as_ref()),
        ("GET", ["blog", slug]) => blog::show(state, session.as_ref(), slug),

        ("GET", ["admin"]) => match session {
            Some(s) => admin::dashboard(state, &s),
            None => redirect("/login"),
        },
        ("POST", ["admin", "profiles", id, "credit"]) => mutation(
            require_session(session).and_then(|s| admin::grant(&mut req, state, &s, id)),
        ),

        _ => Err(ServerError::NotFound),
    }
}
