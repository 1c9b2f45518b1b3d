use astra::Request;
use tracing::info;

use super::request::{cookie, parse_form, parse_query, required, unix_now};
use crate::auth::sessions::{clear_session_cookie, create_session, revoke_session, session_cookie, SESSION_COOKIE};
use crate::auth::SessionContext;
use crate::auth::magic::{issue_link, redeem_link};
use crate::domain::Role;
use crate::errors::ServerError;
use crate::responses::{html_response, redirect, redirect_with_cookie, ResultResp};
use crate::state::AppState;
use crate::templates::pages::{check_email_content, login_page};

fn role_param(raw: Option<&String>) -> Role {
    raw.and_then(|r| r.parse().ok()).unwrap_or(Role::Customer)
}

pub fn login(req: &Request, session: Option<SessionContext>) -> ResultResp {
    if let Some(session) = session {
        return redirect(session.profile.role.home_path());
    }
    let query = parse_query(req);
    html_response(login_page(role_param(query.get("role"))))
}

/// Issue a link and swap the form for the "check your email" partial.
pub fn request_link(req: &mut Request, state: &AppState) -> ResultResp {
    let form = parse_form(req)?;
    let email = required(&form, "email", "Email")?;
    let role = role_param(form.get("role"));
    let cfg = &state.settings.magic_link;

    let issued = issue_link(&state.db, cfg, email, role, unix_now())?;
    // No mail transport yet; the link goes to the log.
    info!(
        profile_id = issued.profile_id,
        email = %issued.email,
        role = issued.role.as_str(),
        link = %issued.url(),
        "magic link issued"
    );

    html_response(check_email_content(&issued.email, cfg.ttl_secs / 60))
}

pub fn redeem(req: &Request, state: &AppState) -> ResultResp {
    let query = parse_query(req);
    let token = query
        .get("token")
        .ok_or_else(|| ServerError::BadRequest("missing token".into()))?;
    let now = unix_now();
    let ttl = state.settings.session_ttl_secs;

    let signed_in = redeem_link(&state.db, token, now)?;
    let raw = state
        .db
        .with_conn(|conn| create_session(conn, signed_in.profile_id, now, ttl))?;
    info!(profile_id = signed_in.profile_id, role = signed_in.role.as_str(), "signed in");

    redirect_with_cookie(signed_in.home_path(), &session_cookie(&raw, ttl))
}

pub fn logout(req: &Request, state: &AppState) -> ResultResp {
    if let Some(raw) = cookie(req, SESSION_COOKIE) {
        let now = unix_now();
        state.db.with_conn(|conn| revoke_session(conn, &raw, now))?;
    }
    redirect_with_cookie("/", &clear_session_cookie())
}
