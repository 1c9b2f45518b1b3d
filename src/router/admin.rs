use astra::Request;

use super::request::{parse_form, path_id, required, unix_now};
use super::Done;
use crate::auth::SessionContext;
use crate::db::jobs::JobScope;
use crate::db::profiles::list_profiles_with_stats;
use crate::errors::ServerError;
use crate::marketplace::grant_credits;
use crate::responses::{html_response, ResultResp};
use crate::state::AppState;
use crate::templates::pages::{admin_page, AdminVm};

pub fn dashboard(state: &AppState, session: &SessionContext) -> ResultResp {
    session.require_admin()?;
    let profiles = state.db.with_conn(|conn| list_profiles_with_stats(conn))?;
    let vm = AdminVm {
        session,
        profiles,
        lead_count: state.fetch_leads()?.len(),
        job_count: state.fetch_jobs(JobScope::All)?.len(),
    };
    html_response(admin_page(&vm))
}

pub fn grant(req: &mut Request, state: &AppState, session: &SessionContext, id: &str) -> Result<Done, ServerError> {
    let profile_id = path_id(id)?;
    let form = parse_form(req)?;
    let amount: i64 = required(&form, "amount", "Amount")?
        .parse()
        .map_err(|_| ServerError::Validation("Amount must be a whole number".into()))?;
    let now = unix_now();
    let balance = state
        .db
        .with_conn(|conn| grant_credits(conn, session, profile_id, amount, now))?;
    Ok(Done::new(
        format!("Granted {amount} credits. New balance {balance}."),
        &[],
    ))
}
