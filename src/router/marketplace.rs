use astra::Request;

use super::request::{parse_form, path_id, required, unix_now};
use super::Done;
use crate::auth::SessionContext;
use crate::db::credits::recent_transactions;
use crate::domain::{JobStatus, NewLead, Role};
use crate::errors::ServerError;
use crate::marketplace::{
    self, customer_leads, leads_for_trade, scope_for, JobBoard,
};
use crate::responses::{html_response, redirect, ResultResp};
use crate::state::AppState;
use crate::templates::components::{customer_leads_section, LEADS_CHANGED};
use crate::templates::pages::{
    dashboard_page, job_board_section, jobs_page, trades_crm_page, TradesCrmVm, JOBS_CHANGED,
};

fn field(form: &std::collections::HashMap<String, String>, key: &str) -> String {
    form.get(key).cloned().unwrap_or_default()
}

pub fn dashboard(state: &AppState, session: &SessionContext) -> ResultResp {
    if session.profile.role == Role::Trade && !session.is_admin() {
        return redirect(Role::Trade.home_path());
    }
    let leads = state.fetch_leads()?;
    html_response(dashboard_page(session, &customer_leads(session, &leads)))
}

pub fn dashboard_leads(state: &AppState, session: &SessionContext) -> ResultResp {
    session.require_customer()?;
    let leads = state.fetch_leads()?;
    html_response(customer_leads_section(&customer_leads(session, &leads)))
}

pub fn post_lead(req: &mut Request, state: &AppState, session: &SessionContext) -> Result<Done, ServerError> {
    let form = parse_form(req)?;
    let lead = NewLead {
        name: field(&form, "name"),
        service: field(&form, "service"),
        location: field(&form, "location"),
        value: field(&form, "value"),
        phone: field(&form, "phone"),
        email: field(&form, "email"),
        badge: field(&form, "badge"),
    };
    let now = unix_now();
    state
        .db
        .with_conn(|conn| marketplace::post_lead(conn, session, &lead, now))?;
    state.invalidate_leads();
    Ok(Done::new("Lead posted.", &[LEADS_CHANGED]))
}

fn trades_vm<'a>(state: &AppState, session: &'a SessionContext, with_ledger: bool) -> Result<TradesCrmVm<'a>, ServerError> {
    let leads = state.fetch_leads()?;
    let board = leads_for_trade(session, &leads, state.settings.lead_cost);
    let ledger = if with_ledger {
        state
            .db
            .with_conn(|conn| recent_transactions(conn, session.profile_id()))?
    } else {
        Vec::new()
    };
    Ok(TradesCrmVm {
        session,
        board,
        lead_cost: state.settings.lead_cost,
        ledger,
    })
}

pub fn trades_crm(state: &AppState, session: &SessionContext) -> ResultResp {
    if session.profile.role == Role::Customer && !session.is_admin() {
        return redirect(Role::Customer.home_path());
    }
    html_response(trades_crm_page(&trades_vm(state, session, true)?))
}

pub fn trades_crm_leads(state: &AppState, session: &SessionContext) -> ResultResp {
    session.require_trade()?;
    html_response(trades_vm(state, session, false)?.leads_section())
}

pub fn purchase(state: &AppState, session: &SessionContext, id: &str) -> Result<Done, ServerError> {
    let lead_id = path_id(id)?;
    let cost = state.settings.lead_cost;
    let now = unix_now();
    let balance = state
        .db
        .with_conn(|conn| marketplace::purchase_lead(conn, session, lead_id, cost, now))?;
    state.invalidate_leads();
    Ok(Done::new(
        format!("Lead purchased for {cost} credits. {balance} credits left."),
        &[LEADS_CHANGED],
    ))
}

pub fn quote(req: &mut Request, state: &AppState, session: &SessionContext, id: &str) -> Result<Done, ServerError> {
    let lead_id = path_id(id)?;
    let form = parse_form(req)?;
    let raw = field(&form, "value");
    let now = unix_now();
    state
        .db
        .with_conn(|conn| marketplace::submit_quote(conn, session, lead_id, &raw, now))?;
    state.invalidate_leads();
    Ok(Done::new("Quote sent.", &[LEADS_CHANGED]))
}

pub fn accept(state: &AppState, session: &SessionContext, id: &str) -> Result<Done, ServerError> {
    let bid_id = path_id(id)?;
    let now = unix_now();
    let job = state
        .db
        .with_conn(|conn| marketplace::accept_bid(conn, session, bid_id, now))?;
    state.invalidate_leads();
    state.invalidate_jobs();
    Ok(Done::new(
        format!("Quote accepted. Job #{} is on the board.", job.id),
        &[LEADS_CHANGED, JOBS_CHANGED],
    ))
}

fn board(state: &AppState, session: &SessionContext) -> Result<JobBoard, ServerError> {
    Ok(JobBoard::from_jobs(state.fetch_jobs(scope_for(session))?))
}

pub fn jobs(state: &AppState, session: &SessionContext) -> ResultResp {
    html_response(jobs_page(&board(state, session)?, session))
}

pub fn jobs_board(state: &AppState, session: &SessionContext) -> ResultResp {
    html_response(job_board_section(&board(state, session)?, session))
}

pub fn move_job(req: &mut Request, state: &AppState, session: &SessionContext, id: &str) -> Result<Done, ServerError> {
    let job_id = path_id(id)?;
    let form = parse_form(req)?;
    let status: JobStatus = required(&form, "status", "Status")?
        .parse()
        .map_err(|e: crate::domain::UnknownVariant| ServerError::Validation(e.to_string()))?;
    let now = unix_now();
    let job = state
        .db
        .with_conn(|conn| marketplace::move_job(conn, session, job_id, status, now))?;
    state.invalidate_jobs();
    Ok(Done::new(
        format!("Job moved to {}.", job.status.label()),
        &[JOBS_CHANGED],
    ))
}
