use super::{get, header, post_form, sign_in};
use crate::domain::Role;
use crate::tests::utils::{body_string, test_app, TestApp};

const LEAD_FORM: &str = "name=Sarah+Johnson&service=Bathroom+Renovation&location=M1+1AB\
    &value=%C2%A34%2C000-%C2%A36%2C000&phone=07123456789&email=sarah%40example.com&badge=hot";

fn last_id(app: &TestApp, table: &str) -> i64 {
    app.conn(|c| {
        c.query_row(&format!("select max(id) from {table}"), [], |r| r.get(0))
            .unwrap()
    })
}

/// A customer with one posted lead and a trade in the same postcode.
fn market() -> (TestApp, String, String, i64) {
    let app = test_app();
    let (_, customer) = sign_in(&app, "sarah@example.com", Role::Customer);
    let (_, trade) = sign_in(&app, "tom@example.com", Role::Trade);

    let resp = post_form(&app, "/profile", Some(&trade), "first_name=Tom&postcode=m1++1ab");
    assert!(body_string(resp).contains("Profile saved."));

    let resp = post_form(&app, "/leads", Some(&customer), LEAD_FORM);
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "HX-Trigger"), "leads-changed");
    assert!(body_string(resp).contains("Lead posted."));

    let lead_id = last_id(&app, "leads");
    (app, customer, trade, lead_id)
}

#[test]
fn trade_sees_lead_in_their_postcode() {
    let (app, _customer, trade, lead_id) = market();
    let body = body_string(get(&app, "/trades-crm", Some(&trade)));
    assert!(body.contains("Bathroom Renovation"));
    assert!(body.contains(&format!("/leads/{lead_id}/purchase")));
    assert!(body.contains("50 credits"));

    // The partial refreshes the same section on its own.
    let partial = body_string(get(&app, "/trades-crm/leads", Some(&trade)));
    assert!(partial.contains(r#"id="trade-leads""#));
    assert!(!partial.contains("<html"));
}

#[test]
fn purchase_debits_credit_and_reveals_contact() {
    let (app, _customer, trade, lead_id) = market();

    let resp = post_form(&app, &format!("/leads/{lead_id}/purchase"), Some(&trade), "");
    assert_eq!(header(&resp, "HX-Trigger"), "leads-changed");
    assert!(body_string(resp).contains("Lead purchased for 30 credits. 20 credits left."));

    let body = body_string(get(&app, "/trades-crm/leads", Some(&trade)));
    assert!(body.contains("tel:07123456789"));

    let again = body_string(post_form(&app, &format!("/leads/{lead_id}/purchase"), Some(&trade), ""));
    assert!(again.contains("toast-error"));
    assert!(again.contains("already purchased"));
}

#[test]
fn purchase_without_enough_credit_is_rejected() {
    let (app, customer, trade, first) = market();
    post_form(&app, &format!("/leads/{first}/purchase"), Some(&trade), "");
    post_form(&app, "/leads", Some(&customer), LEAD_FORM);
    let second = last_id(&app, "leads");

    let body = body_string(post_form(&app, &format!("/leads/{second}/purchase"), Some(&trade), ""));
    assert!(body.contains("insufficient credits (20 available, 30 needed)"));
}

#[test]
fn customers_cannot_buy_leads() {
    let (app, customer, _trade, lead_id) = market();
    let body = body_string(post_form(&app, &format!("/leads/{lead_id}/purchase"), Some(&customer), ""));
    assert!(body.contains("Only trade accounts can do that."));
}

#[test]
fn quote_accept_and_move_job() {
    let (app, customer, trade, lead_id) = market();
    post_form(&app, &format!("/leads/{lead_id}/purchase"), Some(&trade), "");

    let bad = body_string(post_form(&app, &format!("/leads/{lead_id}/quote"), Some(&trade), "value=abc"));
    assert!(bad.contains("toast-error"));

    let resp = post_form(&app, &format!("/leads/{lead_id}/quote"), Some(&trade), "value=4%2C500");
    assert!(body_string(resp).contains("Quote sent."));
    let bid_id = last_id(&app, "bids");

    let leads = body_string(get(&app, "/dashboard/leads", Some(&customer)));
    assert!(leads.contains(&format!("/bids/{bid_id}/accept")));

    let resp = post_form(&app, &format!("/bids/{bid_id}/accept"), Some(&customer), "");
    let trigger = header(&resp, "HX-Trigger");
    assert!(trigger.contains("leads-changed"));
    assert!(trigger.contains("jobs-changed"));
    assert!(body_string(resp).contains("Quote accepted."));
    let job_id = last_id(&app, "jobs");

    let board = body_string(get(&app, "/jobs/board", Some(&trade)));
    assert!(board.contains("Bathroom Renovation - Johnson"));
    assert!(board.contains("To Do (1)"));

    let resp = post_form(&app, &format!("/jobs/{job_id}/status"), Some(&trade), "status=in_progress");
    assert_eq!(header(&resp, "HX-Trigger"), "jobs-changed");
    assert!(body_string(resp).contains("Job moved to In Progress."));

    // The customer's board reflects the move without a stale cache hit.
    let board = body_string(get(&app, "/jobs/board", Some(&customer)));
    assert!(board.contains("In Progress (1)"));

    let bad = body_string(post_form(&app, &format!("/jobs/{job_id}/status"), Some(&trade), "status=paused"));
    assert!(bad.contains("toast-error"));
}

#[test]
fn roles_land_on_their_own_pages() {
    let (app, customer, trade, _) = market();
    assert_eq!(header(&get(&app, "/dashboard", Some(&trade)), "Location"), "/trades-crm");
    assert_eq!(header(&get(&app, "/trades-crm", Some(&customer)), "Location"), "/dashboard");
}

#[test]
fn invalid_lead_form_reports_missing_field() {
    let app = test_app();
    let (_, customer) = sign_in(&app, "c@example.com", Role::Customer);
    let body = body_string(post_form(&app, "/leads", Some(&customer), "name=Sam"));
    assert!(body.contains("Service is required"));
}
