use super::{get, header, post_form, sign_in};
use crate::auth::magic::issue_link;
use crate::domain::Role;
use crate::errors::ServerError;
use crate::router::handle;
use crate::router::request::unix_now;
use crate::tests::utils::{body_string, test_app};
use astra::Body;
use http::{Method, Request};
use rusqlite::params;

#[test]
fn login_page_loads_successfully() {
    let app = test_app();
    let resp = get(&app, "/login?role=trade", None);

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains("form"));
}

#[test]
fn request_link_returns_partial_html_for_htmx() {
    let app = test_app();
    let resp = post_form(&app, "/auth/request-link", None, "email=Pat%40Example.com&role=trade");

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Check your email"));
    assert!(body.contains("pat@example.com"));

    // A partial, so htmx can swap it in place of the form.
    assert!(!body.contains("<!DOCTYPE html>"));
    assert!(!body.contains("<html"));

    let (role, credit): (String, i64) = app.conn(|c| {
        c.query_row(
            "select role, credit from profiles where email = ?",
            params!["pat@example.com"],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap()
    });
    assert_eq!(role, "trade");
    assert_eq!(credit, 50);
}

#[test]
fn request_link_with_bad_email_is_an_error_toast() {
    let app = test_app();
    let resp = post_form(&app, "/auth/request-link", None, "email=nope");

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("toast-error"));
    assert!(body.contains("Email is not valid"));
}

#[test]
fn magic_link_sets_cookie_and_redirects_by_role() {
    let app = test_app();
    let issued = issue_link(
        &app.state.db,
        &app.state.settings.magic_link,
        "tradie@example.com",
        Role::Trade,
        unix_now(),
    )
    .unwrap();

    let link = issued.url();
    let resp = get(&app, &link, None);
    assert_eq!(resp.status(), 302);
    assert_eq!(header(&resp, "Location"), "/trades-crm");
    let cookie = header(&resp, "Set-Cookie");
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    // Links are single use.
    let req = Request::builder()
        .method(Method::GET)
        .uri(&link)
        .body(Body::empty())
        .unwrap();
    assert!(matches!(handle(req, &app.state), Err(ServerError::Unauthorized(_))));
}

#[test]
fn signed_out_pages_redirect_to_login() {
    let app = test_app();
    for uri in ["/dashboard", "/jobs", "/profile", "/admin"] {
        let resp = get(&app, uri, None);
        assert_eq!(resp.status(), 302, "{uri}");
        assert!(header(&resp, "Location").starts_with("/login"), "{uri}");
    }
}

#[test]
fn signed_out_mutation_asks_to_sign_in() {
    let app = test_app();
    let resp = post_form(&app, "/leads/1/purchase", None, "");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Please sign in first."));
}

#[test]
fn logout_revokes_session() {
    let app = test_app();
    let (_, cookie) = sign_in(&app, "c@example.com", Role::Customer);
    assert_eq!(get(&app, "/dashboard", Some(&cookie)).status(), 200);

    let resp = post_form(&app, "/logout", Some(&cookie), "");
    assert_eq!(resp.status(), 302);
    assert_eq!(header(&resp, "Location"), "/");
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));

    let resp = get(&app, "/dashboard", Some(&cookie));
    assert_eq!(header(&resp, "Location"), "/login");
}

#[test]
fn signed_in_login_goes_home() {
    let app = test_app();
    let (_, cookie) = sign_in(&app, "c@example.com", Role::Customer);
    let resp = get(&app, "/login", Some(&cookie));
    assert_eq!(header(&resp, "Location"), "/dashboard");
}
