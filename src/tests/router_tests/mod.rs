mod admin_tests;
mod auth_flow_tests;
mod blog_tests;
mod marketplace_tests;

use crate::auth::sessions::create_session;
use crate::auth::magic::{issue_link, redeem_link};
use crate::domain::Role;
use crate::router::handle;
use crate::router::request::unix_now;
use crate::tests::utils::TestApp;
use astra::{Body, Response};
use http::{Method, Request};

/// Sign in through a real magic link and return (profile id, Cookie header).
fn sign_in(app: &TestApp, email: &str, role: Role) -> (i64, String) {
    let now = unix_now();
    let cfg = &app.state.settings.magic_link;
    let issued = issue_link(&app.state.db, cfg, email, role, now).expect("issue link");
    let signed_in = redeem_link(&app.state.db, &issued.token, now).expect("redeem link");
    let token = app
        .state
        .db
        .with_conn(|conn| create_session(conn, signed_in.profile_id, now, 3600))
        .expect("create session");
    (signed_in.profile_id, format!("session={token}"))
}

fn get(app: &TestApp, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(c) = cookie {
        builder = builder.header("Cookie", c);
    }
    let req = builder.body(Body::empty()).unwrap();
    handle(req, &app.state).expect("handler failed")
}

fn post_form(app: &TestApp, uri: &str, cookie: Option<&str>, form: &str) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        builder = builder.header("Cookie", c);
    }
    let req = builder.body(Body::from(form.to_string())).unwrap();
    handle(req, &app.state).expect("handler failed")
}

fn header(resp: &Response, name: &str) -> String {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
