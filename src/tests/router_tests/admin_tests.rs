use super::{get, post_form, sign_in};
use crate::db::profiles::set_admin;
use crate::domain::Role;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, test_app};
use astra::Body;
use http::{Method, Request};

#[test]
fn admin_page_requires_admin_flag() {
    let app = test_app();
    let (_, cookie) = sign_in(&app, "c@example.com", Role::Customer);

    let req = Request::builder()
        .method(Method::GET)
        .uri("/admin")
        .header("Cookie", &cookie)
        .body(Body::empty())
        .unwrap();
    assert!(matches!(handle(req, &app.state), Err(ServerError::Forbidden(_))));
}

#[test]
fn admin_page_lists_profiles() {
    let app = test_app();
    let (admin_id, cookie) = sign_in(&app, "admin@example.com", Role::Customer);
    sign_in(&app, "tom@example.com", Role::Trade);
    app.conn(|c| set_admin(c, admin_id, true).unwrap());

    let resp = get(&app, "/admin", Some(&cookie));
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Admin Dashboard"));
    assert!(body.contains("tom@example.com"));
    assert!(body.contains("0 leads · 0 jobs · 2 profiles"));
}

#[test]
fn admin_grants_credit() {
    let app = test_app();
    let (admin_id, admin) = sign_in(&app, "admin@example.com", Role::Customer);
    let (trade_id, trade) = sign_in(&app, "tom@example.com", Role::Trade);
    app.conn(|c| set_admin(c, admin_id, true).unwrap());

    let uri = format!("/admin/profiles/{trade_id}/credit");
    let body = body_string(post_form(&app, &uri, Some(&admin), "amount=25"));
    assert!(body.contains("Granted 25 credits. New balance 75."));

    let body = body_string(post_form(&app, &uri, Some(&admin), "amount=lots"));
    assert!(body.contains("Amount must be a whole number"));

    let body = body_string(post_form(&app, &uri, Some(&trade), "amount=25"));
    assert!(body.contains("Admin access required."));

    let body = body_string(post_form(&app, "/admin/profiles/999/credit", Some(&admin), "amount=5"));
    assert!(body.contains("Not found."));
}
