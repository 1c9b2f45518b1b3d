use super::get;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, test_app};
use astra::Body;
use http::{Method, Request};

#[test]
fn blog_renders_empty_when_cms_is_down() {
    let app = test_app();
    let resp = get(&app, "/blog?category=Plumbing&q=tap", None);

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Trade Pilot blog"));
    assert!(body.contains("No articles found."));
    assert!(body.contains(r#"class="tab active""#));
}

#[test]
fn unknown_article_is_not_found() {
    let app = test_app();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/blog/does-not-exist")
        .body(Body::empty())
        .unwrap();
    assert!(matches!(handle(req, &app.state), Err(ServerError::NotFound)));
}

#[test]
fn malformed_slug_is_bad_request() {
    let app = test_app();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/blog/%FF%FE")
        .body(Body::empty())
        .unwrap();
    assert!(matches!(handle(req, &app.state), Err(ServerError::BadRequest(_))));
}

#[test]
fn unknown_route_is_not_found() {
    let app = test_app();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/nowhere")
        .body(Body::empty())
        .unwrap();
    assert!(matches!(handle(req, &app.state), Err(ServerError::NotFound)));
}
