use crate::errors::ServerError;
use crate::responses::ResultResp;
use crate::templates::components::toast;
use astra::{Body, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}

/// Plain 302. htmx requests follow it transparently.
pub fn redirect(location: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(302)
        .header("Location", location)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}

pub fn redirect_with_cookie(location: &str, cookie: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(302)
        .header("Location", location)
        .header("Set-Cookie", cookie)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}

/// A toast partial for an htmx mutation. `events` go out in `HX-Trigger`
/// so lists on the page refetch themselves.
pub fn toast_response(message: &str, success: bool, events: &[&str]) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref());
    if !events.is_empty() {
        builder = builder.header("HX-Trigger", events.join(", "));
    }
    builder
        .body(Body::from(toast(message, success).into_string()))
        .map_err(|_| ServerError::InternalError)
}
