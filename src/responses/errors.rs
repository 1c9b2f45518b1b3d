use crate::errors::ServerError;
use crate::responses::html::toast_response;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};
use tracing::{error, info};

fn log_error(err: &ServerError) {
    if err.is_rejection() {
        info!(status = err.status(), error = %err, "request rejected");
    } else {
        error!(status = err.status(), error = %err, "request failed");
    }
}

/// Convert a ServerError into a full HTML error page.
pub fn error_to_response(err: ServerError) -> Response {
    log_error(&err);
    let status = err.status();
    let html = error_page(status, &err.user_message()).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(html))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

/// Mutation failures surface as a single error toast.
pub fn toast_error_response(err: ServerError) -> Response {
    log_error(&err);
    toast_response(&err.user_message(), false, &[])
        .unwrap_or_else(|_| Response::new(Body::from(err.user_message())))
}
