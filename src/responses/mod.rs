pub mod errors;
pub mod html;

pub use crate::errors::ResultResp;
pub use errors::{error_to_response, toast_error_response};
pub use html::{html_response, redirect, redirect_with_cookie, toast_response};
