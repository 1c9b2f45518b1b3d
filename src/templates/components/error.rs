use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Full error page, rendered without session chrome.
pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        None,
        html! {
            main class="container narrow" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to home" } }
            }
        },
    )
}
