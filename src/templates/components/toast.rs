use maud::{html, Markup};

pub fn toast(message: &str, success: bool) -> Markup {
    let class = if success { "toast toast-success" } else { "toast toast-error" };
    html! {
        div class=(class) role="status" {
            (message)
        }
    }
}
