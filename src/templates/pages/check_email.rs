use maud::{html, Markup};

/// Partial swapped in place of the sign-in form once a link is issued.
pub fn check_email_content(email: &str, ttl_minutes: i64) -> Markup {
    html! {
        div class="check-email fade-in" {
            h3 { "Check your email" }
            p {
                "We sent a sign-in link to "
                strong { (email) }
                ". It works once and expires in " (ttl_minutes) " minutes."
            }
            a href="/login" { "Use a different email" }
        }
    }
}
