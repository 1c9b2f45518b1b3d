use crate::auth::SessionContext;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn profile_page(session: &SessionContext) -> Markup {
    let p = &session.profile;
    let text_field = |name: &str, label: &str, value: Option<&str>| {
        html! {
            label for=(name) { (label) }
            input type="text" id=(name) name=(name) value=[value];
        }
    };

    desktop_layout(
        "Profile",
        Some(session),
        html! {
            main class="container narrow" {
                h1 { "Your profile" }
                p class="muted" { (p.email) " · " (p.role.as_str()) }

                form
                    method="post"
                    action="/profile"
                    hx-post="/profile"
                    hx-target="#toasts"
                    hx-swap="beforeend"
                {
                    (text_field("first_name", "First name", Some(p.first_name.as_str())))
                    (text_field("last_name", "Last name", Some(p.last_name.as_str())))
                    (text_field("phone", "Phone", p.phone.as_deref()))
                    (text_field("postcode", "Postcode", p.postcode.as_deref()))
                    @if p.is_trade() {
                        (text_field("business_name", "Business name", p.business_name.as_deref()))
                        (text_field("trade_specialty", "Trade specialty", p.trade_specialty.as_deref()))
                        label for="profile_description" { "About your business" }
                        textarea id="profile_description" name="profile_description" rows="4" {
                            (p.profile_description.as_deref().unwrap_or(""))
                        }
                    }
                    button type="submit" class="primary" { "Save" }
                }
            }
        },
    )
}
