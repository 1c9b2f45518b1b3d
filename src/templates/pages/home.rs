// templates/pages/home.rs

use crate::auth::SessionContext;
use crate::templates::{components::card, desktop_layout};
use maud::{html, Markup};

pub fn home_page(session: Option<&SessionContext>) -> Markup {
    desktop_layout(
        "Home",
        session,
        html! {
            main class="container" {
                section class="hero" {
                    h1 { "Find trusted tradespeople. Win local work." }
                    p class="lead" {
                        "Homeowners post jobs for free. Local trades buy the leads that suit them and send a quote."
                    }
                    @match session {
                        Some(s) => a class="button primary" href=(s.profile.role.home_path()) { "Go to your dashboard" },
                        None => a class="button primary" href="/login" { "Get started" },
                    }
                }

                div class="grid-2" {
                    (card("For homeowners", html! {
                        p { "Describe the job, set a budget and compare quotes from local trades." }
                    }))
                    (card("For tradespeople", html! {
                        p { "Buy leads in your postcode with credits, then quote and track the work." }
                    }))
                }

                p { a href="/blog" { "Read advice from the Trade Pilot blog →" } }
            }
        },
    )
}
