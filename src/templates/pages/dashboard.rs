use crate::auth::SessionContext;
use crate::domain::LeadWithBids;
use crate::templates::components::{card, customer_leads_section, lead_form};
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Customer dashboard: post a lead, review quotes, accept one.
pub fn dashboard_page(session: &SessionContext, leads: &[LeadWithBids]) -> Markup {
    let open = leads.iter().filter(|l| !l.lead.is_approved).count();
    desktop_layout(
        "Dashboard",
        Some(session),
        html! {
            main class="container" {
                h1 { "Dashboard" }
                p { "Signed in as " strong { (session.profile.email) } }
                p class="muted" { (open) " open lead(s), " (leads.len() - open) " awarded." }

                div class="grid-2" {
                    (card("Post a new lead", lead_form()))
                    (customer_leads_section(leads))
                }
            }
        },
    )
}
