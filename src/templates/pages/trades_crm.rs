use crate::auth::SessionContext;
use crate::db::credits::CreditTransaction;
use crate::marketplace::TradeLeadBoard;
use crate::templates::components::{card, credit_ledger, trade_leads_section};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct TradesCrmVm<'a> {
    pub session: &'a SessionContext,
    pub board: TradeLeadBoard,
    pub lead_cost: i64,
    pub ledger: Vec<CreditTransaction>,
}

impl TradesCrmVm<'_> {
    pub fn leads_section(&self) -> Markup {
        let profile = &self.session.profile;
        trade_leads_section(
            &self.board,
            profile.id,
            profile.credit,
            self.lead_cost,
            profile.postcode.as_deref().is_some_and(|p| !p.trim().is_empty()),
        )
    }
}

pub fn trades_crm_page(vm: &TradesCrmVm<'_>) -> Markup {
    let profile = &vm.session.profile;
    desktop_layout(
        "Trades CRM",
        Some(vm.session),
        html! {
            main class="container" {
                h1 { "Welcome back, " (profile.display_name()) }
                @if let Some(specialty) = &profile.trade_specialty {
                    p class="muted" { (specialty) }
                }

                (vm.leads_section())

                (card("Credit history", credit_ledger(&vm.ledger)))
            }
        },
    )
}
