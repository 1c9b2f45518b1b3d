use crate::db::credits::CreditTransaction;
use crate::domain::{Badge, BidStatus, LeadWithBids};
use crate::marketplace::{TradeLead, TradeLeadBoard};
use crate::templates::components::{badge, stat};
use crate::templates::format::short_date;
use maud::{html, Markup};

pub const LEADS_CHANGED: &str = "leads-changed";

fn bid_status_label(status: BidStatus) -> &'static str {
    match status {
        BidStatus::Pending => "Awaiting decision",
        BidStatus::Accepted => "Accepted",
        BidStatus::Rejected => "Not selected",
    }
}

fn lead_summary(lead: &LeadWithBids) -> Markup {
    let l = &lead.lead;
    html! {
        div class="lead-summary" {
            div class="lead-heading" {
                h4 { (l.service) }
                (badge(l.badge))
            }
            p class="muted" { (l.location) " · posted " (short_date(l.created_at)) }
            p { "Budget: " strong { (l.value) } }
        }
    }
}

fn available_lead_card(item: &TradeLead, cost: i64) -> Markup {
    let id = item.lead.lead.id;
    html! {
        article class="lead-card" id=(format!("lead-{id}")) {
            (lead_summary(&item.lead))
            form
                method="post"
                action=(format!("/leads/{id}/purchase"))
                hx-post=(format!("/leads/{id}/purchase"))
                hx-target="#toasts"
                hx-swap="beforeend"
                hx-disabled-elt="button"
            {
                @if item.eligible {
                    button type="submit" class="primary" { "Buy lead (" (cost) " credits)" }
                } @else {
                    button type="submit" disabled { "Not enough credits" }
                }
            }
        }
    }
}

fn purchased_lead_card(item: &TradeLead, profile_id: i64) -> Markup {
    let l = &item.lead.lead;
    let my_bid = item.my_bid(profile_id);
    let can_quote = !l.is_approved
        && my_bid.map_or(true, |b| b.bid.status == BidStatus::Pending);

    html! {
        article class="lead-card purchased" id=(format!("lead-{}", l.id)) {
            (lead_summary(&item.lead))
            dl class="contact" {
                dt { "Client" } dd { (l.name) }
                dt { "Phone" } dd { a href=(format!("tel:{}", l.phone)) { (l.phone) } }
                dt { "Email" } dd { a href=(format!("mailto:{}", l.email)) { (l.email) } }
            }

            @if let Some(bid) = my_bid {
                p class="my-quote" {
                    "Your quote: " strong { (bid.bid.proposed_value) }
                    " · " (bid_status_label(bid.bid.status))
                }
            } @else if l.is_approved {
                p class="muted" { "This lead has been awarded to another trade." }
            }

            @if can_quote {
                form
                    class="quote-form"
                    method="post"
                    action=(format!("/leads/{}/quote", l.id))
                    hx-post=(format!("/leads/{}/quote", l.id))
                    hx-target="#toasts"
                    hx-swap="beforeend"
                    hx-disabled-elt="button"
                {
                    label for=(format!("quote-{}", l.id)) { "Your quote (£)" }
                    input
                        type="text"
                        inputmode="decimal"
                        id=(format!("quote-{}", l.id))
                        name="value"
                        placeholder="e.g. 4,500"
                        value=[my_bid.map(|b| b.bid.proposed_value.to_string())]
                        required;
                    button type="submit" class="primary" {
                        @if my_bid.is_some() { "Update quote" } @else { "Send quote" }
                    }
                }
            }
        }
    }
}

/// The refreshable half of the trade CRM: credit, leads to buy, owned leads.
pub fn trade_leads_section(
    board: &TradeLeadBoard,
    profile_id: i64,
    credit: i64,
    cost: i64,
    has_postcode: bool,
) -> Markup {
    html! {
        section
            id="trade-leads"
            hx-get="/trades-crm/leads"
            hx-trigger=(format!("{LEADS_CHANGED} from:body"))
            hx-swap="outerHTML"
        {
            div class="stats" {
                (stat("Credit", credit))
                (stat("Lead cost", cost))
                (stat("Purchased", board.purchased.len()))
            }

            h2 { "Leads in your area" }
            @if !has_postcode {
                p class="muted" { "Add your postcode to your " a href="/profile" { "profile" } " to see local leads." }
            } @else if board.available.is_empty() {
                p class="muted" { "No new leads in your postcode right now." }
            } @else {
                div class="lead-grid" {
                    @for item in &board.available {
                        (available_lead_card(item, cost))
                    }
                }
            }

            h2 { "Your purchased leads" }
            @if board.purchased.is_empty() {
                p class="muted" { "Leads you buy appear here with the client's contact details." }
            } @else {
                div class="lead-grid" {
                    @for item in &board.purchased {
                        (purchased_lead_card(item, profile_id))
                    }
                }
            }
        }
    }
}

pub fn credit_ledger(transactions: &[CreditTransaction]) -> Markup {
    html! {
        @if transactions.is_empty() {
            p class="muted" { "No credit activity yet." }
        } @else {
            table class="ledger" {
                thead { tr { th { "Date" } th { "Change" } th { "Reason" } th { "Lead" } } }
                tbody {
                    @for t in transactions {
                        tr {
                            td { (short_date(t.created_at)) }
                            td class=(if t.delta < 0 { "neg" } else { "pos" }) {
                                @if t.delta > 0 { "+" } (t.delta)
                            }
                            td { (t.reason) }
                            td { @if let Some(id) = t.lead_id { "#" (id) } }
                        }
                    }
                }
            }
        }
    }
}

fn customer_lead_card(lead: &LeadWithBids) -> Markup {
    let l = &lead.lead;
    html! {
        article class="lead-card" id=(format!("lead-{}", l.id)) {
            (lead_summary(lead))
            @if l.is_approved {
                p class="approved" {
                    "Approved"
                    @if let Some(value) = l.proposed_value { " at " strong { (value) } }
                }
            }

            @if lead.bids.is_empty() {
                p class="muted" { "No quotes yet." }
            } @else {
                @if !l.is_approved {
                    p class="muted" { (lead.pending_bids().count()) " quote(s) awaiting your decision" }
                }
                ul class="bids" {
                    @for b in &lead.bids {
                        li class=(format!("bid bid-{}", b.bid.status.as_str())) {
                            span class="bidder" {
                                (b.bidder.display_name())
                                @if let Some(specialty) = &b.bidder.trade_specialty {
                                    span class="muted" { " · " (specialty) }
                                }
                            }
                            strong { (b.bid.proposed_value) }
                            @if !l.is_approved && b.bid.status == BidStatus::Pending {
                                form
                                    method="post"
                                    action=(format!("/bids/{}/accept", b.bid.id))
                                    hx-post=(format!("/bids/{}/accept", b.bid.id))
                                    hx-target="#toasts"
                                    hx-swap="beforeend"
                                    hx-confirm="Accept this quote? Other quotes will be declined."
                                {
                                    button type="submit" class="primary" { "Accept" }
                                }
                            } @else {
                                span class="muted" { (bid_status_label(b.bid.status)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn customer_leads_section(leads: &[LeadWithBids]) -> Markup {
    html! {
        section
            id="customer-leads"
            hx-get="/dashboard/leads"
            hx-trigger=(format!("{LEADS_CHANGED} from:body"))
            hx-swap="outerHTML"
        {
            h2 { "Your leads" }
            @if leads.is_empty() {
                p class="muted" { "You haven't posted any leads yet." }
            } @else {
                div class="lead-grid" {
                    @for lead in leads {
                        (customer_lead_card(lead))
                    }
                }
            }
        }
    }
}

pub fn lead_form() -> Markup {
    let fields = [
        ("name", "Your name", "text"),
        ("service", "Service needed", "text"),
        ("location", "Postcode", "text"),
        ("value", "Budget", "text"),
        ("phone", "Phone", "tel"),
        ("email", "Email", "email"),
    ];
    html! {
        form
            class="lead-form"
            method="post"
            action="/leads"
            hx-post="/leads"
            hx-target="#toasts"
            hx-swap="beforeend"
        {
            @for (name, label, kind) in fields {
                label for=(format!("lead-{name}")) { (label) }
                input type=(kind) id=(format!("lead-{name}")) name=(name) required;
            }
            label for="lead-badge" { "Urgency" }
            select id="lead-badge" name="badge" {
                @for b in Badge::ALL {
                    option value=(b.as_str()) selected[*b == Badge::default()] { (b.as_str()) }
                }
            }
            button type="submit" class="primary" { "Post lead" }
        }
    }
}
