use crate::domain::Badge;
use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn badge(badge: Badge) -> Markup {
    html! {
        span class=(format!("badge badge-{}", badge.as_str())) { (badge.as_str()) }
    }
}

/// A small "label: value" stat block.
pub fn stat(label: &str, value: impl maud::Render) -> Markup {
    html! {
        div class="stat" {
            span class="stat-label" { (label) }
            strong class="stat-value" { (value) }
        }
    }
}
