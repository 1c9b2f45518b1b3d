use crate::auth::SessionContext;
use crate::domain::Role;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; background: #f9fafb; }
header { display: flex; align-items: center; justify-content: space-between; padding: .75rem 1.5rem; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
a { color: #2563eb; text-decoration: none; }
.brand h3 { margin: 0; color: #111827; }
.container { max-width: 1100px; margin: 2rem auto; padding: 0 1rem; }
.container.narrow { max-width: 680px; }
.card { background: #fff; border-radius: 8px; padding: 1rem 1.25rem; margin-bottom: 1rem; box-shadow: 0 1px 2px rgba(0,0,0,.06); }
.grid-2 { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.muted { color: #6b7280; }
.inline { display: inline-flex; gap: .75rem; align-items: center; }
.badge { display: inline-block; padding: 0 .5rem; border-radius: 999px; background: #e5e7eb; font-size: .8rem; }
.badge.hot { background: #fee2e2; } .badge.warm { background: #fef3c7; } .badge.cold { background: #dbeafe; }
.credit-pill { background: #ecfdf5; color: #065f46; padding: .25rem .75rem; border-radius: 999px; }
button { cursor: pointer; padding: .4rem .9rem; border-radius: 6px; border: 1px solid #2563eb; background: #2563eb; color: #fff; }
button.link { background: none; border: none; color: #2563eb; padding: 0; }
button:disabled { opacity: .5; cursor: not-allowed; }
input, select, textarea { padding: .4rem; border: 1px solid #d1d5db; border-radius: 6px; width: 100%; box-sizing: border-box; }
.toasts { position: fixed; top: 1rem; right: 1rem; display: flex; flex-direction: column; gap: .5rem; z-index: 10; }
.toast { padding: .6rem 1rem; border-radius: 6px; color: #fff; background: #059669; }
.toast-error { background: #dc2626; }
.admin-table { width: 100%; border-collapse: collapse; }
.admin-table td, .admin-table th { padding: .4rem; border-bottom: 1px solid #e5e7eb; text-align: left; }
"#;

pub fn desktop_layout(title: &str, session: Option<&SessionContext>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Trade Pilot" }
                script src=(HTMX_SRC) defer {};
                style { (PreEscaped(STYLES)) }
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    a href="/" class="brand" { h3 { "Trade Pilot" } }
                    nav {
                        ul {
                            li { a href="/blog" { "Blog" } }
                            @if let Some(session) = session {
                                @match session.profile.role {
                                    Role::Trade => li { a href="/trades-crm" { "Leads" } },
                                    Role::Customer => li { a href="/dashboard" { "My leads" } },
                                }
                                li { a href="/jobs" { "Jobs" } }
                                li { a href="/profile" { "Profile" } }
                                @if session.is_admin() {
                                    li { a href="/admin" { "Admin" } }
                                }
                            }
                        }
                    }

                    @if let Some(session) = session {
                        div class="inline" {
                            @if session.profile.is_trade() {
                                span class="credit-pill" id="credit-pill" { (session.profile.credit) " credits" }
                            }
                            form method="post" action="/logout" class="inline" {
                                button type="submit" class="link" { "Sign out" }
                            }
                        }
                    } @else {
                        a href="/login" class="text-base font-medium hover:text-blue-600" { "Login" }
                    }
                }
                div id="toasts" class="toasts" aria-live="polite" {}
                (content)
            }
        }
    }
}
