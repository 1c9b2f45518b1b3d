use crate::auth::SessionContext;
use crate::db::profiles::ProfileWithStats;
use crate::templates::desktop_layout;
use crate::templates::format::short_date;
use maud::{html, Markup};

pub struct AdminVm<'a> {
    pub session: &'a SessionContext,
    pub profiles: Vec<ProfileWithStats>,
    pub lead_count: usize,
    pub job_count: usize,
}

pub fn admin_page(vm: &AdminVm<'_>) -> Markup {
    desktop_layout(
        "Admin Dashboard",
        Some(vm.session),
        html! {
            main class="container" {
                h1 { "Admin Dashboard" }
                p class="muted" { (vm.lead_count) " leads · " (vm.job_count) " jobs · " (vm.profiles.len()) " profiles" }

                div class="card" {
                    h3 { "Profiles" }
                    div style="overflow-x: auto;" {
                        table class="admin-table" {
                            thead {
                                tr {
                                    th { "Email" }
                                    th { "Name" }
                                    th { "Role" }
                                    th { "Postcode" }
                                    th { "Credit" }
                                    th { "Leads bought" }
                                    th { "Last login" }
                                    th { "Grant credit" }
                                }
                            }
                            tbody {
                                @for p in &vm.profiles {
                                    tr {
                                        td {
                                            (p.email)
                                            @if p.is_admin { " " span class="badge" { "admin" } }
                                        }
                                        td { (p.name) }
                                        td { (p.role.as_str()) }
                                        td { (p.postcode.as_deref().unwrap_or("-")) }
                                        td id=(format!("credit-{}", p.id)) { (p.credit) }
                                        td { (p.purchases) }
                                        td {
                                            @match p.last_login_at {
                                                Some(ts) => (short_date(ts)),
                                                None => "Never",
                                            }
                                        }
                                        td {
                                            form
                                                method="post"
                                                action=(format!("/admin/profiles/{}/credit", p.id))
                                                hx-post=(format!("/admin/profiles/{}/credit", p.id))
                                                hx-target="#toasts"
                                                hx-swap="beforeend"
                                                class="inline"
                                            {
                                                input type="number" name="amount" min="1" value="50" required;
                                                button type="submit" { "Add" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
