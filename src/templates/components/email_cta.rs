use crate::domain::Role;
use maud::{html, Markup};

pub fn email_cta_form(selected: Role) -> Markup {
    html! {
        div class="email-cta-wrapper" {
            form
                method="post"
                action="/auth/request-link"
                hx-post="/auth/request-link"
                hx-target="#auth-result"
                hx-swap="innerHTML"
                hx-disabled-elt="button"
                class="email-cta"
            {
                fieldset class="role-tabs" {
                    legend class="sr-only" { "I am a" }
                    @for role in Role::ALL {
                        label {
                            input type="radio" name="role" value=(role.as_str()) checked[*role == selected];
                            @match role {
                                Role::Customer => " Homeowner",
                                Role::Trade => " Tradesperson",
                            }
                        }
                    }
                }

                label class="sr-only" for="email" { "Email address" }
                input
                    type="email"
                    id="email"
                    name="email"
                    placeholder="you@domain.com"
                    autocomplete="email"
                    required;

                button type="submit" class="primary" {
                    span class="btn-text" { "Send sign-in link" }
                    span class="spinner" aria-hidden="true" {}
                }

                p class="microcopy" {
                    "We’ll email you a secure sign-in link. No password needed."
                }
            }

            div id="auth-result" {}
        }
    }
}
