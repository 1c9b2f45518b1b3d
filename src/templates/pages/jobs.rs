use crate::auth::SessionContext;
use crate::domain::{Job, JobStatus};
use crate::marketplace::JobBoard;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub const JOBS_CHANGED: &str = "jobs-changed";

fn job_card(job: &Job, can_move: bool) -> Markup {
    html! {
        article class=(format!("job-card priority-{}", job.priority.as_str())) {
            h4 { (job.title()) }
            p class="muted" { (job.location) }
            p { "Rate: " strong { (job.rate) } }
            span class="priority" { (job.priority.as_str()) " priority" }

            @if can_move {
                form
                    method="post"
                    action=(format!("/jobs/{}/status", job.id))
                    hx-post=(format!("/jobs/{}/status", job.id))
                    hx-target="#toasts"
                    hx-swap="beforeend"
                    hx-trigger="change"
                {
                    label class="sr-only" for=(format!("status-{}", job.id)) { "Status" }
                    select id=(format!("status-{}", job.id)) name="status" {
                        @for status in JobStatus::ALL {
                            option value=(status.as_str()) selected[*status == job.status] { (status.label()) }
                        }
                    }
                    noscript { button type="submit" { "Move" } }
                }
            }
        }
    }
}

pub fn job_board_section(board: &JobBoard, session: &SessionContext) -> Markup {
    html! {
        section
            id="job-board"
            class="job-board"
            hx-get="/jobs/board"
            hx-trigger=(format!("{JOBS_CHANGED} from:body"))
            hx-swap="outerHTML"
        {
            @for status in JobStatus::ALL {
                div class="job-column" {
                    h3 { (status.label()) " (" (board.column(*status).len()) ")" }
                    @for job in board.column(*status) {
                        (job_card(job, session.is_admin() || job.trade_id == session.profile_id()))
                    }
                }
            }
        }
    }
}

pub fn jobs_page(board: &JobBoard, session: &SessionContext) -> Markup {
    desktop_layout(
        "Jobs",
        Some(session),
        html! {
            main class="container" {
                h1 { "Jobs" }
                @if board.total() == 0 {
                    p class="muted" { "Jobs appear here once a quote is accepted." }
                }
                (job_board_section(board, session))
            }
        },
    )
}
