// src/marketplace/jobs.rs
use rusqlite::Connection;
use tracing::info;

use crate::auth::SessionContext;
use crate::db::jobs::{get_job, update_job_status, JobScope};
use crate::domain::{Job, JobStatus, Role};
use crate::errors::ServerError;

/// Jobs grouped into the columns of the board.
#[derive(Debug, Clone, Default)]
pub struct JobBoard {
    pub todo: Vec<Job>,
    pub in_progress: Vec<Job>,
    pub completed: Vec<Job>,
}

impl JobBoard {
    pub fn from_jobs(jobs: Vec<Job>) -> Self {
        let mut board = Self::default();
        for job in jobs {
            match job.status {
                JobStatus::Todo => board.todo.push(job),
                JobStatus::InProgress => board.in_progress.push(job),
                JobStatus::Completed => board.completed.push(job),
            }
        }
        board
    }

    pub fn column(&self, status: JobStatus) -> &[Job] {
        match status {
            JobStatus::Todo => &self.todo,
            JobStatus::InProgress => &self.in_progress,
            JobStatus::Completed => &self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.completed.len()
    }
}

pub fn scope_for(session: &SessionContext) -> JobScope {
    if session.is_admin() {
        return JobScope::All;
    }
    match session.profile.role {
        Role::Trade => JobScope::Trade(session.profile_id()),
        Role::Customer => JobScope::Customer(session.profile_id()),
    }
}

/// Move a job to another column. Only the job's trade or an admin may.
pub fn move_job(
    conn: &Connection,
    session: &SessionContext,
    job_id: i64,
    status: JobStatus,
    now: i64,
) -> Result<Job, ServerError> {
    let job = get_job(conn, job_id)?.ok_or(ServerError::NotFound)?;
    if !session.is_admin() && job.trade_id != session.profile_id() {
        return Err(ServerError::Forbidden("Only the assigned trade can move this job.".into()));
    }

    if !update_job_status(conn, job_id, status, now)? {
        return Err(ServerError::NotFound);
    }
    info!(job_id, status = status.as_str(), "job moved");
    get_job(conn, job_id)?.ok_or(ServerError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::jobs::list_jobs;
    use crate::marketplace::{accept_bid, purchase_lead, submit_quote};
    use crate::tests::utils::{customer_session, memory_conn, seed_lead, trade_session};

    fn awarded_job() -> (Connection, SessionContext, SessionContext, Job) {
        let mut conn = memory_conn();
        let customer = customer_session(&conn, "c@x.com");
        let trade = trade_session(&conn, "t@x.com", "M1", 50);
        let lead_id = seed_lead(&conn, Some(customer.profile_id()), "M1", "3200");
        purchase_lead(&mut conn, &trade, lead_id, 30, 1).unwrap();
        let bid = submit_quote(&mut conn, &trade, lead_id, "3000", 2).unwrap();
        let job = accept_bid(&mut conn, &customer, bid, 3).unwrap();
        (conn, customer, trade, job)
    }

    fn job_board(conn: &Connection, session: &SessionContext) -> JobBoard {
        JobBoard::from_jobs(list_jobs(conn, scope_for(session)).unwrap())
    }

    #[test]
    fn board_groups_jobs_by_status() {
        let (conn, customer, trade, job) = awarded_job();

        let board = job_board(&conn, &trade);
        assert_eq!(board.todo.len(), 1);
        assert_eq!(board.total(), 1);

        move_job(&conn, &trade, job.id, JobStatus::InProgress, 4).unwrap();
        let board = job_board(&conn, &customer);
        assert!(board.todo.is_empty());
        assert_eq!(board.column(JobStatus::InProgress)[0].id, job.id);
    }

    #[test]
    fn customer_cannot_move_job() {
        let (conn, customer, _trade, job) = awarded_job();
        assert!(matches!(
            move_job(&conn, &customer, job.id, JobStatus::Completed, 4),
            Err(ServerError::Forbidden(_))
        ));
    }

    #[test]
    fn missing_job_is_not_found() {
        let (conn, _customer, trade, _job) = awarded_job();
        assert!(matches!(
            move_job(&conn, &trade, 42, JobStatus::Completed, 4),
            Err(ServerError::NotFound)
        ));
    }
}
