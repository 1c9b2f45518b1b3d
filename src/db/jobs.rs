// src/db/jobs.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{Job, JobStatus, Money, Priority};
use crate::errors::ServerError;

const JOB_COLUMNS: &str = "id, lead_id, trade_id, customer_id, client_name, service, location, \
     rate, status, priority, created_at, updated_at";

fn job_from_row(row: &Row<'_>) -> rusqlite::Result<Job> {
    Ok(Job {
        id: row.get(0)?,
        lead_id: row.get(1)?,
        trade_id: row.get(2)?,
        customer_id: row.get(3)?,
        client_name: row.get(4)?,
        service: row.get(5)?,
        location: row.get(6)?,
        rate: row.get(7)?,
        status: row.get(8)?,
        priority: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

pub struct NewJob<'a> {
    pub lead_id: i64,
    pub trade_id: i64,
    pub customer_id: Option<i64>,
    pub client_name: &'a str,
    pub service: &'a str,
    pub location: &'a str,
    pub rate: Money,
    pub priority: Priority,
}

pub fn insert_job(conn: &Connection, job: &NewJob<'_>, now: i64) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into jobs (lead_id, trade_id, customer_id, client_name, service, location,
                          rate, status, priority, created_at, updated_at)
        values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            job.lead_id,
            job.trade_id,
            job.customer_id,
            job.client_name,
            job.service,
            job.location,
            job.rate,
            JobStatus::Todo,
            job.priority,
            now,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert job failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_job(conn: &Connection, job_id: i64) -> Result<Option<Job>, ServerError> {
    conn.query_row(
        &format!("select {JOB_COLUMNS} from jobs where id = ?"),
        params![job_id],
        job_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select job failed: {e}")))
}

pub fn get_job_by_lead(conn: &Connection, lead_id: i64) -> Result<Option<Job>, ServerError> {
    conn.query_row(
        &format!("select {JOB_COLUMNS} from jobs where lead_id = ?"),
        params![lead_id],
        job_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select job by lead failed: {e}")))
}

/// Which jobs a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobScope {
    All,
    Trade(i64),
    Customer(i64),
}

pub fn list_jobs(conn: &Connection, scope: JobScope) -> Result<Vec<Job>, ServerError> {
    let (filter, id) = match scope {
        JobScope::All => ("", None),
        JobScope::Trade(id) => ("where trade_id = ?", Some(id)),
        JobScope::Customer(id) => ("where customer_id = ?", Some(id)),
    };

    let mut stmt = conn
        .prepare(&format!(
            "select {JOB_COLUMNS} from jobs {filter} order by updated_at desc, id desc"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = match id {
        Some(id) => stmt.query_map(params![id], job_from_row),
        None => stmt.query_map([], job_from_row),
    }
    .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut jobs = Vec::new();
    for r in rows {
        jobs.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(jobs)
}

pub fn update_job_status(
    conn: &Connection,
    job_id: i64,
    status: JobStatus,
    now: i64,
) -> Result<bool, ServerError> {
    let updated = conn
        .execute(
            "update jobs set status = ?, updated_at = ? where id = ?",
            params![status, now, job_id],
        )
        .map_err(|e| ServerError::DbError(format!("update job status failed: {e}")))?;
    Ok(updated == 1)
}
