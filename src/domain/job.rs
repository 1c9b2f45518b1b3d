// src/domain/job.rs
use super::lead::Badge;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Todo,
    InProgress,
    Completed,
}

text_enum!(JobStatus, "job status", {
    Todo => "todo",
    InProgress => "in_progress",
    Completed => "completed",
});

impl JobStatus {
    pub fn label(self) -> &'static str {
        match self {
            JobStatus::Todo => "To Do",
            JobStatus::InProgress => "In Progress",
            JobStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

text_enum!(Priority, "priority", {
    High => "high",
    Medium => "medium",
    Low => "low",
});

impl Priority {
    /// A hot lead becomes a high priority job, and so on down.
    pub fn from_badge(badge: Badge) -> Self {
        match badge {
            Badge::Hot => Priority::High,
            Badge::Warm => Priority::Medium,
            Badge::Cold => Priority::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: i64,
    pub lead_id: i64,
    pub trade_id: i64,
    pub customer_id: Option<i64>,
    pub client_name: String,
    pub service: String,
    pub location: String,
    pub rate: Money,
    pub status: JobStatus,
    pub priority: Priority,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Job {
    /// "Kitchen Installation - Thompson"
    pub fn title(&self) -> String {
        match self.client_name.split_whitespace().last() {
            Some(surname) => format!("{} - {}", self.service, surname),
            None => self.service.clone(),
        }
    }
}
