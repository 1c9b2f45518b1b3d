use std::sync::Arc;

use crate::auth::magic::MagicLinkConfig;
use crate::cache::{QueryCache, JOBS_KEY, LEADS_KEY};
use crate::cms::{Blog, CmsConfig};
use crate::config::AppConfig;
use crate::db::jobs::{list_jobs, JobScope};
use crate::db::leads::fetch_leads_with_bids;
use crate::db::Database;
use crate::domain::{Job, LeadWithBids};
use crate::errors::ServerError;

/// Marketplace knobs the handlers need at request time.
#[derive(Debug, Clone)]
pub struct Settings {
    pub lead_cost: i64,
    pub magic_link: MagicLinkConfig,
    pub session_ttl_secs: i64,
}

impl Settings {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            lead_cost: cfg.lead_cost,
            magic_link: cfg.magic_link_config(),
            session_ttl_secs: cfg.session_ttl_secs(),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            lead_cost: 30,
            magic_link: MagicLinkConfig {
                signup_credit: 50,
                ..MagicLinkConfig::default()
            },
            session_ttl_secs: 3600,
        }
    }
}

/// Shared by every worker. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: Settings,
    pub leads: Arc<QueryCache<Vec<LeadWithBids>>>,
    pub jobs: Arc<QueryCache<Vec<Job>>>,
    pub blog: Arc<Blog>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings, cms: CmsConfig) -> Self {
        Self {
            db,
            settings,
            leads: Arc::new(QueryCache::new()),
            jobs: Arc::new(QueryCache::new()),
            blog: Arc::new(Blog::new(cms)),
        }
    }

    /// Every lead with its bids, served from cache until a mutation invalidates it.
    pub fn fetch_leads(&self) -> Result<Vec<LeadWithBids>, ServerError> {
        self.leads.get_or_fetch(LEADS_KEY, || {
            self.db.with_conn(|conn| fetch_leads_with_bids(conn))
        })
    }

    /// Jobs visible in `scope`, cached per scope.
    pub fn fetch_jobs(&self, scope: JobScope) -> Result<Vec<Job>, ServerError> {
        let key = match scope {
            JobScope::All => format!("{JOBS_KEY}:all"),
            JobScope::Trade(id) => format!("{JOBS_KEY}:trade:{id}"),
            JobScope::Customer(id) => format!("{JOBS_KEY}:customer:{id}"),
        };
        self.jobs
            .get_or_fetch(&key, || self.db.with_conn(|conn| list_jobs(conn, scope)))
    }

    /// Drop the cached lead list after a write to leads or bids.
    pub fn invalidate_leads(&self) {
        self.leads.invalidate(LEADS_KEY);
    }

    /// Drop every cached job list after a job is created or moved.
    pub fn invalidate_jobs(&self) {
        self.jobs.invalidate_prefix(JOBS_KEY);
    }
}
