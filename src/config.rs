use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use time::macros::format_description;
use tracing_subscriber::{
    fmt::{format::FmtSpan, time::UtcTime},
    EnvFilter,
};

use crate::auth::magic::MagicLinkConfig;
use crate::cms::CmsConfig;

#[derive(Parser, Debug, Clone, Serialize)]
#[command(author, version, about = "TradePilot marketplace server", long_about = None)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:3000")]
    pub listen_addr: SocketAddr,

    /// SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = "tradepilot.sqlite3")]
    pub database_path: String,

    /// Schema applied at start-up
    #[arg(long, env = "SCHEMA_PATH", default_value = "sql/schema.sql")]
    pub schema_path: String,

    /// Worker threads serving requests
    #[arg(long, env = "MAX_WORKERS", default_value_t = 8)]
    pub max_workers: usize,

    /// Base URL of the headless CMS
    #[arg(long, env = "CMS_API_URL", default_value = "https://cms.example.com")]
    pub cms_api_url: String,

    /// Bearer token for the CMS
    #[arg(long, env = "CMS_API_TOKEN")]
    #[serde(skip_serializing)]
    pub cms_api_token: Option<String>,

    /// Site filter applied to article listings
    #[arg(long, env = "CMS_SITE", default_value = "tradepilot")]
    pub cms_site: String,

    #[arg(long, env = "CMS_PAGE_SIZE", default_value_t = 100)]
    pub cms_page_size: u32,

    #[arg(long, env = "CMS_TIMEOUT_SECS", default_value_t = 10)]
    pub cms_timeout_secs: u64,

    /// How long a successful CMS response is served from cache
    #[arg(long, env = "CMS_CACHE_SECS", default_value_t = 300)]
    pub cms_cache_secs: u64,

    /// Credits charged per lead purchase
    #[arg(long, env = "LEAD_COST", default_value_t = 30)]
    pub lead_cost: i64,

    /// Credits a new profile starts with
    #[arg(long, env = "SIGNUP_CREDIT", default_value_t = 0)]
    pub signup_credit: i64,

    #[arg(long, env = "MAGIC_LINK_TTL_SECS", default_value_t = 900)]
    pub magic_link_ttl_secs: i64,

    #[arg(long, env = "SESSION_TTL_DAYS", default_value_t = 7)]
    pub session_ttl_days: i64,
}

impl AppConfig {
    pub fn magic_link_config(&self) -> MagicLinkConfig {
        MagicLinkConfig {
            ttl_secs: self.magic_link_ttl_secs,
            signup_credit: self.signup_credit,
        }
    }

    pub fn cms_config(&self) -> CmsConfig {
        CmsConfig {
            base_url: self.cms_api_url.trim_end_matches('/').to_string(),
            token: self.cms_api_token.clone().filter(|t| !t.trim().is_empty()),
            site: self.cms_site.clone(),
            page_size: self.cms_page_size,
            timeout: Duration::from_secs(self.cms_timeout_secs),
            cache_ttl: Duration::from_secs(self.cms_cache_secs),
        }
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_days * 24 * 60 * 60
    }
}

pub fn init_console_subscriber() {
    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day]T[hour repr:24]:[minute]:[second].[subsecond digits:3]Z"
    ));
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(timer)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_level(true)
        .with_ansi(true)
        .with_writer(std::io::stdout)
        .init();
}
