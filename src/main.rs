use crate::config::{init_console_subscriber, AppConfig};
use crate::db::connection::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::handle;
use crate::state::{AppState, Settings};
use astra::Server;
use clap::Parser;
use tracing::{error, info};

mod auth;
mod cache;
mod cms;
mod config;
mod db;
mod domain;
mod errors;
mod marketplace;
mod responses;
mod router;
mod state;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    init_console_subscriber();
    let cfg = AppConfig::parse();

    let db = Database::new(cfg.database_path.clone());
    if let Err(e) = init_db(&db, &cfg.schema_path) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let state = AppState::new(db, Settings::from_config(&cfg), cfg.cms_config());
    info!(
        config = %serde_json::to_string(&cfg).unwrap_or_default(),
        "starting server at http://{}",
        cfg.listen_addr
    );

    let server = Server::bind(&cfg.listen_addr).max_workers(cfg.max_workers);
    let result = server.serve(move |req, _info| {
        handle(req, &state).unwrap_or_else(error_to_response)
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }
    info!("server shut down");
}
