use crate::auth::SessionContext;
use crate::db::connection::{init_db, Database};
use crate::db::leads::insert_lead;
use crate::db::profiles::{get_or_create_profile, get_profile, set_admin};
use crate::domain::{NewLead, Role};
use crate::state::{AppState, Settings};
use rusqlite::{params, Connection};
use std::io::Read;
use tempfile::TempDir;

/// Fresh in-memory database with the production schema applied.
pub fn memory_conn() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch(include_str!("../../sql/schema.sql"))
        .expect("apply schema");
    conn
}

fn session_for(conn: &Connection, id: i64) -> SessionContext {
    SessionContext::new(get_profile(conn, id).unwrap().unwrap())
}

pub fn trade_session(conn: &Connection, email: &str, postcode: &str, credit: i64) -> SessionContext {
    let id = get_or_create_profile(conn, email, Role::Trade, credit, 1).unwrap();
    conn.execute(
        "update profiles set postcode = ?, first_name = 'Tom', last_name = 'Trade', business_name = 'Trade Co' where id = ?",
        params![postcode, id],
    )
    .unwrap();
    session_for(conn, id)
}

pub fn customer_session(conn: &Connection, email: &str) -> SessionContext {
    let id = get_or_create_profile(conn, email, Role::Customer, 0, 1).unwrap();
    session_for(conn, id)
}

pub fn admin_session(conn: &Connection, email: &str) -> SessionContext {
    let id = get_or_create_profile(conn, email, Role::Customer, 0, 1).unwrap();
    set_admin(conn, id, true).unwrap();
    session_for(conn, id)
}

pub fn seed_lead(conn: &Connection, customer_id: Option<i64>, location: &str, value: &str) -> i64 {
    let lead = NewLead {
        name: "Sarah Johnson".into(),
        service: "Bathroom Renovation".into(),
        location: location.into(),
        value: value.into(),
        phone: "07123456789".into(),
        email: "sarah@example.com".into(),
        badge: "warm".into(),
    }
    .validate()
    .unwrap();
    insert_lead(conn, customer_id, &lead, 1).unwrap()
}

/// App state over a temporary database file. The CMS points at a closed
/// port so blog pages exercise the empty fallback.
pub struct TestApp {
    pub state: AppState,
    _dir: TempDir,
}

pub fn test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite3");
    let db = Database::new(path.to_string_lossy().to_string());
    init_db(&db, "sql/schema.sql").unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    let state = AppState::new(db, Settings::for_tests(), crate::cms::CmsConfig::unreachable());
    TestApp { state, _dir: dir }
}

impl TestApp {
    pub fn conn<T>(&self, f: impl FnOnce(&mut Connection) -> T) -> T {
        self.state
            .db
            .with_conn(|conn| Ok(f(conn)))
            .expect("db access")
    }
}

pub fn body_string(resp: astra::Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}
