//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module is included with `mod support;` where needed.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::net::TcpListener;
use std::sync::OnceLock;

use actix_web::dev::ServerHandle;
use actix_web::web;
use backend::bootstrap::BoardBackend;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::MIGRATIONS;
use backend::server::{ServerConfig, create_server};
use board_client::BoardClient;
use diesel::{Connection, PgConnection};
use diesel_migrations::MigrationHarness;

/// Variable naming the database used by the Diesel suites.
pub const TEST_DATABASE_URL_ENV: &str = "BOARD_TEST_DATABASE_URL";

/// A board server bound to an ephemeral localhost port.
pub struct RunningBoard {
    pub client: BoardClient,
    handle: ServerHandle,
}

impl RunningBoard {
    /// Serve `backend` on `127.0.0.1:0` from the current actix runtime.
    pub fn start(backend: &BoardBackend) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener address");
        let server = create_server(
            web::Data::new(HealthState::new()),
            backend.http_state(),
            ServerConfig::from_listener(listener),
        )
        .expect("server starts");
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let client = BoardClient::new(&format!("http://{addr}")).expect("client builds");
        Self { client, handle }
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// Database URL for Diesel suites, or `None` to skip them.
pub fn test_database_url() -> Option<String> {
    let url = std::env::var(TEST_DATABASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty());
    if url.is_none() {
        eprintln!("SKIP-DIESEL: {TEST_DATABASE_URL_ENV} is not set");
    }
    url
}

/// Apply the embedded migrations once per test binary.
pub fn migrate_once(database_url: &str) {
    static MIGRATED: OnceLock<Result<usize, String>> = OnceLock::new();
    let outcome = MIGRATED.get_or_init(|| {
        let mut conn = PgConnection::establish(database_url).map_err(|err| err.to_string())?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|applied| applied.len())
            .map_err(|err| err.to_string())
    });
    if let Err(reason) = outcome {
        panic!("test database migration failed: {reason}");
    }
}
