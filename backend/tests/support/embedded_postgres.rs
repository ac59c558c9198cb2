//! Embedded PostgreSQL databases for the Diesel repository suites.
//!
//! Each test binary shares one cluster. Every test gets its own temporary
//! database with the embedded migrations applied, so rows never leak between
//! tests running in parallel.

use std::time::Duration;

use bloodbank::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A migrated temporary database plus the runtime that drives its pool.
pub struct MigratedDatabase {
    /// Runtime reused for every async repository call in one test.
    pub runtime: Runtime,
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    for attempt in 1..=SHARED_CLUSTER_RETRIES {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt == SHARED_CLUSTER_RETRIES => {
                return Err(format!("shared cluster: {error:?}"));
            }
            Err(_) => std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY),
        }
    }
    Err("shared cluster: no bootstrap attempted".to_owned())
}

/// Creates a fresh database on the shared cluster and applies migrations.
pub fn migrated_database() -> Result<MigratedDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database_name = format!("test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(database_name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    let database_url = database.url().to_string();

    runtime
        .block_on(run_pending_migrations(database_url.clone()))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(MigratedDatabase {
        runtime,
        pool,
        _database: database,
    })
}

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skips with a marker when `SKIP_TEST_CLUSTER` is set, panics otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
