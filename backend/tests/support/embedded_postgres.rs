//! Throwaway PostgreSQL databases on the shared embedded cluster.
//!
//! Every database is migrated with the same embedded migrations the server
//! runs at startup, so the schema under test cannot drift.

use hostelops::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use tokio::runtime::Runtime;

/// A migrated database plus a small pool connected to it. The database is
/// dropped together with this value.
pub struct MigratedDatabase {
    pub pool: DbPool,
    pub database: TemporaryDatabase,
}

/// Creates a fresh database, applies migrations and opens a pool.
pub fn provision_migrated_database(runtime: &Runtime) -> Result<MigratedDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| err.to_string())?;
    let database_name = format!("test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(database_name.as_str())
        .map_err(|err| err.to_string())?;
    let database_url = database.url().to_string();

    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| format!("migrations: {err}"))?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(database_url).with_max_size(2)))
        .map_err(|err| format!("pool: {err}"))?;

    Ok(MigratedDatabase { pool, database })
}
