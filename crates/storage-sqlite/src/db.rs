//! Connection pool, pragmas, migrations, and the transaction primitive.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{error, info};

use countrycache_core::errors::{DatabaseError, Error, Result};

use crate::errors::StorageError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Resolves the database path, ensures its directory exists, and applies
/// the durability pragmas once on a throwaway connection.
///
/// `DATABASE_URL` overrides the configured path when set.
pub fn init(db_path: &str) -> Result<String> {
    let db_path = std::env::var("DATABASE_URL").unwrap_or_else(|_| db_path.to_string());

    if let Some(dir) = Path::new(&db_path).parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        }
    }

    {
        let mut conn = SqliteConnection::establish(&db_path)
            .map_err(|e| Error::from(StorageError::from(e)))?;
        conn.batch_execute(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 30000;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::from(StorageError::from(e)))?;
    }

    Ok(db_path)
}

pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(8)
        .min_idle(Some(1)) // Keep at least one connection ready
        .connection_timeout(Duration::from_secs(30))
        .connection_customizer(Box::new(ConnectionCustomizer))
        .build(manager)
        .map_err(|e| DatabaseError::PoolCreationFailed(e.to_string()))?;
    Ok(Arc::new(pool))
}

/// Applies the embedded migrations. Failure is fatal at startup: the
/// process must not serve traffic against an unmigrated store.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    info!("running database migrations");
    let mut conn = get_connection(pool)?;

    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("database migration failed: {e}");
        Error::Database(DatabaseError::MigrationFailed(e.to_string()))
    })?;

    if applied.is_empty() {
        info!("no pending migrations to apply");
    } else {
        for version in &applied {
            info!("applied migration {version}");
        }
    }

    Ok(())
}

/// Gets a connection from the pool.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    pool.get().map_err(|e| Error::from(StorageError::from(e)))
}

/// Cheap existence probe used by auxiliary tooling and tests.
pub fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool> {
    use diesel::sql_types::Text;

    #[derive(QueryableByName)]
    struct TableName {
        #[allow(dead_code)]
        #[diesel(sql_type = Text)]
        name: String,
    }

    let rows: Vec<TableName> =
        diesel::sql_query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind::<Text, _>(table)
            .load(conn)
            .map_err(|e| Error::from(StorageError::from(e)))?;

    Ok(!rows.is_empty())
}

#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 30000;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(diesel::r2d2::Error::QueryError)?;

        Ok(())
    }
}

/// Trait for executing database transactions with all-or-nothing
/// semantics: any error inside rolls back every write made within.
pub trait DbTransactionExecutor {
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> std::result::Result<T, StorageError>;
}

impl DbTransactionExecutor for DbPool {
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> std::result::Result<T, StorageError>,
    {
        let mut conn = get_connection(self)?;
        conn.immediate_transaction(f).map_err(Error::from)
    }
}

impl DbTransactionExecutor for Arc<DbPool> {
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> std::result::Result<T, StorageError>,
    {
        (**self).execute(f)
    }
}
