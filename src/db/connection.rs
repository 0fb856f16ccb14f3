use crate::db::schema::SQLITE_INIT;
use crate::error::HopeError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, Sqlite, Transaction};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use tracing::{debug, error, warn};

/// Opens one database connection per request. There is no pool: every
/// handler gets a fresh connection and gives it back before responding.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    options: SqliteConnectOptions,
}

impl ConnectionProvider {
    pub fn new(database_url: &str) -> Result<Self, HopeError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        Ok(Self { options })
    }

    /// Open a connection. Driver errors are logged here and reported as
    /// `ConnectionFailed`.
    pub async fn acquire(&self) -> Result<DbConnection, HopeError> {
        match self.options.connect().await {
            Ok(conn) => {
                debug!("database connection opened");
                Ok(DbConnection { conn })
            }
            Err(e) => {
                error!(error = %e, "failed to open database connection");
                Err(HopeError::ConnectionFailed(e))
            }
        }
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), HopeError> {
        let mut conn = self.acquire().await?;
        let result = apply_schema(&mut conn).await;
        conn.release().await;
        result
    }
}

async fn apply_schema(conn: &mut SqliteConnection) -> Result<(), HopeError> {
    // sqlx::query runs a single statement, so split the bundle
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Owning handle over a request's connection.
///
/// `release` closes it gracefully; an early return drops it instead, which
/// also closes the underlying connection. Either way it happens once.
#[derive(Debug)]
pub struct DbConnection {
    conn: SqliteConnection,
}

impl DbConnection {
    pub async fn release(self) {
        if let Err(e) = self.conn.close().await {
            warn!(error = %e, "error while closing database connection");
        } else {
            debug!("database connection released");
        }
    }
}

impl Deref for DbConnection {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for DbConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

/// Commit on success, explicit rollback on failure. The original error is
/// what the caller sees even if the rollback itself fails.
pub async fn finish<T>(
    tx: Transaction<'_, Sqlite>,
    outcome: Result<T, HopeError>,
) -> Result<T, HopeError> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "transaction rollback failed");
            } else {
                debug!(error = %err, "transaction rolled back");
            }
            Err(err)
        }
    }
}
