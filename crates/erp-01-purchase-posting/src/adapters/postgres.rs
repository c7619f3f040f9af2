//! Postgres ledger adapter
//!
//! Calls the ledger posting function through a pooled connection. Each
//! `post` checks out a connection, runs the statement inside a transaction
//! and commits. Any early return drops the transaction, which rolls it back
//! and returns the connection to the pool.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, Row, TypeInfo};
use tracing::debug;

use crate::config::LedgerConnectionConfig;
use crate::domain::errors::LedgerError;
use crate::domain::request::PostingRequest;
use crate::domain::value_objects::{ScalarKind, ScalarReply, SqlValue};
use crate::ports::outbound::LedgerPostingService;

type PgQuery<'q> = sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>;

/// [`LedgerPostingService`] backed by a Postgres pool
#[derive(Clone, Debug)]
pub struct PgLedgerPostingService {
    pool: PgPool,
}

impl PgLedgerPostingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool_options(config: &LedgerConnectionConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
    }

    /// Open the pool and verify one connection
    pub async fn connect(config: &LedgerConnectionConfig) -> Result<Self, LedgerError> {
        let pool = Self::pool_options(config)
            .connect(&config.database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Build the pool without connecting; connections open on first use
    pub fn connect_lazy(config: &LedgerConnectionConfig) -> Result<Self, LedgerError> {
        let pool = Self::pool_options(config)
            .connect_lazy(&config.database_url)
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl LedgerPostingService for PgLedgerPostingService {
    async fn post(&self, request: &PostingRequest) -> Result<ScalarReply, LedgerError> {
        let statement = request.to_statement();
        debug!(params = statement.params.len(), "[erp-01] {}", statement.sql);

        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let query = statement
            .params
            .iter()
            .fold(sqlx::query(&statement.sql), |query, value| bind_value(query, value));

        let row = query.fetch_optional(&mut *tx).await.map_err(map_sqlx_error)?;
        let reply = row.as_ref().map_or(ScalarReply::Null, read_scalar);

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(reply)
    }
}

fn bind_value<'q>(query: PgQuery<'q>, value: &SqlValue) -> PgQuery<'q> {
    match value {
        SqlValue::Null(kind) => match kind {
            ScalarKind::Integer => query.bind(None::<i32>),
            ScalarKind::BigInt => query.bind(None::<i64>),
            ScalarKind::Text => query.bind(None::<String>),
            ScalarKind::Boolean => query.bind(None::<bool>),
            ScalarKind::Date => query.bind(None::<chrono::NaiveDate>),
            ScalarKind::Numeric => query.bind(None::<rust_decimal::Decimal>),
        },
        SqlValue::Integer(v) => query.bind(*v),
        SqlValue::BigInt(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.clone()),
        SqlValue::Boolean(v) => query.bind(*v),
        SqlValue::Date(v) => query.bind(*v),
        SqlValue::Numeric(v) => query.bind(*v),
    }
}

/// First column of the reply row, read as an integer or text
fn read_scalar(row: &PgRow) -> ScalarReply {
    if let Ok(v) = row.try_get::<Option<i64>, _>(0) {
        return v.map_or(ScalarReply::Null, ScalarReply::Integer);
    }
    if let Ok(v) = row.try_get::<Option<i32>, _>(0) {
        return v.map_or(ScalarReply::Null, |v| ScalarReply::Integer(i64::from(v)));
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(0) {
        return v.map_or(ScalarReply::Null, ScalarReply::Text);
    }
    let type_name = row
        .try_column(0)
        .map(|c| c.type_info().name().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    ScalarReply::Unsupported(type_name)
}

/// Database errors are the ledger's verdict; everything else is transport
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> LedgerError {
    match err {
        sqlx::Error::Database(db) => LedgerError::Rejected {
            code: db.code().map(|c| c.into_owned()),
            message: db.message().to_string(),
        },
        other => LedgerError::Unavailable(other.to_string()),
    }
}
