//! Postgres repository implementation using Diesel.
//!
//! Practitioners live in a single `practitioners` table. Listing predicates
//! become `WHERE` clauses on a boxed query, the sort key becomes `ORDER BY`
//! and the window becomes `OFFSET`/`LIMIT`. The unique index on `slug`
//! surfaces duplicate inserts as conflicts.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Per-statement and per-call timeouts
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_QUERY_TIMEOUT_SEC`: Upper bound for one store call (default: 10)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::db::repository::{
    ErrorContext, PractitionerRepository, RepositoryError, RepositoryResult,
};
use crate::models::{AvailabilityChannel, NewPractitioner, Practitioner};
use crate::query::{Predicate, PractitionerFilter, PractitionerQuery, SortField, SortOrder};

mod models;
mod schema;

use models::{NewPractitionerRow, PractitionerRow};
use schema::practitioners;

type PgPool = Pool<ConnectionManager<PgConnection>>;
type BoxedPractitioners<'a> = practitioners::BoxedQuery<'a, Pg>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of idle connections kept in the pool
    pub min_pool_size: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout_sec: u64,
    pub idle_timeout_sec: u64,
    /// Upper bound for one store call, also applied as `statement_timeout`
    pub query_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            query_timeout_sec: 10,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables (see module docs).
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            query_timeout_sec: env_or("PG_QUERY_TIMEOUT_SEC", defaults.query_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    pub connections_in_use: u32,
    pub idle_connections: u32,
    pub total_connections: u32,
    pub max_size: u32,
    pub total_queries: u64,
    pub failed_queries: u64,
    pub retried_operations: u64,
}

/// Applies `statement_timeout` to every pooled connection.
#[derive(Debug, Clone, Copy)]
struct StatementTimeout {
    millis: u64,
}

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        sql_query(format!("SET statement_timeout = {}", self.millis))
            .execute(conn)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Diesel-backed practitioner store.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
    retried_operations: Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .connection_customizer(Box::new(StatementTimeout {
                millis: config.query_timeout_sec * 1000,
            }))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }
        info!("Postgres practitioner store ready (pool max {})", config.max_pool_size);

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
            retried_operations: Arc::new(AtomicU64::new(0)),
        })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;
        if !applied.is_empty() {
            info!("Applied {} migration(s)", applied.len());
        }
        Ok(())
    }

    /// Run `f` on a pooled connection with retry for transient failures.
    ///
    /// The whole call, retries included, is bounded by `query_timeout_sec`
    /// times the number of attempts.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        let handle = task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new(operation)
                                .with_details(format!("attempt={}", attempt + 1)),
                        );
                        if attempt < max_retries {
                            warn!("{}: connection attempt {} failed: {}", operation, attempt + 1, err);
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        warn!("{}: attempt {} failed, retrying: {}", operation, attempt + 1, e);
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e.with_operation(operation));
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        });

        let budget = Duration::from_secs(self.config.query_timeout_sec)
            * (self.config.max_retries + 1)
            + Duration::from_secs(self.config.connection_timeout_sec);
        match tokio::time::timeout(budget, handle).await {
            Ok(joined) => joined.map_err(|e| {
                RepositoryError::internal_with_context(
                    format!("Task join error: {}", e),
                    ErrorContext::new("spawn_blocking"),
                )
            })?,
            Err(_) => Err(RepositoryError::timeout_with_context(
                format!("store call exceeded {:?}", budget),
                ErrorContext::new(operation).with_entity("practitioner"),
            )),
        }
    }

    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }
}

fn apply_filter<'a>(
    mut query: BoxedPractitioners<'a>,
    filter: &PractitionerFilter,
) -> BoxedPractitioners<'a> {
    for predicate in filter.predicates() {
        query = match predicate {
            Predicate::SpecialtyEquals(specialty) => {
                query.filter(practitioners::specialty.eq(specialty.clone()))
            }
            Predicate::RatingAtLeast(min) => query.filter(practitioners::rating.ge(*min)),
            // Experience is stored in whole years.
            Predicate::ExperienceAtLeast(min) => {
                query.filter(practitioners::experience_years.ge(min.ceil() as i32))
            }
            Predicate::GenderEquals(gender) => {
                query.filter(practitioners::gender.eq(gender.clone()))
            }
            Predicate::AvailableVia(AvailabilityChannel::Online) => {
                query.filter(practitioners::available_online.eq(true))
            }
            Predicate::AvailableVia(AvailabilityChannel::Clinic) => {
                query.filter(practitioners::available_clinic.eq(true))
            }
            Predicate::AvailableVia(AvailabilityChannel::Hospital) => {
                query.filter(practitioners::available_hospital.eq(true))
            }
        };
    }
    query
}

fn apply_sort(query: BoxedPractitioners<'_>, field: SortField, order: SortOrder) -> BoxedPractitioners<'_> {
    use SortOrder::{Ascending, Descending};
    match (field, order) {
        (SortField::Rating, Ascending) => query.order(practitioners::rating.asc()),
        (SortField::Rating, Descending) => query.order(practitioners::rating.desc()),
        (SortField::Experience, Ascending) => query.order(practitioners::experience_years.asc()),
        (SortField::Experience, Descending) => query.order(practitioners::experience_years.desc()),
        (SortField::Price, Ascending) => query.order(practitioners::consultation_fee.asc()),
        (SortField::Price, Descending) => query.order(practitioners::consultation_fee.desc()),
        (SortField::Name, Ascending) => query.order(practitioners::name.asc()),
        (SortField::Name, Descending) => query.order(practitioners::name.desc()),
    }
}

fn window_bound(value: u64, name: &str) -> RepositoryResult<i64> {
    i64::try_from(value).map_err(|_| {
        RepositoryError::query_with_context(
            format!("{} too large: {}", name, value),
            ErrorContext::new("find"),
        )
    })
}

fn rows_to_practitioners(rows: Vec<PractitionerRow>) -> RepositoryResult<Vec<Practitioner>> {
    rows.into_iter().map(Practitioner::try_from).collect()
}

#[async_trait]
impl PractitionerRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn find(&self, query: &PractitionerQuery) -> RepositoryResult<Vec<Practitioner>> {
        let offset = window_bound(query.window.skip, "skip")?;
        let limit = window_bound(query.window.limit, "limit")?;
        let query = query.clone();
        debug!("find practitioners: {:?}", query);

        let rows = self
            .with_conn("find", move |conn| {
                let boxed = apply_filter(practitioners::table.into_boxed(), &query.filter);
                apply_sort(boxed, query.sort.field, query.sort.order)
                    .offset(offset)
                    .limit(limit)
                    .select(PractitionerRow::as_select())
                    .load::<PractitionerRow>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        rows_to_practitioners(rows)
    }

    async fn count(&self, filter: &PractitionerFilter) -> RepositoryResult<u64> {
        let filter = filter.clone();
        let total = self
            .with_conn("count", move |conn| {
                apply_filter(practitioners::table.into_boxed(), &filter)
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn insert(&self, practitioner: &NewPractitioner) -> RepositoryResult<Practitioner> {
        let row = NewPractitionerRow::from_domain(practitioner)?;
        let inserted = self
            .with_conn("insert", move |conn| {
                diesel::insert_into(practitioners::table)
                    .values(&row)
                    .returning(PractitionerRow::as_returning())
                    .get_result::<PractitionerRow>(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        Practitioner::try_from(inserted)
    }

    async fn find_by_slug(&self, slug: &str) -> RepositoryResult<Option<Practitioner>> {
        let slug = slug.to_string();
        let row = self
            .with_conn("find_by_slug", move |conn| {
                practitioners::table
                    .filter(practitioners::slug.eq(&slug))
                    .select(PractitionerRow::as_select())
                    .first::<PractitionerRow>(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        row.map(Practitioner::try_from).transpose()
    }

    async fn replace_all(&self, practitioners: &[NewPractitioner]) -> RepositoryResult<u64> {
        let rows = practitioners
            .iter()
            .map(NewPractitionerRow::from_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        let inserted = self
            .with_conn("replace_all", move |conn| {
                conn.transaction::<usize, RepositoryError, _>(|conn| {
                    let deleted = diesel::delete(practitioners::table).execute(conn)?;
                    debug!("replace_all removed {} practitioner(s)", deleted);
                    if rows.is_empty() {
                        return Ok(0);
                    }
                    Ok(diesel::insert_into(practitioners::table)
                        .values(&rows)
                        .execute(conn)?)
                })
            })
            .await?;
        Ok(inserted as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_url_keeps_defaults() {
        let config = PostgresConfig::with_url("postgres://localhost/directory");
        assert_eq!(config.database_url, "postgres://localhost/directory");
        assert_eq!(config.max_pool_size, 10);
        assert_eq!(config.query_timeout_sec, 10);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_window_bound_rejects_overflow() {
        assert_eq!(window_bound(40, "skip").unwrap(), 40);
        assert!(window_bound(u64::MAX, "skip").is_err());
    }
}
