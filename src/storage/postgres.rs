//! `PostgreSQL` adapter for [`Store`].

use super::{
    NewProject, NewUser, Profile, Store, StoreError, is_foreign_key_violation, is_unique_violation,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Connection, PgPool, Row, migrate::Migrator, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{Instrument, info_span};

static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool for `dsn`; connections are opened on demand per request.
    ///
    /// # Errors
    /// Returns an error if the first connection cannot be established.
    pub async fn connect(dsn: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await
            .context("Failed to connect to database")?;

        Ok(Self::new(pool))
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded `migrations/` to the connected database.
    ///
    /// # Errors
    /// Returns an error if a migration fails or the applied history diverges.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .context("Failed to apply database migrations")?;

        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: &NewUser) -> Result<i64, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let query = "INSERT INTO users (username, email, zipcode) VALUES ($1, $2, $3) RETURNING id";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        match sqlx::query_scalar::<_, i64>(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.zipcode)
            .fetch_one(&mut *conn)
            .instrument(span)
            .await
        {
            Ok(id) => Ok(id),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Duplicate),
            Err(err) => Err(StoreError::Database(err)),
        }
    }

    async fn get_user(&self, id: i64) -> Result<Option<Profile>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let query = "SELECT username, email, zipcode FROM users WHERE id = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .instrument(span)
            .await?;

        Ok(row.map(|row| Profile {
            username: row.get("username"),
            email: row.get("email"),
            zipcode: row.get("zipcode"),
        }))
    }

    async fn add_project(&self, project: &NewProject) -> Result<i64, StoreError> {
        // Dropping `tx` without commit rolls back and returns the connection.
        let mut tx = self.pool.begin().await?;

        // FOR SHARE keeps the user row alive until the insert commits.
        let select = "SELECT id FROM users WHERE username = $1 FOR SHARE";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = select
        );
        let user_id: Option<i64> = sqlx::query_scalar(select)
            .bind(&project.username)
            .fetch_optional(&mut *tx)
            .instrument(span)
            .await?;

        let Some(user_id) = user_id else {
            return Err(StoreError::UserNotFound);
        };

        let insert = r#"INSERT INTO projects (project, "user") VALUES ($1, $2) RETURNING id"#;
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = insert
        );
        let project_id = match sqlx::query_scalar::<_, i64>(insert)
            .bind(&project.project)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .instrument(span)
            .await
        {
            Ok(id) => id,
            Err(err) if is_foreign_key_violation(&err) => return Err(StoreError::Constraint),
            Err(err) => return Err(StoreError::Database(err)),
        };

        tx.commit().await?;

        Ok(project_id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(acquire_span).await?;

        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;

        Ok(())
    }
}
