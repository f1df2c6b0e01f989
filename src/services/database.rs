//! Persistence gateway: all CRUD over applications and whitelist entries.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use sqlx::SqliteConnection;

use crate::error::AppError;
use crate::models::{Application, ApplicationStatus, NewApplication, NewEntry, WhitelistEntry};

/// SQLite database wrapper. Cheap to clone; all methods check out a
/// connection from the shared pool per operation.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Health check - ping the database.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ==================== Application operations ====================

    /// Insert a pending application; creation time is the moment of
    /// acceptance.
    pub async fn insert_application(&self, new: &NewApplication) -> Result<Application, AppError> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (game_id, contact, edition, bedrock_name, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&new.game_id)
        .bind(&new.contact)
        .bind(new.edition)
        .bind(&new.bedrock_name)
        .bind(ApplicationStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    pub async fn application_by_id(&self, id: i64) -> Result<Option<Application>, AppError> {
        let application =
            sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(application)
    }

    pub async fn applications_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, AppError> {
        let applications = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE status = ? ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    /// Conditionally transition an application out of PENDING. Returns
    /// false when the row is absent or already terminal, in which case the
    /// caller must skip all side effects.
    pub async fn transition_application(
        conn: &mut SqliteConnection,
        id: i64,
        to: ApplicationStatus,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE applications SET status = ? WHERE id = ? AND status = ?")
            .bind(to)
            .bind(id)
            .bind(ApplicationStatus::Pending)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ==================== Whitelist operations ====================

    /// Insert a derived entry. Takes a bare connection so the approval
    /// engine can run it inside the same transaction as the status
    /// transition.
    pub async fn insert_entry(conn: &mut SqliteConnection, entry: &NewEntry) -> Result<(), AppError> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO whitelist (game_id, uuid, edition, contact, user_tier, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.game_id)
        .bind(&entry.uuid)
        .bind(entry.edition)
        .bind(&entry.contact)
        .bind(&entry.user_tier)
        .bind(now)
        .bind(now)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn all_entries(&self) -> Result<Vec<WhitelistEntry>, AppError> {
        let entries = sqlx::query_as::<_, WhitelistEntry>(
            "SELECT * FROM whitelist ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn entry_by_id(&self, id: i64) -> Result<Option<WhitelistEntry>, AppError> {
        let entry = sqlx::query_as::<_, WhitelistEntry>("SELECT * FROM whitelist WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    pub async fn update_entry(
        &self,
        id: i64,
        game_id: &str,
        contact: &str,
        user_tier: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE whitelist SET game_id = ?, contact = ?, user_tier = ?, updated_at = ? WHERE id = ?",
        )
        .bind(game_id)
        .bind(contact)
        .bind(user_tier)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_entry(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM whitelist WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
