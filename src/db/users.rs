//! Users database repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::sqlite_helpers::{now_iso8601, str_to_datetime};

/// User record from database
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl sqlx::FromRow<'_, sqlx::sqlite::SqliteRow> for UserRecord {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row;

        let created_str: String = row.try_get("created_at")?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            created_at: str_to_datetime(&created_str)
                .map_err(|e| sqlx::Error::Decode(e.into()))?,
        })
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

pub struct UsersRepository {
    pool: SqlitePool,
}

impl UsersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, input: CreateUser) -> Result<UserRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(now_iso8601())
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve user after insert"))
    }

    /// Get a user by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get a user by email (case-insensitive)
    pub async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = ?1 COLLATE NOCASE
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Batch lookup by IDs, used by the user DataLoader
    pub async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<UserRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id IN ({})",
            placeholders.join(", ")
        );

        let mut query = sqlx::query_as::<_, UserRecord>(&sql);
        for id in ids {
            query = query.bind(id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> Database {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = test_db().await;
        let users = db.users();

        let created = users
            .create(CreateUser {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Alice");

        let by_id = users.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "alice@example.com");

        // Email lookup is case-insensitive
        let by_email = users.get_by_email("ALICE@EXAMPLE.COM").await.unwrap();
        assert_eq!(by_email.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = test_db().await;
        let users = db.users();

        let input = CreateUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
        };
        users.create(input.clone()).await.unwrap();

        assert!(users.create(input).await.is_err());
    }

    #[tokio::test]
    async fn test_get_by_ids_batch() {
        let db = test_db().await;
        let users = db.users();

        for name in ["a", "b", "c"] {
            users
                .create(CreateUser {
                    name: name.to_string(),
                    email: format!("{}@example.com", name),
                    password_hash: "hash".to_string(),
                })
                .await
                .unwrap();
        }

        let records = users.get_by_ids(&[1, 3]).await.unwrap();
        assert_eq!(records.len(), 2);

        assert!(users.get_by_ids(&[]).await.unwrap().is_empty());
    }
}
