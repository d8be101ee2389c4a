//! Votes database repository
//!
//! A vote is a join row between a user and a link; each user may vote for a
//! link at most once (enforced by a UNIQUE constraint).

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::sqlite_helpers::{now_iso8601, str_to_datetime};
use super::users::UserRecord;

/// Vote record from database
#[derive(Debug, Clone)]
pub struct VoteRecord {
    pub id: i64,
    pub link_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

pub struct VotesRepository {
    pool: SqlitePool,
}

impl VotesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a vote
    pub async fn create(&self, link_id: i64, user_id: i64) -> Result<VoteRecord> {
        let now = now_iso8601();

        let result = sqlx::query(
            r#"
            INSERT INTO votes (link_id, user_id, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(link_id)
        .bind(user_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(VoteRecord {
            id: result.last_insert_rowid(),
            link_id,
            user_id,
            created_at: str_to_datetime(&now)?,
        })
    }

    /// Check whether a user has already voted for a link
    pub async fn exists(&self, link_id: i64, user_id: i64) -> Result<bool> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM votes WHERE link_id = ?1 AND user_id = ?2",
        )
        .bind(link_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Get the users who voted for a link, in voting order
    pub async fn voters_for_link(&self, link_id: i64) -> Result<Vec<UserRecord>> {
        let records = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT u.id, u.name, u.email, u.password_hash, u.created_at
            FROM votes v
            JOIN users u ON u.id = v.user_id
            WHERE v.link_id = ?1
            ORDER BY v.id
            "#,
        )
        .bind(link_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Batch voter lookup for several links, used by the voters DataLoader
    pub async fn voters_for_links(&self, link_ids: &[i64]) -> Result<Vec<(i64, UserRecord)>> {
        if link_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: Vec<String> = (1..=link_ids.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            r#"
            SELECT v.link_id, u.id, u.name, u.email, u.password_hash, u.created_at
            FROM votes v
            JOIN users u ON u.id = v.user_id
            WHERE v.link_id IN ({})
            ORDER BY v.id
            "#,
            placeholders.join(", ")
        );

        let mut query =
            sqlx::query_as::<_, (i64, i64, String, String, String, String)>(&sql);
        for id in link_ids {
            query = query.bind(id);
        }
        let rows = query.fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|r| {
                Ok((
                    r.0,
                    UserRecord {
                        id: r.1,
                        name: r.2,
                        email: r.3,
                        password_hash: r.4,
                        created_at: str_to_datetime(&r.5)?,
                    },
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{CreateLink, CreateUser, Database};

    async fn test_db() -> Database {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    async fn seed_user(db: &Database, name: &str) -> i64 {
        db.users()
            .create(CreateUser {
                name: name.to_string(),
                email: format!("{}@example.com", name),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_link(db: &Database, user_id: i64) -> i64 {
        db.links()
            .create(CreateLink {
                description: "a link".to_string(),
                url: "example.com".to_string(),
                posted_by_id: Some(user_id),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_vote_and_list_voters() {
        let db = test_db().await;
        let alice = seed_user(&db, "alice").await;
        let bob = seed_user(&db, "bob").await;
        let link_id = seed_link(&db, alice).await;

        db.votes().create(link_id, alice).await.unwrap();
        db.votes().create(link_id, bob).await.unwrap();

        let voters = db.votes().voters_for_link(link_id).await.unwrap();
        let names: Vec<&str> = voters.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);

        assert!(db.votes().exists(link_id, alice).await.unwrap());
        assert!(!db.votes().exists(999, alice).await.unwrap());
    }

    #[tokio::test]
    async fn test_double_vote_rejected() {
        let db = test_db().await;
        let alice = seed_user(&db, "alice").await;
        let link_id = seed_link(&db, alice).await;

        db.votes().create(link_id, alice).await.unwrap();
        assert!(db.votes().create(link_id, alice).await.is_err());
    }

    #[tokio::test]
    async fn test_batch_voters_groups_by_link() {
        let db = test_db().await;
        let alice = seed_user(&db, "alice").await;
        let bob = seed_user(&db, "bob").await;
        let first = seed_link(&db, alice).await;
        let second = seed_link(&db, alice).await;

        db.votes().create(first, alice).await.unwrap();
        db.votes().create(first, bob).await.unwrap();
        db.votes().create(second, bob).await.unwrap();

        let rows = db.votes().voters_for_links(&[first, second]).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().filter(|(l, _)| *l == first).count(), 2);
        assert_eq!(rows.iter().filter(|(l, _)| *l == second).count(), 1);
    }
}
