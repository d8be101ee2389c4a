//! Links database repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::sqlite_helpers::{now_iso8601, str_to_datetime};

/// Link record from database
#[derive(Debug, Clone)]
pub struct LinkRecord {
    pub id: i64,
    pub description: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub posted_by_id: Option<i64>,
}

impl sqlx::FromRow<'_, sqlx::sqlite::SqliteRow> for LinkRecord {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row;

        let created_str: String = row.try_get("created_at")?;

        Ok(Self {
            id: row.try_get("id")?,
            description: row.try_get("description")?,
            url: row.try_get("url")?,
            created_at: str_to_datetime(&created_str)
                .map_err(|e| sqlx::Error::Decode(e.into()))?,
            posted_by_id: row.try_get("posted_by_id")?,
        })
    }
}

/// Input for creating a link
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub description: String,
    pub url: String,
    pub posted_by_id: Option<i64>,
}

/// Input for updating a link; None fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateLink {
    pub description: Option<String>,
    pub url: Option<String>,
}

/// A single ORDER BY term; column names are whitelisted by the caller
#[derive(Debug, Clone)]
pub struct LinkOrderBy {
    pub column: String,
    pub direction: String,
}

/// Arguments for the feed query
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    pub filter: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub order_by: Vec<LinkOrderBy>,
}

/// Result of a feed query
///
/// `total_count` is computed against the same predicate as `links` but
/// ignores pagination.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub links: Vec<LinkRecord>,
    pub total_count: i64,
}

pub struct LinksRepository {
    pool: SqlitePool,
}

impl LinksRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new link
    pub async fn create(&self, input: CreateLink) -> Result<LinkRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (description, url, created_at, posted_by_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&input.description)
        .bind(&input.url)
        .bind(now_iso8601())
        .bind(input.posted_by_id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve link after insert"))
    }

    /// Get a link by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<LinkRecord>> {
        let record = sqlx::query_as::<_, LinkRecord>(
            r#"
            SELECT id, description, url, created_at, posted_by_id
            FROM links
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get links posted by a user, newest first
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<LinkRecord>> {
        let records = sqlx::query_as::<_, LinkRecord>(
            r#"
            SELECT id, description, url, created_at, posted_by_id
            FROM links
            WHERE posted_by_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Get a page of links with filtering, pagination, and sorting
    pub async fn feed(&self, query: FeedQuery) -> Result<FeedPage> {
        // Build the WHERE clause dynamically
        let mut conditions = Vec::new();
        let mut params_count = 0;

        if query.filter.is_some() {
            params_count += 1;
            conditions.push(format!(
                "(description LIKE '%' || ?{n} || '%' OR url LIKE '%' || ?{n} || '%')",
                n = params_count
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let order_clause = if query.order_by.is_empty() {
            String::new()
        } else {
            let terms: Vec<String> = query
                .order_by
                .iter()
                .map(|o| format!("{} {}", o.column, o.direction))
                .collect();
            format!("ORDER BY {}", terms.join(", "))
        };

        // Count query against the same predicate, ignoring pagination
        let count_sql = format!("SELECT COUNT(*) FROM links {}", where_clause);

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(ref filter) = query.filter {
            count_query = count_query.bind(filter);
        }
        let total_count = count_query.fetch_one(&self.pool).await?;

        // Data query; SQLite needs a LIMIT for OFFSET to apply, and LIMIT -1
        // means "no limit"
        let data_sql = format!(
            "SELECT id, description, url, created_at, posted_by_id FROM links {} {} LIMIT ?{} OFFSET ?{}",
            where_clause,
            order_clause,
            params_count + 1,
            params_count + 2
        );

        let mut data_query = sqlx::query_as::<_, LinkRecord>(&data_sql);
        if let Some(ref filter) = query.filter {
            data_query = data_query.bind(filter);
        }
        data_query = data_query
            .bind(query.take.unwrap_or(-1))
            .bind(query.skip.unwrap_or(0));

        let links = data_query.fetch_all(&self.pool).await?;

        Ok(FeedPage { links, total_count })
    }

    /// Update a link; None fields keep their current value
    pub async fn update(&self, id: i64, input: UpdateLink) -> Result<Option<LinkRecord>> {
        sqlx::query(
            r#"
            UPDATE links SET
                description = COALESCE(?2, description),
                url = COALESCE(?3, url)
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&input.description)
        .bind(&input.url)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Delete a link, returning its prior state
    pub async fn delete(&self, id: i64) -> Result<Option<LinkRecord>> {
        let record = match self.get_by_id(id).await? {
            Some(record) => record,
            None => return Ok(None),
        };

        sqlx::query("DELETE FROM links WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{CreateUser, Database};

    async fn test_db() -> Database {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    async fn seed_user(db: &Database) -> i64 {
        db.users()
            .create(CreateUser {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_link(db: &Database, description: &str, url: &str, user_id: i64) -> LinkRecord {
        db.links()
            .create(CreateLink {
                description: description.to_string(),
                url: url.to_string(),
                posted_by_id: Some(user_id),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = test_db().await;
        let user_id = seed_user(&db).await;

        let created = seed_link(&db, "Rust book", "https://doc.rust-lang.org/book", user_id).await;
        assert_eq!(created.id, 1);
        assert_eq!(created.posted_by_id, Some(user_id));

        let fetched = db.links().get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.description, "Rust book");
        assert_eq!(fetched.url, "https://doc.rust-lang.org/book");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        assert!(db.links().get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_feed_count_ignores_pagination() {
        let db = test_db().await;
        let user_id = seed_user(&db).await;

        seed_link(&db, "Rust book", "doc.rust-lang.org", user_id).await;
        seed_link(&db, "GraphQL docs", "graphql.org", user_id).await;
        seed_link(&db, "Rust blog", "blog.rust-lang.org", user_id).await;

        let page = db
            .links()
            .feed(FeedQuery {
                filter: Some("rust".to_string()),
                take: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.links.len(), 1);
        assert_eq!(page.total_count, 2);
    }

    #[tokio::test]
    async fn test_feed_filter_matches_url_or_description() {
        let db = test_db().await;
        let user_id = seed_user(&db).await;

        seed_link(&db, "GraphQL official website", "graphql.org", user_id).await;
        seed_link(&db, "Search engine", "duckduckgo.com", user_id).await;

        // "graphql" appears in both description and url of the first link only
        let page = db
            .links()
            .feed(FeedQuery {
                filter: Some("graphql".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.links[0].description, "GraphQL official website");
    }

    #[tokio::test]
    async fn test_feed_pagination_window() {
        let db = test_db().await;
        let user_id = seed_user(&db).await;

        for name in ["a", "b", "c", "d", "e"] {
            seed_link(&db, name, &format!("{}.example.com", name), user_id).await;
        }

        let page = db
            .links()
            .feed(FeedQuery {
                skip: Some(1),
                take: Some(2),
                order_by: vec![LinkOrderBy {
                    column: "description".to_string(),
                    direction: "ASC".to_string(),
                }],
                ..Default::default()
            })
            .await
            .unwrap();

        let names: Vec<&str> = page.links.iter().map(|l| l.description.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(page.total_count, 5);
    }

    #[tokio::test]
    async fn test_feed_order_precedence() {
        let db = test_db().await;
        let user_id = seed_user(&db).await;

        seed_link(&db, "same", "b.example.com", user_id).await;
        seed_link(&db, "same", "a.example.com", user_id).await;
        seed_link(&db, "other", "c.example.com", user_id).await;

        let page = db
            .links()
            .feed(FeedQuery {
                order_by: vec![
                    LinkOrderBy {
                        column: "description".to_string(),
                        direction: "DESC".to_string(),
                    },
                    LinkOrderBy {
                        column: "url".to_string(),
                        direction: "ASC".to_string(),
                    },
                ],
                ..Default::default()
            })
            .await
            .unwrap();

        let urls: Vec<&str> = page.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["a.example.com", "b.example.com", "c.example.com"]);
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields() {
        let db = test_db().await;
        let user_id = seed_user(&db).await;
        let link = seed_link(&db, "old description", "old.example.com", user_id).await;

        let updated = db
            .links()
            .update(
                link.id,
                UpdateLink {
                    description: Some("new description".to_string()),
                    url: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.description, "new description");
        assert_eq!(updated.url, "old.example.com");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let db = test_db().await;

        let result = db
            .links()
            .update(
                42,
                UpdateLink {
                    description: Some("x".to_string()),
                    url: None,
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_prior_state() {
        let db = test_db().await;
        let user_id = seed_user(&db).await;
        let link = seed_link(&db, "doomed", "doomed.example.com", user_id).await;

        let deleted = db.links().delete(link.id).await.unwrap().unwrap();
        assert_eq!(deleted.description, "doomed");

        assert!(db.links().get_by_id(link.id).await.unwrap().is_none());
        assert!(db.links().delete(link.id).await.unwrap().is_none());
    }
}
