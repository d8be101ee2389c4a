//! GraphQL DataLoaders for batching database queries
//!
//! DataLoaders collect the per-parent lookups issued by relation resolvers
//! within a request tick and execute them as one batch query, so resolving
//! `feed { links { postedBy } }` costs a single user query rather than one
//! per link.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;

use crate::db::Database;
use crate::graphql::helpers::user_record_to_graphql;
use crate::graphql::types::User;

/// Batches `postedBy` lookups: user id -> User
pub struct UserLoader {
    db: Database,
}

impl UserLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<i64> for UserLoader {
    type Value = User;
    type Error = Arc<anyhow::Error>;

    async fn load(&self, keys: &[i64]) -> Result<HashMap<i64, Self::Value>, Self::Error> {
        tracing::debug!(parent_count = keys.len(), "Batch loading users");

        let records = self.db.users().get_by_ids(keys).await.map_err(Arc::new)?;

        Ok(records
            .into_iter()
            .map(|r| (r.id, user_record_to_graphql(r)))
            .collect())
    }
}

/// Batches `voters` lookups: link id -> voters
pub struct LinkVotersLoader {
    db: Database,
}

impl LinkVotersLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<i64> for LinkVotersLoader {
    type Value = Vec<User>;
    type Error = Arc<anyhow::Error>;

    async fn load(&self, keys: &[i64]) -> Result<HashMap<i64, Self::Value>, Self::Error> {
        tracing::debug!(parent_count = keys.len(), "Batch loading voters");

        let rows = self
            .db
            .votes()
            .voters_for_links(keys)
            .await
            .map_err(Arc::new)?;

        // Every requested link gets an entry; links with no votes map to an
        // empty voter list
        let mut result: HashMap<i64, Vec<User>> =
            keys.iter().map(|k| (*k, Vec::new())).collect();

        for (link_id, user) in rows {
            if let Some(voters) = result.get_mut(&link_id) {
                voters.push(user_record_to_graphql(user));
            }
        }

        Ok(result)
    }
}
