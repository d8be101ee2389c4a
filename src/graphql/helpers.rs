// Helper functions shared across GraphQL query/mutation modules.

use crate::db::links::LinkOrderBy;
use crate::db::{LinkRecord, UserRecord};
use crate::graphql::types::{Link, LinkOrderByInput, User};

/// Convert a LinkRecord from the database to a GraphQL Link type
pub(crate) fn link_record_to_graphql(r: LinkRecord) -> Link {
    Link {
        id: r.id as i32,
        description: r.description,
        url: r.url,
        created_at: r.created_at,
        posted_by_id: r.posted_by_id,
    }
}

/// Convert a UserRecord to a GraphQL User type (drops the password hash)
pub(crate) fn user_record_to_graphql(r: UserRecord) -> User {
    User {
        id: r.id as i32,
        name: r.name,
        email: r.email,
    }
}

/// Flatten orderBy inputs into whitelisted column/direction pairs.
/// List order determines sort precedence.
pub(crate) fn order_by_to_columns(order_by: &[LinkOrderByInput]) -> Vec<LinkOrderBy> {
    let mut columns = Vec::new();
    for spec in order_by {
        if let Some(dir) = spec.description {
            columns.push(LinkOrderBy {
                column: "description".to_string(),
                direction: dir.to_sql().to_string(),
            });
        }
        if let Some(dir) = spec.url {
            columns.push(LinkOrderBy {
                column: "url".to_string(),
                direction: dir.to_sql().to_string(),
            });
        }
        if let Some(dir) = spec.created_at {
            columns.push(LinkOrderBy {
                column: "created_at".to_string(),
                direction: dir.to_sql().to_string(),
            });
        }
    }
    columns
}

/// Parse a GraphQL ID argument into a link row id
pub(crate) fn parse_link_id(id: &async_graphql::ID) -> async_graphql::Result<i64> {
    id.0.parse::<i64>()
        .map_err(|_| async_graphql::Error::new(format!("Invalid link ID: {}", id.0)))
}
