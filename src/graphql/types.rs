//! GraphQL type definitions
//!
//! These types mirror the database records but are decorated with
//! async-graphql attributes. Relation fields (`postedBy`, `voters`,
//! `User.links`) resolve against the database via the request's DataLoaders.

use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, Enum, ID, InputObject, Result, SimpleObject};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::Database;
use crate::graphql::helpers::link_record_to_graphql;
use crate::graphql::loaders::{LinkVotersLoader, UserLoader};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize)]
#[graphql(rename_items = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    Asc,
    Desc,
}

impl Sort {
    /// Convert to SQL order string
    pub fn to_sql(self) -> &'static str {
        match self {
            Sort::Asc => "ASC",
            Sort::Desc => "DESC",
        }
    }
}

/// Sort spec for the feed query; list order determines precedence
#[derive(Debug, Clone, InputObject, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOrderByInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Sort>,
}

/// A shared link
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Link {
    pub id: i32,
    pub description: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    #[graphql(skip)]
    pub posted_by_id: Option<i64>,
}

#[ComplexObject]
impl Link {
    /// The user who posted this link
    async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(user_id) = self.posted_by_id else {
            return Ok(None);
        };

        let loader = ctx.data_unchecked::<DataLoader<UserLoader>>();
        loader
            .load_one(user_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))
    }

    /// Users who voted for this link
    async fn voters(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let loader = ctx.data_unchecked::<DataLoader<LinkVotersLoader>>();
        let voters = loader
            .load_one(i64::from(self.id))
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(voters.unwrap_or_default())
    }
}

/// A registered user
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[ComplexObject]
impl User {
    /// Links posted by this user, newest first
    async fn links(&self, ctx: &Context<'_>) -> Result<Vec<Link>> {
        let db = ctx.data_unchecked::<Database>();

        let records = db
            .links()
            .list_by_user(i64::from(self.id))
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(records.into_iter().map(link_record_to_graphql).collect())
    }
}

/// A page of links plus the total count for the active filter
#[derive(Debug, Clone, SimpleObject)]
pub struct Feed {
    pub links: Vec<Link>,
    /// Number of links matching the filter, ignoring pagination
    pub count: i64,
    /// Identity string derived from the query arguments, usable as a cache key
    pub id: Option<ID>,
}

/// A user's vote on a link
#[derive(Debug, Clone, SimpleObject)]
pub struct Vote {
    pub link: Link,
    pub user: User,
}

/// Token and user returned by signup and login
#[derive(Debug, Clone, SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}
