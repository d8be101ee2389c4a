//! GraphQL schema assembly
//!
//! Merges the domain query/mutation objects into one executable schema and
//! wires in the shared database handle, auth service, and DataLoaders.

use async_graphql::dataloader::DataLoader;
use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;
use crate::services::AuthService;

use super::loaders::{LinkVotersLoader, UserLoader};
use super::mutations::{AuthMutations, LinkMutations, VoteMutations};
use super::queries::{LinkQueries, UserQueries};

/// The GraphQL schema type
pub type LinkboardSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(LinkQueries, UserQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthMutations, LinkMutations, VoteMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database, auth_service: AuthService) -> LinkboardSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(DataLoader::new(UserLoader::new(db.clone()), tokio::spawn))
    .data(DataLoader::new(
        LinkVotersLoader::new(db.clone()),
        tokio::spawn,
    ))
    .data(auth_service)
    .data(db)
    .finish()
}
