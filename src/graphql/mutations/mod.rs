pub mod auth;
pub mod links;
pub mod votes;

pub use auth::AuthMutations;
pub use links::LinkMutations;
pub use votes::VoteMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ErrorExtensions, ID, Object, Result};

    pub(crate) use crate::db::*;
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
}
