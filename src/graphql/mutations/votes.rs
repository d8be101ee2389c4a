use super::prelude::*;

#[derive(Default)]
pub struct VoteMutations;

#[Object]
impl VoteMutations {
    /// Vote for a link as the authenticated user
    async fn vote(&self, ctx: &Context<'_>, link_id: ID) -> Result<Vote> {
        let Some(user) = ctx.try_auth_user() else {
            return Err(async_graphql::Error::new("Cannot vote without logging in.")
                .extend_with(|_, e| e.set("code", "UNAUTHORIZED")));
        };
        let db = ctx.data_unchecked::<Database>();
        let link_id = parse_link_id(&link_id)?;

        let link = db
            .links()
            .get_by_id(link_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?
            .ok_or_else(|| {
                async_graphql::Error::new(format!("Link with ID {} not found", link_id))
            })?;

        let already_voted = db
            .votes()
            .exists(link_id, user.user_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        if already_voted {
            return Err(async_graphql::Error::new(format!(
                "Already voted for link: {}",
                link_id
            )));
        }

        db.votes()
            .create(link_id, user.user_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        let voter = db
            .users()
            .get_by_id(user.user_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?
            .ok_or_else(|| async_graphql::Error::new("User not found"))?;

        tracing::info!(link_id, user_id = user.user_id, "Vote recorded");

        Ok(Vote {
            link: link_record_to_graphql(link),
            user: user_record_to_graphql(voter),
        })
    }
}
