use super::prelude::*;

#[derive(Default)]
pub struct LinkMutations;

#[Object]
impl LinkMutations {
    /// Post a new link as the authenticated user
    async fn post(&self, ctx: &Context<'_>, description: String, url: String) -> Result<Link> {
        let Some(user) = ctx.try_auth_user() else {
            return Err(async_graphql::Error::new("Cannot post without logging in.")
                .extend_with(|_, e| e.set("code", "UNAUTHORIZED")));
        };
        let db = ctx.data_unchecked::<Database>();

        let record = db
            .links()
            .create(CreateLink {
                description,
                url,
                posted_by_id: Some(user.user_id),
            })
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        tracing::info!(link_id = record.id, user_id = user.user_id, "Link posted");

        Ok(link_record_to_graphql(record))
    }

    /// Update a link's description and/or url; omitted fields keep their value
    async fn update_link(
        &self,
        ctx: &Context<'_>,
        id: ID,
        description: Option<String>,
        url: Option<String>,
    ) -> Result<Option<Link>> {
        let db = ctx.data_unchecked::<Database>();
        let link_id = parse_link_id(&id)?;

        if description.is_none() && url.is_none() {
            return Err(
                async_graphql::Error::new("Either description or url must be provided.")
                    .extend_with(|_, e| e.set("code", "BAD_USER_INPUT")),
            );
        }

        let record = db
            .links()
            .update(link_id, UpdateLink { description, url })
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?
            .ok_or_else(|| {
                async_graphql::Error::new(format!("Link with ID {} not found", link_id))
            })?;

        Ok(Some(link_record_to_graphql(record)))
    }

    /// Delete a link, returning its last state
    async fn delete_link(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Link>> {
        let db = ctx.data_unchecked::<Database>();
        let link_id = parse_link_id(&id)?;

        let record = db
            .links()
            .delete(link_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?
            .ok_or_else(|| {
                async_graphql::Error::new(format!("Link with ID {} not found", link_id))
            })?;

        tracing::info!(link_id = record.id, "Link deleted");

        Ok(Some(link_record_to_graphql(record)))
    }
}
