use serde::Serialize;

use super::prelude::*;

#[derive(Default)]
pub struct LinkQueries;

/// Feed arguments in wire form, serialized into the feed identity string
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    take: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<Vec<LinkOrderByInput>>,
}

#[Object]
impl LinkQueries {
    /// Paginated, filterable feed of links
    async fn feed(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Match links whose description or url contains this string")]
        filter: Option<String>,
        #[graphql(desc = "Number of links to skip")] skip: Option<i32>,
        #[graphql(desc = "Maximum number of links to return")] take: Option<i32>,
        #[graphql(desc = "Sort order; earlier entries take precedence")] order_by: Option<
            Vec<LinkOrderByInput>,
        >,
    ) -> Result<Feed> {
        let db = ctx.data_unchecked::<Database>();

        let page = db
            .links()
            .feed(FeedQuery {
                filter: filter.clone(),
                skip: skip.map(i64::from),
                take: take.map(i64::from),
                order_by: order_by_to_columns(order_by.as_deref().unwrap_or(&[])),
            })
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        // Identity string used by API consumers as a cache key
        let args = FeedArgs {
            filter,
            skip,
            take,
            order_by,
        };
        let id = format!(
            "main-feed:{}",
            serde_json::to_string(&args).map_err(|e| async_graphql::Error::new(e.to_string()))?
        );

        Ok(Feed {
            links: page.links.into_iter().map(link_record_to_graphql).collect(),
            count: page.total_count,
            id: Some(ID::from(id)),
        })
    }

    /// Look up a single link by ID; resolves to null when no link matches
    async fn fetch_link(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Link>> {
        let db = ctx.data_unchecked::<Database>();
        let link_id = parse_link_id(&id)?;

        let record = db
            .links()
            .get_by_id(link_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(record.map(link_record_to_graphql))
    }
}
