/// Feed handler
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::services::{FeedParams, FeedService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQueryParams {
    pub category_id: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(default)]
    pub fresh: bool,
}

pub async fn get_feed(
    query: web::Query<FeedQueryParams>,
    service: web::Data<FeedService>,
) -> Result<HttpResponse> {
    let response = service
        .feed(FeedParams {
            category_id: query.category_id,
            page: query.page,
            limit: query.limit,
            fresh: query.fresh,
        })
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
