/// Post handlers - create, read, like and dislike
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::Identity;
use crate::models::{DislikeResponse, LikeResponse};
use crate::services::PostService;

const TITLE_MAX_CHARS: usize = 160;
const CONTENT_MAX_CHARS: usize = 2000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub category_id: Uuid,
    pub title: String,
    pub content: String,
}

fn validate_length(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(AppError::Validation(format!(
            "{} must be between 1 and {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Create a new post
pub async fn create_post(
    identity: Identity,
    service: web::Data<PostService>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    validate_length("title", &req.title, TITLE_MAX_CHARS)?;
    validate_length("content", &req.content, CONTENT_MAX_CHARS)?;

    let post = service
        .create_post(&identity.0, req.category_id, &req.title, &req.content)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID
pub async fn get_post(
    service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.get_post(*post_id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Err(AppError::NotFound("post not found".to_string())),
    }
}

/// Like a post
pub async fn like_post(
    identity: Identity,
    service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let liked = service.like(&identity.0, *post_id).await?;
    Ok(HttpResponse::Ok().json(LikeResponse { ok: true, liked }))
}

/// Remove a like from a post
pub async fn dislike_post(
    identity: Identity,
    service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let disliked = service.dislike(&identity.0, *post_id).await?;
    Ok(HttpResponse::Ok().json(DislikeResponse { ok: true, disliked }))
}
