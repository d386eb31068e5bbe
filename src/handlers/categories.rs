/// Category handler
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::services::CategoryService;

pub async fn list_categories(service: web::Data<CategoryService>) -> Result<HttpResponse> {
    let categories = service.list().await?;
    Ok(HttpResponse::Ok().json(categories))
}
