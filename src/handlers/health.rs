/// Health check endpoint
///
/// Pings both backing stores and reports per-dependency state. The route
/// is public and bypasses the rate limiter.
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;

use crate::cache::CounterStore;

pub struct HealthState {
    pool: PgPool,
    counter: Arc<dyn CounterStore>,
}

impl HealthState {
    pub fn new(pool: PgPool, counter: Arc<dyn CounterStore>) -> Self {
        Self { pool, counter }
    }

    async fn check_database(&self) -> bool {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok()
    }

    async fn check_counter_store(&self) -> bool {
        self.counter.ping().await.is_ok()
    }
}

pub async fn health_check(state: web::Data<HealthState>) -> HttpResponse {
    let database = state.check_database().await;
    let redis = state.check_counter_store().await;

    let body = serde_json::json!({
        "status": if database && redis { "ok" } else { "error" },
        "database": if database { "up" } else { "down" },
        "redis": if redis { "up" } else { "down" },
    });

    if database && redis {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
