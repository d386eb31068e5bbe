use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tea_feed::cache::{ContentCache, CounterStore, RedisCounterStore};
use tea_feed::db::{PersistentStore, PgStore};
use tea_feed::handlers::{self, HealthState};
use tea_feed::middleware::{RateLimitMiddleware, RateLimiter};
use tea_feed::services::{CategoryService, FeedService, PostService};
use tea_feed::Config;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting tea-feed v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("failed to connect to Postgres")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    tracing::info!("Connected to database");

    let counter_store: Arc<dyn CounterStore> = Arc::new(
        RedisCounterStore::connect(&config.cache.url)
            .await
            .context("failed to initialize Redis connection")?,
    );

    tracing::info!("Connected to Redis");

    let store: Arc<dyn PersistentStore> = Arc::new(PgStore::new(pool.clone()));
    let cache = Arc::new(ContentCache::new(
        counter_store.clone(),
        config.cache.post_ttl_secs,
        config.cache.feed_ttl_secs,
        config.cache.categories_ttl_secs,
    ));

    let post_service = web::Data::new(PostService::new(store.clone(), cache.clone()));
    let feed_service = web::Data::new(FeedService::new(
        store.clone(),
        cache.clone(),
        config.feed.half_life_hours,
    ));
    let category_service = web::Data::new(CategoryService::new(store.clone(), cache.clone()));
    let health_state = web::Data::new(HealthState::new(pool.clone(), counter_store.clone()));

    let rate_limiter = Arc::new(RateLimiter::new(
        counter_store.clone(),
        config.rate_limit.clone(),
    ));

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(post_service.clone())
            .app_data(feed_service.clone())
            .app_data(category_service.clone())
            .app_data(health_state.clone())
            .wrap(RateLimitMiddleware::new(rate_limiter.clone()))
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(cors)
            .route("/health", web::get().to(handlers::health_check))
            .route("/categories", web::get().to(handlers::list_categories))
            .route("/feed", web::get().to(handlers::get_feed))
            .service(
                web::scope("/posts")
                    .service(web::resource("").route(web::post().to(handlers::create_post)))
                    .service(
                        web::resource("/{post_id}").route(web::get().to(handlers::get_post)),
                    )
                    .service(
                        web::resource("/{post_id}/like")
                            .route(web::post().to(handlers::like_post)),
                    )
                    .service(
                        web::resource("/{post_id}/dislike")
                            .route(web::post().to(handlers::dislike_post)),
                    ),
            )
    })
    .bind(&bind_address)?
    .run()
    .await?;

    tracing::info!("tea-feed shutting down");
    pool.close().await;

    Ok(())
}
