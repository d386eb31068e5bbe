/// Configuration management for the tea-feed service
///
/// Configuration is loaded from environment variables with typed defaults.
/// Invalid values fail startup rather than being silently replaced.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Cache (Redis) configuration
    pub cache: CacheConfig,
    /// Rate limiter configuration
    pub rate_limit: RateLimitConfig,
    /// Feed scoring configuration
    pub feed: FeedConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Cache (Redis) configuration and per-resource TTLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis URL
    pub url: String,
    /// TTL for single-post entries
    pub post_ttl_secs: u64,
    /// TTL for feed-page entries
    pub feed_ttl_secs: u64,
    /// TTL for the category list entry
    pub categories_ttl_secs: u64,
}

/// Fixed-window rate limiter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per window per (client, route)
    pub max_requests: u32,
    /// Window length in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_seconds: 60,
        }
    }
}

/// Feed scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Half-life in hours used when freshness ranking is requested
    pub half_life_hours: f64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("TEA_FEED_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("TEA_FEED_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/tea_feed".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            cache: CacheConfig {
                url: std::env::var("REDIS_URL")
                    .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
                post_ttl_secs: parse_env_or_default("CACHE_POST_TTL_SECS", 300)?,
                feed_ttl_secs: parse_env_or_default("CACHE_FEED_TTL_SECS", 60)?,
                categories_ttl_secs: parse_env_or_default("CACHE_CATEGORIES_TTL_SECS", 300)?,
            },
            rate_limit: RateLimitConfig {
                max_requests: parse_env_or_default("RATE_LIMIT_MAX_REQUESTS", 100)?,
                window_seconds: parse_env_or_default("RATE_LIMIT_WINDOW_SECONDS", 60)?,
            },
            feed: FeedConfig {
                half_life_hours: parse_env_or_default("FEED_HALF_LIFE_HOURS", 24.0)?,
            },
        })
    }
}

fn parse_env_or_default<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}
