/// HTTP middleware for the tea-feed service
///
/// Provides caller identity extraction and Redis-backed fixed-window rate
/// limiting. The limiter core is separated from the actix `Transform`
/// plumbing so its window semantics can be exercised directly in tests.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpRequest};
use chrono::Utc;
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::cache::CounterStore;
use crate::config::RateLimitConfig;
use crate::error::AppError;

/// Route exempt from both identity checks and rate limiting.
pub const PUBLIC_ROUTE: &str = "/health";

/// Reserved bucket for unauthenticated traffic, so it shares one rate-limit
/// fate instead of an unbounded number of unique buckets.
pub const ANONYMOUS_IDENTITY: &str = "anonymous";

// =====================================================================
// Caller identity
// =====================================================================

/// Authenticated caller identity, delivered by the upstream auth layer as
/// the `X-User-Id` header.
#[derive(Debug, Clone)]
pub struct Identity(pub String);

fn identity_from_request(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("X-User-Id")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            identity_from_request(req)
                .map(Identity)
                .ok_or_else(|| ErrorUnauthorized("X-User-Id header required")),
        )
    }
}

// =====================================================================
// Rate limiting
// =====================================================================

/// Fixed-window limiter over the counter store.
///
/// Counter-store failures surface as `DependencyUnavailable` rather than
/// being swallowed into an allow or a reject; the only rejection the
/// limiter itself produces is an explicit over-limit.
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn CounterStore>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    fn window_key(&self, identity: &str, method: &str, path: &str, window_index: i64) -> String {
        format!("rl:{}:{}:{}:{}", method, path, identity, window_index)
    }

    /// Count this request against its (identity, route) window and reject
    /// it if the window maximum is exceeded. The Nth request (N == max) is
    /// allowed; the (N+1)th is rejected.
    pub async fn check(
        &self,
        identity: &str,
        method: &str,
        path: &str,
        now_seconds: i64,
    ) -> crate::error::Result<()> {
        let window_index = now_seconds / self.config.window_seconds as i64;
        let key = self.window_key(identity, method, path, window_index);

        // The +1 grace keeps the counter from expiring mid-window due to
        // clock rounding.
        let count = self
            .store
            .incr_and_expire(&key, self.config.window_seconds + 1)
            .await?;

        if count > i64::from(self.config.max_requests) {
            return Err(AppError::RateLimited);
        }

        Ok(())
    }
}

/// Actix middleware applying the limiter to every non-public route.
pub struct RateLimitMiddleware {
    limiter: Arc<RateLimiter>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let limiter = self.limiter.clone();

        Box::pin(async move {
            if req.path() == PUBLIC_ROUTE {
                return service.call(req).await;
            }

            let identity = identity_from_request(req.request())
                .unwrap_or_else(|| ANONYMOUS_IDENTITY.to_string());
            let method = req.method().to_string();
            let path = req.path().to_string();

            limiter
                .check(&identity, &method, &path, Utc::now().timestamp())
                .await?;

            service.call(req).await
        })
    }
}
