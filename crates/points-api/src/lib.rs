pub mod docs;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod router;

use std::net::SocketAddr;
use std::sync::Arc;
use std::{env, time::Duration};

use anyhow::Context;
use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::{KeyExtractor, SmartIpKeyExtractor};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use points_engine::{ExclusionSet, SeasonConfig};
use points_snapshot::{AllocationSource, SnapshotStore};

use docs::ApiDoc;
use router::api_router;

#[derive(Clone)]
pub struct AppState {
    pub store: SnapshotStore,
    pub source: Arc<dyn AllocationSource>,
    pub exclusions: Arc<ExclusionSet>,
    pub seasons: Arc<SeasonConfig>,
}

pub struct ApiService {
    state: AppState,
    host: String,
    port: u16,
}

impl ApiService {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state,
            host: host.to_owned(),
            port,
        }
    }

    pub async fn run(self, token: CancellationToken) -> anyhow::Result<()> {
        ApiDoc::generate_openapi_json("./".into())?;

        let address = format!("{}:{}", self.host, self.port);
        let socket_addr: SocketAddr = address.parse()?;
        let listener = TcpListener::bind(socket_addr).await?;

        // Env-based rate limiting configuration
        let limiter_enabled: bool = env::var("RATE_LIMIT_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);
        let per_second: u64 = env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);
        let burst_size: u32 = env::var("RATE_LIMIT_BURST_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        let cleanup_secs: u64 = env::var("RATE_LIMIT_CLEANUP_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);
        let timeout_secs: u64 = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let app = {
            let base = api_router::<ApiDoc>(self.state.clone())
                .with_state(self.state)
                .layer(TraceLayer::new_for_http());

            let base = if limiter_enabled {
                let governor_conf = GovernorConfigBuilder::default()
                    .per_second(per_second)
                    .burst_size(burst_size)
                    .key_extractor(SmartIpKeyExtractor)
                    .finish()
                    .context("failed to build governor config")?;

                let limiter = governor_conf.limiter().clone();

                // Periodic cleanup of the limiter's internal storage, with graceful shutdown.
                let limiter_cleanup = limiter.clone();
                let cleanup_token = token.clone();
                tokio::spawn(async move {
                    let mut ticker = tokio::time::interval(Duration::from_secs(cleanup_secs));
                    loop {
                        tokio::select! {
                            _ = ticker.tick() => {
                                tracing::debug!("rate limiting storage size: {}", limiter_cleanup.len());
                                limiter_cleanup.retain_recent();
                            }
                            () = cleanup_token.cancelled() => {
                                tracing::debug!("rate limiter cleanup task shutting down");
                                break;
                            }
                        }
                    }
                });

                base.layer(axum::middleware::from_fn(
                    move |request: Request, next: Next| {
                        let limiter = limiter.clone();
                        async move {
                            let key = SmartIpKeyExtractor.extract(&request).map_err(|e| {
                                tracing::warn!(error = ?e, "Failed to extract IP for rate limiting");
                                StatusCode::INTERNAL_SERVER_ERROR
                            })?;
                            if limiter.check_key(&key).is_err() {
                                tracing::warn!(key = ?key, "Rate limit exceeded");
                                return Err(StatusCode::TOO_MANY_REQUESTS);
                            }
                            Ok(next.run(request).await)
                        }
                    },
                ))
            } else {
                tracing::info!("rate limiter disabled via env");
                base
            };

            base.layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
                .layer(cors_layer_from_env())
        };

        tracing::info!("🧩 API started at http://{}", socket_addr);

        let shutdown = async move { token.cancelled().await };

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .context("😱 API server stopped!")
    }
}

fn cors_layer_from_env() -> CorsLayer {
    let Ok(origins) = env::var("CORS_ALLOWED_ORIGINS") else {
        tracing::info!("CORS_ALLOWED_ORIGINS not set; using permissive CORS configuration");
        return CorsLayer::permissive();
    };

    let allowed_origins: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|origin| {
            let trimmed = origin.trim();
            if trimmed.is_empty() {
                return None;
            }
            match HeaderValue::from_str(trimmed) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(
                        origin = trimmed,
                        error = %err,
                        "Invalid origin in CORS_ALLOWED_ORIGINS, skipping",
                    );
                    None
                }
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::warn!(
            "CORS_ALLOWED_ORIGINS was set but no valid origins were parsed; falling back to permissive CORS",
        );
        return CorsLayer::permissive();
    }

    tracing::info!(allowed = %origins, "Configured restricted CORS origins from environment");

    CorsLayer::new()
        .allow_headers(AllowHeaders::mirror_request())
        .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
        .allow_origin(AllowOrigin::list(allowed_origins))
}
