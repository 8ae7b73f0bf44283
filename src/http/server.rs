//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, CORS)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::io;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    routing::{any, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

use crate::config::ProxyConfig;
use crate::http::middleware::track_metrics;
use crate::http::request::RequestIdExt;
use crate::http::{auth, download, hubs};
use crate::lifecycle::shutdown;
use crate::upstream::{build_http_client, ApsClient, DownloadClient, UpstreamResult};

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub aps: ApsClient,
    pub download: DownloadClient,
}

impl AppState {
    /// Build both outbound clients over one shared connection pool.
    pub fn from_config(config: &ProxyConfig) -> UpstreamResult<Self> {
        let http = build_http_client(config)?;
        Ok(Self {
            aps: ApsClient::new(http.clone(), &config.upstream)?,
            download: DownloadClient::new(http, &config.download)?,
        })
    }
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> UpstreamResult<Self> {
        let state = AppState::from_config(&config)?;
        let router = build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Run the server until `shutdown_rx` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            download = %self.config.download.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::recv(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request.request_id().unwrap_or("-"),
    )
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ProxyConfig, state: AppState) -> Router {
    let mut router = Router::new()
        .route("/auth", post(auth::authenticate))
        .route("/hubs", get(hubs::list_hubs))
        .route("/projects", any(hubs::deprecated_projects))
        .route("/hubs/{hub_id}/projects", get(hubs::list_projects))
        .route(
            "/hubs/{hub_id}/projects/{project_id}/topFolders",
            get(hubs::top_folder_contents),
        )
        .route("/proxy/download", post(download::proxy_download))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
        // `max_body_size` is the only limit; axum's 2 MiB extractor cap is off.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size));

    if let Some(timeout) = config.timeouts.request() {
        router = router.layer(TimeoutLayer::new(timeout));
    }

    router = router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    if config.security.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
