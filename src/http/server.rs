//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Build the decode router from config and share it with handlers
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::DecoderConfig;
use crate::decode::{
    DecodeRouter, EndpointError, ProviderCredential, ProviderEndpoints, ReqwestTransport,
    TransportError,
};
use crate::http::handlers;
use crate::http::request::request_span;
use crate::lifecycle::shutdown_signal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub decoder: Arc<DecodeRouter>,
}

/// Errors building the server from configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid provider URL: {0}")]
    Endpoint(#[from] EndpointError),

    #[error("HTTP client: {0}")]
    Transport(#[from] TransportError),
}

/// HTTP server for the decoder.
pub struct HttpServer {
    router: Router,
    config: DecoderConfig,
}

impl HttpServer {
    /// Create a server that talks to the configured upstreams over HTTP.
    pub fn new(config: DecoderConfig) -> Result<Self, ServerError> {
        let transport = ReqwestTransport::new(&config.timeouts)?
            .with_response_limit(config.providers.max_response_bytes);
        let endpoints = ProviderEndpoints::from_config(&config.providers)?;
        let credential = ProviderCredential::new(config.providers.api_key.clone());

        let decoder = DecodeRouter::new(Arc::new(transport), endpoints, credential);
        Ok(Self::with_decoder(config, decoder))
    }

    /// Create a server around an existing decode router.
    pub fn with_decoder(config: DecoderConfig, decoder: DecodeRouter) -> Self {
        let state = AppState {
            decoder: Arc::new(decoder),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DecoderConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .route("/", get(handlers::index))
            .route("/health", get(handlers::health))
            .route("/decode", post(handlers::decode))
            .route("/decode/vehicle", post(handlers::decode_vehicle))
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires or the process is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// The fully layered router, for in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }
}
