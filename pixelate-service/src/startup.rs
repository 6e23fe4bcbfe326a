//! Application startup and lifecycle management.

use crate::config::PixelateConfig;
use crate::handlers;
use crate::services::providers::azure::AzureImageProvider;
use crate::services::providers::ImageEditProvider;
use crate::services::{ConversionGateway, MultipartUploadReceiver, UploadReceiver};
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use service_core::error::AppError;
use service_core::middleware::{http_request_span, request_id_middleware};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ConversionGateway>,
    pub uploads: Arc<dyn UploadReceiver>,
}

pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let body_limit = state.uploads.body_limit();

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route(
            "/api/pixelate",
            post(handlers::pixelate).layer(DefaultBodyLimit::max(body_limit)),
        )
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(http_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application against the configured Azure deployment.
    pub async fn build(config: PixelateConfig) -> Result<Self, AppError> {
        let provider = AzureImageProvider::new().map_err(|e| {
            tracing::error!("Failed to initialize image edit provider: {}", e);
            AppError::InternalError(e.into())
        })?;

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application with an explicit upstream provider.
    pub async fn build_with_provider(
        config: PixelateConfig,
        provider: Arc<dyn ImageEditProvider>,
    ) -> Result<Self, AppError> {
        let gateway = ConversionGateway::new(config.gateway.clone(), config.prompt.clone(), provider);
        let uploads = MultipartUploadReceiver::new(&config.upload);

        tracing::info!(
            deployment = %config.gateway.deployment,
            api_version = %config.gateway.api_version,
            configured = config.gateway.is_configured(),
            max_upload_bytes = config.upload.max_bytes,
            max_concurrent_upstream = ?config.gateway.max_concurrent_requests,
            static_dir = %config.static_dir.display(),
            "Initialized conversion gateway"
        );

        let state = AppState {
            gateway: Arc::new(gateway),
            uploads: Arc::new(uploads),
        };
        let router = build_router(state, &config.static_dir);

        // Port 0 binds a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
