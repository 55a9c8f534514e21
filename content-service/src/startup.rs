//! Application startup and lifecycle management.

use crate::config::{ContentConfig, ProviderKind};
use crate::handlers;
use crate::services::providers::groq::{GroqConfig, GroqProvider};
use crate::services::providers::mock::MockChatProvider;
use crate::services::providers::ChatProvider;
use crate::services::{metrics, ContentDb, ContentGenerator, GenerationStore};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ContentGenerator>,
    /// Present when persistence is configured; used for health probes.
    pub db: Option<ContentDb>,
}

impl AppState {
    pub fn new(generator: ContentGenerator, db: Option<ContentDb>) -> Self {
        Self {
            generator: Arc::new(generator),
            db,
        }
    }
}

/// Build the HTTP router for the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/generate_content", post(handlers::generate_content))
        .route("/generations", get(handlers::list_generations))
        .route(
            "/generations/:id",
            get(handlers::get_generation).delete(handlers::delete_generation),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build the configured chat provider.
pub fn build_provider(config: &ContentConfig) -> Result<Arc<dyn ChatProvider>, AppError> {
    let provider: Arc<dyn ChatProvider> = match config.llm.provider {
        ProviderKind::Groq => Arc::new(
            GroqProvider::new(GroqConfig {
                api_key: config.llm.api_key.clone(),
                base_url: config.llm.base_url.clone(),
            })
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e.to_string())))?,
        ),
        ProviderKind::Mock => Arc::new(MockChatProvider::new(true)),
    };

    tracing::info!(
        provider = provider.name(),
        model = %config.llm.model,
        "Initialized chat provider"
    );

    Ok(provider)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ContentConfig) -> Result<Self, AppError> {
        metrics::init_metrics();

        let db = match &config.mongodb {
            Some(mongo) => {
                let db = ContentDb::connect(&mongo.uri, &mongo.database)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to connect to MongoDB: {}", e);
                        e
                    })?;

                db.initialize_indexes().await.map_err(|e| {
                    tracing::error!("Failed to initialize database indexes: {}", e);
                    e
                })?;

                Some(db)
            }
            None => {
                tracing::warn!("MONGODB_URI not set; generated content will not be persisted");
                None
            }
        };

        let provider = build_provider(&config)?;
        let store = db
            .clone()
            .map(|db| Arc::new(db) as Arc<dyn GenerationStore>);
        let generator = ContentGenerator::new(provider, store, config.llm.model.clone());

        let state = AppState::new(generator, db);

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Content service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
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
