//! # SlotBook API
//!
//! The API crate provides the web server for the interview scheduling
//! service. It exposes the filtered slot list, slot selection and booking
//! confirmation over HTTP.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into operations on the shared [`SlotBoard`]
//! - **Middleware**: Error mapping shared by every endpoint
//! - **Config**: Environment-driven server and data source settings
//!
//! All slot state lives in one [`SlotBoard`] behind an async `RwLock`. The
//! initial load runs in the background right after the server starts; until
//! it finishes, slot endpoints answer `503`, and if it fails they answer
//! `502` until a reload succeeds.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use eyre::Result;
use slotbook_core::{
    board::SlotBoard,
    errors::{SlotError, SlotResult},
    models::booking::{BookingRequest, BookingResponse},
};
use slotbook_directory::{Directory, file::FileDirectory, http::HttpDirectory, load_all};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::{
    cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::config::{ApiConfig, DataSource};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Loaded data, derived slots and the active view
    pub board: RwLock<SlotBoard>,
    /// Source of candidates and engineers, and confirmer of bookings
    pub directory: Arc<dyn Directory>,
}

impl ApiState {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self {
            board: RwLock::new(SlotBoard::new()),
            directory,
        }
    }

    /// Fetches candidates and engineers and rebuilds the board.
    ///
    /// The board is marked loading for the duration of the fetch and ends up
    /// either ready or failed. The lock is not held while fetching.
    pub async fn reload(&self) {
        self.board.write().await.begin_loading();

        match load_all(self.directory.as_ref()).await {
            Ok((candidates, engineers)) => {
                self.board.write().await.load(candidates, engineers);
            }
            Err(err) => {
                self.board.write().await.fail(format!("{:#}", err));
            }
        }
    }

    /// Runs both booking phases for `request`.
    ///
    /// The remote confirmation and the settle step run on their own task, so
    /// a caller that goes away mid-request never strands the slot in
    /// `pending`.
    pub async fn book(self: &Arc<Self>, request: BookingRequest) -> SlotResult<BookingResponse> {
        let pending = self.board.write().await.begin_booking(request)?;

        let state = Arc::clone(self);
        let settle = tokio::spawn(async move {
            let outcome = state.directory.confirm_booking(&pending.request).await;
            state.board.write().await.settle_booking(pending, outcome)
        });

        settle
            .await
            .map_err(|err| SlotError::Internal(Box::new(err)))?
    }
}

/// Creates the directory described by `source`.
pub fn build_directory(source: &DataSource) -> Result<Arc<dyn Directory>> {
    let directory: Arc<dyn Directory> = match source {
        DataSource::Remote { url, timeout } => {
            info!(%url, ?timeout, "Using remote directory");
            Arc::new(HttpDirectory::new(url.clone(), *timeout)?)
        }
        DataSource::Local {
            dir,
            booking_latency,
        } => {
            info!(dir = %dir.display(), "Using local data directory");
            Arc::new(FileDirectory::new(dir.clone()).with_confirm_latency(*booking_latency))
        }
    };
    Ok(directory)
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Load status and reference data
        .merge(routes::directory::routes())
        // Slot list, view and selection
        .merge(routes::slots::routes())
        // Booking confirmation
        .merge(routes::bookings::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and directory
///
/// Initializes logging, kicks off the initial load in the background, and
/// serves until the listener fails.
pub async fn start_server(config: ApiConfig, directory: Arc<dyn Directory>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(directory));

    // Both fetches must finish before any slot exists
    let loader = Arc::clone(&state);
    tokio::spawn(async move {
        loader.reload().await;
    });

    let mut app = app(state);

    // Expose the mock data documents the way a static site would
    if let Some(dir) = config.served_data_dir() {
        app = app.nest_service("/data", ServeDir::new(dir));
    }

    // Apply CORS configuration if origins are specified
    if let Some(origins) = &config.cors_origins {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_origin(allowed);

        app = app.layer(cors);
    }

    // Request tracing and timeout
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
