#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the earthquake map.
//!
//! On startup the server acquires the feed once, in the background, and
//! composes the map. Until that finishes the page and the view model
//! answer `503`; afterwards they are served from memory. A failed fetch is
//! logged and leaves the map unbuilt: there is no retry.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use quake_map_feed::selection::resolve_feed_url;
use quake_map_map::MapState;

/// Shared application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// The composed map, once built.
    pub map: MapState,
}

/// Server settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Feed to compose the map from.
    pub feed_url: String,
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT`, and the feed variables, falling back to
    /// `127.0.0.1:8080` and the weekly all-magnitude feed.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_feed_url(resolve_feed_url(None))
    }

    /// Reads `BIND_ADDR` and `PORT` from the environment and uses the
    /// given feed as-is.
    #[must_use]
    pub fn with_feed_url(feed_url: String) -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            bind_addr,
            port,
            feed_url,
        }
    }
}

/// Registers the routes on an app. Shared by [`run_server`] and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/view", web::get().to(handlers::view)),
    )
    .route("/", web::get().to(handlers::index));
}

/// Acquires the feed and completes `state`.
///
/// Failures are logged, not returned: the map simply stays unbuilt.
pub async fn build_map(state: &MapState, client: &reqwest::Client, feed_url: &str) {
    match quake_map_map::initialize(client, feed_url).await {
        Ok(view) => {
            if let Err(e) = state.complete(view) {
                log::error!("Failed to publish map: {e}");
            }
        }
        Err(e) => log::error!("Failed to build map from {feed_url}: {e}"),
    }
}

/// Starts the earthquake map server.
///
/// Spawns the one-time map build and starts the Actix-Web HTTP server.
/// This is a regular async function — the caller is responsible for
/// providing the async runtime (e.g. via `#[actix_web::main]`) and for
/// initializing logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP client cannot be created
/// or the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let client = quake_map_feed::client().map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState::default());

    let build_state = state.clone();
    let feed_url = config.feed_url.clone();
    actix_web::rt::spawn(async move {
        build_map(&build_state.map, &client, &feed_url).await;
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
