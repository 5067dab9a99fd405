//! Router configuration for the tile address service.
//!
//! # Route Structure
//!
//! ```text
//! /health                        - Health check
//! /ImageProperties.xml           - Zoomify descriptor
//! /pyramid                       - Tier metadata (JSON)
//! /tiles/{level}/{x}/{y}.jpg     - Redirect to tile URL
//! /thumbnail                     - Redirect to tier 0 tile
//! ```
//!
//! # Example
//!
//! ```ignore
//! use zoomify_tiles::pyramid::Pyramid;
//! use zoomify_tiles::server::{create_router, RouterConfig};
//!
//! let pyramid = Pyramid::new(6000, 4000, 256, "http://host/img/")?;
//! let router = create_router(pyramid, RouterConfig::default().with_cache_max_age(600));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use axum::{routing::get, Router};
use http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::handlers::{
    health_handler, image_properties_handler, pyramid_handler, thumbnail_handler, tile_handler,
    AppState,
};
use crate::config::DEFAULT_CACHE_MAX_AGE;
use crate::pyramid::Pyramid;

// =============================================================================
// Router Configuration
// =============================================================================

/// Origins allowed to read responses cross-origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorsOrigins {
    /// Any origin (`Access-Control-Allow-Origin: *`)
    #[default]
    Any,

    /// Only the listed origins; an empty list disables CORS
    Only(Vec<String>),
}

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub cors_origins: CorsOrigins,

    /// Cache-Control max-age in seconds for descriptors and redirects
    pub cache_max_age: u32,

    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cors_origins: CorsOrigins::Any,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            enable_tracing: true,
        }
    }
}

impl RouterConfig {
    /// Restrict cross-origin access to the given origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = CorsOrigins::Only(origins);
        self
    }

    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the application router for a pyramid.
pub fn create_router(pyramid: Pyramid, config: RouterConfig) -> Router {
    let app_state = AppState::with_cache_max_age(pyramid, config.cache_max_age);

    // {filename} captures both "{y}" and "{y}.jpg"
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/ImageProperties.xml", get(image_properties_handler))
        .route("/pyramid", get(pyramid_handler))
        .route("/tiles/{level}/{x}/{filename}", get(tile_handler))
        .route("/thumbnail", get(thumbnail_handler))
        .with_state(app_state)
        .layer(cors_layer(&config.cors_origins));

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer for read-only access.
///
/// `Location` is exposed so that viewers can read tile redirect targets.
/// Origins that are not valid header values are skipped with a warning.
fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD])
        .expose_headers([header::LOCATION]);

    match origins {
        CorsOrigins::Any => layer.allow_origin(Any),
        CorsOrigins::Only(list) if list.is_empty() => layer,
        CorsOrigins::Only(list) => {
            let allowed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(allowed)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
