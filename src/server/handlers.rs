//! HTTP request handlers for the tile address service.
//!
//! The service never serves image data. It publishes the pyramid descriptor
//! and answers tile requests with a redirect to the tile's Zoomify URL.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /ImageProperties.xml` - Zoomify descriptor
//! - `GET /pyramid` - Tier metadata as JSON
//! - `GET /tiles/{level}/{x}/{y}.jpg` - Redirect to a tile
//! - `GET /thumbnail` - Redirect to the lowest-resolution tile

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AddressError;
use crate::format::generate_image_properties_xml;
use crate::pyramid::{Pyramid, Tier};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the pyramid.
#[derive(Clone)]
pub struct AppState {
    /// The pyramid whose tiles are addressed
    pub pyramid: Arc<Pyramid>,

    /// Cache-Control max-age in seconds (defaults to 1 hour)
    pub cache_max_age: u32,
}

impl AppState {
    /// Create a new application state for the given pyramid.
    pub fn new(pyramid: Pyramid) -> Self {
        Self::with_cache_max_age(pyramid, 3600)
    }

    /// Create a new application state with custom cache max-age.
    pub fn with_cache_max_age(pyramid: Pyramid, cache_max_age: u32) -> Self {
        Self {
            pyramid: Arc::new(pyramid),
            cache_max_age,
        }
    }

    fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age)
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Path parameters for tile requests.
///
/// Extracted from: `/tiles/{level}/{x}/{filename}`
/// where filename is `{y}` or `{y}.jpg`
#[derive(Debug, Deserialize)]
pub struct TilePathParams {
    /// External level (1 = lowest resolution, 0 is treated as 1)
    pub level: usize,

    /// Tile X coordinate (0-indexed from left)
    pub x: u32,

    /// Tile Y coordinate with optional .jpg extension (e.g., "0" or "0.jpg")
    pub filename: String,
}

impl TilePathParams {
    /// Parse the Y coordinate from the filename, stripping any .jpg extension.
    pub fn y(&self) -> Result<u32, std::num::ParseIntError> {
        let y_str = self.filename.strip_suffix(".jpg").unwrap_or(&self.filename);
        y_str.parse()
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "invalid_level")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Metadata for a single pyramid tier.
#[derive(Debug, Serialize)]
pub struct TierMetadataResponse {
    /// Tier index (0 = lowest resolution)
    pub tier: usize,

    /// Width of this tier in pixels
    pub width: u32,

    /// Height of this tier in pixels
    pub height: u32,

    /// Number of tiles in X direction
    pub tiles_x: u32,

    /// Number of tiles in Y direction
    pub tiles_y: u32,

    /// Number of tiles in all lower tiers
    pub tile_count_up_to_tier: u64,
}

impl From<Tier> for TierMetadataResponse {
    fn from(tier: Tier) -> Self {
        Self {
            tier: tier.index,
            width: tier.width,
            height: tier.height,
            tiles_x: tier.tiles_x,
            tiles_y: tier.tiles_y,
            tile_count_up_to_tier: tier.tile_count_up_to_tier,
        }
    }
}

/// Response from the pyramid metadata endpoint.
#[derive(Debug, Serialize)]
pub struct PyramidMetadataResponse {
    /// Width of the full-resolution image in pixels
    pub width: u32,

    /// Height of the full-resolution image in pixels
    pub height: u32,

    /// Tile edge length in pixels
    pub tile_size: u32,

    /// Number of tiers
    pub tier_count: usize,

    /// Total number of tiles across all tiers
    pub total_tiles: u64,

    /// URL prefix of the tile groups
    pub base_url: String,

    /// Metadata for each tier, lowest resolution first
    pub tiers: Vec<TierMetadataResponse>,
}

impl From<&Pyramid> for PyramidMetadataResponse {
    fn from(pyramid: &Pyramid) -> Self {
        let (width, height) = pyramid.dimensions();
        Self {
            width,
            height,
            tile_size: pyramid.tile_size(),
            tier_count: pyramid.number_of_tiers(),
            total_tiles: pyramid.total_tiles(),
            base_url: pyramid.base_url().to_string(),
            tiers: pyramid.tiers().map(TierMetadataResponse::from).collect(),
        }
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert AddressError to HTTP response.
///
/// Both variants are client errors and are logged at WARN level.
impl IntoResponse for AddressError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            AddressError::InvalidLevel { .. } => (StatusCode::BAD_REQUEST, "invalid_level"),
            AddressError::InvalidTileName { .. } => (StatusCode::BAD_REQUEST, "invalid_tile_name"),
        };
        let message = self.to_string();

        warn!(
            error_type = error_type,
            status = status.as_u16(),
            "Client error: {}",
            message
        );

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle health check requests.
///
/// `200 OK` with JSON body `{"status": "healthy", "version": "..."}`.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle descriptor requests.
///
/// # Endpoint
///
/// `GET /ImageProperties.xml`
///
/// # Response
///
/// `200 OK` with `Content-Type: application/xml`:
///
/// ```xml
/// <IMAGE_PROPERTIES WIDTH="5569" HEIGHT="7938" NUMTILES="945" NUMIMAGES="1" VERSION="1.8" TILESIZE="256"/>
/// ```
pub async fn image_properties_handler(State(state): State<AppState>) -> Response {
    let xml = generate_image_properties_xml(&state.pyramid);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/xml".to_string()),
            (header::CACHE_CONTROL, state.cache_control()),
        ],
        xml,
    )
        .into_response()
}

/// Handle pyramid metadata requests.
///
/// `GET /pyramid` returns the tier tables as JSON.
pub async fn pyramid_handler(State(state): State<AppState>) -> Json<PyramidMetadataResponse> {
    Json(PyramidMetadataResponse::from(state.pyramid.as_ref()))
}

/// Handle tile requests.
///
/// # Endpoint
///
/// `GET /tiles/{level}/{x}/{y}.jpg`
///
/// # Path Parameters
///
/// - `level`: External level, 1 to the pyramid's tier count (0 is treated as 1)
/// - `x`: Tile X coordinate
/// - `y`: Tile Y coordinate
///
/// # Response
///
/// - `302 Found`: `Location` points at the Zoomify tile URL
/// - `400 Bad Request`: Level above the pyramid's highest level, or unparseable y
///
/// Tile coordinates are not range-checked: requests outside the tier's tile
/// grid are redirected to an address the tile server does not have.
pub async fn tile_handler(
    State(state): State<AppState>,
    Path(params): Path<TilePathParams>,
) -> Result<Response, AddressError> {
    let y = params.y().map_err(|_| AddressError::InvalidTileName {
        filename: params.filename.clone(),
    })?;

    let max_level = state.pyramid.max_level();
    if params.level > max_level {
        return Err(AddressError::InvalidLevel {
            level: params.level,
            max_level,
        });
    }

    let url = state.pyramid.tile_url(params.level, params.x, y);
    debug!(level = params.level, x = params.x, y, url = %url, "Resolved tile address");

    Ok(redirect(url, state.cache_control()))
}

/// Handle thumbnail requests.
///
/// `GET /thumbnail` redirects to the single tile covering the whole image.
pub async fn thumbnail_handler(State(state): State<AppState>) -> Response {
    redirect(state.pyramid.thumbnail_url(), state.cache_control())
}

fn redirect(location: String, cache_control: String) -> Response {
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::CACHE_CONTROL, cache_control),
        ],
    )
        .into_response()
}

// =============================================================================
// Tests
// =============================================================================
