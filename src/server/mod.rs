//! HTTP tile address service.
//!
//! Publishes a pyramid's descriptor and redirects tile requests to the
//! Zoomify tile server. No image data passes through this service.
//!
//! ```text
//! ┌──────────┐  GET /tiles/3/1/2.jpg   ┌──────────────┐
//! │  Viewer  │ ──────────────────────► │   handlers   │
//! │          │ ◄────────────────────── │  (Pyramid)   │
//! └──────────┘  302 Location:          └──────────────┘
//!       │       <base>TileGroup0/2-1-2.jpg
//!       ▼
//! ┌──────────────────┐
//! │ Zoomify tile host│
//! └──────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    health_handler, image_properties_handler, pyramid_handler, thumbnail_handler, tile_handler,
    AppState, ErrorResponse, HealthResponse, PyramidMetadataResponse, TierMetadataResponse,
    TilePathParams,
};
pub use routes::{create_router, CorsOrigins, RouterConfig};
