//! # zoomify-tiles
//!
//! Tile addressing for Zoomify image pyramids.
//!
//! A Zoomify pyramid stores an image as a stack of tiers. Each tier halves the
//! one above it until the whole image fits in a single tile, and tiles are
//! filed in `TileGroup{n}` directories of 256 tiles each. This library derives
//! the tier tables from the image size and maps a viewer's `(level, x, y)`
//! request to the tile's URL.
//!
//! ## Features
//!
//! - **Two configuration forms**: `ImageProperties.xml` descriptors and JSON objects
//! - **Relative URLs**: resolved against an explicit origin
//! - **Pluggable formats**: tile source registry selecting the first matching format
//! - **HTTP service**: descriptor, tier metadata and tile redirects over axum
//!
//! ## Architecture
//!
//! - [`pyramid`] - Tier tables and tile address arithmetic
//! - [`mod@format`] - Configuration parsing, base URL resolution, descriptor output
//! - [`source`] - Tile source traits and registry
//! - [`server`] - Axum-based HTTP service
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust
//! use zoomify_tiles::format::SourceData;
//! use zoomify_tiles::source::ZoomifyFormat;
//!
//! let data = SourceData::parse(
//!     r#"<IMAGE_PROPERTIES WIDTH="5569" HEIGHT="7938" NUMTILES="945" TILESIZE="256"/>"#,
//! );
//! let pyramid = ZoomifyFormat
//!     .load(&data, Some("http://host/img/ImageProperties.xml"), None)
//!     .unwrap();
//!
//! assert_eq!(pyramid.number_of_tiers(), 6);
//! assert_eq!(
//!     pyramid.tile_url(6, 15, 0),
//!     "http://host/img/TileGroup1/5-15-0.jpg"
//! );
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod pyramid;
pub mod server;
pub mod source;

// Re-export commonly used types
pub use config::{Cli, Command, InfoConfig, PropertiesConfig, ServeConfig, SourceArgs, UrlConfig};
pub use error::{AddressError, ConfigurationError, FormatError, TileSourceError};
pub use format::{
    configure, generate_image_properties_xml, is_zoomify, resolve_base_url, MarkupDocument,
    SourceData, TileSourceOptions,
};
pub use pyramid::{Pyramid, Tier, DEFAULT_TILE_SIZE, TILES_PER_GROUP};
pub use server::{create_router, AppState, RouterConfig};
pub use source::{TileSource, TileSourceFormat, TileSourceRegistry, ZoomifyFormat};
