//! Tile source abstraction.
//!
//! Viewers discover how to address an image by probing each known format with
//! the raw configuration they fetched. This module defines the two sides of
//! that contract:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          TileSourceRegistry             │
//! │   (first format whose supports() is     │
//! │    true configures and opens)           │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │        TileSourceFormat Trait           │
//! │   supports / configure / open           │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           TileSource Trait              │
//! │   tile_url(level, x, y)                 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! [`ZoomifyFormat`] is the only built-in format.

mod registry;
mod zoomify;

use std::sync::Arc;

use crate::error::TileSourceError;
use crate::format::{SourceData, TileSourceOptions};

pub use registry::TileSourceRegistry;
pub use zoomify::ZoomifyFormat;

/// An opened tile source that maps tile requests to URLs.
pub trait TileSource: Send + Sync {
    /// URL of the tile at external `level` and tile coordinates `(x, y)`.
    ///
    /// Coordinates are not range-checked.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `level` is greater than
    /// [`TileSource::max_level`]; callers check the level first.
    fn tile_url(&self, level: usize, x: u32, y: u32) -> String;

    /// Full-resolution image dimensions.
    fn dimensions(&self) -> (u32, u32);

    /// Tile edge length in pixels.
    fn tile_size(&self) -> u32;

    /// Highest external level a viewer may request.
    fn max_level(&self) -> usize;
}

/// A tile source format that can be recognized, configured and opened.
pub trait TileSourceFormat: Send + Sync {
    /// Human-readable format name.
    fn name(&self) -> &'static str;

    /// Check whether raw configuration (and the URL it came from) describes
    /// an image in this format.
    fn supports(&self, data: &SourceData, url: Option<&str>) -> bool;

    /// Normalize raw configuration into options for [`TileSourceFormat::open`].
    fn configure(
        &self,
        data: &SourceData,
        url: Option<&str>,
        origin: Option<&str>,
    ) -> Result<TileSourceOptions, TileSourceError>;

    /// Build a tile source from configured options.
    fn open(&self, options: &TileSourceOptions) -> Result<Arc<dyn TileSource>, TileSourceError>;
}
