//! Zoomify pyramid geometry and tile addressing.
//!
//! This is the arithmetic core of the crate:
//!
//! - [`Pyramid`]: tier tables derived from the image and tile sizes
//! - [`Pyramid::tile_url`]: maps a viewer's (level, x, y) request to the URL of
//!   the JPEG tile in the server's `TileGroup` layout

mod address;
mod builder;

pub use address::TILES_PER_GROUP;
pub use builder::{Pyramid, Tier, DEFAULT_TILE_SIZE};
