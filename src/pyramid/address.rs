//! Tile addressing within a Zoomify pyramid.
//!
//! Zoomify servers store every tile of the pyramid in a flat sequence, tier by
//! tier (lowest resolution first) and row by row within a tier. The sequence
//! is split into directories of 256 tiles each:
//!
//! ```text
//! <base>/TileGroup0/0-0-0.jpg        flat index 0
//! <base>/TileGroup0/1-0-0.jpg        flat index 1
//!   ...
//! <base>/TileGroup1/4-3-7.jpg        flat index 256..511
//! ```
//!
//! File names carry the 0-based tier index, the column and the row.

use super::builder::Pyramid;

/// Number of tiles stored in each `TileGroup` directory.
pub const TILES_PER_GROUP: u64 = 256;

impl Pyramid {
    /// Convert an external 1-based level into a tier index.
    ///
    /// Levels 0 and 1 both map to tier 0.
    pub fn tier_for_level(level: usize) -> usize {
        level.saturating_sub(1)
    }

    /// Position of a tile in the pyramid-wide tile sequence.
    ///
    /// `tier` is the 0-based tier index. Coordinates are not range-checked;
    /// coordinates far outside the tile grid saturate at `u64::MAX`.
    ///
    /// # Panics
    ///
    /// Panics if `tier` is not a tier of this pyramid.
    pub fn flat_tile_index(&self, tier: usize, x: u32, y: u32) -> u64 {
        let (tiles_x, _) = self.tier_size_in_tiles()[tier];
        (y as u64 * tiles_x as u64)
            .saturating_add(x as u64)
            .saturating_add(self.tile_count_up_to_tier()[tier])
    }

    /// Tile group directory holding the tile with the given flat index.
    pub fn tile_group(flat_tile_index: u64) -> u64 {
        flat_tile_index / TILES_PER_GROUP
    }

    /// Number of `TileGroup` directories the pyramid spans.
    pub fn tile_group_count(&self) -> u64 {
        self.total_tiles().div_ceil(TILES_PER_GROUP)
    }

    /// URL of the JPEG tile at external `level` and tile coordinates `(x, y)`.
    ///
    /// The URL has the form `<base_url>TileGroup<N>/<tier>-<x>-<y>.jpg`.
    /// Callers are trusted to pass coordinates taken from this pyramid's own
    /// tile grid; out-of-range `x` or `y` produce an address that does not
    /// exist on the server rather than an error.
    ///
    /// # Panics
    ///
    /// Panics if `level` is greater than [`Pyramid::max_level`].
    pub fn tile_url(&self, level: usize, x: u32, y: u32) -> String {
        let tier = Self::tier_for_level(level);
        let group = Self::tile_group(self.flat_tile_index(tier, x, y));

        format!(
            "{}TileGroup{}/{}-{}-{}.jpg",
            self.base_url(),
            group,
            tier,
            x,
            y
        )
    }

    /// URL of the single tile covering the whole image at tier 0.
    pub fn thumbnail_url(&self) -> String {
        self.tile_url(1, 0, 0)
    }
}
