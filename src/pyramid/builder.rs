//! Tier derivation for Zoomify image pyramids.
//!
//! A Zoomify pyramid is never read from the server: it is fully determined by
//! the full-resolution image size and the tile size. Starting from the full
//! image, both dimensions are halved (floor division) until the image fits in
//! a single tile. The resulting tiers are then reversed so that tier 0 is the
//! smallest (most zoomed-out) image and the last tier is full resolution.
//!
//! ```text
//! tier 0   ┌──┐                 both dimensions <= tile size
//! tier 1   ┌────┐
//!   ...
//! tier N-1 ┌────────────────┐   full resolution
//! ```

use tracing::debug;

use crate::error::ConfigurationError;
use crate::format::TileSourceOptions;

// =============================================================================
// Constants
// =============================================================================

/// Tile size used when a descriptor does not specify one.
pub const DEFAULT_TILE_SIZE: u32 = 256;

// =============================================================================
// Tier
// =============================================================================

/// Geometry of a single pyramid tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    /// Tier index (0 = lowest resolution)
    pub index: usize,

    /// Image width at this tier in pixels
    pub width: u32,

    /// Image height at this tier in pixels
    pub height: u32,

    /// Number of tiles in X direction
    pub tiles_x: u32,

    /// Number of tiles in Y direction
    pub tiles_y: u32,

    /// Number of tiles in all tiers below this one
    pub tile_count_up_to_tier: u64,
}

impl Tier {
    /// Number of tiles covering this tier.
    pub fn tile_count(&self) -> u64 {
        self.tiles_x as u64 * self.tiles_y as u64
    }
}

// =============================================================================
// Pyramid
// =============================================================================

/// Precomputed geometry of a Zoomify image pyramid.
///
/// Built once from the image size, tile size and tiles URL, and never mutated
/// afterwards. All tables are indexed by tier, tier 0 being the lowest
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pyramid {
    /// Full-resolution image width in pixels
    width: u32,

    /// Full-resolution image height in pixels
    height: u32,

    /// Edge length of every non-edge tile in pixels
    tile_size: u32,

    /// Absolute URL prefix for tile files, always ending in `/`
    base_url: String,

    /// (width, height) in pixels per tier
    tier_image_size: Vec<(u32, u32)>,

    /// (tiles_x, tiles_y) per tier
    tier_size_in_tiles: Vec<(u32, u32)>,

    /// Tile count of all tiers strictly below each tier
    tile_count_up_to_tier: Vec<u64>,
}

impl Pyramid {
    /// Build the pyramid for an image.
    ///
    /// A `tile_size` of 0 means "unspecified" and falls back to
    /// [`DEFAULT_TILE_SIZE`].
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::MissingField`] if `width` or `height` is zero or
    ///   `base_url` is empty
    /// - [`ConfigurationError::TooManyTiles`] if the pyramid holds more than
    ///   `u64::MAX` tiles
    pub fn new(
        width: u32,
        height: u32,
        tile_size: u32,
        base_url: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let base_url = base_url.into();

        if width == 0 {
            return Err(ConfigurationError::MissingField("width"));
        }
        if height == 0 {
            return Err(ConfigurationError::MissingField("height"));
        }
        if base_url.is_empty() {
            return Err(ConfigurationError::MissingField("tilesUrl"));
        }

        let tile_size = if tile_size == 0 {
            DEFAULT_TILE_SIZE
        } else {
            tile_size
        };

        let (tier_image_size, tier_size_in_tiles) = derive_tiers(width, height, tile_size);
        let tile_count_up_to_tier = count_tiles_up_to_tier(&tier_size_in_tiles).ok_or(
            ConfigurationError::TooManyTiles {
                width,
                height,
                tile_size,
            },
        )?;

        debug!(
            width,
            height,
            tile_size,
            tiers = tier_image_size.len(),
            "Built Zoomify pyramid"
        );

        Ok(Self {
            width,
            height,
            tile_size,
            base_url,
            tier_image_size,
            tier_size_in_tiles,
            tile_count_up_to_tier,
        })
    }

    /// Build the pyramid from resolved tile source options.
    pub fn from_options(options: &TileSourceOptions) -> Result<Self, ConfigurationError> {
        let width = options
            .width
            .ok_or(ConfigurationError::MissingField("width"))?;
        let height = options
            .height
            .ok_or(ConfigurationError::MissingField("height"))?;
        let base_url = options
            .tiles_url
            .clone()
            .ok_or(ConfigurationError::MissingField("tilesUrl"))?;

        Self::new(width, height, options.tile_size.unwrap_or(0), base_url)
    }

    /// Assemble a pyramid from explicit tier tables, lowest resolution first.
    #[cfg(test)]
    pub(crate) fn from_tables(
        tile_size: u32,
        base_url: &str,
        tier_image_size: Vec<(u32, u32)>,
        tier_size_in_tiles: Vec<(u32, u32)>,
    ) -> Self {
        let (width, height) = tier_image_size.last().copied().unwrap_or((0, 0));
        let tile_count_up_to_tier =
            count_tiles_up_to_tier(&tier_size_in_tiles).expect("tile counts fit in u64");

        Self {
            width,
            height,
            tile_size,
            base_url: base_url.to_string(),
            tier_image_size,
            tier_size_in_tiles,
            tile_count_up_to_tier,
        }
    }

    /// Full-resolution image dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Tile edge length in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Absolute URL prefix under which the tile groups live.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of tiers in the pyramid.
    pub fn number_of_tiers(&self) -> usize {
        self.tier_size_in_tiles.len()
    }

    /// Highest external (1-based) level a viewer may request.
    pub fn max_level(&self) -> usize {
        self.number_of_tiers()
    }

    /// Image size per tier, lowest resolution first.
    pub fn tier_image_size(&self) -> &[(u32, u32)] {
        &self.tier_image_size
    }

    /// Tile grid size per tier, lowest resolution first.
    pub fn tier_size_in_tiles(&self) -> &[(u32, u32)] {
        &self.tier_size_in_tiles
    }

    /// Tile count of all tiers strictly below each tier.
    pub fn tile_count_up_to_tier(&self) -> &[u64] {
        &self.tile_count_up_to_tier
    }

    /// Get the geometry of a tier, or None if the tier does not exist.
    pub fn tier(&self, index: usize) -> Option<Tier> {
        let (width, height) = *self.tier_image_size.get(index)?;
        let (tiles_x, tiles_y) = self.tier_size_in_tiles[index];

        Some(Tier {
            index,
            width,
            height,
            tiles_x,
            tiles_y,
            tile_count_up_to_tier: self.tile_count_up_to_tier[index],
        })
    }

    /// Iterate over all tiers, lowest resolution first.
    pub fn tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        (0..self.number_of_tiers()).filter_map(|index| self.tier(index))
    }

    /// Total number of tiles in the pyramid.
    ///
    /// This is the `NUMTILES` value of the image properties descriptor.
    pub fn total_tiles(&self) -> u64 {
        self.tiers()
            .last()
            .map(|tier| tier.tile_count_up_to_tier + tier.tile_count())
            .unwrap_or(0)
    }
}

// =============================================================================
// Tier Derivation
// =============================================================================

/// Number of tiles needed to cover `pixels` with tiles of `tile_size`.
fn tiles_for(pixels: u32, tile_size: u32) -> u32 {
    pixels.div_ceil(tile_size)
}

/// Derive tier image sizes and tile grids, lowest resolution first.
fn derive_tiers(width: u32, height: u32, tile_size: u32) -> (Vec<(u32, u32)>, Vec<(u32, u32)>) {
    let mut size = (width, height);
    let mut image_sizes = vec![size];
    let mut tile_grids = vec![(tiles_for(size.0, tile_size), tiles_for(size.1, tile_size))];

    while size.0 > tile_size || size.1 > tile_size {
        size = (size.0 / 2, size.1 / 2);
        image_sizes.push(size);
        tile_grids.push((tiles_for(size.0, tile_size), tiles_for(size.1, tile_size)));
    }

    image_sizes.reverse();
    tile_grids.reverse();

    (image_sizes, tile_grids)
}

/// Running prefix sum of tile counts, seeded with 0.
///
/// Returns `None` when the pyramid-wide tile count, last tier included,
/// does not fit in a `u64`.
fn count_tiles_up_to_tier(tile_grids: &[(u32, u32)]) -> Option<Vec<u64>> {
    let mut counts = Vec::with_capacity(tile_grids.len());
    let mut total = 0u64;

    for &(tiles_x, tiles_y) in tile_grids {
        counts.push(total);
        total = total.checked_add(tiles_x as u64 * tiles_y as u64)?;
    }

    Some(counts)
}

// =============================================================================
// Tests
// =============================================================================
