//! Structured tile source configuration.
//!
//! Both configuration forms (a JSON object and an `IMAGE_PROPERTIES`
//! descriptor) are normalized into [`TileSourceOptions`]. Values are carried
//! through as given; required fields are only enforced when the pyramid is
//! built.
//!
//! # Example
//!
//! ```json
//! {
//!     "type": "zoomify",
//!     "width": 6000,
//!     "height": 4000,
//!     "tileSize": 256,
//!     "tilesUrl": "http://host/img/"
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::FormatError;

/// Configuration sufficient to build a tile source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSourceOptions {
    /// Full-resolution image width in pixels
    #[serde(default, deserialize_with = "lenient_u32")]
    pub width: Option<u32>,

    /// Full-resolution image height in pixels
    #[serde(default, deserialize_with = "lenient_u32")]
    pub height: Option<u32>,

    /// Tile edge length in pixels (256 when unset)
    #[serde(default, deserialize_with = "lenient_u32")]
    pub tile_size: Option<u32>,

    /// URL prefix under which the tile groups live
    #[serde(default, alias = "baseUrl")]
    pub tiles_url: Option<String>,
}

impl TileSourceOptions {
    /// Read options from a JSON object.
    ///
    /// Unknown fields (such as `type`) are ignored. Sizes may be given as
    /// numbers or numeric strings.
    pub fn from_value(value: &Value) -> Result<Self, FormatError> {
        Self::deserialize(value).map_err(|e| FormatError::InvalidObject(e.to_string()))
    }

    /// Replace the tiles URL.
    pub fn with_tiles_url(mut self, tiles_url: impl Into<String>) -> Self {
        self.tiles_url = Some(tiles_url.into());
        self
    }
}

/// Sizes as they appear in the wild: numbers, numeric strings, or null.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Integer(u64),
    Float(f64),
    Text(String),
    Other(Value),
}

/// Blank strings count as absent. Floats are accepted when integral.
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let invalid = |shown: &dyn std::fmt::Display| {
        D::Error::custom(format!("expected an unsigned integer, got '{shown}'"))
    };

    let value = match Option::<LenientNumber>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(LenientNumber::Integer(n)) => u32::try_from(n).map_err(|_| invalid(&n))?,
        Some(LenientNumber::Float(f)) => {
            if f.fract() != 0.0 || f < 0.0 || f > u32::MAX as f64 {
                return Err(invalid(&f));
            }
            f as u32
        }
        Some(LenientNumber::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<u32>().map_err(|_| invalid(&text))?
        }
        Some(LenientNumber::Other(other)) => return Err(invalid(&other)),
    };

    Ok(Some(value))
}
