//! Configuration resolution for Zoomify tile sources.
//!
//! Raw configuration comes in one of two shapes:
//!
//! - a JSON object, `{"type": "zoomify", "width": .., "height": .., "tileSize": .., "tilesUrl": ..}`
//! - an `ImageProperties.xml` descriptor
//!
//! [`configure`] normalizes either shape into [`TileSourceOptions`] with an
//! absolute, slash-terminated tiles URL.

use serde_json::Value;

use crate::error::TileSourceError;

use super::base_url::resolve_base_url;
use super::options::TileSourceOptions;
use super::properties::{options_from_markup, MarkupDocument};

/// Value of the `type` field identifying a Zoomify configuration object.
pub const ZOOMIFY_TYPE: &str = "zoomify";

// =============================================================================
// SourceData
// =============================================================================

/// Raw tile source configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    /// Structured configuration object
    Object(Value),

    /// Parsed markup descriptor
    Markup(MarkupDocument),
}

impl SourceData {
    /// Interpret configuration text.
    ///
    /// Text that parses as a JSON object is treated as a configuration object;
    /// anything else is parsed as markup.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value @ Value::Object(_)) => SourceData::Object(value),
            _ => SourceData::Markup(MarkupDocument::parse(text)),
        }
    }
}

impl From<Value> for SourceData {
    fn from(value: Value) -> Self {
        SourceData::Object(value)
    }
}

impl From<MarkupDocument> for SourceData {
    fn from(document: MarkupDocument) -> Self {
        SourceData::Markup(document)
    }
}

// =============================================================================
// Recognition and Resolution
// =============================================================================

/// Check whether raw configuration describes a Zoomify image.
pub fn is_zoomify(data: &SourceData) -> bool {
    match data {
        SourceData::Object(value) => value.get("type").and_then(Value::as_str) == Some(ZOOMIFY_TYPE),
        SourceData::Markup(document) => document.is_image_properties(),
    }
}

/// Normalize raw configuration into tile source options.
///
/// # Arguments
///
/// * `data` - Configuration object or descriptor
/// * `url` - URL the configuration was read from, if any. Takes precedence
///   over the object's `tilesUrl`.
/// * `origin` - Scheme and host used to resolve relative URLs
///
/// Sizes are passed through unchecked. When neither `url` nor a `tilesUrl`
/// is available the tiles URL stays unset.
pub fn configure(
    data: &SourceData,
    url: Option<&str>,
    origin: Option<&str>,
) -> Result<TileSourceOptions, TileSourceError> {
    let options = match data {
        SourceData::Object(value) => TileSourceOptions::from_value(value)?,
        SourceData::Markup(document) => options_from_markup(document)?,
    };

    let source_url = url
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .or_else(|| options.tiles_url.clone().filter(|url| !url.is_empty()));

    match source_url {
        Some(source_url) => {
            let base_url = resolve_base_url(&source_url, origin)?;
            Ok(options.with_tiles_url(base_url))
        }
        None => Ok(options),
    }
}
