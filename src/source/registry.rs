//! Registry of tile source formats.
//!
//! The registry holds formats in registration order and hands raw
//! configuration to the first one that recognizes it.
//!
//! # Example
//!
//! ```
//! use zoomify_tiles::format::SourceData;
//! use zoomify_tiles::source::TileSourceRegistry;
//!
//! let registry = TileSourceRegistry::default();
//! let data = SourceData::parse(r#"<IMAGE_PROPERTIES WIDTH="6000" HEIGHT="4000" TILESIZE="256"/>"#);
//!
//! let source = registry
//!     .open(&data, Some("http://host/img/ImageProperties.xml"), None)
//!     .unwrap();
//! assert_eq!(source.tile_url(1, 0, 0), "http://host/img/TileGroup0/0-0-0.jpg");
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::error::{FormatError, TileSourceError};
use crate::format::SourceData;

use super::zoomify::ZoomifyFormat;
use super::{TileSource, TileSourceFormat};

/// Ordered collection of tile source formats.
pub struct TileSourceRegistry {
    formats: Vec<Box<dyn TileSourceFormat>>,
}

impl TileSourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// Register a format. Formats are probed in registration order.
    pub fn register(&mut self, format: impl TileSourceFormat + 'static) -> &mut Self {
        self.formats.push(Box::new(format));
        self
    }

    /// Builder-style variant of [`TileSourceRegistry::register`].
    pub fn with_format(mut self, format: impl TileSourceFormat + 'static) -> Self {
        self.register(format);
        self
    }

    /// Names of the registered formats, in probe order.
    pub fn format_names(&self) -> Vec<&'static str> {
        self.formats.iter().map(|format| format.name()).collect()
    }

    /// Find the first format that recognizes the configuration.
    pub fn find(&self, data: &SourceData, url: Option<&str>) -> Option<&dyn TileSourceFormat> {
        self.formats
            .iter()
            .find(|format| format.supports(data, url))
            .map(|format| format.as_ref())
    }

    /// Recognize, configure and open a tile source.
    ///
    /// # Errors
    ///
    /// - [`FormatError::Unrecognized`] if no registered format supports the data
    /// - any error from the selected format's `configure` or `open`
    pub fn open(
        &self,
        data: &SourceData,
        url: Option<&str>,
        origin: Option<&str>,
    ) -> Result<Arc<dyn TileSource>, TileSourceError> {
        let format = self.find(data, url).ok_or_else(|| FormatError::Unrecognized {
            reason: format!(
                "none of the registered formats ({}) recognize the configuration",
                self.format_names().join(", ")
            ),
        })?;

        debug!(name = format.name(), url = ?url, "Selected tile source format");

        let options = format.configure(data, url, origin)?;
        format.open(&options)
    }
}

impl Default for TileSourceRegistry {
    /// Registry with the built-in Zoomify format.
    fn default() -> Self {
        Self::new().with_format(ZoomifyFormat)
    }
}
