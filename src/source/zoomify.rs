//! Zoomify tile source format.

use std::sync::Arc;

use crate::error::{FormatError, TileSourceError};
use crate::format::{self, SourceData, TileSourceOptions};
use crate::pyramid::Pyramid;

use super::{TileSource, TileSourceFormat};

/// The Zoomify tiled image format.
///
/// Recognizes configuration objects with `"type": "zoomify"` and
/// `IMAGE_PROPERTIES` descriptors, and opens them as a [`Pyramid`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoomifyFormat;

impl ZoomifyFormat {
    /// Recognize, configure and build the pyramid in one step.
    ///
    /// # Errors
    ///
    /// - [`FormatError::Unrecognized`] if the data is not a Zoomify configuration
    /// - any error from configuring or building the pyramid
    pub fn load(
        &self,
        data: &SourceData,
        url: Option<&str>,
        origin: Option<&str>,
    ) -> Result<Pyramid, TileSourceError> {
        if !self.supports(data, url) {
            return Err(FormatError::Unrecognized {
                reason: format!("not a {} configuration", self.name()),
            }
            .into());
        }

        let options = format::configure(data, url, origin)?;
        Ok(Pyramid::from_options(&options)?)
    }
}

impl TileSourceFormat for ZoomifyFormat {
    fn name(&self) -> &'static str {
        "Zoomify"
    }

    fn supports(&self, data: &SourceData, _url: Option<&str>) -> bool {
        format::is_zoomify(data)
    }

    fn configure(
        &self,
        data: &SourceData,
        url: Option<&str>,
        origin: Option<&str>,
    ) -> Result<TileSourceOptions, TileSourceError> {
        format::configure(data, url, origin)
    }

    fn open(&self, options: &TileSourceOptions) -> Result<Arc<dyn TileSource>, TileSourceError> {
        Ok(Arc::new(Pyramid::from_options(options)?))
    }
}

impl TileSource for Pyramid {
    fn tile_url(&self, level: usize, x: u32, y: u32) -> String {
        Pyramid::tile_url(self, level, x, y)
    }

    fn dimensions(&self) -> (u32, u32) {
        Pyramid::dimensions(self)
    }

    fn tile_size(&self) -> u32 {
        Pyramid::tile_size(self)
    }

    fn max_level(&self) -> usize {
        Pyramid::max_level(self)
    }
}
