//! Zoomify configuration formats.
//!
//! This module turns raw configuration into [`TileSourceOptions`]:
//!
//! - [`properties`]: `ImageProperties.xml` descriptors (reading and generation)
//! - [`options`]: structured JSON configuration
//! - [`base_url`]: tiles base URL resolution
//! - [`configure`]: recognition and the full resolution pipeline
//!
//! # Example
//!
//! ```
//! use zoomify_tiles::format::{configure, SourceData};
//!
//! let data = SourceData::parse(r#"<IMAGE_PROPERTIES WIDTH="6000" HEIGHT="4000" TILESIZE="256"/>"#);
//! let options = configure(&data, Some("http://host/img/ImageProperties.xml"), None).unwrap();
//!
//! assert_eq!(options.width, Some(6000));
//! assert_eq!(options.tiles_url.as_deref(), Some("http://host/img/"));
//! ```

pub mod base_url;
pub mod configure;
pub mod options;
pub mod properties;

pub use base_url::{is_absolute_url, resolve_base_url, tiles_directory};
pub use configure::{configure, is_zoomify, SourceData, ZOOMIFY_TYPE};
pub use options::TileSourceOptions;
pub use properties::{
    generate_image_properties_xml, options_from_markup, Element, MarkupDocument,
    IMAGE_PROPERTIES_TAG,
};
