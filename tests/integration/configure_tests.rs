//! Configuration integration tests.
//!
//! Tests verify:
//! - Descriptor and configuration object paths build identical pyramids
//! - Base URL resolution against an origin
//! - Configuration and format errors surfaced through the registry
//! - Descriptor generation reads back to the same pyramid

use std::sync::Arc;

use serde_json::json;

use zoomify_tiles::error::{ConfigurationError, FormatError, TileSourceError};
use zoomify_tiles::format::{generate_image_properties_xml, SourceData};
use zoomify_tiles::pyramid::Pyramid;
use zoomify_tiles::source::{TileSource, TileSourceRegistry, ZoomifyFormat};

use super::test_utils::{reference_pyramid, BASE_URL, DESCRIPTOR, DESCRIPTOR_URL};

// =============================================================================
// Descriptor and Object Paths
// =============================================================================

#[test]
fn test_descriptor_and_object_agree() {
    let from_markup = reference_pyramid();

    let object = SourceData::from(json!({
        "type": "zoomify",
        "width": 5569,
        "height": 7938,
        "tilesUrl": DESCRIPTOR_URL,
    }));
    let from_object = ZoomifyFormat.load(&object, None, None).unwrap();

    assert_eq!(from_markup.base_url(), BASE_URL);
    assert_eq!(from_object.base_url(), BASE_URL);
    assert_eq!(from_markup.tier_image_size(), from_object.tier_image_size());
    assert_eq!(
        from_markup.tier_size_in_tiles(),
        from_object.tier_size_in_tiles()
    );
    assert_eq!(
        from_markup.tile_count_up_to_tier(),
        from_object.tile_count_up_to_tier()
    );
    assert_eq!(
        from_markup.tile_url(6, 21, 31),
        from_object.tile_url(6, 21, 31)
    );
}

#[test]
fn test_object_with_string_sizes() {
    let object = SourceData::from(json!({
        "type": "zoomify",
        "width": "6000",
        "height": "4000",
        "tileSize": "512",
    }));
    let pyramid = ZoomifyFormat
        .load(&object, Some("http://host/tiles/"), None)
        .unwrap();

    assert_eq!(pyramid.dimensions(), (6000, 4000));
    assert_eq!(pyramid.tile_size(), 512);
    assert_eq!(pyramid.base_url(), "http://host/tiles/");
}

#[test]
fn test_descriptor_round_trip() {
    let pyramid = Pyramid::new(1500, 1000, 512, "http://host/img/").unwrap();
    let xml = generate_image_properties_xml(&pyramid);

    let reloaded = ZoomifyFormat
        .load(
            &SourceData::parse(&xml),
            Some("http://host/img/ImageProperties.xml"),
            None,
        )
        .unwrap();

    assert_eq!(reloaded.dimensions(), (1500, 1000));
    assert_eq!(reloaded.tile_size(), 512);
    assert_eq!(reloaded.total_tiles(), pyramid.total_tiles());
}

// =============================================================================
// Base URL Resolution
// =============================================================================

#[test]
fn test_relative_url_with_origin() {
    let pyramid = ZoomifyFormat
        .load(
            &SourceData::parse(DESCRIPTOR),
            Some("/img/ImageProperties.xml"),
            Some("https://viewer.example.com"),
        )
        .unwrap();

    assert_eq!(pyramid.base_url(), "https://viewer.example.com/img/");
    assert_eq!(
        pyramid.tile_url(1, 0, 0),
        "https://viewer.example.com/img/TileGroup0/0-0-0.jpg"
    );
}

#[test]
fn test_relative_url_without_origin() {
    let result = ZoomifyFormat.load(
        &SourceData::parse(DESCRIPTOR),
        Some("img/ImageProperties.xml"),
        None,
    );

    assert!(matches!(
        result,
        Err(TileSourceError::Configuration(
            ConfigurationError::RelativeUrlWithoutOrigin { .. }
        ))
    ));
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn test_registry_opens_descriptor() {
    let registry = TileSourceRegistry::default();
    assert_eq!(registry.format_names(), vec!["Zoomify"]);

    let source: Arc<dyn TileSource> = registry
        .open(&SourceData::parse(DESCRIPTOR), Some(DESCRIPTOR_URL), None)
        .unwrap();

    assert_eq!(source.dimensions(), (5569, 7938));
    assert_eq!(source.tile_size(), 256);
    assert_eq!(source.max_level(), 6);
    assert_eq!(
        source.tile_url(6, 15, 0),
        "http://host/img/TileGroup1/5-15-0.jpg"
    );
}

#[test]
fn test_registry_rejects_unknown_data() {
    let registry = TileSourceRegistry::default();

    let result = registry.open(&SourceData::from(json!({ "type": "dzi" })), None, None);
    assert!(matches!(
        result,
        Err(TileSourceError::Format(FormatError::Unrecognized { .. }))
    ));

    let result = registry.open(&SourceData::parse("<Image TileSize=\"254\"/>"), None, None);
    assert!(matches!(
        result,
        Err(TileSourceError::Format(FormatError::Unrecognized { .. }))
    ));
}

#[test]
fn test_registry_reports_missing_fields() {
    let registry = TileSourceRegistry::default();

    let result = registry.open(
        &SourceData::parse(r#"<IMAGE_PROPERTIES WIDTH="5569" TILESIZE="256"/>"#),
        Some(DESCRIPTOR_URL),
        None,
    );
    assert!(matches!(
        result,
        Err(TileSourceError::Configuration(
            ConfigurationError::MissingField("height")
        ))
    ));

    let result = registry.open(
        &SourceData::from(json!({ "type": "zoomify", "width": 10, "height": 10 })),
        None,
        None,
    );
    assert!(matches!(
        result,
        Err(TileSourceError::Configuration(
            ConfigurationError::MissingField("tilesUrl")
        ))
    ));
}

#[test]
fn test_registry_reports_bad_attribute() {
    let registry = TileSourceRegistry::default();

    let result = registry.open(
        &SourceData::parse(r#"<IMAGE_PROPERTIES WIDTH="wide" HEIGHT="10"/>"#),
        Some(DESCRIPTOR_URL),
        None,
    );
    assert!(matches!(
        result,
        Err(TileSourceError::Format(FormatError::InvalidAttribute {
            name: "WIDTH",
            ..
        }))
    ));
}

#[test]
fn test_load_and_registry_agree_on_foreign_data() {
    let data = SourceData::from(json!({ "type": "dzi", "width": 6000, "height": 4000 }));

    let loaded = ZoomifyFormat.load(&data, Some(DESCRIPTOR_URL), None);
    let opened = TileSourceRegistry::default().open(&data, Some(DESCRIPTOR_URL), None);

    assert!(matches!(
        loaded,
        Err(TileSourceError::Format(FormatError::Unrecognized { .. }))
    ));
    assert!(matches!(
        opened,
        Err(TileSourceError::Format(FormatError::Unrecognized { .. }))
    ));
}

#[test]
fn test_blank_values_are_falsy() {
    let pyramid = ZoomifyFormat
        .load(
            &SourceData::parse(r#"<IMAGE_PROPERTIES WIDTH="6000" HEIGHT="4000" TILESIZE=""/>"#),
            Some(DESCRIPTOR_URL),
            None,
        )
        .unwrap();
    assert_eq!(pyramid.tile_size(), 256);

    let result = ZoomifyFormat.load(
        &SourceData::from(json!({ "type": "zoomify", "width": "", "height": 4000 })),
        Some(DESCRIPTOR_URL),
        None,
    );
    assert!(matches!(
        result,
        Err(TileSourceError::Configuration(
            ConfigurationError::MissingField("width")
        ))
    ));
}
