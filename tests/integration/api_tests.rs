//! API integration tests for the tile address service.
//!
//! Tests verify:
//! - Descriptor and metadata endpoints
//! - Tile and thumbnail redirects
//! - Error cases (level above the pyramid, unparseable tile name)
//! - HTTP response codes and headers

use axum::http::StatusCode;

use zoomify_tiles::pyramid::Pyramid;
use zoomify_tiles::{create_router, RouterConfig};

use super::test_utils::{body_json, body_string, get, reference_router, BASE_URL};

fn location(response: &axum::http::Response<axum::body::Body>) -> &str {
    response
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap()
}

// =============================================================================
// Metadata Endpoints
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = get(reference_router(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_image_properties_descriptor() {
    let response = get(reference_router(), "/ImageProperties.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/xml"
    );

    let body = body_string(response).await;
    assert_eq!(
        body,
        r#"<IMAGE_PROPERTIES WIDTH="5569" HEIGHT="7938" NUMTILES="945" NUMIMAGES="1" VERSION="1.8" TILESIZE="256"/>"#
    );
}

#[tokio::test]
async fn test_pyramid_metadata() {
    let response = get(reference_router(), "/pyramid").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["width"], 5569);
    assert_eq!(json["height"], 7938);
    assert_eq!(json["tile_size"], 256);
    assert_eq!(json["tier_count"], 6);
    assert_eq!(json["total_tiles"], 945);
    assert_eq!(json["base_url"], BASE_URL);

    let tiers = json["tiers"].as_array().unwrap();
    assert_eq!(tiers.len(), 6);
    assert_eq!(tiers[0]["width"], 174);
    assert_eq!(tiers[0]["height"], 248);
    assert_eq!(tiers[3]["tiles_x"], 6);
    assert_eq!(tiers[3]["tiles_y"], 8);
    assert_eq!(tiers[3]["tile_count_up_to_tier"], 17);
}

// =============================================================================
// Tile Redirects
// =============================================================================

#[tokio::test]
async fn test_tile_redirect() {
    let response = get(reference_router(), "/tiles/4/2/3.jpg").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    // tier 3: 2 + 3 * 6 + 17 = 37
    assert_eq!(location(&response), "http://host/img/TileGroup0/3-2-3.jpg");
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=3600"
    );
}

#[tokio::test]
async fn test_tile_redirect_without_extension() {
    let response = get(reference_router(), "/tiles/1/0/0").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "http://host/img/TileGroup0/0-0-0.jpg");
}

#[tokio::test]
async fn test_tile_redirect_crosses_tile_group() {
    // tier 5: 15 + 241 = 256, the first tile of the second group
    let response = get(reference_router(), "/tiles/6/15/0.jpg").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "http://host/img/TileGroup1/5-15-0.jpg");

    let response = get(reference_router(), "/tiles/6/14/0.jpg").await;
    assert_eq!(location(&response), "http://host/img/TileGroup0/5-14-0.jpg");
}

#[tokio::test]
async fn test_level_zero_is_lowest_tier() {
    let response = get(reference_router(), "/tiles/0/0/0.jpg").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "http://host/img/TileGroup0/0-0-0.jpg");
}

#[tokio::test]
async fn test_tile_outside_grid_is_not_rejected() {
    // tier 0 has a single tile; the address is still computed
    let response = get(reference_router(), "/tiles/1/5/0.jpg").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "http://host/img/TileGroup0/0-5-0.jpg");
}

#[tokio::test]
async fn test_thumbnail_redirect() {
    let response = get(reference_router(), "/thumbnail").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "http://host/img/TileGroup0/0-0-0.jpg");
}

#[tokio::test]
async fn test_custom_cache_max_age() {
    let pyramid = Pyramid::new(1000, 800, 256, "https://tiles.example.com/a/").unwrap();
    let router = create_router(
        pyramid,
        RouterConfig::default()
            .with_cache_max_age(60)
            .with_tracing(false),
    );

    let response = get(router, "/tiles/3/3/2.jpg").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "https://tiles.example.com/a/TileGroup0/2-3-2.jpg"
    );
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=60"
    );
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_level_above_pyramid() {
    let response = get(reference_router(), "/tiles/7/0/0.jpg").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid_level");
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_unparseable_tile_name() {
    let response = get(reference_router(), "/tiles/1/0/zero.jpg").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid_tile_name");
}

#[tokio::test]
async fn test_unparseable_level() {
    let response = get(reference_router(), "/tiles/top/0/0.jpg").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route() {
    let response = get(reference_router(), "/tiles").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
