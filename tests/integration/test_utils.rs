//! Test utilities for integration tests.
//!
//! Fixtures for the reference 5569 x 7938 image and helpers for building
//! routers and reading response bodies.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use zoomify_tiles::format::SourceData;
use zoomify_tiles::pyramid::Pyramid;
use zoomify_tiles::server::{create_router, RouterConfig};
use zoomify_tiles::source::ZoomifyFormat;

/// Descriptor URL of the reference image.
pub const DESCRIPTOR_URL: &str = "http://host/img/ImageProperties.xml";

/// Tiles base URL of the reference image.
pub const BASE_URL: &str = "http://host/img/";

/// Descriptor of the reference image.
pub const DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<IMAGE_PROPERTIES WIDTH="5569" HEIGHT="7938" NUMTILES="945" NUMIMAGES="1" VERSION="1.8" TILESIZE="256" />"#;

/// Build the reference pyramid from its descriptor.
pub fn reference_pyramid() -> Pyramid {
    ZoomifyFormat
        .load(&SourceData::parse(DESCRIPTOR), Some(DESCRIPTOR_URL), None)
        .unwrap()
}

/// Build a router for the reference pyramid with tracing disabled.
pub fn reference_router() -> Router {
    create_router(
        reference_pyramid(),
        RouterConfig::default().with_tracing(false),
    )
}

/// Send a GET request through the router.
pub async fn get(router: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.oneshot(request).await.unwrap()
}

/// Collect a response body as a UTF-8 string.
pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
