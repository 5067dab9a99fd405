//! Tiles base URL resolution.
//!
//! Tile groups live in the same directory as the descriptor they were read
//! from, so the base URL is the descriptor URL with its file name removed:
//!
//! ```text
//! http://host/img/ImageProperties.xml  ->  http://host/img/
//! /img/ImageProperties.xml             ->  <origin>/img/
//! http://host/img/                     ->  http://host/img/
//! ```
//!
//! Relative URLs are resolved against an origin supplied by the caller.

use url::Url;

use crate::error::ConfigurationError;

/// Remove the last `/`-delimited segment of a URL and append `/`.
///
/// A slash-terminated URL is returned unchanged; a URL without any `/`
/// becomes `/`.
pub fn tiles_directory(url: &str) -> String {
    match url.rfind('/') {
        Some(index) => format!("{}/", &url[..index]),
        None => "/".to_string(),
    }
}

/// Check whether a URL carries its own scheme and can serve as a base.
pub fn is_absolute_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| !parsed.cannot_be_a_base())
}

/// Resolve the absolute tiles base URL from a descriptor or tiles URL.
///
/// # Arguments
///
/// * `url` - URL the configuration was read from, or the configured tiles URL
/// * `origin` - Scheme and host used to resolve a relative `url`
///
/// # Errors
///
/// - [`ConfigurationError::RelativeUrlWithoutOrigin`] if `url` is relative and
///   no origin is given
/// - [`ConfigurationError::InvalidOrigin`] if the origin is not an absolute URL
pub fn resolve_base_url(url: &str, origin: Option<&str>) -> Result<String, ConfigurationError> {
    let directory = tiles_directory(url);

    if is_absolute_url(&directory) {
        return Ok(directory);
    }

    let origin = origin.ok_or_else(|| ConfigurationError::RelativeUrlWithoutOrigin {
        url: url.to_string(),
    })?;

    let invalid_origin = |reason: String| ConfigurationError::InvalidOrigin {
        origin: origin.to_string(),
        reason,
    };

    let base = Url::parse(origin).map_err(|e| invalid_origin(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid_origin("origin cannot be a base URL".to_string()));
    }

    let resolved = base
        .join(&directory)
        .map_err(|e| invalid_origin(e.to_string()))?;

    Ok(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_directory() {
        assert_eq!(
            tiles_directory("http://host/img/ImageProperties.xml"),
            "http://host/img/"
        );
        assert_eq!(tiles_directory("http://host/img/"), "http://host/img/");
        assert_eq!(tiles_directory("/img/ImageProperties.xml"), "/img/");
        assert_eq!(tiles_directory("ImageProperties.xml"), "/");
        assert_eq!(tiles_directory(""), "/");
    }

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url("http://host/img/"));
        assert!(is_absolute_url("https://host:8443/img/"));
        assert!(!is_absolute_url("/img/"));
        assert!(!is_absolute_url("img/"));
        assert!(!is_absolute_url("//cdn.example.com/img/"));
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(
            resolve_base_url("http://host/img/ImageProperties.xml", None).unwrap(),
            "http://host/img/"
        );
        // Origin is ignored for absolute URLs
        assert_eq!(
            resolve_base_url("http://host/img/", Some("https://other")).unwrap(),
            "http://host/img/"
        );
    }

    #[test]
    fn test_resolve_relative_with_origin() {
        assert_eq!(
            resolve_base_url("/media/maps/a/ImageProperties.xml", Some("http://example.com"))
                .unwrap(),
            "http://example.com/media/maps/a/"
        );
        assert_eq!(
            resolve_base_url("ImageProperties.xml", Some("https://example.com:8080")).unwrap(),
            "https://example.com:8080/"
        );
    }

    #[test]
    fn test_resolve_scheme_relative() {
        assert_eq!(
            resolve_base_url("//cdn.example.com/img/ImageProperties.xml", Some("https://host"))
                .unwrap(),
            "https://cdn.example.com/img/"
        );
    }

    #[test]
    fn test_resolve_relative_without_origin() {
        assert_eq!(
            resolve_base_url("/img/ImageProperties.xml", None),
            Err(ConfigurationError::RelativeUrlWithoutOrigin {
                url: "/img/ImageProperties.xml".to_string()
            })
        );
    }

    #[test]
    fn test_resolve_invalid_origin() {
        assert!(matches!(
            resolve_base_url("/img/", Some("example.com")),
            Err(ConfigurationError::InvalidOrigin { .. })
        ));
    }

    #[test]
    fn test_resolved_url_ends_with_slash() {
        for url in [
            "http://host/a/b/ImageProperties.xml",
            "/a/ImageProperties.xml",
            "a/b/",
        ] {
            let resolved = resolve_base_url(url, Some("http://host")).unwrap();
            assert!(resolved.ends_with('/'), "{resolved}");
        }
    }
}
