//! Zoomify `ImageProperties.xml` descriptors.
//!
//! A Zoomify server publishes one descriptor per image, next to its tile
//! groups:
//!
//! ```xml
//! <IMAGE_PROPERTIES WIDTH="5569" HEIGHT="7938" NUMTILES="945" NUMIMAGES="1" VERSION="1.8" TILESIZE="256"/>
//! ```
//!
//! Only `WIDTH`, `HEIGHT` and `TILESIZE` are needed to address tiles; the
//! other attributes are informational.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::FormatError;
use crate::pyramid::Pyramid;

use super::options::TileSourceOptions;

// =============================================================================
// Constants
// =============================================================================

/// Tag of the root element of a Zoomify descriptor.
pub const IMAGE_PROPERTIES_TAG: &str = "IMAGE_PROPERTIES";

/// Descriptor version written by [`generate_image_properties_xml`].
const DESCRIPTOR_VERSION: &str = "1.8";

// =============================================================================
// Markup Document
// =============================================================================

/// A markup element with its attributes, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element tag name
    pub tag: String,

    /// Attribute (name, value) pairs
    pub attributes: Vec<(String, String)>,
}

impl Element {
    /// Create an element without attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Get an attribute value by exact (case-sensitive) name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A parsed markup document, reduced to its root element.
///
/// Descriptors are single self-closing elements, so only the root element and
/// its attributes are kept. A document whose root element cannot be found
/// parses successfully with no root; rejecting it is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupDocument {
    root: Option<Element>,
}

impl MarkupDocument {
    /// Create a document with the given root element.
    pub fn with_root(root: Element) -> Self {
        Self { root: Some(root) }
    }

    /// Parse markup text.
    ///
    /// Leading XML declarations, processing instructions, comments and
    /// doctype declarations are skipped.
    pub fn parse(text: &str) -> Self {
        let body = skip_prolog(text);

        let root = root_element_pattern().captures(body).map(|captures| {
            let tag = captures[1].to_string();
            let attributes = captures
                .get(2)
                .map(|m| parse_attributes(m.as_str()))
                .unwrap_or_default();
            Element { tag, attributes }
        });

        Self { root }
    }

    /// The root element, if the document has one.
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Check whether the root element is a Zoomify descriptor.
    pub fn is_image_properties(&self) -> bool {
        self.root
            .as_ref()
            .is_some_and(|root| root.tag == IMAGE_PROPERTIES_TAG)
    }
}

/// Root element: `<TAG attr="..." ...>` or `<TAG ... />` at the start of the body.
fn root_element_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"^<([A-Za-z_][A-Za-z0-9_.:-]*)((?:\s+[^\s=/>]+\s*=\s*(?:"[^"]*"|'[^']*'))*)\s*/?>"#,
        )
        .unwrap()
    })
}

/// Single attribute with a double- or single-quoted value.
fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"([^\s=/>]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap())
}

fn parse_attributes(text: &str) -> Vec<(String, String)> {
    attribute_pattern()
        .captures_iter(text)
        .map(|captures| {
            let value = captures
                .get(2)
                .or_else(|| captures.get(3))
                .map(|m| m.as_str())
                .unwrap_or("");
            (captures[1].to_string(), value.to_string())
        })
        .collect()
}

/// Skip whitespace, a byte order mark, declarations and comments before the root.
fn skip_prolog(text: &str) -> &str {
    let mut rest = text.trim_start_matches('\u{feff}').trim_start();

    loop {
        let terminator = if rest.starts_with("<?") {
            "?>"
        } else if rest.starts_with("<!--") {
            "-->"
        } else if rest.starts_with("<!") {
            ">"
        } else {
            return rest;
        };

        match rest.find(terminator) {
            Some(end) => rest = rest[end + terminator.len()..].trim_start(),
            None => return "",
        }
    }
}

// =============================================================================
// Descriptor Reading
// =============================================================================

/// Read tile source options from a Zoomify descriptor.
///
/// # Errors
///
/// - [`FormatError::MissingRootElement`] if the document has no root element
/// - [`FormatError::UnexpectedRootElement`] if the root is not `IMAGE_PROPERTIES`
/// - [`FormatError::InvalidAttribute`] if a non-blank size attribute is not an
///   unsigned integer
///
/// Missing attributes are left unset; whether they are required is decided
/// when the pyramid is built.
pub fn options_from_markup(document: &MarkupDocument) -> Result<TileSourceOptions, FormatError> {
    let root = document.root().ok_or(FormatError::MissingRootElement)?;

    if root.tag != IMAGE_PROPERTIES_TAG {
        return Err(FormatError::UnexpectedRootElement {
            found: root.tag.clone(),
        });
    }

    Ok(TileSourceOptions {
        width: numeric_attribute(root, "WIDTH")?,
        height: numeric_attribute(root, "HEIGHT")?,
        tile_size: numeric_attribute(root, "TILESIZE")?,
        tiles_url: None,
    })
}

/// Blank attributes count as absent, like a missing one.
fn numeric_attribute(element: &Element, name: &'static str) -> Result<Option<u32>, FormatError> {
    element
        .attribute(name)
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            value
                .trim()
                .parse::<u32>()
                .map_err(|_| FormatError::InvalidAttribute {
                    name,
                    value: value.to_string(),
                })
        })
        .transpose()
}

// =============================================================================
// Descriptor Generation
// =============================================================================

/// Generate the `ImageProperties.xml` descriptor for a pyramid.
///
/// # Example Output
///
/// ```xml
/// <IMAGE_PROPERTIES WIDTH="5569" HEIGHT="7938" NUMTILES="945" NUMIMAGES="1" VERSION="1.8" TILESIZE="256"/>
/// ```
pub fn generate_image_properties_xml(pyramid: &Pyramid) -> String {
    let (width, height) = pyramid.dimensions();
    format!(
        r#"<{IMAGE_PROPERTIES_TAG} WIDTH="{width}" HEIGHT="{height}" NUMTILES="{}" NUMIMAGES="1" VERSION="{DESCRIPTOR_VERSION}" TILESIZE="{}"/>"#,
        pyramid.total_tiles(),
        pyramid.tile_size()
    )
}

// =============================================================================
// Tests
// =============================================================================
