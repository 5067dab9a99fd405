use thiserror::Error;

/// Errors raised while building a pyramid from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A required field is missing, zero, or empty
    #[error("Missing required field: {0} (width, height, and tilesUrl are required)")]
    MissingField(&'static str),

    /// The tiles URL is relative and no origin was supplied to resolve it
    #[error("Relative tiles URL '{url}' cannot be resolved without an origin")]
    RelativeUrlWithoutOrigin { url: String },

    /// The pyramid-wide tile count does not fit in a u64
    #[error("Image {width}x{height} with tile size {tile_size} has too many tiles to address")]
    TooManyTiles {
        width: u32,
        height: u32,
        tile_size: u32,
    },

    /// The supplied origin is not an absolute URL
    #[error("Invalid origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },
}

/// Errors related to recognizing and reading tile source descriptors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Markup document has no root element
    #[error("Invalid image properties: document has no root element")]
    MissingRootElement,

    /// Markup root element is not IMAGE_PROPERTIES
    #[error("Invalid image properties: expected root element IMAGE_PROPERTIES, got {found}")]
    UnexpectedRootElement { found: String },

    /// An attribute is present but is not an unsigned integer
    #[error("Invalid value for attribute {name}: '{value}'")]
    InvalidAttribute { name: &'static str, value: String },

    /// Structured configuration could not be read
    #[error("Invalid configuration object: {0}")]
    InvalidObject(String),

    /// No registered format recognizes the data
    #[error("Unrecognized tile source: {reason}")]
    Unrecognized { reason: String },
}

/// Errors returned when opening a tile source through the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileSourceError {
    /// Descriptor could not be recognized or read
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Descriptor was read but the pyramid could not be built
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Errors raised when a tile address request cannot be served
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Requested level is above the pyramid's highest level
    #[error("Invalid level: {level} (pyramid has levels 0-{max_level})")]
    InvalidLevel { level: usize, max_level: usize },

    /// Tile file name is not `{y}` or `{y}.jpg`
    #[error("Invalid tile name: {filename}")]
    InvalidTileName { filename: String },
}
