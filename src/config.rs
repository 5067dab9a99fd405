//! Configuration management for zoomify-tiles.
//!
//! This module provides the command-line interface:
//! - Subcommands via clap derive
//! - Environment variables with `ZOOMIFY_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Environment Variables
//!
//! - `ZOOMIFY_PROPERTIES` - Path to an `ImageProperties.xml` descriptor
//! - `ZOOMIFY_WIDTH` / `ZOOMIFY_HEIGHT` - Image size when no descriptor is given
//! - `ZOOMIFY_TILE_SIZE` - Tile size when no descriptor is given (default: 256)
//! - `ZOOMIFY_URL` - Descriptor URL or tiles URL
//! - `ZOOMIFY_ORIGIN` - Origin used to resolve a relative URL
//! - `ZOOMIFY_HOST` - Server bind address (default: 0.0.0.0)
//! - `ZOOMIFY_PORT` - Server port (default: 3000)
//! - `ZOOMIFY_CACHE_MAX_AGE` - HTTP cache max-age seconds (default: 3600)
//! - `ZOOMIFY_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::json;

use crate::format::{SourceData, ZOOMIFY_TYPE};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default HTTP cache max-age in seconds (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

// =============================================================================
// CLI Arguments
// =============================================================================

/// zoomify-tiles - Tile addressing for Zoomify image pyramids.
///
/// Derives the tier tables of a Zoomify pyramid from its image size and maps
/// viewer tile requests to `TileGroup` URLs.
#[derive(Parser, Debug, Clone)]
#[command(name = "zoomify-tiles")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Consume the parsed arguments and return the selected command.
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the URL of a single tile
    Url(UrlConfig),

    /// Print the tier tables of the pyramid
    Info(InfoConfig),

    /// Print the ImageProperties.xml descriptor of the pyramid
    Properties(PropertiesConfig),

    /// Run the HTTP tile address service
    Serve(ServeConfig),
}

// =============================================================================
// Source Arguments
// =============================================================================

/// Where the pyramid configuration comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to an ImageProperties.xml descriptor.
    #[arg(
        long,
        env = "ZOOMIFY_PROPERTIES",
        conflicts_with_all = ["width", "height", "tile_size"]
    )]
    pub properties: Option<PathBuf>,

    /// Full-resolution image width in pixels.
    #[arg(long, env = "ZOOMIFY_WIDTH")]
    pub width: Option<u32>,

    /// Full-resolution image height in pixels.
    #[arg(long, env = "ZOOMIFY_HEIGHT")]
    pub height: Option<u32>,

    /// Tile size in pixels (default: 256).
    #[arg(long, env = "ZOOMIFY_TILE_SIZE")]
    pub tile_size: Option<u32>,

    /// URL of the descriptor, or of the directory holding the tile groups.
    ///
    /// The last path segment is removed to find the tiles directory, so a
    /// directory URL must end with `/`.
    #[arg(long, env = "ZOOMIFY_URL")]
    pub url: Option<String>,

    /// Origin (scheme and host) used to resolve a relative --url.
    #[arg(long, env = "ZOOMIFY_ORIGIN")]
    pub origin: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl SourceArgs {
    /// Validate the source arguments and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.properties.is_none() && self.width.is_none() && self.height.is_none() {
            return Err(
                "No image given. Set --properties or --width and --height".to_string(),
            );
        }

        if let Some(ref url) = self.url {
            if url.is_empty() {
                return Err("--url must not be empty".to_string());
            }
        }

        Ok(())
    }

    /// Load the raw configuration.
    ///
    /// Reads the descriptor file when `--properties` is given, otherwise builds
    /// a Zoomify configuration object from the size arguments.
    pub fn source_data(&self) -> std::io::Result<SourceData> {
        match self.properties {
            Some(ref path) => {
                let text = std::fs::read_to_string(path)?;
                Ok(SourceData::parse(&text))
            }
            None => Ok(SourceData::Object(json!({
                "type": ZOOMIFY_TYPE,
                "width": self.width,
                "height": self.height,
                "tileSize": self.tile_size,
            }))),
        }
    }
}

// =============================================================================
// Command Configurations
// =============================================================================

/// Arguments of the `url` command.
#[derive(Args, Debug, Clone)]
pub struct UrlConfig {
    #[command(flatten)]
    pub source: SourceArgs,

    /// External zoom level (1 = lowest resolution).
    #[arg(long)]
    pub level: usize,

    /// Tile column.
    #[arg(short, long)]
    pub x: u32,

    /// Tile row.
    #[arg(short, long)]
    pub y: u32,
}

/// Arguments of the `info` command.
#[derive(Args, Debug, Clone)]
pub struct InfoConfig {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the tier tables as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Arguments of the `properties` command.
#[derive(Args, Debug, Clone)]
pub struct PropertiesConfig {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments of the `serve` command.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    #[command(flatten)]
    pub source: SourceArgs,

    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "ZOOMIFY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "ZOOMIFY_PORT")]
    pub port: u16,

    /// HTTP Cache-Control max-age in seconds.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "ZOOMIFY_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "ZOOMIFY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.source.validate()?;

        if self.host.is_empty() {
            return Err("host must not be empty".to_string());
        }

        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
