//! zoomify-tiles - Tile addressing for Zoomify image pyramids.
//!
//! This binary dispatches the CLI subcommands and runs the HTTP service.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zoomify_tiles::{
    config::{Cli, Command, InfoConfig, PropertiesConfig, ServeConfig, SourceArgs, UrlConfig},
    format::generate_image_properties_xml,
    pyramid::Pyramid,
    server::{create_router, PyramidMetadataResponse, RouterConfig},
    source::{TileSource, TileSourceRegistry, ZoomifyFormat},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Url(config) => run_url(config),
        Command::Info(config) => run_info(config),
        Command::Properties(config) => run_properties(config),
        Command::Serve(config) => run_serve(config).await,
    }
}

// =============================================================================
// Source Loading
// =============================================================================

/// Validate the source arguments and build the pyramid they describe.
fn load_pyramid(source: &SourceArgs) -> Result<Pyramid, String> {
    source.validate()?;

    let data = source
        .source_data()
        .map_err(|e| format!("Failed to read image properties: {}", e))?;

    ZoomifyFormat
        .load(&data, source.url.as_deref(), source.origin.as_deref())
        .map_err(|e| e.to_string())
}

// =============================================================================
// Url Command
// =============================================================================

fn run_url(config: UrlConfig) -> ExitCode {
    if config.source.verbose {
        init_logging(true);
    }

    if let Err(e) = config.source.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let data = match config.source.source_data() {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: Failed to read image properties: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = TileSourceRegistry::default();
    let source = match registry.open(
        &data,
        config.source.url.as_deref(),
        config.source.origin.as_deref(),
    ) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.level > source.max_level() {
        eprintln!(
            "Error: level {} is above the highest level {}",
            config.level,
            source.max_level()
        );
        return ExitCode::FAILURE;
    }

    println!("{}", source.tile_url(config.level, config.x, config.y));
    ExitCode::SUCCESS
}

// =============================================================================
// Info Command
// =============================================================================

fn run_info(config: InfoConfig) -> ExitCode {
    if config.source.verbose {
        init_logging(true);
    }

    let pyramid = match load_pyramid(&config.source) {
        Ok(pyramid) => pyramid,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.json {
        let json = serde_json::json!({
            "pyramid": PyramidMetadataResponse::from(&pyramid),
            "tile_group_count": pyramid.tile_group_count(),
            "thumbnail_url": pyramid.thumbnail_url(),
        });
        match serde_json::to_string_pretty(&json) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let (width, height) = pyramid.dimensions();
    println!("Zoomify Pyramid");
    println!("═══════════════");
    println!();
    println!("  Image:       {} x {}", width, height);
    println!("  Tile size:   {}", pyramid.tile_size());
    println!("  Tiers:       {}", pyramid.number_of_tiers());
    println!("  Tiles:       {}", pyramid.total_tiles());
    println!("  Tile groups: {}", pyramid.tile_group_count());
    println!("  Base URL:    {}", pyramid.base_url());
    println!("  Thumbnail:   {}", pyramid.thumbnail_url());
    println!();
    println!("  Tier  Level  Size              Tiles      Before");
    println!("  ────  ─────  ────────────────  ─────────  ──────");
    for tier in pyramid.tiers() {
        println!(
            "  {:>4}  {:>5}  {:>16}  {:>9}  {:>6}",
            tier.index,
            tier.index + 1,
            format!("{} x {}", tier.width, tier.height),
            format!("{} x {}", tier.tiles_x, tier.tiles_y),
            tier.tile_count_up_to_tier
        );
    }

    ExitCode::SUCCESS
}

// =============================================================================
// Properties Command
// =============================================================================

fn run_properties(config: PropertiesConfig) -> ExitCode {
    if config.source.verbose {
        init_logging(true);
    }

    match load_pyramid(&config.source) {
        Ok(pyramid) => {
            println!("{}", generate_image_properties_xml(&pyramid));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.source.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let pyramid = match load_pyramid(&config.source) {
        Ok(pyramid) => pyramid,
        Err(e) => {
            error!("Failed to open pyramid: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (width, height) = pyramid.dimensions();
    info!("zoomify-tiles v{}", env!("CARGO_PKG_VERSION"));
    info!("");
    info!("Configuration:");
    info!("  Image: {} x {}", width, height);
    info!(
        "  Tiers: {} ({} tiles, tile size {})",
        pyramid.number_of_tiers(),
        pyramid.total_tiles(),
        pyramid.tile_size()
    );
    info!("  Base URL: {}", pyramid.base_url());
    info!("  Cache max-age: {}s", config.cache_max_age);

    let router = create_router(pyramid, build_router_config(&config));
    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/ImageProperties.xml", addr);
    info!("    curl -i http://{}/tiles/1/0/0.jpg", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::default()
        .with_cache_max_age(config.cache_max_age)
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "zoomify_tiles=debug,tower_http=debug"
    } else {
        "zoomify_tiles=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
