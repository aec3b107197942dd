//! Headless weather-map client
//!
//! Marks the given regions visible, fetches readings for the selected
//! weather type, and prints one line per region.
//!
//! # Usage
//!
//! ```sh
//! # Temperature for two districts
//! cargo run -p weather-map -- --region 11110:37.57:126.98 --region 26110:35.10:129.03
//!
//! # Humidity for every region in a file, against another backend
//! cargo run -p weather-map -- --type REH --regions-file regions.json \
//!     --base-url http://weather.internal:8080
//!
//! # Trace the weather store, without per-result records
//! cargo run -p weather-map -- --region 11110:37.57:126.98 --log debug \
//!     --log-actions 'Weather*' --skip-actions 'WeatherDid*'
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use map_dispatch::ActionLoggerConfig;
use tracing_subscriber::EnvFilter;

use weather_map::config::{load_regions_file, parse_region, DEFAULT_BASE_URL};
use weather_map::{ClientConfig, HttpWeatherClient, MapSession, Region, WeatherState, WeatherType};

/// Fetch weather readings for map regions
#[derive(Parser, Debug)]
#[command(name = "weather-map")]
#[command(about = "Fetch weather readings for map regions from the weather backend")]
struct Args {
    /// Backend base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Weather type: TMP, REH, POP or WSD
    #[arg(long = "type", short = 't', default_value = "TMP")]
    weather_type: WeatherType,

    /// Visible region as CODE:LAT:LON (repeatable)
    #[arg(long = "region", short = 'r', value_parser = parse_region)]
    regions: Vec<Region>,

    /// JSON file with an array of {code, lat, lon}
    #[arg(long)]
    regions_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log: String,

    /// Only log store actions matching these comma-separated globs
    #[arg(long, value_name = "PATTERNS")]
    log_actions: Option<String>,

    /// Never log store actions matching these comma-separated globs
    #[arg(long, value_name = "PATTERNS")]
    skip_actions: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args.log);

    let config = ClientConfig::new(&args.base_url, args.timeout_secs.map(Duration::from_secs))?;
    let client = HttpWeatherClient::new(&config).context("failed to build HTTP client")?;

    let mut regions = args.regions;
    if let Some(path) = &args.regions_file {
        regions.extend(load_regions_file(path)?);
    }
    if regions.is_empty() {
        anyhow::bail!("no regions given, use --region CODE:LAT:LON or --regions-file");
    }

    let logger =
        ActionLoggerConfig::new(args.log_actions.as_deref(), args.skip_actions.as_deref());
    let mut session = MapSession::with_logger(
        Arc::new(client),
        WeatherState::new(Some(args.weather_type)),
        logger,
    );
    session.set_visible_regions(regions);
    session.settle().await;

    let weather = session.weather();
    if let Some(error) = &weather.error {
        eprintln!("error: {error}");
        return Ok(ExitCode::FAILURE);
    }

    println!("# {}", weather.selected_type_label());
    for region in &session.regions().visible_regions {
        match weather.reading_for(&region.code) {
            Some(reading) => println!("{}\t{}", region.code, reading),
            None => println!("{}\t-", region.code),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
