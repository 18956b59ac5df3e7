use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use fuelmap_cli::{
    FixedPosition, HttpGeolocator, NoPosition, PositionOptions, PositionProvider, Presenter,
    Session, SessionState, TerminalMap, TerminalUi,
};
use fuelmap_core::{AppConfig, Coordinate, SourceConfig};
use fuelmap_feed::{download_snapshot, DatasetSource, DatasetSources, FeedClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fuelmap")]
#[command(about = "Find nearby fuel stations and their current prices")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    // used as the `nearby` arguments when no subcommand is given
    #[command(flatten)]
    nearby: NearbyArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank stations around your position (the default command)
    Nearby(NearbyArgs),
    /// Save both station documents to a local snapshot directory
    Download {
        /// Directory to write estaciones.xml and precios.xml into
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
    },
}

#[derive(Debug, Args)]
struct NearbyArgs {
    /// Latitude of the search center in decimal degrees
    #[arg(long, env = "FUELMAP_LAT", allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude of the search center in decimal degrees
    #[arg(long, env = "FUELMAP_LON", allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,

    /// Search radius in kilometers, capped at the configured maximum
    #[arg(long)]
    radius_km: Option<f64>,

    /// Re-run the search every N seconds until interrupted
    #[arg(long, value_name = "SECONDS")]
    watch: Option<u64>,

    /// Read station locations from a local file
    #[arg(long, requires = "prices_file")]
    locations_file: Option<PathBuf>,

    /// Read station prices from a local file
    #[arg(long, requires = "locations_file")]
    prices_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = fuelmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Nearby(args)) => run_nearby(&config, args).await,
        Some(Commands::Download { out_dir }) => run_download(&config, out_dir).await,
        None => run_nearby(&config, cli.nearby).await,
    }
}

async fn run_nearby(config: &AppConfig, args: NearbyArgs) -> anyhow::Result<()> {
    let radius_km = search_radius(args.radius_km, config.max_radius_km);
    let geolocator = position_provider(config, args.lat, args.lon)?;
    let sources = dataset_sources(&config.sources, args.locations_file, args.prices_file);
    let client = FeedClient::from_config(config)?;
    let options = PositionOptions {
        high_accuracy: config.geolocation_high_accuracy,
        timeout: Duration::from_millis(config.geolocation_timeout_ms),
    };
    let presenter = Presenter::new(TerminalMap::default(), TerminalUi::default(), config.map_zoom);

    let mut session = Session::new(client, sources, geolocator, options, radius_km, presenter)?;
    session.run().await;
    print_session(&session);

    if let Some(seconds) = args.watch {
        loop {
            tokio::select! {
                () = tokio::time::sleep(Duration::from_secs(seconds)) => {}
                _ = tokio::signal::ctrl_c() => break,
            }
            session.refresh().await;
            print_session(&session);
        }
    }

    match session.into_state() {
        SessionState::Failed(failure) => {
            Err(anyhow::Error::new(failure.error).context("station search failed"))
        }
        _ => Ok(()),
    }
}

async fn run_download(config: &AppConfig, out_dir: PathBuf) -> anyhow::Result<()> {
    let client = FeedClient::from_config(config)?;
    let sources = DatasetSources::from_config(&config.sources);
    let paths = download_snapshot(&client, &sources, &out_dir)
        .await
        .with_context(|| format!("failed to download snapshot into {}", out_dir.display()))?;

    println!("wrote {}", paths.locations.display());
    println!("wrote {}", paths.prices.display());
    Ok(())
}

/// Requested radius, or the maximum when absent or larger.
fn search_radius(requested: Option<f64>, max_km: f64) -> f64 {
    match requested {
        Some(km) if km > max_km => {
            tracing::warn!(requested = km, max_km, "radius capped at configured maximum");
            max_km
        }
        Some(km) => km,
        None => max_km,
    }
}

fn position_provider(
    config: &AppConfig,
    lat: Option<f64>,
    lon: Option<f64>,
) -> anyhow::Result<PositionProvider> {
    if let (Some(lat), Some(lon)) = (lat, lon) {
        let position = Coordinate::new(lat, lon).context("invalid --lat/--lon")?;
        return Ok(PositionProvider::Fixed(FixedPosition(position)));
    }

    let Some(url) = &config.geolocation_url else {
        return Ok(PositionProvider::Unavailable(NoPosition));
    };
    match HttpGeolocator::new(url, &config.user_agent) {
        Ok(geolocator) => Ok(PositionProvider::Http(geolocator)),
        Err(e) => {
            tracing::warn!(
                error = %e,
                url = %url,
                "geolocation endpoint unusable, continuing without a position"
            );
            Ok(PositionProvider::Unavailable(NoPosition))
        }
    }
}

fn dataset_sources(
    configured: &SourceConfig,
    locations_file: Option<PathBuf>,
    prices_file: Option<PathBuf>,
) -> DatasetSources {
    match (locations_file, prices_file) {
        (Some(locations), Some(prices)) => DatasetSources {
            locations: DatasetSource::File(locations),
            prices: DatasetSource::File(prices),
        },
        _ => DatasetSources::from_config(configured),
    }
}

fn print_session(session: &Session<PositionProvider, TerminalMap, TerminalUi>) {
    let presenter = session.presenter();
    println!("== {} ==", session.state().name());
    print!("{}", presenter.map().surface().render());
    print!("{}", presenter.ui().render());
}

#[cfg(test)]
mod tests;
