use std::sync::Mutex;

use super::*;
use fuelmap_core::Environment;

// FUELMAP_LAT/FUELMAP_LON feed the parser, so parsing must not race a test
// that sets them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn parse<const N: usize>(args: [&str; N]) -> Result<Cli, clap::Error> {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    Cli::try_parse_from(args)
}

fn config_with_geolocation_url(url: Option<&str>) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().expect("socket addr"),
        log_level: "info".to_string(),
        sources: SourceConfig::Remote {
            locations_url: "https://example.test/places".into(),
            prices_url: "https://example.test/prices".into(),
        },
        max_radius_km: 50.0,
        map_zoom: 12,
        geolocation_timeout_ms: 1_000,
        geolocation_high_accuracy: false,
        geolocation_url: url.map(str::to_string),
        request_timeout_secs: 5,
        user_agent: "fuelmap-test".to_string(),
        cache_bust: false,
    }
}

#[test]
fn no_command_is_none() {
    let cli = parse(["fuelmap"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.nearby.radius_km.is_none());
}

#[test]
fn bare_invocation_reads_position_from_env() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    std::env::set_var("FUELMAP_LAT", "19.4326");
    std::env::set_var("FUELMAP_LON", "-99.1332");
    let result = Cli::try_parse_from(["fuelmap"]);
    std::env::remove_var("FUELMAP_LAT");
    std::env::remove_var("FUELMAP_LON");

    let cli = result.expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert_eq!(cli.nearby.lat, Some(19.4326));
    assert_eq!(cli.nearby.lon, Some(-99.1332));
}

#[test]
fn nearby_flags_work_without_subcommand() {
    let cli = parse(["fuelmap", "--lat", "19.4326", "--lon", "-99.1332", "--watch", "30"])
        .expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert_eq!(cli.nearby.lat, Some(19.4326));
    assert_eq!(cli.nearby.lon, Some(-99.1332));
    assert_eq!(cli.nearby.watch, Some(30));
}

#[test]
fn top_level_flags_conflict_with_subcommand() {
    let result = parse(["fuelmap", "--radius-km", "5", "download"]);
    assert!(result.is_err());
}

#[test]
fn bad_geolocation_url_falls_back_to_no_position() {
    let config = config_with_geolocation_url(Some("::not a url::"));
    let provider = position_provider(&config, None, None).expect("provider");
    assert!(matches!(provider, PositionProvider::Unavailable(_)));
}

#[test]
fn position_provider_prefers_fixed_then_http() {
    let config = config_with_geolocation_url(Some("http://127.0.0.1:9/position"));
    let fixed = position_provider(&config, Some(19.4326), Some(-99.1332)).expect("provider");
    assert!(matches!(fixed, PositionProvider::Fixed(_)));

    let http = position_provider(&config, None, None).expect("provider");
    assert!(matches!(http, PositionProvider::Http(_)));

    let none = position_provider(&config_with_geolocation_url(None), None, None)
        .expect("provider");
    assert!(matches!(none, PositionProvider::Unavailable(_)));
}

#[test]
fn parses_nearby_with_negative_longitude() {
    let cli = parse([
        "fuelmap",
        "nearby",
        "--lat",
        "19.4326",
        "--lon",
        "-99.1332",
        "--radius-km",
        "10",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Nearby(args)) = cli.command else {
        panic!("expected nearby command");
    };
    assert_eq!(args.lat, Some(19.4326));
    assert_eq!(args.lon, Some(-99.1332));
    assert_eq!(args.radius_km, Some(10.0));
    assert!(args.watch.is_none());
}

#[test]
fn lat_without_lon_is_rejected() {
    let result = parse(["fuelmap", "nearby", "--lat", "19.4"]);
    assert!(result.is_err());
}

#[test]
fn local_files_must_come_in_pairs() {
    let result = parse(["fuelmap", "nearby", "--locations-file", "a.xml"]);
    assert!(result.is_err());

    let cli = parse([
        "fuelmap",
        "nearby",
        "--locations-file",
        "a.xml",
        "--prices-file",
        "b.xml",
    ])
    .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Nearby(_))));
}

#[test]
fn parses_download_with_default_dir() {
    let cli = parse(["fuelmap", "download"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Download { ref out_dir }) if out_dir == &PathBuf::from("data")
    ));
}

#[test]
fn search_radius_defaults_and_caps() {
    assert!((search_radius(None, 50.0) - 50.0).abs() < f64::EPSILON);
    assert!((search_radius(Some(10.0), 50.0) - 10.0).abs() < f64::EPSILON);
    assert!((search_radius(Some(80.0), 50.0) - 50.0).abs() < f64::EPSILON);
}

#[test]
fn file_flags_override_configured_sources() {
    let configured = SourceConfig::Remote {
        locations_url: "https://example.test/places".into(),
        prices_url: "https://example.test/prices".into(),
    };

    let sources = dataset_sources(
        &configured,
        Some(PathBuf::from("a.xml")),
        Some(PathBuf::from("b.xml")),
    );
    assert_eq!(sources.locations, DatasetSource::File(PathBuf::from("a.xml")));
    assert_eq!(sources.prices, DatasetSource::File(PathBuf::from("b.xml")));

    let sources = dataset_sources(&configured, None, None);
    assert_eq!(
        sources.locations,
        DatasetSource::Url("https://example.test/places".into())
    );
}
