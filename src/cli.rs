//! Command-line interface parsing for airops
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the [`Config`] the rest of the application runs with.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::api::{ApiClient, DEFAULT_BASE_URL};
use crate::cache::{FileStore, KeyValueStore, MemoryStore, ResponseCache};
use crate::data::DEFAULT_PAGE_SIZE;

/// Default freshness window for cached responses, in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// A page size of zero would make every page empty
    #[error("Invalid page size: {0}. The page size must be at least 1")]
    InvalidPageSize(usize),

    /// A page number of zero does not exist (pages start at 1)
    #[error("Invalid page: {0}. Pages are numbered from 1")]
    InvalidPage(usize),

    /// The base URL is not an http(s) origin
    #[error("Invalid base URL: '{0}'. Expected something like http://localhost:3000")]
    InvalidBaseUrl(String),

    /// The freshness window does not fit in a time span
    #[error("Invalid cache TTL: {0} seconds is too large")]
    InvalidCacheTtl(u64),
}

/// airops - Flights, reservations, luggage, and check-in from the terminal
#[derive(Parser, Debug)]
#[command(name = "airops")]
#[command(about = "Airline operations front end: flights, reservations, luggage, and check-in")]
#[command(version)]
pub struct Cli {
    /// Origin of the operations service
    #[arg(long, global = true, env = "AIROPS_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory for cached responses (defaults to the user cache directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Seconds a cached response stays fresh
    #[arg(long, global = true, value_name = "SECONDS", default_value_t = DEFAULT_CACHE_TTL_SECS)]
    pub cache_ttl: u64,

    /// Keep cached responses in memory only
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Increase log output (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List flights, optionally filtered and paginated
    Flights(FlightsArgs),

    /// Browse flights interactively
    Browse,

    /// Show the reservations of a passenger
    Reservations {
        /// Passenger identifier
        passenger_id: String,

        /// Case-insensitive part of the reservation status (e.g. cancelada)
        #[arg(long)]
        status: Option<String>,
    },

    /// Create a reservation
    Reserve(ReserveArgs),

    /// Show the luggage registered to a passenger
    Luggage {
        /// Passenger identifier
        passenger_id: String,
    },

    /// Check in for a reserved flight
    Checkin(CheckinArgs),

    /// Manage the local response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Args, Debug)]
pub struct FlightsArgs {
    /// Case-insensitive part of the flight number
    #[arg(long)]
    pub search: Option<String>,

    /// Case-insensitive part of the status (e.g. retraso)
    #[arg(long)]
    pub status: Option<String>,

    /// Exact departure date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Case-insensitive part of the aircraft
    #[arg(long)]
    pub aircraft: Option<String>,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Flights per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Ignore any cached flight list
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Args, Debug)]
pub struct ReserveArgs {
    #[arg(long)]
    pub passenger: String,

    #[arg(long)]
    pub flight: String,

    /// Reservation code
    #[arg(long)]
    pub code: String,

    /// Reservation status (defaults to confirmada)
    #[arg(long, default_value = "")]
    pub status: String,

    #[arg(long)]
    pub price: String,
}

#[derive(Args, Debug)]
pub struct CheckinArgs {
    #[arg(long)]
    pub reservation: String,

    #[arg(long)]
    pub seat: String,

    #[arg(long)]
    pub gate: String,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Check-in time (HH:MM)
    #[arg(long)]
    pub time: String,
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Remove one cached endpoint, or every cached response
    Clear {
        /// Endpoint path such as /flights
        path: Option<String>,
    },
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl: chrono::Duration,
    pub persistent_cache: bool,
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: None,
            cache_ttl: chrono::Duration::seconds(DEFAULT_CACHE_TTL_SECS as i64),
            persistent_cache: true,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Creates a Config from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Config)` with the global options applied
    /// * `Err(CliError)` if an option value is unusable
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let base_url = cli.base_url.trim().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CliError::InvalidBaseUrl(base_url));
        }

        if let Command::Flights(args) = &cli.command {
            validate_paging(args)?;
        }

        let cache_ttl = i64::try_from(cli.cache_ttl)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or(CliError::InvalidCacheTtl(cli.cache_ttl))?;

        Ok(Config {
            base_url,
            cache_dir: cli.cache_dir.clone(),
            cache_ttl,
            persistent_cache: !cli.no_cache,
            verbosity: cli.verbose,
        })
    }

    /// Builds the response cache described by this config
    ///
    /// Falls back to an in-memory store when no cache directory can be found.
    pub fn build_cache(&self) -> ResponseCache {
        let store: Arc<dyn KeyValueStore> = if !self.persistent_cache {
            Arc::new(MemoryStore::new())
        } else {
            match self.cache_dir.clone().map(FileStore::with_dir).or_else(FileStore::new) {
                Some(store) => Arc::new(store),
                None => {
                    tracing::warn!("no cache directory available, caching in memory");
                    Arc::new(MemoryStore::new())
                }
            }
        };
        ResponseCache::new(store).with_ttl(self.cache_ttl)
    }

    /// Builds the API client, with its cache, described by this config
    pub fn build_client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone(), self.build_cache())
    }
}

/// Checks page and page size of a `flights` invocation
pub fn validate_paging(args: &FlightsArgs) -> Result<(), CliError> {
    if args.page_size == 0 {
        return Err(CliError::InvalidPageSize(args.page_size));
    }
    if args.page == 0 {
        return Err(CliError::InvalidPage(args.page));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_flights_defaults() {
        let cli = Cli::parse_from(["airops", "flights"]);
        match cli.command {
            Command::Flights(args) => {
                assert_eq!(args.page, 1);
                assert_eq!(args.page_size, DEFAULT_PAGE_SIZE);
                assert!(args.search.is_none());
                assert!(!args.refresh);
            }
            other => panic!("Expected flights command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_flights_filters() {
        let cli = Cli::parse_from([
            "airops", "flights", "--search", "AA", "--status", "retraso", "--date", "2025-01-01",
            "--aircraft", "boeing", "--page", "2", "--page-size", "5",
        ]);
        let Command::Flights(args) = cli.command else {
            panic!("Expected flights command");
        };
        assert_eq!(args.search.as_deref(), Some("AA"));
        assert_eq!(args.status.as_deref(), Some("retraso"));
        assert_eq!(args.date.as_deref(), Some("2025-01-01"));
        assert_eq!(args.aircraft.as_deref(), Some("boeing"));
        assert_eq!(args.page, 2);
        assert_eq!(args.page_size, 5);
    }

    #[test]
    fn test_cli_global_options_after_subcommand() {
        let cli = Cli::parse_from([
            "airops", "browse", "--base-url", "http://api.test:8080", "--no-cache", "-vv",
        ]);
        assert_eq!(cli.base_url, "http://api.test:8080");
        assert!(cli.no_cache);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_cache_clear_optional_path() {
        let cli = Cli::parse_from(["airops", "cache", "clear"]);
        assert!(matches!(
            cli.command,
            Command::Cache { action: CacheAction::Clear { path: None } }
        ));

        let cli = Cli::parse_from(["airops", "cache", "clear", "/flights"]);
        match cli.command {
            Command::Cache { action: CacheAction::Clear { path } } => {
                assert_eq!(path.as_deref(), Some("/flights"));
            }
            other => panic!("Expected cache clear, got {:?}", other),
        }
    }

    #[test]
    fn test_config_from_cli() {
        let cli = Cli::parse_from([
            "airops", "--base-url", "https://ops.example", "--cache-ttl", "60", "browse",
        ]);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.base_url, "https://ops.example");
        assert_eq!(config.cache_ttl, chrono::Duration::seconds(60));
        assert!(config.persistent_cache);
    }

    #[test]
    fn test_config_rejects_bad_base_url() {
        let cli = Cli::parse_from(["airops", "--base-url", "localhost:3000", "browse"]);
        let err = Config::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("Invalid base URL"));
    }

    #[test]
    fn test_config_rejects_zero_page_size() {
        let cli = Cli::parse_from(["airops", "flights", "--page-size", "0"]);
        assert!(matches!(
            Config::from_cli(&cli),
            Err(CliError::InvalidPageSize(0))
        ));
    }

    #[test]
    fn test_config_rejects_out_of_range_cache_ttl() {
        let cli = Cli::parse_from(["airops", "--cache-ttl", "18446744073709551615", "browse"]);
        assert!(matches!(
            Config::from_cli(&cli),
            Err(CliError::InvalidCacheTtl(u64::MAX))
        ));

        // Fits in i64 but not in a time span
        let cli = Cli::parse_from(["airops", "--cache-ttl", "10000000000000000", "browse"]);
        assert!(matches!(
            Config::from_cli(&cli),
            Err(CliError::InvalidCacheTtl(10_000_000_000_000_000))
        ));
    }

    #[test]
    fn test_config_accepts_zero_cache_ttl() {
        let cli = Cli::parse_from(["airops", "--cache-ttl", "0", "browse"]);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.cache_ttl, chrono::Duration::zero());
    }

    #[test]
    fn test_cli_parse_reservations_status() {
        let cli = Cli::parse_from(["airops", "reservations", "7", "--status", "cancel"]);
        match cli.command {
            Command::Reservations { passenger_id, status } => {
                assert_eq!(passenger_id, "7");
                assert_eq!(status.as_deref(), Some("cancel"));
            }
            other => panic!("Expected reservations command, got {:?}", other),
        }
    }

    #[test]
    fn test_config_rejects_page_zero() {
        let cli = Cli::parse_from(["airops", "flights", "--page", "0"]);
        assert!(matches!(Config::from_cli(&cli), Err(CliError::InvalidPage(0))));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_ttl, crate::cache::DEFAULT_TTL);
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_build_cache_uses_configured_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            cache_dir: Some(temp_dir.path().to_path_buf()),
            ..Config::default()
        };

        let cache = config.build_cache();
        cache.set("/flights", &serde_json::json!([]));

        assert!(temp_dir.path().join("airport_cache_%2Fflights.json").exists());
    }
}
