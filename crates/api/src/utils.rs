use clap::Parser;
use climate_api_core::{
    find_config_file, get_xdg_data_dir, load_config, path_exists, ConfigSource,
    DATABASE_FILE_NAME, DEFAULT_API_PORT, DEFAULT_DATABASE_PATH, DEFAULT_MAX_CONNECTIONS,
};
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use std::env;
use time::{format_description::well_known::Iso8601, OffsetDateTime};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Climate API - read-only precipitation and temperature observations over HTTP"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $CLIMATE_API_CONFIG, ./climate-api.toml,
    /// $XDG_CONFIG_HOME/climate-api/climate-api.toml, /etc/climate-api/climate-api.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "CLIMATE_API_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, env = "CLIMATE_API_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CLIMATE_API_PORT")]
    pub port: Option<String>,

    /// Path to the SQLite observation database (opened read-only)
    #[arg(short, long, env = "CLIMATE_API_DATABASE")]
    pub database: Option<String>,

    /// Maximum number of pooled database connections
    #[arg(short, long, env = "CLIMATE_API_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Reject path dates that are not YYYY-MM-DD with 400 instead of
    /// returning empty results
    #[arg(short, long, env = "CLIMATE_API_STRICT_DATES")]
    pub strict_dates: Option<bool>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn host(&self) -> String {
        self.host.clone().unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_API_PORT.to_string())
    }

    /// Falls back to the XDG data directory when the default relative
    /// location holds no database
    pub fn database(&self) -> String {
        if let Some(database) = &self.database {
            return database.clone();
        }
        if path_exists(DEFAULT_DATABASE_PATH) {
            return DEFAULT_DATABASE_PATH.to_string();
        }
        let xdg = get_xdg_data_dir().join(DATABASE_FILE_NAME);
        if xdg.exists() {
            return xdg.to_string_lossy().into_owned();
        }
        DEFAULT_DATABASE_PATH.to_string()
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn strict_dates(&self) -> bool {
        self.strict_dates.unwrap_or(false)
    }

    /// CLI args override file config (env vars are handled by clap)
    pub fn merge(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            host: self.host.or(file_config.host),
            port: self.port.or(file_config.port),
            database: self.database.or(file_config.database),
            max_connections: self.max_connections.or(file_config.max_connections),
            strict_dates: self.strict_dates.or(file_config.strict_dates),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("CLIMATE_API_CONFIG", "climate-api.toml")
    };

    // The logger is not set up yet, so report on stderr
    let file_config: Cli = match load_config(&source) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ignoring config from {}: {:#}", source, e);
            Cli::default()
        }
    };

    cli_args.merge(file_config)
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                timestamp,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
