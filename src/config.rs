//! Shop configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::render::{AmountFormatter, UnknownCurrency};

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Storefront configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "carrito", about = "Carrito storefront", long_about = None)]
pub struct ShopConfig {
    /// Catalog location: a JSON or YAML file path, or an http(s) URL.
    #[arg(long, env = "CARRITO_CATALOG", default_value = "data/productos.json")]
    pub catalog: String,

    /// Directory holding the persisted cart and purchase history.
    #[arg(long, env = "CARRITO_DATA_DIR", default_value = ".carrito")]
    pub data_dir: PathBuf,

    /// ISO code of the display currency (ARS, USD, EUR, GBP).
    #[arg(long, env = "CARRITO_CURRENCY", default_value = "ARS")]
    pub currency: String,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl ShopConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Formatter for the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCurrency`] if the currency code is not supported.
    pub fn formatter(&self) -> Result<AmountFormatter, UnknownCurrency> {
        AmountFormatter::for_code(&self.currency)
    }
}
