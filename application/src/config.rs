//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde::Deserialize;
use service::{domain::payment::Payee, infra::http};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Listing backend API configuration.
    #[serde(default)]
    pub api: Api,

    /// Geocoder configuration.
    #[serde(default)]
    pub geocoder: Geocoder,

    /// Payment QR provider configuration.
    #[serde(default)]
    pub payment: Payment,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }

    /// Splits this [`Config`] into the [`http::Config`], the
    /// [`service::Config`] and the [`Log`] configuration.
    #[must_use]
    pub fn split(self) -> (http::Config, service::Config, Log) {
        let Self {
            api,
            geocoder,
            payment,
            log,
        } = self;

        let http = http::Config {
            api_url: api.url,
            geocoder_url: geocoder.url,
            payment_url: payment.url,
            user_agent: geocoder.user_agent,
            timeout: api.timeout,
            client_id: SecretString::new(payment.client_id.into_boxed_str()),
            api_key: SecretString::new(payment.api_key.into_boxed_str()),
        };
        let service = service::Config {
            payee: Payee {
                account_no: payment.account_no,
                account_name: payment.account_name,
                acq_id: payment.acq_id,
            },
            qr_template: payment.template,
        };
        (http, service, log)
    }
}

/// Listing backend API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL of the API.
    #[default("https://localhost:7274/api".to_owned())]
    pub url: String,

    /// Timeout of a single request to any collaborator.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

/// Geocoder configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Geocoder {
    /// URL of the search endpoint.
    #[default("https://nominatim.openstreetmap.org/search".to_owned())]
    pub url: String,

    /// `User-Agent` identifying this application to the geocoder.
    #[default(concat!("listing-wizard/", env!("CARGO_PKG_VERSION")).to_owned())]
    pub user_agent: String,
}

/// Payment QR provider configuration.
#[derive(Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Payment {
    /// URL of the QR generation endpoint.
    #[default("https://api.vietqr.io/v2/generate".to_owned())]
    pub url: String,

    /// Client ID issued by the provider.
    pub client_id: String,

    /// API key issued by the provider.
    pub api_key: String,

    /// Number of the account receiving payments.
    pub account_no: String,

    /// Holder name of the account receiving payments.
    pub account_name: String,

    /// Acquirer ID (bank BIN) of the account receiving payments.
    pub acq_id: String,

    /// Rendering template of QR codes.
    #[default("compact".to_owned())]
    pub template: String,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use secrecy::ExposeSecret as _;

    use super::Config;

    #[test]
    fn defaults_when_nothing_is_configured() {
        let (http, service, log) =
            Config::new("does-not-exist.toml").unwrap().split();

        assert_eq!(http.api_url, "https://localhost:7274/api");
        assert_eq!(
            http.geocoder_url,
            "https://nominatim.openstreetmap.org/search",
        );
        assert_eq!(http.payment_url, "https://api.vietqr.io/v2/generate");
        assert_eq!(http.timeout, Duration::from_secs(30));
        assert_eq!(http.api_key.expose_secret(), "");
        assert_eq!(service.qr_template, "compact");
        assert_eq!(tracing::Level::from(log.level), tracing::Level::INFO);
    }
}
