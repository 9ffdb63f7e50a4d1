//! HTTP [`Api`] implementation.

mod amenity;
mod geocode;
mod listing;
mod payment;

use std::{sync::Arc, time::Duration};

use derive_more::{Display, Error as StdError, From};
use secrecy::SecretString;
use tracerr::Traced;
use tracing as log;

use crate::infra::api;
#[cfg(doc)]
use crate::infra::Api;

/// [`Http`] client configuration.
#[derive(Debug)]
pub struct Config {
    /// Base URL of the listing backend API, without a trailing slash.
    pub api_url: String,

    /// URL of the geocoding search endpoint.
    pub geocoder_url: String,

    /// URL of the payment QR generation endpoint.
    pub payment_url: String,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Timeout of a single request.
    pub timeout: Duration,

    /// Client ID of the payment QR provider.
    pub client_id: SecretString,

    /// API key of the payment QR provider.
    pub api_key: SecretString,
}

/// [`Api`] talking to the real backends over HTTP.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying [`reqwest::Client`].
    client: reqwest::Client,

    /// [`Config`] of this [`Http`] client.
    config: Arc<Config>,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build the underlying [`reqwest::Client`].
    pub fn new(config: Config) -> Result<Self, Traced<api::Error>> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Returns the URL of the provided `path` of the listing backend API.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.api_url.trim_end_matches('/'))
    }

    /// Sends the provided `request`, rejecting any non-success response.
    async fn send(
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Traced<Error>> {
        let response = request
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("`{}` responded with `{status}`", response.url());
            return Err(tracerr::new!(Error::Status(status.as_u16())));
        }
        Ok(response)
    }
}

/// [`Http`] client error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request failed to be sent, or its response failed to be read.
    #[display("HTTP request failed: {_0}")]
    Request(reqwest::Error),

    /// Response has a non-success status.
    #[display("Unexpected response status `{_0}`")]
    #[from(ignore)]
    Status(#[error(not(source))] u16),

    /// Response body doesn't have the expected shape.
    #[display("Malformed response: {_0}")]
    #[from(ignore)]
    Malformed(#[error(not(source))] &'static str),
}
