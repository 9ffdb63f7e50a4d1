//! Service contains the business logic of posting a rental listing and
//! paying for its promotion.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod flow;
pub mod infra;
pub mod query;

use derive_more::Debug;
use smart_default::SmartDefault;

#[cfg(doc)]
use infra::Api;
use infra::preview;

pub use self::{command::Command, flow::Wizard, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Bank account receiving promotion payments.
    pub payee: domain::payment::Payee,

    /// Rendering template of payment QR codes.
    #[default("compact".to_owned())]
    pub qr_template: String,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<A> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Api`] of this [`Service`].
    api: A,

    /// Registry of image previews acquired by this [`Service`].
    previews: preview::Registry,
}

impl<A> Service<A> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, api: A) -> Self {
        Self {
            config,
            api,
            previews: preview::Registry::default(),
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Api`] of this [`Service`].
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the [`preview::Registry`] of this [`Service`].
    #[must_use]
    pub fn previews(&self) -> &preview::Registry {
        &self.previews
    }
}
