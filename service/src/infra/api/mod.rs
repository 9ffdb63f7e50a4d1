//! [`Api`]-related implementations.

#[cfg(test)]
pub mod fake;
#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Operation of a backend collaborator.
pub use common::Handler as Api;

/// [`Api`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] error.
    Http(http::Error),

    #[cfg(test)]
    /// Failure scripted in a [`fake::Fake`].
    #[display("scripted failure: {_0}")]
    #[from(ignore)]
    Scripted(#[error(not(source))] &'static str),
}
