//! Infrastructure layer.

pub mod api;
pub mod preview;

pub use self::api::Api;
#[cfg(feature = "http")]
pub use self::api::{http, Http};
