//! [`Query`] definition.

pub mod amenities;
pub mod location;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;
