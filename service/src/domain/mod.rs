//! Domain definitions.

pub mod amenity;
pub mod listing;
pub mod payment;
pub mod promotion;

pub use self::{
    amenity::Amenity,
    listing::{Draft, Listing},
    promotion::Selection,
};
