//! [`Command`] definition.

pub mod create_listing;
pub mod generate_payment_qr;
pub mod upload_listing_images;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_listing::CreateListing, generate_payment_qr::GeneratePaymentQr,
    upload_listing_images::UploadListingImages,
};
