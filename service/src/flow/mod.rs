//! Post-and-pay [`Wizard`] of a rental listing.
//!
//! A listing is edited first ([`Step::Editing`]), then submitted to choose
//! its promotion ([`Step::Configuring`]). Paid promotions require a bank
//! transfer through a QR code ([`Step::AwaitingPayment`]) before the listing
//! is posted along with its images ([`Step::Completing`]), after which the
//! [`Wizard`] is [`Step::Complete`].

mod overlay;
mod state;
mod wizard;

use common::Date;
use derive_more::{Display, Error as StdError, From};

use crate::{
    command::{create_listing, generate_payment_qr, upload_listing_images},
    domain::listing::{self, ValidationError},
    query::{amenities, location},
};

pub use self::{
    overlay::Overlay,
    state::{Checkout, Editor, Receipt, State, Step},
    wizard::{Outcome, Wizard},
};

/// Error of a [`Wizard`] operation.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Operation isn't available at the current [`Step`].
    #[display("`{action}` is not available at `{step}` step")]
    WrongStep {
        /// Name of the rejected operation.
        action: &'static str,

        /// [`Step`] the operation was rejected at.
        step: Step,
    },

    /// Promotion can't be changed once its payment QR code is issued.
    #[display("Pricing is locked once a payment QR code is issued")]
    PricingLocked,

    /// Listing failed to validate.
    #[display("{_0}")]
    #[from]
    Validation(ValidationError),

    /// There is no staged image at the provided position.
    #[display("No image at position {_0}")]
    NoSuchImage(#[error(not(source))] usize),

    /// Picked coordinates are out of range.
    #[display("Coordinates are out of range")]
    InvalidCoordinates,

    /// Searched address isn't found.
    #[display("Address not found")]
    AddressNotFound,

    /// Address search failed.
    #[display("Address search failed: {_0}")]
    #[from]
    Geocoding(location::ExecutionError),

    /// Amenity catalog failed to load.
    #[display("Failed to load amenities: {_0}")]
    #[from]
    Amenities(amenities::ExecutionError),

    /// Paid promotion has no start date chosen.
    #[display("Choose a start date")]
    StartDateRequired,

    /// Chosen start date is in the past.
    #[display("Start date `{_0}` is in the past")]
    StartDateInPast(#[error(not(source))] Date),

    /// Payment QR code failed to generate.
    #[display("Failed to generate a payment QR code: {_0}")]
    #[from]
    QrGeneration(generate_payment_qr::ExecutionError),

    /// Listing failed to be posted.
    #[display("Failed to post the listing: {_0}")]
    #[from]
    Create(create_listing::ExecutionError),

    /// Listing is posted, but its images failed to upload.
    #[display("Failed to upload the listing images: {_0}")]
    #[from]
    Upload(upload_listing_images::ExecutionError),

    /// Listing is posted already, so can't be edited anymore.
    #[display("`Listing(id: {_0})` is posted already and can't be edited")]
    EditLocked(#[error(not(source))] listing::Id),
}

#[cfg(test)]
mod spec {
    use std::error::Error as _;

    use crate::domain::listing::ValidationError;

    use super::{Error, Step};

    #[test]
    fn describes_rejections() {
        let err = Error::WrongStep {
            action: "submit",
            step: Step::AwaitingPayment,
        };
        assert_eq!(
            err.to_string(),
            "`submit` is not available at `awaitingPayment` step",
        );
        assert!(err.source().is_none());

        let err = Error::from(ValidationError::InvalidPhone);
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.source().is_some());
    }
}
