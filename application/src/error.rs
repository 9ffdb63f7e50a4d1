//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    command::{create_listing, generate_payment_qr, upload_listing_images},
    domain::listing::{Field, ValidationError},
    flow,
    query::{amenities, location},
};
use tracerr::{Trace, Traced};

/// User-facing [`Error`], shown as a toast.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self::new("INTERNAL_ERROR", msg)
    }

    /// Creates a new [`Error`] with the provided `code` and message.
    #[must_use]
    pub fn new(code: Code, msg: &impl ToString) -> Self {
        Self {
            code,
            backtrace: None,
            message: msg.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for flow::Error {
    fn try_as_error(&self) -> Option<Error> {
        use flow::Error as E;

        let code = match self {
            E::WrongStep { .. } => "WRONG_STEP",
            E::PricingLocked => "PRICING_LOCKED",
            E::Validation(e) => return e.try_as_error(),
            E::NoSuchImage(_) => "NO_SUCH_IMAGE",
            E::InvalidCoordinates => "INVALID_COORDINATES",
            E::AddressNotFound => "ADDRESS_NOT_FOUND",
            E::Geocoding(e) => return e.try_as_error(),
            E::Amenities(e) => return e.try_as_error(),
            E::StartDateRequired => "START_DATE_REQUIRED",
            E::StartDateInPast(_) => "START_DATE_IN_PAST",
            E::QrGeneration(e) => return e.try_as_error(),
            E::Create(e) => return e.try_as_error(),
            E::Upload(e) => return e.try_as_error(),
            E::EditLocked(_) => "EDIT_LOCKED",
        };
        Some(Error::new(code, self))
    }
}

impl AsError for ValidationError {
    fn try_as_error(&self) -> Option<Error> {
        let code = match self {
            Self::NotEnoughImages(_) => "NOT_ENOUGH_IMAGES",
            Self::InvalidPhone => "INVALID_PHONE",
            Self::Required(_) => "FIELD_REQUIRED",
            Self::Invalid(Field::Price) => "INVALID_PRICE",
            Self::Invalid(Field::Area) => "INVALID_AREA",
            Self::Invalid(_) => "INVALID_FIELD",
        };
        Some(Error::new(code, self))
    }
}

impl AsError for location::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new("GEOCODING_FAILED", self))
    }
}

impl AsError for amenities::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new("AMENITIES_UNAVAILABLE", self))
    }
}

impl AsError for generate_payment_qr::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new("QR_GENERATION_FAILED", self))
    }
}

impl AsError for create_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use create_listing::ExecutionError as E;

        let code = match self {
            E::Api(_) => "CREATE_FAILED",
            E::InvalidResponse(_) => "INVALID_CREATE_RESPONSE",
        };
        Some(Error::new(code, self))
    }
}

impl AsError for upload_listing_images::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new("UPLOAD_FAILED", self))
    }
}

#[cfg(test)]
mod spec {
    use service::{domain::listing::ValidationError, flow};

    use super::AsError as _;

    #[test]
    fn maps_flow_errors_to_stable_codes() {
        let err = flow::Error::Validation(ValidationError::NotEnoughImages(2))
            .into_error();
        assert_eq!(err.code, "NOT_ENOUGH_IMAGES");

        let err = flow::Error::StartDateRequired.into_error();
        assert_eq!(err.code, "START_DATE_REQUIRED");
        assert_eq!(err.message, "Choose a start date");
        assert!(err.backtrace.is_none());
    }

    #[test]
    fn attaches_trace_of_traced_errors() {
        let err = tracerr::new!(flow::Error::PricingLocked).into_error();

        assert_eq!(err.code, "PRICING_LOCKED");
        assert!(err.backtrace.is_some());
        assert!(err.to_string().starts_with("[PRICING_LOCKED]: "));
    }
}
