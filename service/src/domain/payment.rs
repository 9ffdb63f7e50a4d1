//! Payment QR code definitions.

use common::Money;
use derive_more::{AsRef, Display};

/// Bank account receiving promotion payments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Payee {
    /// Account number.
    pub account_no: String,

    /// Account holder name, as printed by the bank.
    pub account_name: String,

    /// Acquirer ID (bank BIN) of the account.
    pub acq_id: String,
}

/// Request of a [`QrCode`] for a bank transfer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QrRequest {
    /// [`Payee`] of the transfer.
    pub payee: Payee,

    /// Whole amount to transfer.
    pub amount: Money,

    /// Note identifying the transfer.
    pub memo: String,

    /// Rendering template of the [`QrCode`].
    pub template: String,
}

/// Payment QR code image, as a data URL.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct QrCode(String);

impl QrCode {
    /// Creates a new [`QrCode`] if the provided `url` is non-empty.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        (!url.is_empty()).then_some(Self(url))
    }
}
