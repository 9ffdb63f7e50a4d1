//! [`State`] of a [`Wizard`].
//!
//! [`Wizard`]: super::Wizard

use common::{DateTime, Money};

use crate::domain::{
    listing::{self, Coordinates},
    payment::QrCode,
    Draft, Listing, Selection,
};

/// Step of a [`Wizard`].
///
/// [`Wizard`]: super::Wizard
#[derive(Clone, Copy, Debug, strum::Display, Eq, PartialEq)]
#[strum(serialize_all = "camelCase")]
pub enum Step {
    /// Listing fields are being edited.
    Editing,

    /// Promotion is being chosen.
    Configuring,

    /// Payment QR code is issued, and the transfer is awaited.
    AwaitingPayment,

    /// Listing is being posted.
    Completing,

    /// Listing is posted.
    Complete,
}

/// Current state of a [`Wizard`].
///
/// [`Wizard`]: super::Wizard
#[derive(Debug)]
pub enum State {
    /// [`Step::Editing`].
    Editing(Editor),

    /// [`Step::Configuring`].
    Configuring(Checkout),

    /// [`Step::AwaitingPayment`].
    AwaitingPayment {
        /// Frozen [`Checkout`].
        checkout: Checkout,

        /// Issued [`QrCode`].
        qr: QrCode,
    },

    /// [`Step::Completing`].
    ///
    /// Left only once posting finishes, or via a restart if it's abandoned.
    Completing,

    /// [`Step::Complete`].
    Complete(Receipt),
}

impl State {
    /// Returns the [`Step`] of this [`State`].
    #[must_use]
    pub fn step(&self) -> Step {
        match self {
            Self::Editing(_) => Step::Editing,
            Self::Configuring(_) => Step::Configuring,
            Self::AwaitingPayment { .. } => Step::AwaitingPayment,
            Self::Completing => Step::Completing,
            Self::Complete(_) => Step::Complete,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::Editing(Editor::default())
    }
}

/// Listing [`Draft`] being edited.
#[derive(Debug)]
pub struct Editor {
    /// Edited [`Draft`].
    pub(super) draft: Draft,

    /// Center of the location picking map.
    pub(super) map_center: Coordinates,
}

impl Editor {
    /// Resumes editing of the provided [`Draft`].
    pub(super) fn resume(draft: Draft) -> Self {
        Self {
            map_center: draft.location().unwrap_or(Coordinates::HANOI),
            draft,
        }
    }

    /// Returns the edited [`Draft`].
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns the center of the location picking map.
    #[must_use]
    pub fn map_center(&self) -> Coordinates {
        self.map_center
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::resume(Draft::default())
    }
}

/// Submitted listing awaiting its promotion to be chosen and paid.
#[derive(Debug)]
pub struct Checkout {
    /// Frozen [`Draft`], restorable for editing.
    pub(super) draft: Draft,

    /// [`Listing`] validated out of the [`Draft`].
    pub(super) listing: Listing,

    /// Chosen promotion.
    pub(super) selection: Selection,

    /// [`listing::Id`] assigned by the backend, once posted.
    pub(super) created: Option<listing::Id>,
}

impl Checkout {
    /// Returns the frozen [`Draft`].
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns the validated [`Listing`].
    #[must_use]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Returns the chosen promotion.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the [`listing::Id`] assigned by the backend, if it's posted
    /// already.
    #[must_use]
    pub fn created(&self) -> Option<listing::Id> {
        self.created
    }
}

/// Summary of a posted listing.
#[derive(Clone, Debug)]
pub struct Receipt {
    /// [`listing::Id`] assigned by the backend.
    pub id: listing::Id,

    /// Posted [`Listing`].
    pub listing: Listing,

    /// Paid promotion.
    pub selection: Selection,

    /// Paid total.
    pub total: Money,

    /// [`DateTime`] the listing was posted at.
    pub completed_at: DateTime,
}
