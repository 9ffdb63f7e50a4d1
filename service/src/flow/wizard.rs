//! [`Wizard`] definition.

use std::mem;

use common::{Date, DateTime, Money};
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{
        create_listing, generate_payment_qr, upload_listing_images, Command,
        CreateListing, GeneratePaymentQr, UploadListingImages,
    },
    domain::{
        amenity,
        listing::{self, AddressQuery, Coordinates, Field, File, Submission},
        payment::QrCode,
        promotion::{DurationTier, Package},
        Amenity, Draft, Selection,
    },
    query::{amenities, location, Query},
    Service,
};

use super::{
    overlay::Overlay,
    state::{Checkout, Editor, Receipt, State, Step},
    Error,
};

/// Outcome of confirming a chosen promotion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Listing is posted with the provided [`listing::Id`].
    Complete(listing::Id),

    /// Payment QR code is issued, and the transfer is awaited.
    AwaitingPayment,
}

/// State machine walking a user through posting a rental listing and paying
/// for its promotion.
///
/// Every operation takes `&mut self`, so operations never overlap.
#[derive(Debug)]
pub struct Wizard<A> {
    /// [`Service`] performing backend calls.
    service: Service<A>,

    /// Loaded [`Amenity`] catalog.
    catalog: Vec<Amenity>,

    /// Current [`State`].
    state: State,

    /// [`Overlay`] shown while a backend call is in flight.
    overlay: Overlay,
}

impl<A> Wizard<A> {
    /// Creates a new [`Wizard`] with an empty [`Draft`].
    #[must_use]
    pub fn new(service: Service<A>) -> Self {
        Self {
            service,
            catalog: vec![],
            state: State::default(),
            overlay: Overlay::default(),
        }
    }

    /// Returns the [`Service`] of this [`Wizard`].
    #[must_use]
    pub fn service(&self) -> &Service<A> {
        &self.service
    }

    /// Returns the current [`State`].
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the current [`Step`].
    #[must_use]
    pub fn step(&self) -> Step {
        self.state.step()
    }

    /// Returns the processing [`Overlay`].
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Returns the loaded [`Amenity`] catalog.
    #[must_use]
    pub fn catalog(&self) -> &[Amenity] {
        &self.catalog
    }

    /// Returns the current [`Draft`], unless it's posted already.
    #[must_use]
    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            State::Editing(editor) => Some(editor.draft()),
            State::Configuring(checkout)
            | State::AwaitingPayment { checkout, .. } => Some(checkout.draft()),
            State::Completing | State::Complete(_) => None,
        }
    }

    /// Returns the current [`Checkout`], if the listing is submitted.
    #[must_use]
    pub fn checkout(&self) -> Option<&Checkout> {
        match &self.state {
            State::Configuring(checkout)
            | State::AwaitingPayment { checkout, .. } => Some(checkout),
            State::Editing(_) | State::Completing | State::Complete(_) => None,
        }
    }

    /// Returns the total price of the chosen promotion, if the listing is
    /// submitted.
    #[must_use]
    pub fn total(&self) -> Option<Money> {
        self.checkout().map(|c| c.selection().total())
    }

    /// Returns the issued payment [`QrCode`], if any.
    #[must_use]
    pub fn qr_code(&self) -> Option<&QrCode> {
        match &self.state {
            State::AwaitingPayment { qr, .. } => Some(qr),
            State::Editing(_)
            | State::Configuring(_)
            | State::Completing
            | State::Complete(_) => None,
        }
    }

    /// Returns the bank transfer note of the chosen promotion, if it can be
    /// paid for already.
    #[must_use]
    pub fn transfer_note(&self) -> Option<String> {
        let checkout = self.checkout()?;
        let listing = checkout.listing();
        checkout.selection().memo(&listing.owner, &listing.phone)
    }

    /// Indicates whether the entered phone number should be warned about.
    #[must_use]
    pub fn phone_warning(&self) -> bool {
        self.draft().is_some_and(Draft::phone_warning)
    }

    /// Replaces the raw value of the provided [`Field`].
    ///
    /// # Errors
    ///
    /// If the listing isn't being edited.
    pub fn update_field(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), Traced<Error>> {
        self.editor("updateField")?.draft.set(field, value);
        Ok(())
    }

    /// Selects the [`Amenity`] if it's not selected, or deselects it
    /// otherwise.
    ///
    /// Returns whether the [`Amenity`] is selected after the toggle.
    ///
    /// # Errors
    ///
    /// If the listing isn't being edited.
    pub fn toggle_amenity(
        &mut self,
        id: amenity::Id,
        name: amenity::Name,
    ) -> Result<bool, Traced<Error>> {
        Ok(self
            .editor("toggleAmenity")?
            .draft
            .amenities_mut()
            .toggle(id, name))
    }

    /// Stages the provided image `files`, up to the maximum allowed.
    ///
    /// Returns the number of actually staged files.
    ///
    /// # Errors
    ///
    /// If the listing isn't being edited.
    pub fn add_images(
        &mut self,
        files: impl IntoIterator<Item = File>,
    ) -> Result<usize, Traced<Error>> {
        let previews = self.service.previews().clone();
        Ok(self
            .editor("addImages")?
            .draft
            .images_mut()
            .add(files, &previews))
    }

    /// Removes the staged image at the provided `index`.
    ///
    /// # Errors
    ///
    /// - If the listing isn't being edited.
    /// - If there is no image at the provided `index`.
    pub fn remove_image(&mut self, index: usize) -> Result<File, Traced<Error>> {
        self.editor("removeImage")?
            .draft
            .images_mut()
            .remove(index)
            .ok_or_else(|| tracerr::new!(Error::NoSuchImage(index)))
    }

    /// Sets the listing location to the provided coordinates, centering the
    /// map on it.
    ///
    /// # Errors
    ///
    /// - If the listing isn't being edited.
    /// - If the coordinates are out of range.
    pub fn pick_location(
        &mut self,
        lat: f64,
        lng: f64,
    ) -> Result<Coordinates, Traced<Error>> {
        let editor = self.editor("pickLocation")?;
        let at = Coordinates::new(lat, lng)
            .ok_or_else(|| tracerr::new!(Error::InvalidCoordinates))?;

        editor.draft.set_location(at);
        editor.map_center = at;
        Ok(at)
    }

    /// Validates the edited listing, and proceeds to choosing its promotion.
    ///
    /// # Errors
    ///
    /// - If the listing isn't being edited.
    /// - If the listing fails to validate.
    pub fn submit(&mut self) -> Result<(), Traced<Error>> {
        let editor = self.editor("submit")?;
        let listing = editor
            .draft
            .validate()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .inspect_err(|e| log::warn!("listing is rejected: {e}"))?;

        let Editor { draft, .. } = mem::take(editor);
        self.state = State::Configuring(Checkout {
            draft,
            listing,
            selection: Selection::default(),
            created: None,
        });
        log::info!("listing is submitted, choosing its promotion");
        Ok(())
    }

    /// Chooses the provided promotion [`Package`].
    ///
    /// # Errors
    ///
    /// - If the payment QR code is issued already.
    /// - If the listing isn't submitted yet.
    pub fn select_package(
        &mut self,
        package: Package,
    ) -> Result<(), Traced<Error>> {
        self.pricing("selectPackage")?.selection.package = package;
        Ok(())
    }

    /// Chooses the provided promotion [`DurationTier`].
    ///
    /// # Errors
    ///
    /// - If the payment QR code is issued already.
    /// - If the listing isn't submitted yet.
    pub fn select_duration(
        &mut self,
        duration: DurationTier,
    ) -> Result<(), Traced<Error>> {
        self.pricing("selectDuration")?.selection.duration = duration;
        Ok(())
    }

    /// Chooses the provided start [`Date`] of the promotion.
    ///
    /// # Errors
    ///
    /// - If the payment QR code is issued already.
    /// - If the listing isn't submitted yet.
    /// - If the [`Date`] is in the past.
    pub fn set_start_date(&mut self, date: Date) -> Result<(), Traced<Error>> {
        let checkout = self.pricing("setStartDate")?;
        if date < Date::today() {
            return Err(tracerr::new!(Error::StartDateInPast(date)));
        }
        checkout.selection.start_date = Some(date);
        Ok(())
    }

    /// Returns to editing the submitted listing, keeping all its fields,
    /// amenities and images intact.
    ///
    /// # Errors
    ///
    /// - If the listing isn't submitted, or its payment QR code is issued
    ///   already.
    /// - If the listing is posted already.
    pub fn edit_listing(&mut self) -> Result<(), Traced<Error>> {
        match mem::take(&mut self.state) {
            State::Configuring(Checkout {
                draft,
                created: None,
                ..
            }) => {
                self.state = State::Editing(Editor::resume(draft));
                log::info!("returned to editing the listing");
                Ok(())
            }
            State::Configuring(
                checkout @ Checkout {
                    created: Some(id), ..
                },
            ) => {
                self.state = State::Configuring(checkout);
                Err(tracerr::new!(Error::EditLocked(id)))
            }
            other => {
                let step = other.step();
                self.state = other;
                Err(tracerr::new!(Error::WrongStep {
                    action: "editListing",
                    step,
                }))
            }
        }
    }

    /// Discards everything, and starts over with an empty [`Draft`].
    pub fn restart(&mut self) {
        let from = self.step();
        self.state = State::default();
        log::info!("restarted from `{from}` step");
    }

    /// Returns the [`Editor`], if the listing is being edited.
    fn editor(
        &mut self,
        action: &'static str,
    ) -> Result<&mut Editor, Traced<Error>> {
        match &mut self.state {
            State::Editing(editor) => Ok(editor),
            other => Err(tracerr::new!(Error::WrongStep {
                action,
                step: other.step(),
            })),
        }
    }

    /// Returns the [`Checkout`], if its promotion can still be changed.
    ///
    /// The promotion is locked once its QR code is issued, or once the
    /// listing is posted with it.
    fn pricing(
        &mut self,
        action: &'static str,
    ) -> Result<&mut Checkout, Traced<Error>> {
        let step = self.state.step();
        match &mut self.state {
            State::Configuring(checkout) if checkout.created.is_none() => {
                Ok(checkout)
            }
            State::Configuring(_) | State::AwaitingPayment { .. } => {
                Err(tracerr::new!(Error::PricingLocked))
            }
            _ => Err(tracerr::new!(Error::WrongStep { action, step })),
        }
    }
}

impl<A> Wizard<A>
where
    Service<A>: Query<
        amenities::All,
        Ok = Vec<Amenity>,
        Err = Traced<amenities::ExecutionError>,
    >,
{
    /// Loads the [`Amenity`] catalog to choose from.
    ///
    /// On failure, the previously loaded catalog is kept, and the [`Wizard`]
    /// stays usable.
    ///
    /// # Errors
    ///
    /// If the catalog fails to load.
    pub async fn load_amenities(&mut self) -> Result<usize, Traced<Error>> {
        let catalog = self
            .service
            .execute(amenities::All)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))
            .inspect_err(|e| log::error!("{e}"))?;

        log::info!("loaded {} amenities", catalog.len());
        self.catalog = catalog;
        Ok(self.catalog.len())
    }
}

impl<A> Wizard<A>
where
    Service<A>: Query<
        location::ByAddress,
        Ok = Option<Coordinates>,
        Err = Traced<location::ExecutionError>,
    >,
{
    /// Searches the location of the provided free-form address, and sets the
    /// listing location to it, centering the map on it.
    ///
    /// The listing location is left untouched on failure.
    ///
    /// # Errors
    ///
    /// - If the listing isn't being edited.
    /// - If the address isn't found.
    /// - If the search fails.
    pub async fn geocode(
        &mut self,
        query: &str,
    ) -> Result<Coordinates, Traced<Error>> {
        _ = self.editor("geocode")?;
        let query = AddressQuery::new(query)
            .ok_or_else(|| tracerr::new!(Error::AddressNotFound))?;

        let at = self
            .service
            .execute(location::ByAddress(query.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))
            .inspect_err(|e| log::error!("{e}"))?
            .ok_or_else(|| tracerr::new!(Error::AddressNotFound))
            .inspect_err(|_| log::warn!("address `{query}` is not found"))?;

        let editor = self.editor("geocode")?;
        editor.draft.set_location(at);
        editor.map_center = at;
        log::info!("address `{query}` is located at `{at}`");
        Ok(at)
    }
}

impl<A> Wizard<A>
where
    Service<A>: Command<
            GeneratePaymentQr,
            Ok = QrCode,
            Err = Traced<generate_payment_qr::ExecutionError>,
        > + Command<
            CreateListing,
            Ok = listing::Id,
            Err = Traced<create_listing::ExecutionError>,
        > + for<'i> Command<
            UploadListingImages<'i>,
            Ok = (),
            Err = Traced<upload_listing_images::ExecutionError>,
        >,
{
    /// Confirms the chosen promotion.
    ///
    /// A [`Package::Free`] listing is posted right away. A paid one gets its
    /// payment QR code issued instead, locking the promotion.
    ///
    /// # Errors
    ///
    /// - If the listing isn't submitted, or is being paid for already.
    /// - If a paid promotion has no start date, or it's in the past.
    /// - If the payment QR code fails to generate.
    /// - If the listing fails to be posted.
    pub async fn confirm(&mut self) -> Result<Outcome, Traced<Error>> {
        let State::Configuring(checkout) = &self.state else {
            return Err(tracerr::new!(Error::WrongStep {
                action: "confirm",
                step: self.step(),
            }));
        };

        if checkout.selection.package.is_free() {
            return self.finalize().await.map(Outcome::Complete);
        }

        let start = checkout
            .selection
            .start_date
            .ok_or_else(|| tracerr::new!(Error::StartDateRequired))?;
        if start < Date::today() {
            return Err(tracerr::new!(Error::StartDateInPast(start)));
        }
        let amount = checkout.selection.total();
        let memo = checkout
            .selection
            .memo(&checkout.listing.owner, &checkout.listing.phone)
            .ok_or_else(|| tracerr::new!(Error::StartDateRequired))?;

        let qr = {
            let _processing = self.overlay.show();
            self.service
                .execute(GeneratePaymentQr { amount, memo })
                .await
                .map_err(tracerr::map_from_and_wrap!(=> Error))
                .inspect_err(|e| log::error!("{e}"))?
        };

        self.state = match mem::take(&mut self.state) {
            State::Configuring(checkout) => {
                State::AwaitingPayment { checkout, qr }
            }
            other => other,
        };
        log::info!("payment QR code is issued for {amount}");
        Ok(Outcome::AwaitingPayment)
    }

    /// Confirms the transfer is made, and posts the listing.
    ///
    /// On failure, the [`Wizard`] stays awaiting the payment, so this may be
    /// retried.
    ///
    /// # Errors
    ///
    /// - If no payment is awaited.
    /// - If the listing fails to be posted.
    pub async fn confirm_paid(&mut self) -> Result<listing::Id, Traced<Error>> {
        if self.step() != Step::AwaitingPayment {
            return Err(tracerr::new!(Error::WrongStep {
                action: "confirmPaid",
                step: self.step(),
            }));
        }
        self.finalize().await
    }

    /// Posts the listing, then uploads its images.
    ///
    /// On failure, the previous [`State`] is restored, remembering the
    /// [`listing::Id`] if the listing was posted, so a retry only uploads
    /// the images.
    async fn finalize(&mut self) -> Result<listing::Id, Traced<Error>> {
        let (mut checkout, qr) = match mem::take(&mut self.state) {
            State::Configuring(checkout) => (checkout, None),
            State::AwaitingPayment { checkout, qr } => (checkout, Some(qr)),
            other => {
                let step = other.step();
                self.state = other;
                return Err(tracerr::new!(Error::WrongStep {
                    action: "finalize",
                    step,
                }));
            }
        };
        self.state = State::Completing;

        let result = {
            let _processing = self.overlay.show();
            self.publish(&mut checkout).await
        };
        match result {
            Ok(id) => {
                let Checkout {
                    listing, selection, ..
                } = checkout;
                log::info!("listing `{id}` is complete");
                self.state = State::Complete(Receipt {
                    id,
                    total: selection.total(),
                    listing,
                    selection,
                    completed_at: DateTime::now(),
                });
                Ok(id)
            }
            Err(e) => {
                log::error!("{e}");
                self.state = match qr {
                    Some(qr) => State::AwaitingPayment { checkout, qr },
                    None => State::Configuring(checkout),
                };
                Err(e)
            }
        }
    }

    /// Posts the listing of the provided [`Checkout`] unless it's posted
    /// already, and uploads its images.
    async fn publish(
        &self,
        checkout: &mut Checkout,
    ) -> Result<listing::Id, Traced<Error>> {
        let id = if let Some(id) = checkout.created {
            log::info!("listing `{id}` is posted already, retrying upload");
            id
        } else {
            let submission = Submission {
                listing: checkout.listing.clone(),
                post_time: checkout.selection.post_time(),
                post_price: checkout.selection.post_price(),
            };
            let id = self
                .service
                .execute(CreateListing { submission })
                .await
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
            log::info!("listing `{id}` is posted");
            checkout.created = Some(id);
            id
        };

        self.service
            .execute(UploadListingImages {
                id,
                images: checkout.draft.images(),
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        Ok(id)
    }
}
