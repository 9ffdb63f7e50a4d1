//! In-memory [`Api`] recording its calls, for tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};

use common::operations::{By, Generate, Insert, Select, Upload};
use tracerr::Traced;

use crate::{
    domain::{
        amenity,
        listing::{self, AddressQuery, Coordinates, ImageBatch, Submission},
        payment::{QrCode, QrRequest},
        Amenity,
    },
    flow::Overlay,
    infra::{api, Api},
};

/// Call received by a [`Fake`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    /// Amenity catalog was fetched.
    Amenities,

    /// Address was geocoded.
    Geocode(String),

    /// Listing was created.
    Create(Submission),

    /// Images were uploaded.
    Upload {
        /// ID of the listing the images were uploaded to.
        id: listing::Id,

        /// Names of the uploaded files, in order.
        files: Vec<String>,
    },

    /// Payment QR code was generated.
    Qr(QrRequest),
}

/// Scripted result of a [`Fake`] call.
type Scripted<T> = Result<T, &'static str>;

/// State shared between [`Fake`] clones.
#[derive(Debug)]
struct State {
    calls: Vec<Call>,
    overlay_seen: Vec<bool>,
    overlay: Option<Overlay>,
    amenities: Scripted<Vec<Amenity>>,
    place: Scripted<Option<Coordinates>>,
    creates: VecDeque<Scripted<String>>,
    uploads: VecDeque<Scripted<()>>,
    qr: Scripted<QrCode>,
}

/// [`Api`] answering with scripted results.
///
/// Unless scripted otherwise, every call succeeds: listings are created with
/// ID `42`, and addresses are not found.
#[derive(Clone, Debug)]
pub struct Fake(Arc<Mutex<State>>);

impl Default for Fake {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(State {
            calls: vec![],
            overlay_seen: vec![],
            overlay: None,
            amenities: Ok(vec![]),
            place: Ok(None),
            creates: VecDeque::new(),
            uploads: VecDeque::new(),
            qr: Ok(QrCode::new("data:image/png;base64,UVI=")
                .expect("non-empty")),
        })))
    }
}

impl Fake {
    /// Runs the provided closure over the shared [`State`].
    fn with<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        f(&mut self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Records the provided [`Call`] along with the [`Overlay`] visibility.
    fn record(&self, call: Call) {
        self.with(|s| {
            let seen = s.overlay.as_ref().is_some_and(Overlay::is_shown);
            s.overlay_seen.push(seen);
            s.calls.push(call);
        });
    }

    /// Makes this [`Fake`] observe the provided [`Overlay`] on every call.
    pub fn observe(&self, overlay: Overlay) {
        self.with(|s| s.overlay = Some(overlay));
    }

    /// Scripts the amenity catalog.
    pub fn respond_amenities(&self, result: Scripted<Vec<Amenity>>) {
        self.with(|s| s.amenities = result);
    }

    /// Scripts the geocoding result.
    pub fn respond_place(&self, result: Scripted<Option<Coordinates>>) {
        self.with(|s| s.place = result);
    }

    /// Queues a raw listing creation response.
    pub fn respond_create(&self, result: Scripted<&str>) {
        self.with(|s| s.creates.push_back(result.map(str::to_owned)));
    }

    /// Queues an image upload result.
    pub fn respond_upload(&self, result: Scripted<()>) {
        self.with(|s| s.uploads.push_back(result));
    }

    /// Scripts the QR generation result.
    pub fn respond_qr(&self, result: Scripted<QrCode>) {
        self.with(|s| s.qr = result);
    }

    /// Returns all the received [`Call`]s, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.with(|s| s.calls.clone())
    }

    /// Returns whether the observed [`Overlay`] was shown during each of the
    /// received [`Call`]s.
    #[must_use]
    pub fn overlay_seen(&self) -> Vec<bool> {
        self.with(|s| s.overlay_seen.clone())
    }
}

/// Converts a [`Scripted`] result into an [`Api`] one.
fn answer<T>(result: Scripted<T>) -> Result<T, Traced<api::Error>> {
    result.map_err(|e| tracerr::new!(api::Error::Scripted(e)))
}

impl Api<Select<By<Vec<Amenity>, amenity::Catalog>>> for Fake {
    type Ok = Vec<Amenity>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Amenity>, amenity::Catalog>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.record(Call::Amenities);
        answer(self.with(|s| s.amenities.clone()))
    }
}

impl Api<Select<By<Option<Coordinates>, AddressQuery>>> for Fake {
    type Ok = Option<Coordinates>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Coordinates>, AddressQuery>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.record(Call::Geocode(by.into_inner().to_string()));
        answer(self.with(|s| s.place))
    }
}

impl Api<Insert<Submission>> for Fake {
    type Ok = String;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(submission): Insert<Submission>,
    ) -> Result<Self::Ok, Self::Err> {
        self.record(Call::Create(submission));
        answer(
            self.with(|s| s.creates.pop_front())
                .unwrap_or_else(|| Ok("42".into())),
        )
    }
}

impl<'a> Api<Upload<ImageBatch<'a>>> for Fake {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Upload(batch): Upload<ImageBatch<'a>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.record(Call::Upload {
            id: batch.id,
            files: batch.images.files().map(|f| f.name.clone()).collect(),
        });
        answer(self.with(|s| s.uploads.pop_front()).unwrap_or(Ok(())))
    }
}

impl Api<Generate<QrRequest>> for Fake {
    type Ok = QrCode;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Generate(req): Generate<QrRequest>,
    ) -> Result<Self::Ok, Self::Err> {
        self.record(Call::Qr(req));
        answer(self.with(|s| s.qr.clone()))
    }
}
