//! [`ListingFile`] describing a listing to post.

use std::{
    io,
    path::{Path, PathBuf},
    str::FromStr as _,
};

use common::Date;
use config::{ConfigError, FileFormat};
use derive_more::{Display, Error as StdError, From};
use itertools::Itertools as _;
use serde::Deserialize;
use service::{
    domain::{
        amenity,
        listing::{Field, File},
        Amenity,
        promotion::{DurationTier, Package},
    },
    flow,
};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{AsError, Wizard};

/// Listing to post, as described in a file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingFile {
    /// Title of the listing.
    pub title: String,

    /// Description of the listing.
    pub description: String,

    /// Monthly rent in đồng.
    pub price: String,

    /// Floor area in square meters.
    pub area: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// District.
    pub district: String,

    /// Ward.
    pub ward: String,

    /// `apartment`, `house` or `room`.
    pub property_type: String,

    /// Contact phone number.
    pub phone: String,

    /// Owner name.
    pub owner: String,

    /// `vacant`, `rented` or `maintenance`.
    pub status: Option<String>,

    /// Exact location. The address is geocoded if omitted.
    pub location: Option<Location>,

    /// IDs of the offered amenities.
    pub amenities: Vec<u32>,

    /// Paths to the image files, in display order.
    pub images: Vec<PathBuf>,

    /// Chosen promotion.
    pub promotion: Promotion,
}

/// Exact location of a listing.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Location {
    /// Latitude.
    pub lat: f64,

    /// Longitude.
    pub lng: f64,
}

/// Chosen promotion of a listing.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Promotion {
    /// Package name, like `pushListing`.
    #[default("free".to_owned())]
    pub package: String,

    /// Number of days: 3, 7 or 30.
    #[default(3)]
    pub duration: u16,

    /// Start date as `YYYY-MM-DD`. Required for paid packages.
    pub start_date: Option<String>,
}

impl ListingFile {
    /// Loads a [`ListingFile`] from the provided `path`, in any format
    /// detected by its extension.
    ///
    /// # Errors
    ///
    /// If the file can't be read or doesn't describe a listing.
    pub fn load(path: PathBuf) -> Result<Self, Traced<Error>> {
        config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Parses a [`ListingFile`] out of the provided TOML `source`.
    ///
    /// # Errors
    ///
    /// If the `source` doesn't describe a listing.
    pub fn from_toml(source: &str) -> Result<Self, Traced<Error>> {
        config::Config::builder()
            .add_source(config::File::from_str(source, FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Fills the [`Wizard`] with this listing, reading its images and
    /// geocoding its address if needed.
    ///
    /// # Errors
    ///
    /// If an image can't be read, or the [`Wizard`] rejects anything.
    pub async fn fill(self, wizard: &mut Wizard) -> Result<(), Traced<Error>> {
        let Self {
            title,
            description,
            price,
            area,
            address,
            city,
            district,
            ward,
            property_type,
            phone,
            owner,
            status,
            location,
            amenities,
            images,
            promotion: _,
        } = self;

        let geocode_query = [&address, &ward, &district, &city]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        for (field, value) in [
            (Field::Title, title),
            (Field::Description, description),
            (Field::Price, price),
            (Field::Area, area),
            (Field::Address, address),
            (Field::City, city),
            (Field::District, district),
            (Field::Ward, ward),
            (Field::PropertyType, property_type),
            (Field::PhoneNum, phone),
            (Field::Owner, owner),
        ]
        .into_iter()
        .chain(status.map(|s| (Field::Status, s)))
        {
            wizard
                .update_field(field, value)
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        }

        for Amenity { id, name } in offered(amenities, wizard.catalog()) {
            _ = wizard
                .toggle_amenity(id, name)
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        }

        let mut files = Vec::with_capacity(images.len());
        for path in images {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(tracerr::from_and_wrap!(=> Error))?;
            files.push(File::new(
                path.file_name()
                    .map_or_else(String::new, |n| n.to_string_lossy().into()),
                content_type(&path),
                bytes,
            ));
        }
        let staged = wizard
            .add_images(files)
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        log::info!("staged {staged} image(s)");

        if let Some(Location { lat, lng }) = location {
            _ = wizard
                .pick_location(lat, lng)
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        } else if let Err(e) = wizard.geocode(&geocode_query).await {
            log::warn!("listing is posted without location: {}", e.as_error());
        }

        Ok(())
    }
}

impl Promotion {
    /// Chooses this [`Promotion`] in the [`Wizard`].
    ///
    /// # Errors
    ///
    /// If this [`Promotion`] is malformed, or the [`Wizard`] rejects it.
    pub fn choose(&self, wizard: &mut Wizard) -> Result<(), Traced<Error>> {
        let package = Package::from_str(&self.package).map_err(|_| {
            tracerr::new!(Error::UnknownPackage(self.package.clone()))
        })?;
        let duration = DurationTier::from_days(self.duration)
            .ok_or_else(|| tracerr::new!(Error::UnknownDuration(self.duration)))?;

        wizard
            .select_package(package)
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        wizard
            .select_duration(duration)
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        if let Some(date) = &self.start_date {
            let date = Date::from_str(date)
                .map_err(|e| tracerr::new!(Error::InvalidDate(e)))?;
            wizard
                .set_start_date(date)
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        }
        Ok(())
    }
}

/// Looks up the catalog [`Amenity`]s with the provided `ids`, once each and
/// in the order of the `ids`.
///
/// IDs missing from the `catalog` are skipped.
fn offered(ids: Vec<u32>, catalog: &[Amenity]) -> Vec<Amenity> {
    ids.into_iter()
        .unique()
        .map(amenity::Id::from)
        .filter_map(|id| {
            let found = catalog.iter().find(|a| a.id == id).cloned();
            if found.is_none() {
                log::warn!("`Amenity(id: {id})` is not in the catalog");
            }
            found
        })
        .collect()
}

/// Guesses the MIME type of an image file by its extension.
fn content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_owned()
}

/// Error of posting a [`ListingFile`].
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`ListingFile`] is malformed.
    #[display("Malformed listing file: {_0}")]
    File(ConfigError),

    /// Image file can't be read.
    #[display("Failed to read an image: {_0}")]
    Image(io::Error),

    /// [`Wizard`] rejected the listing.
    #[display("{_0}")]
    Flow(flow::Error),

    /// Promotion package is unknown.
    #[display("Unknown promotion package `{_0}`")]
    #[from(ignore)]
    UnknownPackage(#[error(not(source))] String),

    /// Promotion duration is not offered.
    #[display("Promotion for {_0} days is not offered")]
    #[from(ignore)]
    UnknownDuration(#[error(not(source))] u16),

    /// Start date is malformed.
    #[display("Invalid start date: {_0}")]
    #[from(ignore)]
    InvalidDate(#[error(not(source))] &'static str),
}

impl AsError for Error {
    fn try_as_error(&self) -> Option<crate::Error> {
        let code = match self {
            Self::Flow(e) => return e.try_as_error(),
            Self::File(_) => "MALFORMED_LISTING_FILE",
            Self::Image(_) => "IMAGE_UNREADABLE",
            Self::UnknownPackage(_) => "UNKNOWN_PACKAGE",
            Self::UnknownDuration(_) => "UNKNOWN_DURATION",
            Self::InvalidDate(_) => "INVALID_START_DATE",
        };
        Some(crate::Error::new(code, self))
    }
}
