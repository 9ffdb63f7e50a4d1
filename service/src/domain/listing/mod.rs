//! [`Listing`] definitions.

pub mod image;
pub mod phone;

use std::str::FromStr;

use common::{define_kind, money::Currency, Date, Money};
use derive_more::{AsRef, Display, Error, From, Into};
use rust_decimal::Decimal;
use smart_default::SmartDefault;
use strum::{EnumString, IntoStaticStr};

use crate::domain::{
    amenity::{Amenities, Amenity},
    promotion::PostPrice,
};

pub use self::{
    image::{File, Images},
    phone::Phone,
};

/// Rental listing validated out of a [`Draft`].
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`].
    pub description: Description,

    /// [`PropertyType`] of this [`Listing`].
    pub property_type: PropertyType,

    /// Monthly [`Price`] of this [`Listing`].
    pub price: Price,

    /// [`Area`] of this [`Listing`].
    pub area: Area,

    /// Street [`Address`] of this [`Listing`].
    pub address: Address,

    /// [`City`] of this [`Listing`].
    pub city: City,

    /// [`District`] of this [`Listing`].
    pub district: District,

    /// [`Ward`] of this [`Listing`].
    pub ward: Ward,

    /// [`Coordinates`] of this [`Listing`], if picked.
    pub location: Option<Coordinates>,

    /// Contact [`Phone`] of this [`Listing`].
    pub phone: Phone,

    /// [`OwnerName`] of this [`Listing`].
    pub owner: OwnerName,

    /// Occupancy [`Status`] of this [`Listing`].
    pub status: Status,

    /// [`Amenity`]s offered by this [`Listing`], in selection order.
    pub amenities: Vec<Amenity>,
}

/// ID of a [`Listing`] assigned by the backend.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Id(u64);

impl FromStr for Id {
    type Err = &'static str;

    /// Parses an [`Id`] out of a plain-text backend response.
    ///
    /// Surrounding whitespace is ignored. Zero is rejected, as it denotes a
    /// not yet assigned [`Id`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u64>() {
            Ok(0) => Err("zero `listing::Id`"),
            Ok(id) => Ok(Self(id)),
            Err(_) => Err("non-numeric `listing::Id`"),
        }
    }
}

/// Defines a length-limited text newtype.
macro_rules! define_text {
    ($(
        #[doc = $doc:literal]
        $name:ident(max = $max:expr);
    )*) => {$(
        #[doc = $doc]
        #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
        #[as_ref(str, String)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Maximal length of a [`", stringify!($name), "`] in characters.")]
            pub const MAX_LEN: usize = $max;

            #[doc = concat!("Creates a new [`", stringify!($name), "`] if the provided `text` is valid.")]
            #[must_use]
            pub fn new(text: impl Into<String>) -> Option<Self> {
                let text = text.into();
                Self::check(&text).then_some(Self(text))
            }

            /// Checks the `text` is trimmed, non-empty and not too long.
            fn check(text: &str) -> bool {
                !text.is_empty()
                    && text.trim() == text
                    && text.chars().count() <= Self::MAX_LEN
            }
        }

        impl FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    )*};
}

define_text! {
    #[doc = "Title of a [`Listing`]."]
    Title(max = 100);

    #[doc = "Free-form description of a [`Listing`]."]
    Description(max = 10_000);

    #[doc = "Street address of a [`Listing`]."]
    Address(max = 100);

    #[doc = "City (province) of a [`Listing`]."]
    City(max = 50);

    #[doc = "District of a [`Listing`]."]
    District(max = 50);

    #[doc = "Ward of a [`Listing`]."]
    Ward(max = 50);

    #[doc = "Name of a [`Listing`] owner."]
    OwnerName(max = 50);
}

/// Monthly rent of a [`Listing`], a positive whole amount of [`Money`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub struct Price(Money);

impl Price {
    /// Creates a new [`Price`] if the provided `money` is a positive whole
    /// amount.
    #[must_use]
    pub fn new(money: Money) -> Option<Self> {
        (money.amount > Decimal::ZERO && money.amount.is_integer())
            .then_some(Self(money))
    }

    /// Returns the [`Money`] of this [`Price`].
    #[must_use]
    pub fn money(self) -> Money {
        self.0
    }
}

impl FromStr for Price {
    type Err = &'static str;

    /// Parses a [`Price`] out of a plain number of [`Currency::Vnd`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s).map_err(|_| "invalid `Price`")?;
        Self::new(Money {
            amount,
            currency: Currency::Vnd,
        })
        .ok_or("non-positive or fractional `Price`")
    }
}

/// Floor area of a [`Listing`] in square meters.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub struct Area(Decimal);

impl Area {
    /// Creates a new [`Area`] if the provided `value` is positive.
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO).then(|| Self(value.normalize()))
    }

    /// Returns the square meters of this [`Area`].
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl FromStr for Area {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Area`")
    }
}

/// Geographic coordinates in decimal degrees, with 6-decimal precision.
#[derive(Clone, Copy, Debug, Display, PartialEq)]
#[display("{lat:.6}, {lng:.6}")]
pub struct Coordinates {
    /// Latitude.
    lat: f64,

    /// Longitude.
    lng: f64,
}

impl Coordinates {
    /// Center of Hanoi, the default map center.
    pub const HANOI: Self = Self {
        lat: 21.0285,
        lng: 105.8542,
    };

    /// Creates new [`Coordinates`], rounded to 6 decimals.
    ///
    /// [`None`] is returned if any of the values is out of its range.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let round = |v: f64| (v * 1e6).round() / 1e6;

        ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng))
            .then(|| Self {
                lat: round(lat),
                lng: round(lng),
            })
    }

    /// Returns the latitude.
    #[must_use]
    pub fn lat(self) -> f64 {
        self.lat
    }

    /// Returns the longitude.
    #[must_use]
    pub fn lng(self) -> f64 {
        self.lng
    }
}

define_kind! {
    #[doc = "Type of a property offered by a [`Listing`]."]
    #[serialize_all = "camelCase"]
    enum PropertyType {
        #[doc = "Apartment in a building."]
        Apartment = 1,

        #[doc = "Standalone house."]
        House = 2,

        #[doc = "Single room."]
        Room = 3,
    }
}

define_kind! {
    #[doc = "Occupancy status of a [`Listing`]."]
    #[serialize_all = "camelCase"]
    enum Status {
        #[doc = "Ready to be rented."]
        Vacant = 1,

        #[doc = "Already rented."]
        Rented = 2,

        #[doc = "Under maintenance."]
        Maintenance = 3,
    }
}

/// Non-empty free-form address to geocode.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct AddressQuery(String);

impl AddressQuery {
    /// Creates a new [`AddressQuery`] out of the provided `text`, trimming
    /// it.
    ///
    /// [`None`] is returned if nothing remains after trimming.
    #[must_use]
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        (!text.is_empty()).then(|| Self(text.to_owned()))
    }
}

/// Editable field of a [`Draft`], named the way the listing form names it.
#[derive(
    Clone,
    Copy,
    Debug,
    strum::Display,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    PartialEq,
)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    /// [`Title`] input.
    #[strum(serialize = "content")]
    Title,

    /// [`Description`] input.
    Description,

    /// [`Price`] input.
    Price,

    /// [`Area`] input.
    Area,

    /// [`Address`] input.
    Address,

    /// [`City`] input.
    City,

    /// [`District`] input.
    District,

    /// [`Ward`] input.
    Ward,

    /// [`PropertyType`] input.
    PropertyType,

    /// [`Phone`] input.
    PhoneNum,

    /// [`OwnerName`] input.
    Owner,

    /// [`Status`] input.
    Status,
}

/// Listing form being edited, holding raw user inputs.
#[derive(Debug, SmartDefault)]
pub struct Draft {
    /// Raw [`Title`].
    title: String,

    /// Raw [`Description`].
    description: String,

    /// Raw [`Price`].
    price: String,

    /// Raw [`Area`].
    area: String,

    /// Raw [`Address`].
    address: String,

    /// Raw [`City`].
    city: String,

    /// Raw [`District`].
    district: String,

    /// Raw [`Ward`].
    ward: String,

    /// Raw [`PropertyType`].
    property_type: String,

    /// Raw [`Phone`].
    phone_num: String,

    /// Raw [`OwnerName`].
    owner: String,

    /// Raw [`Status`].
    #[default(Status::Vacant.to_string())]
    status: String,

    /// Picked [`Coordinates`].
    location: Option<Coordinates>,

    /// Selected [`Amenities`].
    amenities: Amenities,

    /// Staged [`Images`].
    images: Images,
}

impl Draft {
    /// Returns the raw value of the provided [`Field`].
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        self.slot(field)
    }

    /// Replaces the raw value of the provided [`Field`].
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Returns the picked [`Coordinates`], if any.
    #[must_use]
    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Sets the picked [`Coordinates`].
    pub fn set_location(&mut self, location: Coordinates) {
        self.location = Some(location);
    }

    /// Returns the selected [`Amenities`].
    #[must_use]
    pub fn amenities(&self) -> &Amenities {
        &self.amenities
    }

    /// Returns the selected [`Amenities`] for modification.
    pub fn amenities_mut(&mut self) -> &mut Amenities {
        &mut self.amenities
    }

    /// Returns the staged [`Images`].
    #[must_use]
    pub fn images(&self) -> &Images {
        &self.images
    }

    /// Returns the staged [`Images`] for modification.
    pub fn images_mut(&mut self) -> &mut Images {
        &mut self.images
    }

    /// Indicates whether the entered phone number should be warned about:
    /// it's non-empty, yet not a valid [`Phone`].
    #[must_use]
    pub fn phone_warning(&self) -> bool {
        let phone = self.phone_num.trim();
        !phone.is_empty() && !Phone::is_valid(phone)
    }

    /// Validates this [`Draft`] into a [`Listing`].
    ///
    /// Images are checked first, then the phone number, then the remaining
    /// fields in form order.
    ///
    /// # Errors
    ///
    /// See [`ValidationError`] for details.
    pub fn validate(&self) -> Result<Listing, ValidationError> {
        use ValidationError as E;

        if !self.images.is_enough() {
            return Err(E::NotEnoughImages(self.images.len()));
        }
        let phone =
            Phone::new(self.phone_num.trim()).ok_or(E::InvalidPhone)?;

        Ok(Listing {
            title: self.parse(Field::Title)?,
            description: self.parse(Field::Description)?,
            property_type: self.parse(Field::PropertyType)?,
            price: self.parse(Field::Price)?,
            area: self.parse(Field::Area)?,
            address: self.parse(Field::Address)?,
            city: self.parse(Field::City)?,
            district: self.parse(Field::District)?,
            ward: self.parse(Field::Ward)?,
            location: self.location,
            phone,
            owner: self.parse(Field::Owner)?,
            status: self.parse(Field::Status)?,
            amenities: self.amenities.as_slice().to_vec(),
        })
    }

    /// Parses the trimmed raw value of the provided [`Field`].
    fn parse<T: FromStr>(&self, field: Field) -> Result<T, ValidationError> {
        let raw = self.get(field).trim();
        if raw.is_empty() {
            return Err(ValidationError::Required(field));
        }
        raw.parse().map_err(|_| ValidationError::Invalid(field))
    }

    /// Returns the raw value slot of the provided [`Field`].
    fn slot(&self, field: Field) -> &String {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Price => &self.price,
            Field::Area => &self.area,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::District => &self.district,
            Field::Ward => &self.ward,
            Field::PropertyType => &self.property_type,
            Field::PhoneNum => &self.phone_num,
            Field::Owner => &self.owner,
            Field::Status => &self.status,
        }
    }

    /// Returns the mutable raw value slot of the provided [`Field`].
    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Price => &mut self.price,
            Field::Area => &mut self.area,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::District => &mut self.district,
            Field::Ward => &mut self.ward,
            Field::PropertyType => &mut self.property_type,
            Field::PhoneNum => &mut self.phone_num,
            Field::Owner => &mut self.owner,
            Field::Status => &mut self.status,
        }
    }
}

/// Error of validating a [`Draft`] into a [`Listing`].
#[derive(Clone, Copy, Debug, Display, Error, PartialEq)]
pub enum ValidationError {
    /// Not enough images are staged.
    #[display("need at least {} images, got {_0}", image::MIN)]
    NotEnoughImages(#[error(not(source))] usize),

    /// Phone number doesn't match the Vietnamese mobile format.
    #[display("invalid phone number")]
    InvalidPhone,

    /// Required [`Field`] is empty.
    #[display("`{_0}` is required")]
    Required(#[error(not(source))] Field),

    /// [`Field`] has an invalid value.
    #[display("`{_0}` is invalid")]
    Invalid(#[error(not(source))] Field),
}

/// Wire payload of a [`Listing`] being created.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    /// [`Listing`] to create.
    pub listing: Listing,

    /// Start [`Date`] of a paid promotion.
    pub post_time: Option<Date>,

    /// [`PostPrice`] of a paid promotion.
    pub post_price: Option<PostPrice>,
}

/// Staged [`Images`] to attach to a created [`Listing`].
#[derive(Clone, Copy, Debug)]
pub struct ImageBatch<'a> {
    /// [`Id`] of the created [`Listing`].
    pub id: Id,

    /// [`Images`] to upload.
    pub images: &'a Images,
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use crate::{domain::amenity, infra::preview};

    use super::{
        Coordinates, Draft, Field, File, Id, PropertyType, Status, Title,
        ValidationError,
    };

    fn filled(images: usize, previews: &preview::Registry) -> Draft {
        let mut draft = Draft::default();
        for (field, value) in [
            (Field::Title, "Phòng trọ gần Đại học Bách Khoa"),
            (Field::Description, "Phòng sạch sẽ, có gác xép."),
            (Field::Price, "2500000"),
            (Field::Area, "25.5"),
            (Field::Address, "12 Tạ Quang Bửu"),
            (Field::City, "Hà Nội"),
            (Field::District, "Hai Bà Trưng"),
            (Field::Ward, "Bách Khoa"),
            (Field::PropertyType, "room"),
            (Field::PhoneNum, "0912345678"),
            (Field::Owner, "Nguyễn Văn A"),
        ] {
            draft.set(field, value);
        }
        _ = draft.images_mut().add(
            (0..images).map(|i| File::new(format!("{i}.png"), "image/png", [1])),
            previews,
        );
        draft
    }

    #[test]
    fn field_names_match_form() {
        assert_eq!(Field::Title.to_string(), "content");
        assert_eq!(Field::PhoneNum.to_string(), "phoneNum");
        assert_eq!(Field::from_str("propertyType").unwrap(), Field::PropertyType);
        assert_eq!(Field::from_str("content").unwrap(), Field::Title);
        assert!(Field::from_str("title").is_err());
    }

    #[test]
    fn validates_filled_draft() {
        let previews = preview::Registry::default();
        let mut draft = filled(3, &previews);
        _ = draft
            .amenities_mut()
            .toggle(amenity::Id::from(4), "Wifi".into());

        let listing = draft.validate().unwrap();

        assert_eq!(listing.property_type, PropertyType::Room);
        assert_eq!(listing.status, Status::Vacant);
        assert_eq!(listing.price.money().whole(), Some(2_500_000));
        assert_eq!(listing.area.to_string(), "25.5");
        assert_eq!(listing.amenities.len(), 1);
        assert_eq!(listing.location, None);
    }

    #[test]
    fn checks_images_before_phone() {
        let previews = preview::Registry::default();
        let mut draft = filled(2, &previews);
        draft.set(Field::PhoneNum, "12345");

        assert_eq!(draft.validate(), Err(ValidationError::NotEnoughImages(2)));

        _ = draft
            .images_mut()
            .add([File::new("3.png", "image/png", [1])], &previews);
        assert_eq!(draft.validate(), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn reports_required_and_invalid_fields() {
        let previews = preview::Registry::default();
        let mut draft = filled(3, &previews);

        draft.set(Field::City, "   ");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::Required(Field::City)),
        );

        draft.set(Field::City, "Hà Nội");
        draft.set(Field::Price, "-10");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::Invalid(Field::Price)),
        );

        draft.set(Field::Price, "1000");
        draft.set(Field::Title, "x".repeat(101));
        assert_eq!(
            draft.validate(),
            Err(ValidationError::Invalid(Field::Title)),
        );

        draft.set(Field::Title, "Căn hộ");
        draft.set(Field::PropertyType, "castle");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::Invalid(Field::PropertyType)),
        );
    }

    #[test]
    fn warns_only_about_entered_invalid_phones() {
        let mut draft = Draft::default();
        assert!(!draft.phone_warning());

        draft.set(Field::PhoneNum, "0912");
        assert!(draft.phone_warning());

        draft.set(Field::PhoneNum, "84912345678");
        assert!(!draft.phone_warning());
    }

    #[test]
    fn trims_phone_same_for_warning_and_validation() {
        let previews = preview::Registry::default();
        let mut draft = filled(3, &previews);
        draft.set(Field::PhoneNum, " 0912345678 ");

        assert!(!draft.phone_warning());
        assert_eq!(
            AsRef::<str>::as_ref(&draft.validate().unwrap().phone),
            "0912345678",
        );

        draft.set(Field::PhoneNum, "   ");
        assert!(!draft.phone_warning());
        assert_eq!(draft.validate(), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn counts_title_length_in_chars() {
        assert!(Title::new("ư".repeat(100)).is_some());
        assert!(Title::new("ư".repeat(101)).is_none());
        assert!(Title::new(" padded").is_none());
    }

    #[test]
    fn rounds_coordinates() {
        let at = Coordinates::new(21.028_511_9, 105.804_817_44).unwrap();

        assert_eq!(at.to_string(), "21.028512, 105.804817");
        assert!(Coordinates::new(91.0, 0.0).is_none());
        assert!(Coordinates::new(0.0, f64::NAN).is_none());
    }

    #[test]
    fn parses_backend_ids() {
        assert_eq!(Id::from_str(" 42\n").unwrap(), Id::from(42));
        assert!(Id::from_str("").is_err());
        assert!(Id::from_str("0").is_err());
        assert!(Id::from_str("{\"id\":1}").is_err());
    }
}
