//! [`Listing`]-related [`Api`] implementations.

use common::operations::{Insert, Upload};
use reqwest::multipart;
use serde::Serialize;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::listing::{ImageBatch, Submission},
    infra::{
        api::{self, http::Error},
        Api, Http,
    },
};

/// JSON body of a listing creation request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Body<'a> {
    /// Title.
    content: &'a str,
    description: &'a str,
    price: String,
    area: String,
    address: &'a str,
    city: &'a str,
    district: &'a str,
    ward: &'a str,
    property_type: String,

    /// Latitude with 6 decimals.
    lat: Option<String>,

    /// Longitude with 6 decimals.
    lng: Option<String>,
    phone_num: &'a str,
    owner: &'a str,

    /// Numeric status ID.
    status: String,
    amentities: Vec<AmenityEntry<'a>>,

    /// Promotion start date as `YYYY-MM-DD`.
    post_time: Option<String>,
    #[serde(rename = "poster_ID")]
    poster_id: u64,
    #[serde(rename = "post_Price_ID")]
    post_price_id: u64,
    post_price: Option<PostPriceEntry>,
}

/// Selected amenity, as the backend spells it.
#[derive(Debug, Serialize)]
struct AmenityEntry<'a> {
    #[serde(rename = "amentityId")]
    id: u32,
    #[serde(rename = "amentityName")]
    name: &'a str,
}

/// Promotion price of a listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostPriceEntry {
    /// Promotion duration in days.
    duration: u16,

    /// Undiscounted price per day.
    price: u32,

    /// Package ID.
    type_id: u8,
}

impl<'a> Body<'a> {
    /// Lays out the provided [`Submission`] the way the backend expects it.
    fn new(submission: &'a Submission) -> Self {
        let Submission {
            listing,
            post_time,
            post_price,
        } = submission;

        Self {
            content: listing.title.as_ref(),
            description: listing.description.as_ref(),
            price: listing.price.money().amount.normalize().to_string(),
            area: listing.area.to_string(),
            address: listing.address.as_ref(),
            city: listing.city.as_ref(),
            district: listing.district.as_ref(),
            ward: listing.ward.as_ref(),
            property_type: listing.property_type.to_string(),
            lat: listing.location.map(|at| format!("{:.6}", at.lat())),
            lng: listing.location.map(|at| format!("{:.6}", at.lng())),
            phone_num: listing.phone.as_ref(),
            owner: listing.owner.as_ref(),
            status: listing.status.u8().to_string(),
            amentities: listing
                .amenities
                .iter()
                .map(|a| AmenityEntry {
                    id: a.id.into(),
                    name: a.name.as_ref(),
                })
                .collect(),
            post_time: post_time.map(|d| d.to_string()),
            poster_id: 0,
            post_price_id: 0,
            post_price: post_price.map(|p| PostPriceEntry {
                duration: p.duration.days(),
                price: p.package.plan().daily,
                type_id: p.package.u8(),
            }),
        }
    }
}

impl Api<Insert<Submission>> for Http {
    /// Raw response body, expected to hold the ID of the created listing.
    type Ok = String;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(submission): Insert<Submission>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = self
            .client
            .post(self.endpoint("properties/create"))
            .json(&Body::new(&submission));

        Self::send(request)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?
            .text()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))
    }
}

impl<'a> Api<Upload<ImageBatch<'a>>> for Http {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Upload(batch): Upload<ImageBatch<'a>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut form = multipart::Form::new();
        for file in batch.images.files() {
            let part = multipart::Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(&file.content_type)
                .map_err(tracerr::from_and_wrap!(=> Error))
                .map_err(tracerr::map_from_and_wrap!(=> api::Error))?;
            form = form.part("images", part);
        }

        let url =
            self.endpoint(&format!("properties/Upload/Image/{}", batch.id));
        _ = Self::send(self.client.post(url).multipart(form))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?;
        log::debug!(
            "uploaded {} image(s) of listing `{}`",
            batch.images.len(),
            batch.id,
        );

        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::Date;
    use serde_json::json;

    use crate::{
        domain::{
            amenity,
            listing::{Coordinates, Draft, Field, File, Submission},
            promotion::{DurationTier, Package, Selection},
        },
        infra::preview,
    };

    use super::Body;

    fn draft(previews: &preview::Registry) -> Draft {
        let mut draft = Draft::default();
        for (field, value) in [
            (Field::Title, "Nhà trọ 1"),
            (Field::Description, "Cách trường 10 phút đi bộ"),
            (Field::Price, "2000000"),
            (Field::Area, "20"),
            (Field::Address, "Quốc lộ 21"),
            (Field::City, "Hà Nội"),
            (Field::District, "Thạch Thất"),
            (Field::Ward, "Thạch Hòa"),
            (Field::PropertyType, "room"),
            (Field::PhoneNum, "0332698091"),
            (Field::Owner, "Phong Duy"),
            (Field::Status, "rented"),
        ] {
            draft.set(field, value);
        }
        _ = draft.images_mut().add(
            (0..3).map(|i| File::new(format!("{i}.jpg"), "image/jpeg", [0])),
            previews,
        );
        draft
    }

    #[test]
    fn lays_out_paid_listing() {
        let previews = preview::Registry::default();
        let mut draft = draft(&previews);
        draft.set_location(Coordinates::new(21.013_557, 105.525_275).unwrap());
        _ = draft
            .amenities_mut()
            .toggle(amenity::Id::from(3), "Wifi".into());
        let selection = Selection {
            package: Package::PriorityListing,
            duration: DurationTier::SevenDays,
            start_date: Date::from_ymd(2026, 10, 20),
        };
        let submission = Submission {
            listing: draft.validate().unwrap(),
            post_time: selection.post_time(),
            post_price: selection.post_price(),
        };

        let body = serde_json::to_value(Body::new(&submission)).unwrap();

        assert_eq!(
            body,
            json!({
                "content": "Nhà trọ 1",
                "description": "Cách trường 10 phút đi bộ",
                "price": "2000000",
                "area": "20",
                "address": "Quốc lộ 21",
                "city": "Hà Nội",
                "district": "Thạch Thất",
                "ward": "Thạch Hòa",
                "propertyType": "room",
                "lat": "21.013557",
                "lng": "105.525275",
                "phoneNum": "0332698091",
                "owner": "Phong Duy",
                "status": "2",
                "amentities": [{"amentityId": 3, "amentityName": "Wifi"}],
                "postTime": "2026-10-20",
                "poster_ID": 0,
                "post_Price_ID": 0,
                "postPrice": {"duration": 7, "price": 90000, "typeId": 4}
            }),
        );
    }

    #[test]
    fn lays_out_free_listing_with_nulls() {
        let previews = preview::Registry::default();
        let selection = Selection::default();
        let submission = Submission {
            listing: draft(&previews).validate().unwrap(),
            post_time: selection.post_time(),
            post_price: selection.post_price(),
        };

        let body = serde_json::to_value(Body::new(&submission)).unwrap();

        assert_eq!(body["lat"], json!(null));
        assert_eq!(body["postTime"], json!(null));
        assert_eq!(body["postPrice"], json!(null));
        assert_eq!(body["amentities"], json!([]));
    }
}
