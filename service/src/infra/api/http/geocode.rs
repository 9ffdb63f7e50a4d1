//! Geocoding [`Api`] implementations.

use common::operations::{By, Select};
use serde::Deserialize;
use tracerr::Traced;

use crate::{
    domain::listing::{AddressQuery, Coordinates},
    infra::{
        api::{self, http::Error},
        Api, Http,
    },
};

/// Place found by the geocoder.
///
/// Coordinates are reported as decimal strings.
#[derive(Debug, Deserialize)]
struct Place {
    /// Latitude.
    lat: String,

    /// Longitude.
    lon: String,
}

impl Api<Select<By<Option<Coordinates>, AddressQuery>>> for Http {
    type Ok = Option<Coordinates>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Coordinates>, AddressQuery>>,
    ) -> Result<Self::Ok, Self::Err> {
        let query = by.into_inner();
        let request = self
            .client
            .get(&self.config.geocoder_url)
            .query(&[("format", "json"), ("q", query.as_ref())]);

        let places = Self::send(request)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?
            .json::<Vec<Place>>()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?;

        locate(places).map_err(tracerr::map_from_and_wrap!(=> api::Error))
    }
}

/// Picks the [`Coordinates`] of the first found [`Place`], if any.
fn locate(places: Vec<Place>) -> Result<Option<Coordinates>, Traced<Error>> {
    let Some(Place { lat, lon }) = places.into_iter().next() else {
        return Ok(None);
    };
    let (Ok(lat), Ok(lng)) =
        (lat.trim().parse::<f64>(), lon.trim().parse::<f64>())
    else {
        return Err(tracerr::new!(Error::Malformed(
            "non-numeric place coordinates",
        )));
    };
    Coordinates::new(lat, lng).map(Some).ok_or_else(|| {
        tracerr::new!(Error::Malformed("place coordinates out of range"))
    })
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::domain::listing::Coordinates;

    use super::{locate, Error, Place};

    fn places(value: serde_json::Value) -> Vec<Place> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn locates_first_place() {
        let found = locate(places(json!([
            {"lat": "21.0135570", "lon": " 105.5252750", "display_name": "A"},
            {"lat": "10.7769", "lon": "106.7009"},
        ])))
        .unwrap();

        assert_eq!(found, Coordinates::new(21.013_557, 105.525_275));
    }

    #[test]
    fn finds_nothing_in_empty_response() {
        assert_eq!(locate(places(json!([]))).unwrap(), None);
    }

    #[test]
    fn rejects_malformed_coordinates() {
        for response in [
            json!([{"lat": "north", "lon": "105.5"}]),
            json!([{"lat": "91", "lon": "105.5"}]),
        ] {
            let err = locate(places(response)).unwrap_err();
            assert!(matches!(err.as_ref(), Error::Malformed(_)), "{err}");
        }
    }
}
