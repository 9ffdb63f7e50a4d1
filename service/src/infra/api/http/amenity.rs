//! [`Amenity`]-related [`Api`] implementations.

use common::operations::{By, Select};
use serde::Deserialize;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{amenity, Amenity},
    infra::{
        api::{self, http::Error},
        Api, Http,
    },
};

/// [`Amenity`] catalog entry, as the backend spells it.
#[derive(Debug, Deserialize)]
struct Entry {
    /// ID of the [`Amenity`].
    #[serde(rename = "amentityId")]
    id: u32,

    /// Name of the [`Amenity`].
    #[serde(rename = "amentityName")]
    name: String,
}

impl Api<Select<By<Vec<Amenity>, amenity::Catalog>>> for Http {
    type Ok = Vec<Amenity>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Amenity>, amenity::Catalog>>,
    ) -> Result<Self::Ok, Self::Err> {
        let entries = Self::send(self.client.get(self.endpoint("Amentities")))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?
            .json::<Vec<Entry>>()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?;
        log::debug!("fetched {} amenities", entries.len());

        Ok(entries
            .into_iter()
            .map(|Entry { id, name }| Amenity {
                id: id.into(),
                name: name.into(),
            })
            .collect())
    }
}
