//! [`Query`] collection related to the [`Amenity`] catalog.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{amenity, Amenity},
    infra::{api, Api},
    Service,
};

use super::Query;

/// Queries the whole [`Amenity`] catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct All;

impl<A> Query<All> for Service<A>
where
    A: Api<
        Select<By<Vec<Amenity>, amenity::Catalog>>,
        Ok = Vec<Amenity>,
        Err = Traced<api::Error>,
    >,
{
    type Ok = Vec<Amenity>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: All) -> Result<Self::Ok, Self::Err> {
        self.api()
            .execute(Select(By::new(amenity::Catalog)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`All`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),
}
