//! [`Query`] collection related to geographic locations.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::listing::{AddressQuery, Coordinates},
    infra::{api, Api},
    Service,
};

use super::Query;

/// Queries the [`Coordinates`] of a free-form address, if it's found.
#[derive(Clone, Debug)]
pub struct ByAddress(pub AddressQuery);

impl<A> Query<ByAddress> for Service<A>
where
    A: Api<
        Select<By<Option<Coordinates>, AddressQuery>>,
        Ok = Option<Coordinates>,
        Err = Traced<api::Error>,
    >,
{
    type Ok = Option<Coordinates>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ByAddress(query): ByAddress,
    ) -> Result<Self::Ok, Self::Err> {
        self.api()
            .execute(Select(By::new(query)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`ByAddress`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),
}
