//! [`Command`] for creating a new [`Listing`] on the backend.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::listing::{self, Submission},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Listing`] on the backend.
#[derive(Clone, Debug)]
pub struct CreateListing {
    /// [`Submission`] to create the [`Listing`] from.
    pub submission: Submission,
}

impl<A> Command<CreateListing> for Service<A>
where
    A: Api<Insert<Submission>, Ok = String, Err = Traced<api::Error>>,
{
    type Ok = listing::Id;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateListing { submission } = cmd;

        let body = self
            .api()
            .execute(Insert(submission))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        body.parse()
            .map_err(|_| tracerr::new!(E::InvalidResponse(body)))
    }
}

/// Error of [`CreateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// Backend responded with something other than a [`listing::Id`].
    #[display("Invalid response format: `{_0}`")]
    #[from(ignore)]
    InvalidResponse(#[error(not(source))] String),
}
