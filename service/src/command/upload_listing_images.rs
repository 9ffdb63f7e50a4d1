//! [`Command`] for uploading staged images of a created [`Listing`].

use common::operations::Upload;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::listing::{self, ImageBatch, Images},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for uploading staged [`Images`] of a created [`Listing`].
#[derive(Clone, Copy, Debug)]
pub struct UploadListingImages<'a> {
    /// [`listing::Id`] assigned to the [`Listing`] by the backend.
    pub id: listing::Id,

    /// [`Images`] to upload, in order.
    pub images: &'a Images,
}

impl<'a, A> Command<UploadListingImages<'a>> for Service<A>
where
    A: Api<Upload<ImageBatch<'a>>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UploadListingImages<'a>,
    ) -> Result<Self::Ok, Self::Err> {
        let UploadListingImages { id, images } = cmd;

        self.api()
            .execute(Upload(ImageBatch { id, images }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`UploadListingImages`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),
}
