//! [`Command`] for generating a payment [`QrCode`].

use common::{operations::Generate, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::payment::{QrCode, QrRequest},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for generating a [`QrCode`] to pay for a promotion with.
#[derive(Clone, Debug)]
pub struct GeneratePaymentQr {
    /// Amount to pay.
    pub amount: Money,

    /// Transfer note identifying the payment.
    pub memo: String,
}

impl<A> Command<GeneratePaymentQr> for Service<A>
where
    A: Api<Generate<QrRequest>, Ok = QrCode, Err = Traced<api::Error>>,
{
    type Ok = QrCode;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: GeneratePaymentQr,
    ) -> Result<Self::Ok, Self::Err> {
        let GeneratePaymentQr { amount, memo } = cmd;

        self.api()
            .execute(Generate(QrRequest {
                payee: self.config().payee.clone(),
                amount,
                memo,
                template: self.config().qr_template.clone(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`GeneratePaymentQr`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),
}
