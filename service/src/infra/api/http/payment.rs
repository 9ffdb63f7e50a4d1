//! Payment QR [`Api`] implementations.

use common::operations::Generate;
use secrecy::ExposeSecret as _;
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::payment::{QrCode, QrRequest},
    infra::{
        api::{self, http::Error},
        Api, Http,
    },
};

/// JSON body of a QR generation request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Request<'a> {
    account_no: &'a str,
    account_name: &'a str,
    acq_id: &'a str,
    add_info: &'a str,

    /// Whole amount, as a decimal string.
    amount: String,
    template: &'a str,
}

/// JSON body of a QR generation response.
#[derive(Debug, Deserialize)]
struct Response {
    /// Generated QR code, absent on provider-side failures.
    data: Option<Generated>,
}

/// Generated QR code.
#[derive(Debug, Deserialize)]
struct Generated {
    /// QR code image as a data URL.
    #[serde(rename = "qrDataURL")]
    qr_data_url: String,
}

impl Api<Generate<QrRequest>> for Http {
    type Ok = QrCode;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Generate(req): Generate<QrRequest>,
    ) -> Result<Self::Ok, Self::Err> {
        let body = Request {
            account_no: &req.payee.account_no,
            account_name: &req.payee.account_name,
            acq_id: &req.payee.acq_id,
            add_info: &req.memo,
            amount: req.amount.amount.normalize().to_string(),
            template: &req.template,
        };
        let request = self
            .client
            .post(&self.config.payment_url)
            .header("x-client-id", self.config.client_id.expose_secret())
            .header("x-api-key", self.config.api_key.expose_secret())
            .json(&body);

        let Response { data } = Self::send(request)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?;

        qr_code(data).map_err(tracerr::map_from_and_wrap!(=> api::Error))
    }
}

/// Extracts the [`QrCode`] out of the [`Generated`] response data.
fn qr_code(data: Option<Generated>) -> Result<QrCode, Traced<Error>> {
    data.and_then(|d| QrCode::new(d.qr_data_url)).ok_or_else(|| {
        tracerr::new!(Error::Malformed("no `data.qrDataURL` in QR response"))
    })
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::{qr_code, Error, Response};

    fn decode(value: serde_json::Value) -> Response {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extracts_qr_data_url() {
        let Response { data } = decode(json!({
            "code": "00",
            "desc": "Gen VietQR successful!",
            "data": {
                "acpId": 970_422,
                "qrCode": "00020101021238570010A000000727",
                "qrDataURL": "data:image/png;base64,iVBORw0KGgo=",
            },
        }));

        let qr = qr_code(data).unwrap();

        assert_eq!(qr.to_string(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn rejects_response_without_data() {
        for response in [
            json!({"code": "11", "desc": "Invalid account", "data": null}),
            json!({"code": "11", "desc": "Invalid account"}),
        ] {
            let Response { data } = decode(response);

            let err = qr_code(data).unwrap_err();

            assert!(matches!(err.as_ref(), Error::Malformed(_)), "{err}");
        }
    }
}
