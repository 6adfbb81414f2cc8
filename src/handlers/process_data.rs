use axum::{Extension, Json, body::Bytes, http::StatusCode};
use tower_http::request_id::RequestId;
use tracing::{info, instrument};

use crate::{
    models::{Payload, ProcessDataResponse, Record},
    utils::request_id_to_string,
};

pub const INVALID_JSON_MESSAGE: &str = "Geçersiz JSON formatı";
pub const EMPTY_PAYLOAD_MESSAGE: &str = "Boş veri dizisi gönderildi";
pub const ACCEPTED_MESSAGE: &str = "CSV verisi başarıyla alındı ve işlendi";

type Rejection = (StatusCode, Json<ProcessDataResponse>);

#[instrument(name = "handlers.process_data", skip_all)]
pub async fn process_data_handler(
    req_id: Option<Extension<RequestId>>,
    body: Bytes,
) -> Result<Json<ProcessDataResponse>, Rejection> {
    let req_id = req_id
        .map(|Extension(id)| request_id_to_string(&id))
        .unwrap_or_default();

    let payload: Payload = serde_json::from_slice(&body).map_err(|e| {
        info!(msg = "Rejecting malformed payload", %req_id, error = %e);

        (
            StatusCode::BAD_REQUEST,
            Json(ProcessDataResponse::rejected(
                INVALID_JSON_MESSAGE,
                Some(e.to_string()),
            )),
        )
    })?;

    if payload.is_empty() {
        info!(msg = "Rejecting empty payload", %req_id);

        return Err((
            StatusCode::BAD_REQUEST,
            Json(ProcessDataResponse::rejected(EMPTY_PAYLOAD_MESSAGE, None)),
        ));
    }

    log_records(&payload);

    info!(msg = "Payload accepted", %req_id, records = payload.len());

    Ok(Json(ProcessDataResponse::accepted(ACCEPTED_MESSAGE)))
}

/// Emits one line per record, 1-indexed, in payload order.
pub fn log_records(records: &[Record]) {
    for (i, record) in records.iter().enumerate() {
        let record = serde_json::to_string(record).unwrap_or_else(|_| "<unprintable>".to_string());
        info!(msg = "Record received", index = i + 1, %record);
    }
}
