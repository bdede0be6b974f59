use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_models::contact::ContactSubmission;
use tracing::{debug, error};

use crate::{
    errors::{self, FAILED_TO_SEND_MESSAGE, INVALID_REQUEST_BODY},
    models::contact::ApiContactMessage,
};

pub const EMAIL_SENT: &str = "Email sent successfully! Check your inbox for confirmation.";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/send-email", routing::post(send_email))
        .with_state(service)
}

async fn send_email(
    service: State<Arc<impl ContactFeatureService>>,
    payload: Result<Json<ApiContactMessage>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!("rejected contact request body: {rejection}");
            return errors::error(StatusCode::BAD_REQUEST, INVALID_REQUEST_BODY);
        }
    };

    let submission = match ContactSubmission::try_from(payload) {
        Ok(submission) => submission,
        Err(err) => {
            debug!(?err, "invalid contact submission");
            return errors::error(StatusCode::BAD_REQUEST, err.detail());
        }
    };

    match service.send_message(submission).await {
        Ok(()) => errors::success(EMAIL_SENT),
        Err(ContactSendMessageError::Send) => {
            errors::error(StatusCode::INTERNAL_SERVER_ERROR, FAILED_TO_SEND_MESSAGE)
        }
        Err(ContactSendMessageError::Other(err)) => {
            error!("Failed to send contact message: {err:#}");
            errors::error(StatusCode::INTERNAL_SERVER_ERROR, FAILED_TO_SEND_MESSAGE)
        }
    }
}
