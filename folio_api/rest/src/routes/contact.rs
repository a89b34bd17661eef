use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::RETRY_AFTER, StatusCode},
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_models::contact::RejectionReason;

use super::{error, internal_server_error};
use crate::{
    middlewares::client_ip::ClientIp,
    models::contact::{ApiContactRejection, ApiContactSubmission, ApiContactSuccess},
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    Extension(ClientIp(client_ip)): Extension<ClientIp>,
    Json(submission): Json<ApiContactSubmission>,
) -> Response {
    match service.send_message(client_ip, submission.into()).await {
        Ok(()) => Json(ApiContactSuccess {
            message: "Thank you! Your message has been sent successfully.",
        })
        .into_response(),
        Err(ContactSendMessageError::Rejected(reason)) => rejection(reason),
        Err(ContactSendMessageError::Send) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, "Could not send message")
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}

fn rejection(reason: RejectionReason) -> Response {
    let body = Json(ApiContactRejection::from(reason));
    match reason {
        RejectionReason::CooldownActive { seconds_remaining } => (
            StatusCode::TOO_MANY_REQUESTS,
            [(RETRY_AFTER, seconds_remaining.to_string())],
            body,
        )
            .into_response(),
        RejectionReason::DailyLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, body).into_response(),
        RejectionReason::MissingField(_)
        | RejectionReason::InvalidEmail
        | RejectionReason::FieldTooLong(_)
        | RejectionReason::MessageTooShort
        | RejectionReason::SpamDetected => (StatusCode::BAD_REQUEST, body).into_response(),
    }
}
