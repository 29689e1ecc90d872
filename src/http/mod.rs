//! HTTP boundary for the payment processor.
//!
//! Routes:
//! - `GET /api/payments/{id}`: the stored outcome, or `204 No Content` when unknown
//! - `GET /api/payments`: every stored outcome (demonstration only)
//! - `POST /api/payments`: submit a payment request
//! - `GET /health`
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info};
use serde_json::json;

use crate::{PaymentError, PaymentId, PaymentProcessor, PaymentRequest, ProcessedPayment};

pub type SharedPaymentProcessor = Arc<dyn PaymentProcessor + Send + Sync>;

#[derive(Clone)]
struct AppState {
    processor: SharedPaymentProcessor,
}

/// Builds the router serving payments from `processor`.
pub fn router(processor: SharedPaymentProcessor) -> Router {
    Router::new()
        .route("/api/payments", get(list_payments).post(submit_payment))
        .route("/api/payments/{id}", get(get_payment))
        .route("/health", get(health))
        .with_state(AppState { processor })
}

/// Binds `addr` and serves the API until the process is stopped.
pub async fn serve(addr: SocketAddr, processor: SharedPaymentProcessor) -> Result<(), PaymentError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Payment gateway listening on {}", listener.local_addr()?);
    axum::serve(listener, router(processor)).await?;
    Ok(())
}

async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
) -> Result<Response, PaymentError> {
    match state.processor.get(&id)? {
        Some(outcome) => Ok(Json(outcome).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

async fn list_payments(State(state): State<AppState>) -> Result<Response, PaymentError> {
    Ok(Json(state.processor.list_all()?).into_response())
}

async fn submit_payment(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Response, PaymentError> {
    let Json(request) = payload?;
    let response = match state.processor.process(&request)? {
        ProcessedPayment::Accepted(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        ProcessedPayment::Rejected { errors, .. } => {
            (StatusCode::BAD_REQUEST, Json(errors)).into_response()
        }
    };
    Ok(response)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

impl From<JsonRejection> for PaymentError {
    fn from(rejection: JsonRejection) -> Self {
        PaymentError::InvalidPayload(rejection.body_text())
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = if self.is_invalid_request() {
            StatusCode::BAD_REQUEST
        } else {
            error!("{}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = json!({
            "statusCode": status.as_u16(),
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use fake::{Fake, Faker};
    use tower::ServiceExt;

    use super::*;
    use crate::{CardPaymentProcessor, MemoryThreadSafePaymentStore, PaymentOutcome};

    #[test]
    fn test_invalid_request_renders_bad_request() {
        let response =
            PaymentError::MalformedCardNumber("too short".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_undecodable_payload_renders_error_body() {
        let processor = CardPaymentProcessor::new(MemoryThreadSafePaymentStore::new());
        let app = router(Arc::new(processor));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/payments")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"cardNumber":4111111111111111,"expiryMonth":12}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["statusCode"], 400);
        assert!(value["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid payment payload"));
    }

    #[test]
    fn test_internal_failure_renders_server_error() {
        let response = PaymentError::SyncError("poisoned".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_get_payment_with_invalid_id_is_rejected() {
        let processor = CardPaymentProcessor::new(MemoryThreadSafePaymentStore::new());
        let app = router(Arc::new(processor));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/payments/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_seeded_payment() {
        let outcome: PaymentOutcome = Faker.fake();
        let store = MemoryThreadSafePaymentStore::with_payments(vec![outcome.clone()]);
        let app = router(Arc::new(CardPaymentProcessor::new(store)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/payments/{}", outcome.id()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let returned: PaymentOutcome = serde_json::from_slice(&body).unwrap();
        assert_eq!(returned, outcome);
    }
}
