use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    storage: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let status = service.get_status().await;
    let HealthStatus { storage, email } = status;

    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = HealthResponse {
        http: true,
        storage,
        email,
    };

    (code, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use folio_core_health_contracts::MockHealthFeatureService;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::routes::into_json;

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let service = MockHealthFeatureService::new().with_get_status(HealthStatus {
            storage: true,
            email: true,
        });

        // Act
        let response = health(State(Arc::new(service))).await;

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            into_json(response).await,
            json!({"http": true, "storage": true, "email": true})
        );
    }

    #[tokio::test]
    async fn unhealthy() {
        // Arrange
        let service = MockHealthFeatureService::new().with_get_status(HealthStatus {
            storage: false,
            email: true,
        });

        // Act
        let response = health(State(Arc::new(service))).await;

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            into_json(response).await,
            json!({"http": true, "storage": false, "email": true})
        );
    }
}
