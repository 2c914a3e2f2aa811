//! # HTTP Routes
//!
//! REST endpoints for sales. Handlers use the strict (`try_*`) repository
//! channel so a missing row (404) and a storage failure (500) stay apart.
//!
//! ## Endpoints
//! ```text
//! GET    /health               → "OK"
//! GET    /api/v1/ventas        → 200 [Sale, ...]      (newest date first)
//! POST   /api/v1/ventas        → 201 Sale | 400
//! GET    /api/v1/ventas/{id}   → 200 Sale | 404
//! PUT    /api/v1/ventas/{id}   → 200 Sale | 400 | 404
//! DELETE /api/v1/ventas/{id}   → 204      | 404
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ApiError;
use ventas_core::validation::{
    parse_sale_date, parse_total, require, FIELD_CUSTOMER, FIELD_DATE, FIELD_STATUS, FIELD_TOTAL,
};
use ventas_core::{Sale, SaleChanges, ValidationError};
use ventas_db::SaleRepository;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub sales: SaleRepository,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/ventas", get(list_sales).post(create_sale))
        .route(
            "/api/v1/ventas/{id}",
            get(get_sale).put(update_sale).delete(delete_sale),
        )
        .with_state(state)
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Body of POST and PUT. Every field is optional at the JSON level;
/// the handlers decide what is required.
#[derive(Debug, Default, Deserialize)]
pub struct SalePayload {
    #[serde(rename = "clienteNombre")]
    pub customer_name: Option<String>,

    /// Number or numeric string.
    #[serde(rename = "totalVenta")]
    pub total: Option<Value>,

    #[serde(rename = "fechaVenta")]
    pub date: Option<String>,

    #[serde(rename = "estado")]
    pub status: Option<String>,
}

impl SalePayload {
    /// Binds a complete new sale. All four fields are required.
    fn into_new_sale(self) -> Result<Sale, ValidationError> {
        let customer_name = require(FIELD_CUSTOMER, self.customer_name)?;
        let total = require(FIELD_TOTAL, self.total)?;
        let date = require(FIELD_DATE, self.date)?;
        let status = require(FIELD_STATUS, self.status)?;

        let date = parse_sale_date(&date)?;
        let total = parse_total(&total)?;

        Ok(Sale::new(date, customer_name, total, status))
    }

    /// Binds a partial update. Absent fields keep their stored value.
    fn into_changes(self) -> Result<SaleChanges, ValidationError> {
        let date = self.date.as_deref().map(parse_sale_date).transpose()?;
        let total = self.total.as_ref().map(parse_total).transpose()?;

        Ok(SaleChanges {
            date,
            customer_name: self.customer_name,
            total,
            status: self.status,
        })
    }
}

fn body_or_400(payload: Result<Json<SalePayload>, JsonRejection>) -> Result<SalePayload, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::validation(rejection.body_text()))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint.
async fn health_handler() -> impl IntoResponse {
    "OK"
}

async fn list_sales(State(state): State<AppState>) -> Result<Json<Vec<Sale>>, ApiError> {
    let sales = state.sales.try_list_all().await?;
    debug!(count = sales.len(), "list_sales");
    Ok(Json(sales))
}

async fn create_sale(
    State(state): State<AppState>,
    payload: Result<Json<SalePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Sale>), ApiError> {
    let mut sale = body_or_400(payload)?.into_new_sale()?;

    let id = state.sales.try_insert(&mut sale).await?;
    info!(sale_id = id, "Sale created");

    Ok((StatusCode::CREATED, Json(sale)))
}

async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Sale>, ApiError> {
    state
        .sales
        .try_fetch_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Sale", &id.to_string()))
}

async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<SalePayload>, JsonRejection>,
) -> Result<Json<Sale>, ApiError> {
    let changes = body_or_400(payload)?.into_changes()?;

    let mut sale = state
        .sales
        .try_fetch_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale", &id.to_string()))?;

    if !changes.is_empty() {
        sale.apply(changes);
        state.sales.try_update_with_date(&sale).await?;
        info!(sale_id = id, "Sale updated");
    }

    Ok(Json(sale))
}

async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.sales.try_delete_by_id(id).await?;
    info!(sale_id = id, "Sale deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::json;
    use tempfile::TempDir;
    use tower::ServiceExt;
    use ventas_db::{schema, ConnectionProvider, DbConfig};

    async fn test_app() -> (TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let provider = ConnectionProvider::new(DbConfig::new(dir.path().join("api.db"))).unwrap();
        schema::ensure_schema(&provider).await.unwrap();
        let app = router(AppState {
            sales: provider.sales(),
        });
        (dir, app)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn sofia() -> Value {
        json!({
            "clienteNombre": "Sofía Rodríguez",
            "totalVenta": 150.50,
            "fechaVenta": "2025-10-15",
            "estado": "Pendiente"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, app) = test_app().await;
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (_dir, app) = test_app().await;

        let (status, created) = send(&app, "POST", "/api/v1/ventas", Some(sofia())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["clienteNombre"], "Sofía Rodríguez");
        let id = created["id"].as_i64().unwrap();

        let (status, fetched) = send(&app, "GET", &format!("/api/v1/ventas/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_accepts_numeric_string_total() {
        let (_dir, app) = test_app().await;
        let mut body = sofia();
        body["totalVenta"] = json!("99.90");

        let (status, created) = send(&app, "POST", "/api/v1/ventas", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["totalVenta"], 99.9);
    }

    #[tokio::test]
    async fn test_create_missing_field() {
        let (_dir, app) = test_app().await;
        let mut body = sofia();
        body.as_object_mut().unwrap().remove("estado");

        let (status, err) = send(&app, "POST", "/api/v1/ventas", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "estado is required");
        assert_eq!(err["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_bad_date_and_total() {
        let (_dir, app) = test_app().await;

        let mut body = sofia();
        body["fechaVenta"] = json!("15/10/2025");
        let (status, _) = send(&app, "POST", "/api/v1/ventas", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut body = sofia();
        body["totalVenta"] = json!("mucho");
        let (status, err) = send(&app, "POST", "/api/v1/ventas", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "totalVenta has invalid format: must be a valid number");
    }

    #[tokio::test]
    async fn test_create_too_long_name_is_server_error() {
        let (_dir, app) = test_app().await;
        let mut body = sofia();
        body["clienteNombre"] = json!("x".repeat(101));

        let (status, err) = send(&app, "POST", "/api/v1/ventas", Some(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err["code"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_get_missing_is_404() {
        let (_dir, app) = test_app().await;
        let (status, err) = send(&app, "GET", "/api/v1/ventas/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err["error"], "Sale not found: 42");
    }

    #[tokio::test]
    async fn test_update_partial() {
        let (_dir, app) = test_app().await;
        let (_, created) = send(&app, "POST", "/api/v1/ventas", Some(sofia())).await;
        let uri = format!("/api/v1/ventas/{}", created["id"]);

        let (status, updated) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({ "estado": "Enviada", "totalVenta": 155.50 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["estado"], "Enviada");
        assert_eq!(updated["totalVenta"], 155.5);
        assert_eq!(updated["clienteNombre"], "Sofía Rodríguez");

        let (_, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_date_is_persisted() {
        let (_dir, app) = test_app().await;
        let (_, created) = send(&app, "POST", "/api/v1/ventas", Some(sofia())).await;
        let uri = format!("/api/v1/ventas/{}", created["id"]);

        let (status, updated) =
            send(&app, "PUT", &uri, Some(json!({ "fechaVenta": "2025-10-20" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["fechaVenta"], "2025-10-20");
        assert_eq!(updated["estado"], "Pendiente");

        let (_, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(fetched["fechaVenta"], "2025-10-20");
    }

    #[tokio::test]
    async fn test_update_malformed_date_is_400() {
        let (_dir, app) = test_app().await;
        let (_, created) = send(&app, "POST", "/api/v1/ventas", Some(sofia())).await;
        let uri = format!("/api/v1/ventas/{}", created["id"]);

        let (status, err) =
            send(&app, "PUT", &uri, Some(json!({ "fechaVenta": "20/10/2025" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "VALIDATION_ERROR");

        let (_, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(fetched["fechaVenta"], "2025-10-15");
    }

    #[tokio::test]
    async fn test_update_missing_is_404() {
        let (_dir, app) = test_app().await;
        let (status, _) = send(&app, "PUT", "/api/v1/ventas/7", Some(json!({ "estado": "Pagada" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_then_404() {
        let (_dir, app) = test_app().await;
        let (_, created) = send(&app, "POST", "/api/v1/ventas", Some(sofia())).await;
        let uri = format!("/api/v1/ventas/{}", created["id"]);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let (_dir, app) = test_app().await;
        send(&app, "POST", "/api/v1/ventas", Some(sofia())).await;
        send(
            &app,
            "POST",
            "/api/v1/ventas",
            Some(json!({
                "clienteNombre": "Carlos Martínez",
                "totalVenta": 300,
                "fechaVenta": "2025-10-16",
                "estado": "Pagada"
            })),
        )
        .await;

        let (status, list) = send(&app, "GET", "/api/v1/ventas", None).await;
        assert_eq!(status, StatusCode::OK);
        let dates: Vec<&str> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["fechaVenta"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2025-10-16", "2025-10-15"]);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (_dir, app) = test_app().await;
        let request = Request::post("/api/v1/ventas")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
