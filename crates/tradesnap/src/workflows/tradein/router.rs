use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::Deserialize;

use super::service::{TradeInService, TradeInServiceError};
use crate::error::AppError;
use crate::workflows::valuation::Condition;
use crate::workflows::vehicle::{Registration, VehicleLookup};

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub registration: String,
    #[serde(default)]
    pub condition: Condition,
}

#[derive(Debug, Deserialize)]
pub struct VehicleRequest {
    pub registration: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScanParams {
    #[serde(default)]
    pub condition: Condition,
}

/// HTTP endpoints for quoting, forecasting and pinging the buyer network.
pub fn tradein_router<L>(service: Arc<TradeInService<L>>) -> Router
where
    L: VehicleLookup + 'static,
{
    Router::new()
        .route("/api/v1/tradein/quote", post(quote_handler::<L>))
        .route("/api/v1/tradein/scan", post(scan_handler::<L>))
        .route("/api/v1/tradein/forecast", post(forecast_handler::<L>))
        .route("/api/v1/tradein/ping", post(ping_handler::<L>))
        .route(
            "/api/v1/journeys/:registration",
            get(journeys_handler::<L>),
        )
        .with_state(service)
}

pub(crate) async fn quote_handler<L>(
    State(service): State<Arc<TradeInService<L>>>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response
where
    L: VehicleLookup + 'static,
{
    let now = Local::now().naive_local();
    match service.quote(&request.registration, request.condition, now) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn scan_handler<L>(
    State(service): State<Arc<TradeInService<L>>>,
    Query(params): Query<ScanParams>,
    image: Bytes,
) -> Response
where
    L: VehicleLookup + 'static,
{
    let now = Local::now().naive_local();
    match service.quote_from_image(&image, params.condition, now) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn forecast_handler<L>(
    State(service): State<Arc<TradeInService<L>>>,
    axum::Json(request): axum::Json<VehicleRequest>,
) -> Response
where
    L: VehicleLookup + 'static,
{
    let today = Local::now().date_naive();
    match service.lookup_vehicle(&request.registration) {
        Ok(vehicle) => {
            let forecast = service.forecast(&vehicle, today);
            (StatusCode::OK, axum::Json(forecast)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ping_handler<L>(
    State(service): State<Arc<TradeInService<L>>>,
    axum::Json(request): axum::Json<VehicleRequest>,
) -> Response
where
    L: VehicleLookup + 'static,
{
    let now = Local::now().naive_local();
    let result = service
        .lookup_vehicle(&request.registration)
        .and_then(|vehicle| service.ping_network(&vehicle, now));
    match result {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn journeys_handler<L>(
    State(service): State<Arc<TradeInService<L>>>,
    Path(registration): Path<String>,
) -> Response
where
    L: VehicleLookup + 'static,
{
    let result = Registration::parse(&registration)
        .map_err(TradeInServiceError::from)
        .and_then(|registration| service.journeys(&registration));
    match result {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: TradeInServiceError) -> Response {
    AppError::from(error).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::journey::InMemoryJourneyStore;
    use crate::workflows::valuation::ValuationConfig;
    use crate::workflows::vehicle::MockVehicleLookup;
    use axum::body::Body;
    use axum::http::{header, Request};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        let service = TradeInService::new(
            Arc::new(MockVehicleLookup),
            Arc::new(InMemoryJourneyStore::default()),
            ValuationConfig {
                include_demand_bonus: false,
                ..ValuationConfig::default()
            },
        )
        .with_rng_factory(|| StdRng::seed_from_u64(4));
        tradein_router(Arc::new(service))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn read_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn quote_route_returns_breakdown() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/tradein/quote",
                json!({ "registration": "kt68 xyz", "condition": "poor" }),
            ))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["vehicle"]["registration"], "KT68XYZ");
        assert_eq!(body["valuation"]["condition"], "poor");
        assert_eq!(body["valuation"]["base_value"], 6_080);
        assert_eq!(body["total_offer"], 6_780);
    }

    #[tokio::test]
    async fn invalid_registration_is_unprocessable() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/tradein/quote",
                json!({ "registration": "AB" }),
            ))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn empty_scan_is_unprocessable() {
        let response = router()
            .oneshot(
                Request::post("/api/v1/tradein/scan?condition=fair")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn ping_then_journey_lists_event() {
        let router = router();
        let response = router
            .clone()
            .oneshot(post_json(
                "/api/v1/tradein/ping",
                json!({ "registration": "KT68XYZ" }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::get("/api/v1/journeys/kt68xyz")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body[0]["event"], "network_pinged");
        assert_eq!(body[0]["registration"], "KT68XYZ");
    }

    #[tokio::test]
    async fn forecast_route_classifies_model() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/tradein/forecast",
                json!({ "registration": "KT68XYZ" }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["vehicle_type"], "saloon");
        assert_eq!(body["regions"].as_array().map(Vec::len), Some(6));
    }
}
