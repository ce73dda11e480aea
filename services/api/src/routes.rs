use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tradesnap::error::AppError;
use tradesnap::workflows::bookings::{booking_router, BookingRepository, BookingService};
use tradesnap::workflows::tradein::{tradein_router, TradeInService};
use tradesnap::workflows::valuation::{assemble_valuation, estimate_value, Condition, Valuation};
use tradesnap::workflows::vehicle::{Registration, Vehicle, VehicleLookup};

/// Vehicle details supplied directly, skipping the lookup provider.
#[derive(Debug, Deserialize)]
pub(crate) struct EstimateRequest {
    pub(crate) registration: String,
    pub(crate) make: String,
    pub(crate) model: String,
    pub(crate) year: i32,
    pub(crate) mileage: u32,
    #[serde(default)]
    pub(crate) vin: String,
    #[serde(default)]
    pub(crate) condition: Condition,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) demand_bonus: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ConditionEstimate {
    pub(crate) condition: Condition,
    pub(crate) value: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct EstimateResponse {
    pub(crate) registration: Registration,
    pub(crate) today: NaiveDate,
    pub(crate) age: i64,
    pub(crate) valuation: Valuation,
    pub(crate) total: u32,
    pub(crate) by_condition: Vec<ConditionEstimate>,
}

pub(crate) fn with_service_routes<L, R>(
    tradein: Arc<TradeInService<L>>,
    bookings: Arc<BookingService<R, L>>,
) -> axum::Router
where
    L: VehicleLookup + 'static,
    R: BookingRepository + 'static,
{
    tradein_router(tradein)
        .merge(booking_router(bookings))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/valuation/estimate",
            axum::routing::post(estimate_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn estimate_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    let EstimateRequest {
        registration,
        make,
        model,
        year,
        mileage,
        vin,
        condition,
        today,
        demand_bonus,
    } = payload;

    let vehicle = Vehicle {
        registration: Registration::parse(&registration)?,
        make,
        model,
        year,
        vin,
        mileage,
    };
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let config = state.valuation.as_ref();

    let valuation = assemble_valuation(&vehicle, condition, today, demand_bonus, config);
    let by_condition = Condition::ordered()
        .into_iter()
        .map(|condition| ConditionEstimate {
            condition,
            value: estimate_value(&vehicle, condition, today, config),
        })
        .collect();

    Ok(Json(EstimateResponse {
        age: vehicle.age(today),
        registration: vehicle.registration,
        today,
        total: valuation.total(),
        valuation,
        by_condition,
    }))
}
