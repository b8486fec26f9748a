//! Prediction API endpoints.
//!
//! Request validation lives here; the engine assumes a well-formed request.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::generate_recent_bars;
use crate::types::{
    PredictionContext, PredictionRequest, PredictionResult, RiskProfile, Timeframe,
};
use crate::AppState;

/// API response wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMeta {
    pub request_id: Uuid,
    /// Unix timestamp (milliseconds) when served.
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            meta: ApiMeta {
                request_id: Uuid::new_v4(),
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        }
    }
}

/// Body for the synthetic-data demo endpoint. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DemoRequest {
    pub asset: Option<String>,
    pub timeframes: Option<Vec<String>>,
    pub base_price: Option<f64>,
    pub periods: Option<usize>,
    pub volatility: Option<f64>,
    pub user_profile: Option<RiskProfile>,
    pub context: Option<PredictionContext>,
}

const DEMO_ASSET: &str = "DEMO";
const DEMO_TIMEFRAMES: [&str; 3] = ["1h", "4h", "1D"];
const DEMO_BASE_PRICE: f64 = 91_000.0;
const DEMO_PERIODS: usize = 100;
const DEMO_VOLATILITY: f64 = 0.015;

/// Create the prediction router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(predict))
        .route("/demo", post(predict_demo))
}

/// Score caller-supplied OHLCV data.
async fn predict(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<PredictionResult>>> {
    let request = json_body(payload)
        .and_then(|body| validate_request(body, &state.config))
        .inspect_err(|e| {
            warn!("Rejected prediction request: {}", e);
        })?;

    let result = run_engine(&state, request).await?;
    Ok(Json(ApiResponse::new(result)))
}

/// Score freshly generated random-walk data.
async fn predict_demo(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<PredictionResult>>> {
    if !state.config.demo_enabled {
        return Err(AppError::NotFound("Demo mode is disabled".to_string()));
    }

    let request = json_body(payload)
        .and_then(|body| serde_json::from_value::<DemoRequest>(body).map_err(AppError::from))
        .and_then(|body| build_demo_request(body, &state.config))
        .inspect_err(|e| {
            warn!("Rejected demo request: {}", e);
        })?;

    let result = run_engine(&state, request).await?;
    Ok(Json(ApiResponse::new(result)))
}

async fn run_engine(state: &AppState, request: PredictionRequest) -> Result<PredictionResult> {
    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || engine.predict(&request))
        .await
        .map_err(|e| AppError::Internal(format!("Prediction task failed: {}", e)))?;

    info!(
        "Prediction for {}: {} at {}% (size {:.2}%, {} flags)",
        result.asset,
        result.suggestion.label(),
        result.confidence,
        result.size_recommendation_pct,
        result.risk_flags.len()
    );

    Ok(result)
}

/// Check the structural invariants the engine relies on and deserialize.
pub fn validate_request(body: Value, config: &Config) -> Result<PredictionRequest> {
    let obj = body
        .as_object()
        .ok_or_else(|| bad_request("Request body must be a JSON object"))?;

    obj.get("asset")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| bad_request("asset is required"))?;

    let timeframes = match obj.get("timeframes") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(bad_request("timeframes must be a non-empty array")),
    };
    if timeframes.iter().any(|tf| !tf.is_string()) {
        return Err(bad_request("timeframes must contain only strings"));
    }
    if timeframes.len() > config.max_timeframes {
        return Err(bad_request(&format!(
            "At most {} timeframes are allowed",
            config.max_timeframes
        )));
    }

    let Some(Value::Object(series)) = obj.get("ohlcv") else {
        return Err(bad_request("ohlcv must be an object keyed by timeframe"));
    };
    for (timeframe, bars) in series {
        let Some(bars) = bars.as_array() else {
            return Err(bad_request(&format!(
                "ohlcv.{} must be an array of bars",
                timeframe
            )));
        };
        if bars.len() > config.max_bars_per_timeframe {
            return Err(bad_request(&format!(
                "ohlcv.{} exceeds {} bars",
                timeframe, config.max_bars_per_timeframe
            )));
        }
    }

    let request: PredictionRequest = serde_json::from_value(body)?;
    check_request(&request)?;
    Ok(request)
}

/// Invariants that need typed bars and profile.
fn check_request(request: &PredictionRequest) -> Result<()> {
    for (timeframe, bars) in &request.ohlcv {
        if bars.windows(2).any(|pair| pair[1].time <= pair[0].time) {
            return Err(bad_request(&format!(
                "ohlcv.{} timestamps must be strictly ascending",
                timeframe
            )));
        }
    }

    if let Some(profile) = &request.user_profile {
        if !profile.max_allocation_pct.is_finite() || profile.max_allocation_pct < 0.0 {
            return Err(bad_request(
                "user_profile.max_allocation_pct must be a non-negative number",
            ));
        }
    }

    Ok(())
}

/// Expand a demo body into a full request with generated bars.
pub fn build_demo_request(body: DemoRequest, config: &Config) -> Result<PredictionRequest> {
    let base_price = body.base_price.unwrap_or(DEMO_BASE_PRICE);
    let periods = body.periods.unwrap_or(DEMO_PERIODS);
    let volatility = body.volatility.unwrap_or(DEMO_VOLATILITY);
    let timeframes = body
        .timeframes
        .unwrap_or_else(|| DEMO_TIMEFRAMES.iter().map(|s| s.to_string()).collect());

    if !base_price.is_finite() || base_price <= 0.0 {
        return Err(bad_request("base_price must be positive"));
    }
    if periods == 0 || periods > config.max_bars_per_timeframe {
        return Err(bad_request(&format!(
            "periods must be between 1 and {}",
            config.max_bars_per_timeframe
        )));
    }
    if !(0.0..1.0).contains(&volatility) {
        return Err(bad_request("volatility must be in [0, 1)"));
    }
    if timeframes.is_empty() || timeframes.len() > config.max_timeframes {
        return Err(bad_request(&format!(
            "timeframes must list between 1 and {} entries",
            config.max_timeframes
        )));
    }

    let ohlcv: HashMap<String, Vec<_>> = timeframes
        .iter()
        .map(|tf| {
            let interval_ms = Timeframe::from_label(tf)
                .map(|t| t.duration_ms())
                .unwrap_or(Timeframe::OneHour.duration_ms());
            let bars = generate_recent_bars(base_price, periods, volatility, interval_ms);
            (tf.clone(), bars)
        })
        .collect();

    let request = PredictionRequest {
        asset: body.asset.unwrap_or_else(|| DEMO_ASSET.to_string()),
        timeframes,
        ohlcv,
        user_profile: body.user_profile,
        context: body.context,
    };
    check_request(&request)?;
    Ok(request)
}

/// Unreadable or non-JSON bodies become a 400 in the usual error shape.
fn json_body(payload: std::result::Result<Json<Value>, JsonRejection>) -> Result<Value> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn bad_request(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
