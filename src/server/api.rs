use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::models::{ChartPoint, DailyChange, DisplayMode, DisplayRange};
use crate::server::AppState;
use crate::services::{daily_table, range_projector, StoreStatus};

/// Query parameters for /series/{symbol}
#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    /// Display range: 1d, 5d, 1mo, 3mo, 6mo, ytd (default), 1y, 2y, 5y, 10y, max
    pub range: Option<String>,

    /// Display mode: percent (default) or dollar
    pub mode: Option<String>,

    /// Visible-window start from the chart's pan/zoom state (YYYY-MM-DD).
    /// When both bounds are present the percent basis is recomputed from the
    /// first point inside the window.
    pub visible_start: Option<NaiveDate>,

    /// Visible-window end (YYYY-MM-DD)
    pub visible_end: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub symbol: String,
    pub range: String,
    pub mode: String,
    /// Basis price used for percent projection; absent in dollar mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis: Option<f64>,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub symbol: String,
    pub rows: Vec<DailyChange>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache: StoreStatus,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error_response(error: Error) -> ApiError {
    let status = match &error {
        Error::DataUnavailable(_) => StatusCode::NOT_FOUND,
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
}

/// GET /series/{symbol} - filtered, projected series for charting
///
/// Examples:
/// - /series/MCD (ytd, percent)
/// - /series/MCD?range=5y&mode=dollar
/// - /series/MCD?range=max&visible_start=2020-01-01&visible_end=2021-01-01
pub async fn get_series_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<SeriesQuery>,
) -> Result<Json<SeriesResponse>, ApiError> {
    let range: DisplayRange = params
        .range
        .as_deref()
        .unwrap_or(DisplayRange::default().as_str())
        .parse()
        .map_err(error_response)?;
    let mode: DisplayMode = params
        .mode
        .as_deref()
        .unwrap_or(DisplayMode::default().as_str())
        .parse()
        .map_err(error_response)?;

    debug!(symbol = %symbol, range = %range, mode = %mode, "Series request");

    let series = state
        .store
        .get_series(&symbol)
        .await
        .map_err(error_response)?;

    let filtered = range_projector::filter_by_range(&series, range);

    let (basis, points) = match mode {
        DisplayMode::Dollar => (None, range_projector::project(&filtered, mode, 0.0)),
        DisplayMode::Percent => {
            let fallback = range_projector::default_basis(&filtered).unwrap_or(0.0);
            let basis = match (params.visible_start, params.visible_end) {
                (Some(min), Some(max)) => {
                    range_projector::recompute_basis(&series, min, max, fallback)
                }
                _ => fallback,
            };
            (Some(basis), range_projector::project(&filtered, mode, basis))
        }
    };

    Ok(Json(SeriesResponse {
        symbol: symbol.trim().to_uppercase(),
        range: range.as_str().to_string(),
        mode: mode.as_str().to_string(),
        basis,
        points,
    }))
}

/// GET /series/{symbol}/table - trailing daily-change rows
pub async fn get_table_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<TableResponse>, ApiError> {
    let series = state
        .store
        .get_series(&symbol)
        .await
        .map_err(error_response)?;

    Ok(Json(TableResponse {
        symbol: symbol.trim().to_uppercase(),
        rows: daily_table::daily_changes(&series),
    }))
}

/// GET /health - liveness plus cache snapshot
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.store.status().await,
    })
}
