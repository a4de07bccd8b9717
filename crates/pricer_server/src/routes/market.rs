//! Historical volatility endpoints
//!
//! Serves the dataset loaded at startup. Without a dataset the listing is
//! empty and every ticker lookup is a 404.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use pricer_risk::volatility::TickerVolatility;

use super::AppState;
use crate::error::ApiError;

/// Listing filter
#[derive(Debug, Default, Deserialize)]
pub struct VolatilityQuery {
    /// Case-insensitive ticker substring
    pub search: Option<String>,
}

/// One row of the ticker listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSummary {
    /// Ticker symbol
    pub ticker: String,
    /// Annualised historical volatility
    pub volatility: f64,
    /// Most recent close
    pub latest_price: f64,
}

impl From<&TickerVolatility> for TickerSummary {
    fn from(record: &TickerVolatility) -> Self {
        Self {
            ticker: record.ticker.clone(),
            volatility: record.volatility,
            latest_price: record.latest_price,
        }
    }
}

/// Ticker listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityListResponse {
    /// Number of tickers returned
    pub total: usize,
    /// Matching tickers in alphabetical order
    pub tickers: Vec<TickerSummary>,
}

/// Build the market routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/market/volatility", get(list_volatility))
        .route("/api/v1/market/volatility/{ticker}", get(ticker_volatility))
        .route("/market/volatility", get(list_volatility))
}

/// GET /api/v1/market/volatility?search=
async fn list_volatility(
    State(state): State<AppState>,
    Query(query): Query<VolatilityQuery>,
) -> Json<VolatilityListResponse> {
    let tickers: Vec<TickerSummary> = match &state.dataset {
        Some(dataset) => dataset
            .search(query.search.as_deref().unwrap_or_default())
            .into_iter()
            .map(TickerSummary::from)
            .collect(),
        None => Vec::new(),
    };

    Json(VolatilityListResponse {
        total: tickers.len(),
        tickers,
    })
}

/// GET /api/v1/market/volatility/{ticker}
async fn ticker_volatility(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<TickerVolatility>, ApiError> {
    state
        .dataset
        .as_ref()
        .and_then(|dataset| dataset.get(&ticker).cloned())
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("ticker '{ticker}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::routes::test_support;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn get(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = routes()
            .with_state(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, test_support::body_json(response).await)
    }

    #[tokio::test]
    async fn test_list_all_tickers() {
        let (status, json) = get(test_support::state(), "/api/v1/market/volatility").await;
        assert_eq!(status, StatusCode::OK);

        let list: VolatilityListResponse = serde_json::from_value(json).unwrap();
        assert_eq!(list.total, 3);
        let names: Vec<&str> = list.tickers.iter().map(|t| t.ticker.as_str()).collect();
        assert_eq!(names, vec!["AAPL", "CROX", "PTON"]);
        assert_eq!(list.tickers[2].latest_price, 5.5);
    }

    #[tokio::test]
    async fn test_search_filter() {
        let (_, json) = get(test_support::state(), "/api/v1/market/volatility?search=cr").await;
        assert_eq!(json["total"], 1);
        assert_eq!(json["tickers"][0]["ticker"], "CROX");
        assert_eq!(json["tickers"][0]["volatility"], 0.52);
    }

    #[tokio::test]
    async fn test_ticker_lookup() {
        let (status, json) = get(test_support::state(), "/api/v1/market/volatility/aapl").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ticker"], "AAPL");
        assert_eq!(json["data_points"], 250);
        assert_eq!(json["date_range"]["end"], "2023-12-29T00:00:00");
    }

    #[tokio::test]
    async fn test_unknown_ticker_is_404() {
        let (status, json) = get(test_support::state(), "/api/v1/market/volatility/ZZZZ").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_without_dataset() {
        let state = AppState::new(Arc::new(ServerConfig::default()));
        let (status, json) = get(state.clone(), "/market/volatility").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 0);

        let (status, _) = get(state, "/api/v1/market/volatility/AAPL").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
