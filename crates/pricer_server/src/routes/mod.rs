//! Route modules for the pricer server
//!
//! This module contains endpoint group-specific routers:
//! - health: Health check and readiness endpoints
//! - market: Historical volatility lookups
//! - portfolio: Closed-form analytics and Monte Carlo simulation

pub mod health;
pub mod market;
pub mod portfolio;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use pricer_risk::simulation::RiskSimulator;
use pricer_risk::volatility::{DatasetError, VolatilityDataset, VolatilityProvider};

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Volatility dataset, loaded once at startup
    pub dataset: Option<Arc<VolatilityDataset>>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState without a volatility dataset
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self {
            config,
            dataset: None,
            start_time: std::time::Instant::now(),
        }
    }

    /// Attach a volatility dataset
    pub fn with_dataset(mut self, dataset: VolatilityDataset) -> Self {
        self.dataset = Some(Arc::new(dataset));
        self
    }

    /// Create state from configuration, loading the configured dataset
    pub fn load(config: ServerConfig) -> Result<Self, DatasetError> {
        let dataset = config
            .volatility_dataset
            .as_deref()
            .map(VolatilityDataset::from_path)
            .transpose()?;

        if let Some(dataset) = &dataset {
            tracing::info!(tickers = dataset.len(), "Volatility dataset loaded");
        }

        let state = Self::new(Arc::new(config));
        Ok(match dataset {
            Some(dataset) => state.with_dataset(dataset),
            None => state,
        })
    }

    /// Dataset as a provider, if one is loaded
    pub fn provider(&self) -> Option<&dyn VolatilityProvider> {
        self.dataset
            .as_deref()
            .map(|d| d as &dyn VolatilityProvider)
    }

    /// Simulator bounded by the configured path-cell budget
    pub fn simulator(&self) -> RiskSimulator {
        RiskSimulator::new().with_max_path_cells(self.config.max_path_cells)
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(market::routes())
        .merge(portfolio::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
