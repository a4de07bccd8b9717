//! HTTP round trips against a spawned server.

use std::net::SocketAddr;
use std::sync::Arc;

use approx::assert_relative_eq;
use pricer_risk::volatility::{DateRange, TickerVolatility, VolatilityDataset};
use pricer_server::config::ServerConfig;
use pricer_server::routes::AppState;
use pricer_server::server::Server;
use reqwest::StatusCode;
use serde_json::json;
use tokio::net::TcpListener;

fn dataset() -> VolatilityDataset {
    VolatilityDataset::from_records([TickerVolatility {
        ticker: "AAPL".to_string(),
        volatility: 0.27,
        mean_annual_return: 0.12,
        latest_price: 100.0,
        min_price: 80.0,
        max_price: 120.0,
        data_points: 251,
        date_range: DateRange {
            start: "2023-01-04T00:00:00".to_string(),
            end: "2023-12-29T00:00:00".to_string(),
        },
    }])
}

async fn spawn_server() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = AppState::new(Arc::new(ServerConfig::default())).with_dataset(dataset());
    let server = Server::new(state);
    let handle = tokio::spawn(async move {
        server.run_with_listener(listener).await.ok();
    });

    (addr, handle)
}

#[tokio::test]
async fn health_and_market_endpoints() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    let response = client
        .get(format!("http://{addr}/api/v1/market/volatility/AAPL"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let record: TickerVolatility = response.json().await.unwrap();
    assert_eq!(record.volatility, 0.27);

    let response = client
        .get(format!("http://{addr}/api/v1/market/volatility/NOPE"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    handle.abort();
}

#[tokio::test]
async fn analyze_and_simulate_over_http() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let positions = json!([
        {"type": "call", "side": "long", "quantity": 1, "strike": 100.0,
         "time_to_expiry": 1.0, "volatility": 0.25}
    ]);

    let response = client
        .post(format!("http://{addr}/api/v1/portfolio/analyze"))
        .json(&json!({"positions": positions, "ticker": "AAPL", "risk_free_rate": 0.03}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_relative_eq!(
        body["total_value"].as_f64().unwrap(),
        11.348476825143514,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        body["total_rho"].as_f64().unwrap(),
        48.32870160690893,
        epsilon = 1e-9
    );

    let response = client
        .post(format!("http://{addr}/api/v1/portfolio/simulate"))
        .json(&json!({
            "positions": positions, "spot": 100.0, "risk_free_rate": 0.03,
            "horizon": 1.0, "simulation_volatility": 0.25,
            "n_simulations": 1000, "steps": 12, "seed": 9
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["portfolio_values"].as_array().unwrap().len(), 1000);
    assert_eq!(body["seed"], 9);

    let response = client
        .post(format!("http://{addr}/api/v1/portfolio/simulate"))
        .json(&json!({"positions": positions, "spot": 100.0, "horizon": 1.0,
                      "simulation_volatility": 0.25, "steps": 0}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["field"], "steps");

    handle.abort();
}
