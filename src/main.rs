use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::env;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use tower_http::cors::CorsLayer;

mod api;
mod registry;
mod services;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load env vars
    dotenvy::dotenv().ok();

    // Load the OUI/IAB registries before accepting lookups
    registry::init().await;

    let app = app();

    let addr = listen_addr();
    tracing::info!("server starts - listens on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

// Build application with routes. Anything the router doesn't know
// still answers 200 with an empty body, never a 404.
fn app() -> Router {
    let cors = CorsLayer::permissive();
    Router::new()
        .route("/", get(api::lookup::lookup))
        .route("/health", get(health_check))
        .fallback(api::lookup::empty_ok)
        .layer(cors)
}

// The default v6 wildcard bind accepts IPv4 clients as v4-mapped
// addresses on dual-stack hosts, so one socket serves both families.
fn listen_addr() -> SocketAddr {
    let addr = env::var("BIND_ADDR")
        .ok()
        .and_then(|a| a.parse::<IpAddr>().ok())
        .unwrap_or(IpAddr::V6(Ipv6Addr::UNSPECIFIED));
    let port = env::var("BIND_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    SocketAddr::from((addr, port))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn serve_ephemeral() -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app()).await.unwrap() });
        addr
    }

    #[tokio::test]
    async fn mac_lookup_round_trips_over_a_real_socket() {
        registry::global().insert(0x080027, 24, "PCS Systemtechnik GmbH".to_string());
        let addr = serve_ephemeral().await;

        let direct = services::vendor::mac_vendor("08:00:27:00:00:00");
        let response = reqwest::get(format!("http://{}/?mac_addr=08:00:27:00:00:00", addr))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "text/html");
        assert_eq!(response.text().await.unwrap(), direct);
        assert_eq!(direct, "PcsSyste");
    }

    #[tokio::test]
    async fn unknown_paths_answer_200_with_an_empty_body() {
        let addr = serve_ephemeral().await;

        let response = reqwest::get(format!("http://{}/no/such/path", addr))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "");
    }

    #[tokio::test]
    async fn health_endpoint_reports_healthy() {
        let addr = serve_ephemeral().await;

        let body: Value = reqwest::get(format!("http://{}/health", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "healthy");
    }
}
