use std::net::SocketAddr;

use fuel_server::auth::{TokenClient, TokenClientConfig, TokenManager};
use fuel_server::cache::{CacheConfig, DataCache};
use fuel_server::fuel::{FuelApiClient, FuelApiConfig};
use fuel_server::postcode::{PostcodeClient, PostcodeClientConfig};
use fuel_server::query::QueryEngine;
use fuel_server::ranking::RankingConfig;
use fuel_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fuel_server=info")),
        )
        .init();

    // Get credentials from environment. Missing credentials are fatal:
    // better to refuse to start than to fail every request.
    let client_id = std::env::var("FUEL_CLIENT_ID").unwrap_or_default();
    let client_secret = std::env::var("FUEL_CLIENT_SECRET").unwrap_or_default();

    let mut token_config = TokenClientConfig::new(&client_id, &client_secret);
    if let Ok(url) = std::env::var("FUEL_TOKEN_URL") {
        token_config = token_config.with_token_url(url);
    }
    if let Ok(scope) = std::env::var("FUEL_SCOPE") {
        token_config = token_config.with_scope(scope);
    }

    let token_client = match TokenClient::new(token_config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut api_config = FuelApiConfig::new();
    if let Ok(url) = std::env::var("FUEL_API_BASE_URL") {
        api_config = api_config.with_base_url(url);
    }
    let api_client = FuelApiClient::new(api_config).expect("Failed to create fuel API client");

    let mut postcode_config = PostcodeClientConfig::new();
    if let Ok(url) = std::env::var("POSTCODES_BASE_URL") {
        postcode_config = postcode_config.with_base_url(url);
    }
    let postcode_client =
        PostcodeClient::new(postcode_config).expect("Failed to create postcode client");

    let engine = QueryEngine::new(
        TokenManager::new(token_client),
        api_client,
        DataCache::new(&CacheConfig::default()),
        postcode_client,
        RankingConfig::default(),
    );

    let state = AppState::new(engine);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

    println!("Fuel price server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET /health    - Health check");
    println!("  GET /cheapest  - Cheapest stations near a location");
    println!("                   ?postcode=SW1A+1AA | ?lat=..&lon=..");
    println!("                   [&fuel=E10] [&radiusKm=10] [&limit=10]");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
