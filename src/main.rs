use pet_memorial::booter::Booter;
use pet_memorial::core::upstream::LegacyUpstream;
use pet_memorial::governor_conf::get_governor_conf;
use pet_memorial::server::rate_limiter::{ClientIpExtractor, allowed_origins};
use pet_memorial::server::router;
use pet_memorial::server::types::AppState;
use pet_memorial::utils::constants::{DEFAULT_RATE_LIMIT_BURST, LEGACY_API_URL};
use pet_memorial::utils::get_env::{get_env_or, get_env_parsed, get_env_var};
use pet_memorial::utils::urls::to_endpoint;
use reqwest::Client;
use std::sync::Arc;
use tower_governor::GovernorLayer;

// Initialize app state from environment variables
fn init_app_state() -> Result<AppState, anyhow::Error> {
    let api_key = get_env_var("STABILITY_API_KEY")?;
    let endpoint = to_endpoint(&get_env_or("STABILITY_LEGACY_URL", LEGACY_API_URL))?;

    let http_client = Client::new();

    Ok(AppState {
        upstream: LegacyUpstream::new(http_client, endpoint, api_key),
    })
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let app_state = init_app_state()?;
    tracing::info!(upstream = %app_state.upstream.endpoint(), "proxy configured");
    let state = Arc::new(app_state);

    let burst = get_env_parsed("RATE_LIMIT_BURST", DEFAULT_RATE_LIMIT_BURST);
    let extractor = ClientIpExtractor::from_env();
    tracing::info!(burst, trust_forwarded = extractor.trust_forwarded, "rate limit configured");
    let governor_conf = Arc::new(get_governor_conf(burst, extractor)?);

    let router = router(state, allowed_origins()).layer(GovernorLayer {
        config: governor_conf,
    });

    Booter::new(None).await?.start(router).await
}
