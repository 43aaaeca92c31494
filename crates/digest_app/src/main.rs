use std::sync::Arc;

use digest_app::{router, AppConfig, AppState};
use digest_engine::{AnthropicClient, Pipeline};
use digest_logging::{digest_info, digest_warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    digest_logging::initialize(config.log_destination, config.log_level);

    if config.model.api_key.is_none() {
        digest_warn!("CLAUDE_API_KEY is not set; runs will fail until it is configured");
    }
    digest_info!(
        "Model {} at {}, {:?} between extraction calls",
        config.model.model,
        config.model.endpoint,
        config.pipeline.inter_call_delay
    );

    let client = AnthropicClient::new(config.model.clone())?;
    let pipeline = Pipeline::new(Arc::new(client), config.pipeline.clone());
    let app = router(Arc::new(AppState { pipeline }));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    digest_info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
