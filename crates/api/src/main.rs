use anyhow::Context;

use shopfront_api::{
    app,
    config::{AppConfig, LogFormat},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    LogFormat::from_env().init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let api_token = config.api_token.clone().unwrap_or_else(|| {
        tracing::warn!("SHOP_API_TOKEN not set; using insecure dev default");
        "dev-token".to_string()
    });

    let services = app::services::build_services(&config).context("failed to load catalog")?;
    let _sweeper = app::services::spawn_ledger_sweeper(services.clone());

    let app = app::build_app(services, api_token);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
