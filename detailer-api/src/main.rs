use std::net::SocketAddr;
use detailer_api::{app, app_config::Config, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "detailer_api=debug,detailer_quote=debug,tower_http=debug,axum::rejection=trace"
                        .into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        "Starting Detailer pricing API on port {} (rounding scale {}, product cost entry {:?})",
        config.server.port,
        config.pricing.rounding_scale,
        config.pricing.product_cost_entry
    );

    let app = app(AppState::new(config.pricing));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
