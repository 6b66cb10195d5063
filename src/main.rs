use std::net::SocketAddr;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weblog::config::AppConfig;
use weblog::routes::{create_app, items::ItemCatalog};
use weblog::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing()?;

    let config = AppConfig::load()?;
    info!(
        web_log_enabled = config.web_log().enabled,
        detailing = %config.web_log().detailing,
        "Configuration loaded"
    );

    init_metrics(&config)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, ItemCatalog::sample());
    let app = create_app(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("weblog demo listening on {}", addr);

    // Connect info feeds the peer address into FULL request lines.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::registry();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "weblog=info,tower_http=info".into());

    match log_format.as_str() {
        "json" => {
            subscriber
                .with(tracing_subscriber::fmt::layer().json())
                .with(filter)
                .try_init()?;
        }
        _ => {
            subscriber
                .with(tracing_subscriber::fmt::layer())
                .with(filter)
                .try_init()?;
        }
    }

    Ok(())
}

fn init_metrics(config: &AppConfig) -> Result<()> {
    if config.metrics.enabled {
        PrometheusBuilder::new()
            .with_http_listener(([0, 0, 0, 0], config.metrics.port))
            .install()?;

        info!("Metrics exporter initialized on port {}", config.metrics.port);
    }

    Ok(())
}
