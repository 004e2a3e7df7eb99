use tracing::info;
use tracing_subscriber::EnvFilter;
use wellness_navigator::{
    api::{start_server, ApiState},
    config::AppConfig,
    notifier::build_notifier,
    store::build_store,
    workflow::CoachWorkflow,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    info!("🚀 Wellness Navigator - API Server");
    info!("📍 Port: {}", config.port);

    let store = build_store(&config);
    let notifier = build_notifier(&config)?;
    let persistence = store.is_some();
    let workflow = CoachWorkflow::new(store);

    info!(
        persistence,
        webhook = notifier.is_some(),
        "✅ Workflow initialized"
    );
    info!("📡 Starting API server...");

    start_server(ApiState::new(workflow, notifier), &config).await?;

    Ok(())
}
