use crate::components::{CalendarComponent, ComponentManager};
use crate::config::Config;
use crate::error::Error;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Register and initialize every component
pub async fn start_components(config: Arc<RwLock<Config>>) -> miette::Result<ComponentManager> {
    let mut component_manager = ComponentManager::new(config);

    // Register calendar component
    component_manager.register(CalendarComponent::new());

    component_manager.init_all().await?;
    info!("Components started");

    Ok(component_manager)
}
