use crate::config::Config;
use crate::pipeline::parse::ParserRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub parsers: Arc<ParserRegistry>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, ParserRegistry::with_defaults())
    }

    pub fn with_registry(config: Config, parsers: ParserRegistry) -> Self {
        tracing::info!("Registered parsers: {:?}", parsers.formats());
        Self {
            config: Arc::new(config),
            parsers: Arc::new(parsers),
        }
    }
}
