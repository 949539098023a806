use crate::config::Config;
use crate::pipeline::Engine;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    /// Fixed K for the public contract (5 in the current API).
    pub key_points: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: Arc::new(Engine::from_app_config(config)),
            key_points: config.key_points(),
        }
    }
}
