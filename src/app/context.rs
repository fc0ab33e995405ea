use crate::domain::AppConfig;
use crate::ports::{CompletionClient, SlideRenderer};

/// Application context holding dependencies for command execution.
pub struct AppContext<C: CompletionClient, R: SlideRenderer> {
    config: AppConfig,
    client: C,
    renderer: R,
}

impl<C: CompletionClient, R: SlideRenderer> AppContext<C, R> {
    pub fn new(config: AppConfig, client: C, renderer: R) -> Self {
        Self { config, client, renderer }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
