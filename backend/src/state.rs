use std::sync::Arc;

use crate::{
    config::Config,
    error::AppError,
    identity::{GoTrueAdminClient, IdentityService},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    identity: Option<Arc<dyn IdentityService>>,
}

impl AppState {
    pub fn new(config: Config, identity: Option<Arc<dyn IdentityService>>) -> Self {
        Self { config, identity }
    }

    /// Builds the production identity client when both the base URL and the
    /// administrative credential are configured. Missing credentials leave
    /// the state without a client so requests answer `Server misconfigured`.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let identity = match (
            config.identity_service_url.as_deref(),
            config.identity_service_key.as_deref(),
        ) {
            (Some(url), Some(key)) => {
                let client: Arc<dyn IdentityService> = Arc::new(GoTrueAdminClient::new(url, key)?);
                Some(client)
            }
            _ => None,
        };
        Ok(Self::new(config, identity))
    }

    pub fn identity(&self) -> Result<&dyn IdentityService, AppError> {
        self.identity
            .as_deref()
            .ok_or(AppError::ServerMisconfigured)
    }
}
