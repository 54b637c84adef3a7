use std::sync::Arc;
use tracing::warn;

use crate::api::ratelimit::RateLimiter;
use crate::auth::CredentialSet;
use crate::config::Config;
use crate::db::Store;

/// Long-lived process resources, acquired once at startup and shared with
/// every request.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub credentials: Arc<CredentialSet>,

    pub rate_limiter: Arc<RateLimiter>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let credentials = Arc::new(CredentialSet::from_config(&config.auth)?);
        if credentials.is_empty() {
            warn!("No credentials configured; login and toggle requests will all be rejected");
        }

        let rate_limiter = Arc::new(RateLimiter::new());

        Ok(Self {
            config,
            store,
            credentials,
            rate_limiter,
        })
    }
}
