use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use folio_email_contracts::EmailService;
use folio_shared_contracts::time::TimeService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Time, Email> {
    time: Time,
    email: Email,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
    /// Upper bound for a single smtp ping. Other health requests wait on it.
    pub ping_timeout: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl<Time, Email> HealthFeatureServiceImpl<Time, Email> {
    pub fn new(time: Time, email: Email, config: HealthFeatureConfig) -> Self {
        Self {
            time,
            email,
            config,
            state: Default::default(),
        }
    }
}

impl<Time, Email> HealthFeatureService for HealthFeatureServiceImpl<Time, Email>
where
    Time: TimeService,
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }

        let email = match tokio::time::timeout(self.config.ping_timeout, self.email.ping()).await {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                error!("Failed to ping smtp server: {err}");
                false
            }
            Err(_) => {
                error!(
                    "Smtp server did not answer the ping within {:?}",
                    self.config.ping_timeout
                );
                false
            }
        };

        let status = HealthStatus { email };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}
