//! Session Sweeper
//!
//! Purges expired and revoked sessions, once at startup and then on a fixed
//! period for the life of the process.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

/// Period between background sweeps
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(600);

pub struct SessionSweeper<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    period: Duration,
}

impl<S> SessionSweeper<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, period: Duration) -> Self {
        Self {
            session_repo,
            period,
        }
    }

    /// Delete every session that is expired at `now_ms`
    pub async fn sweep_at(&self, now_ms: i64) -> AuthResult<u64> {
        self.session_repo.cleanup_expired(now_ms).await
    }

    /// Sweep every `period`, starting one period from now
    ///
    /// Store errors are logged and the next tick tries again.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + self.period, self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if let Err(e) = self.sweep_at(Utc::now().timestamp_millis()).await {
                    tracing::warn!(error = %e, "Session sweep failed, retrying next period");
                }
            }
        })
    }
}
