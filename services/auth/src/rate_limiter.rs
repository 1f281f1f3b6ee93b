//! Login rate limiter for preventing brute force attacks

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::info;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of attempts allowed within the window
    pub max_attempts: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Ban duration in seconds once the limit is exceeded
    pub ban_duration_seconds: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 300,       // 5 minutes
            ban_duration_seconds: 900, // 15 minutes
        }
    }
}

#[derive(Debug)]
struct AttemptRecord {
    attempts: u32,
    last_attempt: Instant,
    ban_expires: Option<Instant>,
}

/// In-memory rate limiter keyed by an arbitrary string (login email here)
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    records: Arc<Mutex<HashMap<String, AttemptRecord>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record an attempt for a key and report whether it is allowed
    pub async fn is_allowed(&self, key: &str) -> bool {
        let mut records = self.records.lock().await;
        let now = Instant::now();

        let record = records.entry(key.to_string()).or_insert(AttemptRecord {
            attempts: 0,
            last_attempt: now,
            ban_expires: None,
        });

        if let Some(ban_expires) = record.ban_expires {
            if now >= ban_expires {
                record.attempts = 0;
                record.ban_expires = None;
            } else {
                return false;
            }
        }

        if now.duration_since(record.last_attempt)
            >= Duration::from_secs(self.config.window_seconds)
        {
            record.attempts = 0;
        }

        if record.attempts >= self.config.max_attempts {
            record.ban_expires = Some(now + Duration::from_secs(self.config.ban_duration_seconds));
            info!(
                "Rate limit exceeded for {}, banned for {} seconds",
                key, self.config.ban_duration_seconds
            );
            return false;
        }

        record.attempts += 1;
        record.last_attempt = now;

        true
    }

    /// Get the rate limiter configuration
    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_attempts_up_to_the_limit() {
        let limiter = RateLimiter::new(RateLimiterConfig {
            max_attempts: 3,
            window_seconds: 300,
            ban_duration_seconds: 900,
        });

        for _ in 0..3 {
            assert!(limiter.is_allowed("traveler@example.com").await);
        }
    }

    #[tokio::test]
    async fn bans_after_the_limit_is_exceeded() {
        let limiter = RateLimiter::new(RateLimiterConfig {
            max_attempts: 2,
            window_seconds: 300,
            ban_duration_seconds: 900,
        });

        assert!(limiter.is_allowed("k").await);
        assert!(limiter.is_allowed("k").await);
        assert!(!limiter.is_allowed("k").await);
        assert!(!limiter.is_allowed("k").await);
    }

    #[tokio::test]
    async fn keys_are_limited_independently() {
        let limiter = RateLimiter::new(RateLimiterConfig {
            max_attempts: 1,
            window_seconds: 300,
            ban_duration_seconds: 900,
        });

        assert!(limiter.is_allowed("a").await);
        assert!(!limiter.is_allowed("a").await);
        assert!(limiter.is_allowed("b").await);
    }
}
