//! Artificial latency for the mock feature surfaces
//!
//! The original product fakes "thinking" with fixed timers. This models the
//! same thing as a generic deferred operation, so swapping a mock for a
//! real backend only removes the delay without touching call sites.

use std::time::Duration;
use tokio::time::sleep;

/// A fixed artificial delay applied before a canned result is returned
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    delay: Duration,
}

impl Latency {
    /// A latency read from an environment variable holding milliseconds
    pub fn from_env(var: &str, default_ms: u64) -> Self {
        let ms = std::env::var(var)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default_ms);

        Latency {
            delay: Duration::from_millis(ms),
        }
    }

    /// No delay at all; used by tests
    pub const fn none() -> Self {
        Latency {
            delay: Duration::ZERO,
        }
    }

    /// Wait out the configured delay
    pub async fn simulate(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

/// Delays for each mock surface
#[derive(Debug, Clone, Copy)]
pub struct MockLatencies {
    pub chatbot: Latency,
    pub planner: Latency,
    pub translator: Latency,
}

impl MockLatencies {
    /// Read all delays from the environment; defaults mirror the timers of
    /// the original product
    pub fn from_env() -> Self {
        MockLatencies {
            chatbot: Latency::from_env("CHATBOT_REPLY_DELAY_MS", 2000),
            planner: Latency::from_env("ROUTE_PLAN_DELAY_MS", 2000),
            translator: Latency::from_env("TRANSLATE_DELAY_MS", 1500),
        }
    }

    /// All delays disabled; used by tests
    pub const fn none() -> Self {
        MockLatencies {
            chatbot: Latency::none(),
            planner: Latency::none(),
            translator: Latency::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn zero_latency_returns_immediately() {
        let started = Instant::now();
        Latency::none().simulate().await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn from_env_falls_back_to_default() {
        let latency = Latency::from_env("NO_SUCH_DELAY_VARIABLE", 250);
        assert_eq!(latency.delay, Duration::from_millis(250));
    }
}
