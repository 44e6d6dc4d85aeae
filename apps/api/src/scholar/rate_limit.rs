//! Fixed-window, per-client rate limit for profile fetches.

use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;
use tracing::warn;

#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    clients: DashMap<String, Window>,
}

#[derive(Debug)]
struct Window {
    count: u32,
    resets_at: Instant,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: DashMap::new(),
        }
    }

    /// Records a request from `client` and returns whether it is allowed.
    /// The first request after a window expires opens a fresh window.
    ///
    /// Client keys come from a request header, so expired windows are swept
    /// whenever a new key is admitted to keep the map bounded by the clients
    /// active within one window.
    pub fn check(&self, client: &str) -> bool {
        let now = Instant::now();
        if !self.clients.contains_key(client) {
            self.clients.retain(|_, window| window.resets_at >= now);
        }

        let mut entry = self.clients.entry(client.to_string()).or_insert(Window {
            count: 0,
            resets_at: now + self.window,
        });

        if now > entry.resets_at {
            entry.count = 0;
            entry.resets_at = now + self.window;
        }

        if entry.count >= self.max_requests {
            warn!(client, limit = self.max_requests, "rate limit exceeded");
            return false;
        }

        entry.count += 1;
        true
    }
}
