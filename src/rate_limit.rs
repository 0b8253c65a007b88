use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{config::RateLimitConfig, error::AppError};

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: f64,
    last_seen: Instant,
}

struct Buckets {
    entries: HashMap<String, Bucket>,
    last_sweep: Instant,
}

/// Per-client token buckets.
///
/// Each bucket holds up to `capacity` tokens and refills continuously so that a
/// full bucket is restored after one window.
pub struct RateLimiter {
    capacity: f64,
    refill_per_sec: f64,
    idle: Duration,
    sweep_every: Duration,
    trust_forwarded_for: bool,
    buckets: Mutex<Buckets>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let capacity = f64::from(config.requests.max(1));
        let window = config.window_secs.max(1) as f64;

        Self {
            capacity,
            refill_per_sec: capacity / window,
            idle: Duration::from_secs(config.idle_secs),
            sweep_every: Duration::from_secs(config.sweep_secs),
            trust_forwarded_for: config.trust_forwarded_for,
            buckets: Mutex::new(Buckets {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    /// Takes one token from `key`'s bucket, returning false when it is empty.
    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if now.saturating_duration_since(buckets.last_sweep) >= self.sweep_every {
            let idle = self.idle;
            let before = buckets.entries.len();
            buckets
                .entries
                .retain(|_, bucket| now.saturating_duration_since(bucket.last_seen) < idle);
            buckets.last_sweep = now;

            let removed = before - buckets.entries.len();
            if removed > 0 {
                tracing::debug!(removed, "swept idle rate limit buckets");
            }
        }

        let capacity = self.capacity;
        let bucket = buckets.entries.entry(key.to_owned()).or_insert(Bucket {
            tokens: capacity,
            last_seen: now,
        });

        let elapsed = now.saturating_duration_since(bucket.last_seen).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(capacity);
        bucket.last_seen = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    pub fn tracked_clients(&self) -> usize {
        self.buckets
            .lock()
            .map(|buckets| buckets.entries.len())
            .unwrap_or_default()
    }
}

/// Peer address, or the first hop of `X-Forwarded-For` when it is trusted.
fn client_key(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> String {
    let forwarded = trust_forwarded_for
        .then(|| headers.get("x-forwarded-for"))
        .flatten()
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned);

    forwarded
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_owned())
}

pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(request.headers(), peer, limiter.trust_forwarded_for);

    if !limiter.check(&key) {
        tracing::warn!(client = %key, "rate limit exceeded");
        return AppError::RateLimited.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn limiter(requests: u32, window_secs: u64) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            enabled: true,
            requests,
            window_secs,
            idle_secs: 180,
            sweep_secs: 60,
            trust_forwarded_for: false,
        })
    }

    #[test]
    fn rejects_after_capacity_is_spent() {
        let limiter = limiter(3, 3600);
        let now = Instant::now();

        assert!(limiter.check_at("a", now));
        assert!(limiter.check_at("a", now));
        assert!(limiter.check_at("a", now));
        assert!(!limiter.check_at("a", now));
        assert!(limiter.check_at("b", now));
    }

    #[test]
    fn refills_over_the_window() {
        let limiter = limiter(2, 10);
        let now = Instant::now();

        assert!(limiter.check_at("a", now));
        assert!(limiter.check_at("a", now));
        assert!(!limiter.check_at("a", now));
        assert!(limiter.check_at("a", now + Duration::from_secs(5)));
        assert!(!limiter.check_at("a", now + Duration::from_secs(5)));
    }

    #[test]
    fn sweeps_idle_clients() {
        let limiter = limiter(5, 60);
        let now = Instant::now();

        limiter.check_at("a", now);
        limiter.check_at("b", now);
        assert_eq!(limiter.tracked_clients(), 2);

        limiter.check_at("c", now + Duration::from_secs(200));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn client_key_uses_forwarded_for_only_when_trusted() {
        let mut headers = HeaderMap::new();
        let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();

        assert_eq!(client_key(&headers, Some(peer), true), "10.0.0.1");
        assert_eq!(client_key(&headers, None, false), "unknown");

        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.2"),
        );
        assert_eq!(client_key(&headers, Some(peer), true), "203.0.113.7");
        assert_eq!(client_key(&headers, Some(peer), false), "10.0.0.1");
        assert_eq!(client_key(&headers, None, false), "unknown");
    }
}
