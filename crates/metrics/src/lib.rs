use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Thread-safe metrics collector for outbound courier API calls.
#[derive(Debug)]
pub struct RequestMetrics {
    // Counters
    requests_sent: AtomicU64,
    responses_ok: AtomicU64,
    api_errors: AtomicU64,
    transport_errors: AtomicU64,
    signature_rejections: AtomicU64,
    retries: AtomicU64,

    // Timestamps
    inner: RwLock<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    start_time: Instant,
    last_success_time: Option<Instant>,
    last_error_time: Option<Instant>,
}

impl Default for RequestMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self {
            requests_sent: AtomicU64::new(0),
            responses_ok: AtomicU64::new(0),
            api_errors: AtomicU64::new(0),
            transport_errors: AtomicU64::new(0),
            signature_rejections: AtomicU64::new(0),
            retries: AtomicU64::new(0),
            inner: RwLock::new(MetricsInner {
                start_time: Instant::now(),
                last_success_time: None,
                last_error_time: None,
            }),
        }
    }

    // --- Increment methods ---

    pub fn inc_requests_sent(&self) {
        self.requests_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_responses_ok(&self) {
        self.responses_ok.fetch_add(1, Ordering::Relaxed);
        self.inner.write().last_success_time = Some(Instant::now());
    }

    pub fn inc_api_errors(&self) {
        self.api_errors.fetch_add(1, Ordering::Relaxed);
        self.inner.write().last_error_time = Some(Instant::now());
    }

    pub fn inc_transport_errors(&self) {
        self.transport_errors.fetch_add(1, Ordering::Relaxed);
        self.inner.write().last_error_time = Some(Instant::now());
    }

    pub fn inc_signature_rejections(&self) {
        self.signature_rejections.fetch_add(1, Ordering::Relaxed);
        self.inner.write().last_error_time = Some(Instant::now());
    }

    pub fn inc_retries(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.inner.read();

        MetricsSnapshot {
            requests_sent: self.requests_sent.load(Ordering::Relaxed),
            responses_ok: self.responses_ok.load(Ordering::Relaxed),
            api_errors: self.api_errors.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            signature_rejections: self.signature_rejections.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            uptime_secs: inner.start_time.elapsed().as_secs(),
            seconds_since_last_success: inner.last_success_time.map(|t| t.elapsed().as_secs()),
            seconds_since_last_error: inner.last_error_time.map(|t| t.elapsed().as_secs()),
        }
    }
}

/// Point-in-time view of the request counters.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub requests_sent: u64,
    pub responses_ok: u64,
    pub api_errors: u64,
    pub transport_errors: u64,
    pub signature_rejections: u64,
    pub retries: u64,
    pub uptime_secs: u64,
    pub seconds_since_last_success: Option<u64>,
    pub seconds_since_last_error: Option<u64>,
}

impl MetricsSnapshot {
    /// Total failed calls across all failure classes.
    pub fn total_errors(&self) -> u64 {
        self.api_errors + self.transport_errors + self.signature_rejections
    }
}

/// Create a shared metrics handle.
pub fn create_metrics() -> Arc<RequestMetrics> {
    Arc::new(RequestMetrics::new())
}
