use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, HistogramVec, register_counter, register_counter_vec,
    register_histogram_vec,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: CounterVec = register_counter_vec!(
        "relay_requests_total",
        "Total number of requests per endpoint",
        &["endpoint"]
    )
    .expect("register relay_requests_total");
    pub static ref RATE_LIMITED: Counter = register_counter!(
        "relay_rate_limited_total",
        "Video requests rejected by the rate limiter"
    )
    .expect("register relay_rate_limited_total");
    pub static ref UPSTREAM_ERRORS: CounterVec = register_counter_vec!(
        "relay_upstream_errors_total",
        "Failed vendor calls per endpoint",
        &["endpoint"]
    )
    .expect("register relay_upstream_errors_total");
    pub static ref UPSTREAM_LATENCY: HistogramVec = register_histogram_vec!(
        "relay_upstream_latency_seconds",
        "Vendor call latency in seconds",
        &["endpoint"]
    )
    .expect("register relay_upstream_latency_seconds");
}
