mod connection;
mod health;
mod home;
mod image;
mod metrics;
mod video;

pub use connection::test_connection_handler;
pub use health::ping_handler;
pub use home::home_handler;
pub use image::generate_image_handler;
pub use metrics::metrics_handler;
pub use video::{check_video_status_handler, generate_video_handler};

use std::future::Future;
use std::time::Instant;

use crate::metrics::{UPSTREAM_ERRORS, UPSTREAM_LATENCY};
use crate::vendor::VendorError;

// Run one vendor call, recording latency and failures under `endpoint`
async fn timed<T, F>(endpoint: &str, call: F) -> Result<T, VendorError>
where
    F: Future<Output = Result<T, VendorError>>,
{
    let start_time = Instant::now();
    let result = call.await;

    UPSTREAM_LATENCY
        .with_label_values(&[endpoint])
        .observe(start_time.elapsed().as_secs_f64());
    if result.is_err() {
        UPSTREAM_ERRORS.with_label_values(&[endpoint]).inc();
    }
    result
}
