use lazy_static::lazy_static;
use prometheus::{Gauge, IntCounter, Registry, TextEncoder};

lazy_static! {
    pub static ref GENERATE: IntCounter = IntCounter::new(
        "generate_requests",
        "accepted lesson video generation requests"
    )
    .unwrap();
    pub static ref STATUS: IntCounter =
        IntCounter::new("status_requests", "job status lookups").unwrap();
    pub static ref TRANSCRIPT: IntCounter =
        IntCounter::new("transcript_requests", "transcript fetches").unwrap();
    pub static ref UPSTREAM_FAILURE: IntCounter =
        IntCounter::new("upstream_failures", "failed calls to the generator").unwrap();
    pub static ref STREAMING: Gauge =
        Gauge::new("video_streams", "video relays in flight").unwrap();
    pub static ref REGISTRY: Registry =
        Registry::new_custom(Some("tutorgate".to_string()), None).unwrap();
    pub static ref ENCODER: TextEncoder = TextEncoder::new();
}

/// RAII handle for the in-flight relay gauge.
pub struct StreamGuard(());

impl StreamGuard {
    pub fn begin() -> Self {
        STREAMING.inc();
        StreamGuard(())
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        STREAMING.dec();
    }
}
