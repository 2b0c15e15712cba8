use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

lazy_static! {
    /// Duration of listing requests by content kind and mode (page, ranked).
    pub static ref FEED_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "feed_request_duration_seconds",
        "Listing request duration segmented by content kind and mode",
        &["kind", "mode"]
    )
    .expect("failed to register feed_request_duration_seconds");

    /// Total listing requests by content kind, mode and outcome.
    pub static ref FEED_REQUEST_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_request_total",
        "Total listing requests segmented by content kind, mode and outcome",
        &["kind", "mode", "result"]
    )
    .expect("failed to register feed_request_total");

    /// Candidates scored per ranked request.
    pub static ref FEED_CANDIDATE_COUNT: HistogramVec = register_histogram_vec!(
        "feed_candidate_count",
        "Number of candidates scored per ranked listing",
        &["kind"]
    )
    .expect("failed to register feed_candidate_count");

    /// Engagement mutations (like toggles, views, saves).
    pub static ref ENGAGEMENT_EVENTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "engagement_events_total",
        "Engagement mutations segmented by content kind and event",
        &["kind", "event"]
    )
    .expect("failed to register engagement_events_total");
}
