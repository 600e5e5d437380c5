use serde::{Deserialize, Serialize};

pub const FEATURES_UPDATED: &str = "features_updated";
pub const FETCH_FAILED: &str = "fetch_failed";
pub const HEARTBEAT: &str = "heartbeat";

// SSE event types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuakeEvent {
    pub event_type: String,
    pub data: QuakeEventData,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuakeEventData {
    pub count: Option<usize>,
    pub feed_url: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
}

impl QuakeEvent {
    pub fn new(event_type: &str, data: QuakeEventData) -> Self {
        Self {
            event_type: event_type.to_string(),
            data,
        }
    }
}
