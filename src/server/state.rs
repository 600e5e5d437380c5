use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use super::events::{QuakeEvent, QuakeEventData, FEATURES_UPDATED, FETCH_FAILED};
use crate::constants::EVENT_CHANNEL_CAPACITY;
use crate::feed::FeedClient;
use crate::settings::Settings;
use crate::view_state::{refresh, FetchOutcome, QuakeView};

// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub view: Arc<Mutex<QuakeView>>,
    pub client: Arc<dyn FeedClient>,
    pub event_sender: broadcast::Sender<QuakeEvent>,
}

impl AppState {
    pub fn new(settings: &Settings, client: Arc<dyn FeedClient>) -> Self {
        let view = QuakeView::new(
            settings.feed_base_url.as_str(),
            settings.magnitude,
            settings.time_window,
        );
        let (event_sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            view: Arc::new(Mutex::new(view)),
            client,
            event_sender,
        }
    }

    /// Starts a background fetch for the current selection and announces the
    /// result to SSE subscribers. Returns immediately.
    pub fn spawn_refresh(&self) -> tokio::task::JoinHandle<FetchOutcome> {
        let state = self.clone();
        tokio::spawn(async move {
            let outcome = refresh(&state.view, state.client.as_ref()).await;
            state.announce(&outcome);
            outcome
        })
    }

    fn announce(&self, outcome: &FetchOutcome) {
        let event = match outcome {
            FetchOutcome::Applied { count, url, title } => QuakeEvent::new(
                FEATURES_UPDATED,
                QuakeEventData {
                    count: Some(*count),
                    feed_url: Some(url.clone()),
                    title: title.clone(),
                    ..Default::default()
                },
            ),
            FetchOutcome::Failed => QuakeEvent::new(
                FETCH_FAILED,
                QuakeEventData {
                    message: Some("Feed request failed, keeping previous data".to_string()),
                    ..Default::default()
                },
            ),
            FetchOutcome::Superseded => return,
        };

        // No subscribers is fine: nobody has the page open.
        let _ = self.event_sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedSnapshot;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use tokio::sync::broadcast::error::TryRecvError;

    /// Succeeds with an empty snapshot, or fails every request.
    struct FixedFeed {
        fail: bool,
    }

    #[async_trait]
    impl FeedClient for FixedFeed {
        async fn fetch(&self, url: &str) -> Result<FeedSnapshot> {
            if self.fail {
                return Err(anyhow!("HTTP 500 from {}", url));
            }
            Ok(FeedSnapshot {
                title: Some("USGS Significant Earthquakes, Past Week".to_string()),
                features: Vec::new(),
            })
        }
    }

    fn state(fail: bool) -> AppState {
        let settings = Settings {
            magnitude: crate::filters::MagnitudeFilter::Significant,
            time_window: crate::filters::TimeWindowFilter::Last7Days,
            ..Settings::default()
        };
        AppState::new(&settings, Arc::new(FixedFeed { fail }))
    }

    #[tokio::test]
    async fn successful_fetch_announces_features_updated() {
        let state = state(false);
        let mut events = state.event_sender.subscribe();

        state.spawn_refresh().await.unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(event.event_type, FEATURES_UPDATED);
        assert_eq!(event.data.count, Some(0));
        assert_eq!(
            event.data.feed_url.as_deref(),
            Some("https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/significant_week.geojson")
        );
        assert_eq!(
            event.data.title.as_deref(),
            Some("USGS Significant Earthquakes, Past Week")
        );
    }

    #[tokio::test]
    async fn failed_fetch_announces_fetch_failed() {
        let state = state(true);
        let mut events = state.event_sender.subscribe();

        assert_eq!(state.spawn_refresh().await.unwrap(), FetchOutcome::Failed);

        let event = events.recv().await.unwrap();
        assert_eq!(event.event_type, FETCH_FAILED);
        assert!(event.data.message.is_some());
        assert_eq!(event.data.count, None);
    }

    #[tokio::test]
    async fn superseded_fetch_announces_nothing() {
        let state = state(false);
        let mut events = state.event_sender.subscribe();

        state.announce(&FetchOutcome::Superseded);

        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn announced_url_is_the_fetched_one() {
        let state = state(false);
        let mut events = state.event_sender.subscribe();

        // Another selection is already on display when this result is announced.
        state
            .view
            .lock()
            .await
            .set_time_window_filter(crate::filters::TimeWindowFilter::LastHour);
        state.announce(&FetchOutcome::Applied {
            count: 4,
            url: "https://example.test/summary/2.5_day.geojson".to_string(),
            title: None,
        });

        let event = events.recv().await.unwrap();
        assert_eq!(event.data.count, Some(4));
        assert_eq!(
            event.data.feed_url.as_deref(),
            Some("https://example.test/summary/2.5_day.geojson")
        );
    }
}
