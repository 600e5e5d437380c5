use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::feed::{EarthquakeFeature, FeedClient, FeedSnapshot};
use crate::filters::{feed_url, MagnitudeFilter, TimeWindowFilter};
use crate::popup::PopupContent;
use crate::radius::marker_radius;

/// Identifies one issued fetch. Sequence numbers increase monotonically per view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub sequence: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Features were replaced with the snapshot loaded from `url`.
    Applied {
        count: usize,
        url: String,
        title: Option<String>,
    },
    /// Fetch or parse failed; previous features kept.
    Failed,
    /// A newer fetch was issued after this one; result dropped.
    Superseded,
}

impl FetchOutcome {
    pub fn applied_count(&self) -> Option<usize> {
        match self {
            FetchOutcome::Applied { count, .. } => Some(*count),
            _ => None,
        }
    }
}

/// A feature ready for drawing as a circle marker.
#[derive(Debug, Clone, Serialize)]
pub struct QuakeMarker {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub depth: f64,
    pub magnitude: f64,
    pub radius: f64,
    pub time: Option<DateTime<Utc>>,
    pub popup_html: Option<String>,
}

impl QuakeMarker {
    pub fn from_feature(feature: &EarthquakeFeature) -> Self {
        Self {
            id: feature.id.clone(),
            lat: feature.latitude,
            lon: feature.longitude,
            depth: feature.depth,
            magnitude: feature.magnitude,
            radius: marker_radius(feature.magnitude),
            time: feature.time,
            popup_html: PopupContent::from_feature(feature).map(|p| p.to_html()),
        }
    }
}

/// Filter selection plus the features currently on display.
#[derive(Debug)]
pub struct QuakeView {
    feed_base_url: String,
    magnitude: MagnitudeFilter,
    time_window: TimeWindowFilter,
    features: Vec<EarthquakeFeature>,
    features_url: Option<String>,
    feed_title: Option<String>,
    last_issued: u64,
}

impl QuakeView {
    pub fn new(
        feed_base_url: impl Into<String>,
        magnitude: MagnitudeFilter,
        time_window: TimeWindowFilter,
    ) -> Self {
        Self {
            feed_base_url: feed_base_url.into(),
            magnitude,
            time_window,
            features: Vec::new(),
            features_url: None,
            feed_title: None,
            last_issued: 0,
        }
    }

    pub fn magnitude(&self) -> MagnitudeFilter {
        self.magnitude
    }

    pub fn time_window(&self) -> TimeWindowFilter {
        self.time_window
    }

    pub fn features(&self) -> &[EarthquakeFeature] {
        &self.features
    }

    /// URL the displayed features were loaded from, if any load succeeded yet.
    pub fn features_url(&self) -> Option<&str> {
        self.features_url.as_deref()
    }

    pub fn feed_title(&self) -> Option<&str> {
        self.feed_title.as_deref()
    }

    /// Feed URL for the current selection.
    pub fn feed_url(&self) -> String {
        feed_url(&self.feed_base_url, self.magnitude, self.time_window)
    }

    /// Returns `true` if the selection changed and a new fetch is due.
    pub fn set_magnitude_filter(&mut self, magnitude: MagnitudeFilter) -> bool {
        if self.magnitude == magnitude {
            return false;
        }
        self.magnitude = magnitude;
        true
    }

    /// Returns `true` if the selection changed and a new fetch is due.
    pub fn set_time_window_filter(&mut self, time_window: TimeWindowFilter) -> bool {
        if self.time_window == time_window {
            return false;
        }
        self.time_window = time_window;
        true
    }

    /// Replaces the displayed features wholesale.
    pub fn set_features(&mut self, features: Vec<EarthquakeFeature>) {
        self.features = features;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_issued += 1;
        FetchTicket {
            sequence: self.last_issued,
            url: self.feed_url(),
        }
    }

    /// Applies the result of the fetch identified by `ticket`.
    ///
    /// Results of fetches older than the newest issued ticket are dropped, so
    /// the display always converges on the latest selection. Errors are logged
    /// either way.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<FeedSnapshot>,
    ) -> FetchOutcome {
        if ticket.sequence < self.last_issued {
            if let Err(e) = &result {
                tracing::warn!("Fetch #{} failed: {:#}", ticket.sequence, e);
            }
            tracing::debug!(
                "Dropping response #{} from {} (newest request is #{})",
                ticket.sequence,
                ticket.url,
                self.last_issued
            );
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(snapshot) => {
                let count = snapshot.features.len();
                self.set_features(snapshot.features);
                self.feed_title = snapshot.title.clone();
                self.features_url = Some(ticket.url.clone());
                tracing::info!("Loaded {} earthquakes from {}", count, ticket.url);
                FetchOutcome::Applied {
                    count,
                    url: ticket.url.clone(),
                    title: snapshot.title,
                }
            }
            Err(e) => {
                tracing::warn!("Fetch #{} failed: {:#}", ticket.sequence, e);
                FetchOutcome::Failed
            }
        }
    }

    pub fn markers(&self) -> Vec<QuakeMarker> {
        self.features.iter().map(QuakeMarker::from_feature).collect()
    }
}

/// Fetches the feed for the current selection and applies the result.
///
/// The lock is released while the request is in flight, so the view keeps
/// serving the previous features until the response arrives.
pub async fn refresh(view: &Mutex<QuakeView>, client: &dyn FeedClient) -> FetchOutcome {
    let ticket = view.lock().await.begin_fetch();
    tracing::info!("Fetching data from URL: {}", ticket.url);

    let result = client.fetch(&ticket.url).await;
    view.lock().await.complete_fetch(&ticket, result)
}
