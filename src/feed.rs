use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

// Wire format of the USGS GeoJSON summary feed. Only the fields the map uses
// are modelled; everything else in the payload is ignored.
#[derive(Deserialize, Debug)]
struct FeatureCollection {
    #[serde(default)]
    metadata: Option<FeedMetadata>,
    #[serde(default)]
    features: Vec<WireFeature>,
}

#[derive(Deserialize, Debug)]
struct FeedMetadata {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Deserialize, Debug)]
struct WireFeature {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    properties: WireProperties,
    #[serde(default)]
    geometry: Option<WireGeometry>,
}

#[derive(Deserialize, Debug, Default)]
struct WireProperties {
    mag: Option<f64>,
    place: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    url: Option<String>,
    time: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct WireGeometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}

/// One earthquake event from the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeFeature {
    pub id: String,
    pub place: String,
    pub magnitude: f64,
    pub depth: f64, // kilometers
    pub event_type: String,
    pub longitude: f64,
    pub latitude: f64,
    pub detail_url: String,
    pub time: Option<DateTime<Utc>>,
}

impl WireFeature {
    fn into_feature(self) -> Option<EarthquakeFeature> {
        let coords = self.geometry?.coordinates;
        let (longitude, latitude) = match coords.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            _ => return None,
        };
        let depth = coords.get(2).copied().unwrap_or(0.0);
        let props = self.properties;

        Some(EarthquakeFeature {
            id: self.id.unwrap_or_default(),
            place: props.place.unwrap_or_default(),
            magnitude: props.mag.unwrap_or(0.0),
            depth,
            event_type: props.event_type.unwrap_or_default(),
            longitude,
            latitude,
            detail_url: props.url.unwrap_or_default(),
            time: props
                .time
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        })
    }
}

/// Features from one successful fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    pub title: Option<String>,
    pub features: Vec<EarthquakeFeature>,
}

/// Parses a GeoJSON FeatureCollection body. Features without usable
/// coordinates are skipped.
pub fn parse_feature_collection(body: &[u8]) -> Result<FeedSnapshot> {
    let collection: FeatureCollection =
        serde_json::from_slice(body).context("Malformed GeoJSON feature collection")?;

    let total = collection.features.len();
    let features: Vec<EarthquakeFeature> = collection
        .features
        .into_iter()
        .filter_map(WireFeature::into_feature)
        .collect();

    if features.len() < total {
        tracing::debug!(
            "Skipped {} feature(s) without coordinates",
            total - features.len()
        );
    }

    Ok(FeedSnapshot {
        title: collection.metadata.and_then(|m| m.title),
        features,
    })
}

/// Source of feed snapshots. The HTTP implementation is the only one used at
/// runtime; tests substitute scripted clients.
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FeedSnapshot>;
}

pub struct HttpFeedClient {
    client: Client,
}

impl HttpFeedClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch(&self, url: &str) -> Result<FeedSnapshot> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Error fetching data from {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("Error fetching data from {}: HTTP {}", url, status));
        }

        let body = resp
            .bytes()
            .await
            .with_context(|| format!("Error reading response body from {}", url))?;
        parse_feature_collection(&body)
    }
}
