use axum::{
    extract::State,
    http::StatusCode,
    response::{sse::Event as SseEvent, Html, Json, Sse},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;

use super::events::{QuakeEvent, QuakeEventData, HEARTBEAT};
use super::state::AppState;
use crate::constants::{EVENT_CHANNEL_CAPACITY, HEARTBEAT_INTERVAL_SECS};
use crate::filters::{MagnitudeFilter, TimeWindowFilter};
use crate::html_template::get_map_html;
use crate::layers::MapComposition;
use crate::view_state::QuakeMarker;

#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub magnitude: Vec<&'static str>,
    pub time_window: Vec<&'static str>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            magnitude: MagnitudeFilter::OPTIONS.iter().map(|m| m.label()).collect(),
            time_window: TimeWindowFilter::OPTIONS.iter().map(|w| w.label()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilterSelection {
    pub magnitude: MagnitudeFilter,
    pub time_window: TimeWindowFilter,
    pub feed_url: String,
}

#[derive(Debug, Serialize)]
pub struct MapConfig {
    pub map: MapComposition,
    pub options: FilterOptions,
    pub selected: FilterSelection,
}

#[derive(Debug, Deserialize)]
pub struct FilterUpdate {
    pub magnitude: Option<String>,
    pub time_window: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuakesResponse {
    pub feed_url: Option<String>,
    pub title: Option<String>,
    pub count: usize,
    pub markers: Vec<QuakeMarker>,
}

pub async fn index_html() -> Html<String> {
    get_map_html()
}

async fn current_selection(state: &AppState) -> FilterSelection {
    let view = state.view.lock().await;
    FilterSelection {
        magnitude: view.magnitude(),
        time_window: view.time_window(),
        feed_url: view.feed_url(),
    }
}

pub async fn get_config(State(state): State<AppState>) -> Json<MapConfig> {
    Json(MapConfig {
        map: MapComposition::default(),
        options: FilterOptions::default(),
        selected: current_selection(&state).await,
    })
}

pub async fn get_filters(State(state): State<AppState>) -> Json<FilterSelection> {
    Json(current_selection(&state).await)
}

pub async fn update_filters(
    State(state): State<AppState>,
    Json(payload): Json<FilterUpdate>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let magnitude = match payload.magnitude.as_deref() {
        Some(label) => match MagnitudeFilter::from_label(label) {
            Some(magnitude) => Some(magnitude),
            None => {
                tracing::warn!("Rejected unknown magnitude filter {:?}", label);
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "success": false,
                        "error": format!("Unknown magnitude filter: {}", label),
                    })),
                ));
            }
        },
        None => None,
    };
    let time_window = payload
        .time_window
        .as_deref()
        .map(TimeWindowFilter::from_label_or_default);

    let changed = {
        let mut view = state.view.lock().await;
        let mut changed = false;
        if let Some(magnitude) = magnitude {
            changed |= view.set_magnitude_filter(magnitude);
        }
        if let Some(window) = time_window {
            changed |= view.set_time_window_filter(window);
        }
        changed
    };

    if changed {
        state.spawn_refresh();
    }

    let selected = current_selection(&state).await;
    Ok(Json(json!({
        "success": true,
        "refreshing": changed,
        "magnitude": selected.magnitude,
        "time_window": selected.time_window,
        "feed_url": selected.feed_url,
    })))
}

pub async fn get_quakes(State(state): State<AppState>) -> Json<QuakesResponse> {
    let view = state.view.lock().await;
    let markers = view.markers();
    Json(QuakesResponse {
        feed_url: view.features_url().map(str::to_string),
        title: view.feed_title().map(str::to_string),
        count: markers.len(),
        markers,
    })
}

// SSE endpoint: tells the page when a new feed snapshot is on display
pub async fn quake_events_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let mut event_receiver = state.event_sender.subscribe();

    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                event = event_receiver.recv() => match event {
                    Ok(event) => event,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!("SSE client lagged, skipped {} events", skipped);
                        continue;
                    }
                    Err(_) => break, // Channel closed
                },
                _ = tokio::time::sleep(Duration::from_secs(HEARTBEAT_INTERVAL_SECS)) => {
                    QuakeEvent::new(
                        HEARTBEAT,
                        QuakeEventData {
                            message: Some("SSE connection alive".to_string()),
                            ..Default::default()
                        },
                    )
                }
            };

            let sse_event = SseEvent::default()
                .event(event.event_type.clone())
                .json_data(&event)
                .unwrap_or_else(|_| SseEvent::default().data("Error serializing event"));

            if tx.send(Ok(sse_event)).await.is_err() {
                break; // Client disconnected
            }
        }
    });

    Sse::new(ReceiverStream::new(rx)).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive-message"),
    )
}
