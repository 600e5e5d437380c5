// Port configuration
pub const DEFAULT_PORT: u16 = 3001;

// USGS summary feed, see https://earthquake.usgs.gov/earthquakes/feed/v1.0/geojson.php
pub const FEED_BASE_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/";
pub const FEED_EXTENSION: &str = "geojson";

// Marker sizing: area grows 10x for every SCALE_FACTOR magnitude steps,
// anchored so that magnitude 1.0 has area BASE_AREA.
pub const BASE_AREA: f64 = 10.0;
pub const SCALE_FACTOR: f64 = 2.5;
pub const ANCHOR_MAGNITUDE: f64 = 1.0;

// Marker style
pub const MARKER_COLOR: &str = "orange";
pub const MARKER_FILL_OPACITY: f64 = 0.5;
pub const MARKER_WEIGHT: u32 = 2;

// Map view
pub const MAP_CENTER: [f64; 2] = [0.0, 0.0];
pub const MAP_ZOOM: u8 = 3;
pub const MAP_MIN_ZOOM: u8 = 2;
pub const MAP_OUTER_BOUNDS: [[f64; 2]; 2] = [[-80.0, -180.0], [80.0, 180.0]];
pub const MAP_BOUNDS_VISCOSITY: f64 = 1.0;
pub const OVERLAY_NAME: &str = "USGS Earthquakes";

// Server-sent events
pub const EVENT_CHANNEL_CAPACITY: usize = 100;
pub const HEARTBEAT_INTERVAL_SECS: u64 = 30;
