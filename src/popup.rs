use crate::feed::EarthquakeFeature;

/// Everything a marker popup shows, independent of how it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub place: String,
    pub magnitude: f64,
    pub depth: f64,
    pub event_type: String,
    pub longitude: f64,
    pub latitude: f64,
    pub detail_url: String,
}

impl PopupContent {
    /// Features with an empty place get no popup.
    pub fn from_feature(feature: &EarthquakeFeature) -> Option<Self> {
        if feature.place.is_empty() {
            return None;
        }
        Some(Self {
            place: feature.place.clone(),
            magnitude: feature.magnitude,
            depth: feature.depth,
            event_type: feature.event_type.clone(),
            longitude: feature.longitude,
            latitude: feature.latitude,
            detail_url: feature.detail_url.clone(),
        })
    }

    pub fn to_text(&self) -> String {
        format!(
            "{}\nMAGNITUDE: {}\nDEPTH: {} km\nTYPE: {}\nLon/Lat: {}, {}\nMore info: {}",
            self.place,
            self.magnitude,
            self.depth,
            self.event_type,
            self.longitude,
            self.latitude,
            self.detail_url
        )
    }

    /// Markup for a Leaflet popup. Feed strings are escaped; the detail link
    /// opens in a new tab.
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                r#"<div class="quake-popup">"#,
                "<h2>{place}</h2>",
                "<p>",
                r#"<span class="label">MAGNITUDE</span>: {mag}<br>"#,
                r#"<span class="label">DEPTH</span>: {depth} km<br>"#,
                r#"<span class="label">TYPE</span>: {kind}<br>"#,
                r#"<span class="label">Lon/Lat</span>: {lon}, {lat}"#,
                "</p>",
                r#"<h3><a href="{url}" target="_blank" rel="noopener noreferrer">More info</a></h3>"#,
                "</div>"
            ),
            place = escape_html(&self.place),
            mag = self.magnitude,
            depth = self.depth,
            kind = escape_html(&self.event_type),
            lon = self.longitude,
            lat = self.latitude,
            url = escape_html(&self.detail_url),
        )
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
