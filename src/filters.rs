use serde::{Deserialize, Serialize};

use crate::constants::FEED_EXTENSION;

/// Minimum magnitude bucket offered by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MagnitudeFilter {
    #[default]
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "M1.0+")]
    M1,
    #[serde(rename = "M2.5+")]
    M2_5,
    #[serde(rename = "M4.5+")]
    M4_5,
    #[serde(rename = "SIGNIFICANT")]
    Significant,
}

impl MagnitudeFilter {
    /// Button order in the UI.
    pub const OPTIONS: [MagnitudeFilter; 5] = [
        MagnitudeFilter::All,
        MagnitudeFilter::M1,
        MagnitudeFilter::M2_5,
        MagnitudeFilter::M4_5,
        MagnitudeFilter::Significant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MagnitudeFilter::All => "ALL",
            MagnitudeFilter::M1 => "M1.0+",
            MagnitudeFilter::M2_5 => "M2.5+",
            MagnitudeFilter::M4_5 => "M4.5+",
            MagnitudeFilter::Significant => "SIGNIFICANT",
        }
    }

    pub fn segment(self) -> &'static str {
        match self {
            MagnitudeFilter::All => "all",
            MagnitudeFilter::M1 => "1.0",
            MagnitudeFilter::M2_5 => "2.5",
            MagnitudeFilter::M4_5 => "4.5",
            MagnitudeFilter::Significant => "significant",
        }
    }

    /// Case-insensitive lookup by button label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::OPTIONS
            .into_iter()
            .find(|option| option.label().eq_ignore_ascii_case(label))
    }

    /// Like [`from_label`](Self::from_label) but falls back to `ALL`.
    pub fn from_label_or_default(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }
}

/// Time window covered by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindowFilter {
    #[serde(rename = "LAST HOUR")]
    LastHour,
    #[default]
    #[serde(rename = "LAST DAY")]
    LastDay,
    #[serde(rename = "LAST 7 DAYS")]
    Last7Days,
    #[serde(rename = "LAST 30 DAYS")]
    Last30Days,
}

impl TimeWindowFilter {
    pub const OPTIONS: [TimeWindowFilter; 4] = [
        TimeWindowFilter::LastHour,
        TimeWindowFilter::LastDay,
        TimeWindowFilter::Last7Days,
        TimeWindowFilter::Last30Days,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeWindowFilter::LastHour => "LAST HOUR",
            TimeWindowFilter::LastDay => "LAST DAY",
            TimeWindowFilter::Last7Days => "LAST 7 DAYS",
            TimeWindowFilter::Last30Days => "LAST 30 DAYS",
        }
    }

    pub fn segment(self) -> &'static str {
        match self {
            TimeWindowFilter::LastHour => "hour",
            TimeWindowFilter::LastDay => "day",
            TimeWindowFilter::Last7Days => "week",
            TimeWindowFilter::Last30Days => "month",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::OPTIONS
            .into_iter()
            .find(|option| option.label().eq_ignore_ascii_case(label))
    }

    /// Unknown labels map to `LAST DAY`, same as the feed period default.
    pub fn from_label_or_default(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }
}

/// Derives the magnitude path segment from a free-form button label.
///
/// Strips one leading `M` and one trailing `+`, then lower-cases the rest.
/// `ALL` and `SIGNIFICANT` come out as `all` and `significant`.
pub fn magnitude_segment(label: &str) -> String {
    let label = label.trim();
    let label = label
        .strip_prefix('M')
        .or_else(|| label.strip_prefix('m'))
        .unwrap_or(label);
    let label = label.strip_suffix('+').unwrap_or(label);
    label.to_lowercase()
}

/// Derives the period path segment from a button label; anything unknown is `day`.
pub fn period_segment(label: &str) -> &'static str {
    TimeWindowFilter::from_label_or_default(label).segment()
}

/// Relative feed path, e.g. `2.5_week.geojson`.
pub fn feed_path(magnitude: MagnitudeFilter, window: TimeWindowFilter) -> String {
    format!(
        "{}_{}.{}",
        magnitude.segment(),
        window.segment(),
        FEED_EXTENSION
    )
}

/// Absolute feed URL under `base`. A trailing slash on `base` is optional.
pub fn feed_url(base: &str, magnitude: MagnitudeFilter, window: TimeWindowFilter) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        feed_path(magnitude, window)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FEED_BASE_URL;

    #[test]
    fn magnitude_table() {
        let expected = [
            ("ALL", "all"),
            ("M1.0+", "1.0"),
            ("M2.5+", "2.5"),
            ("M4.5+", "4.5"),
            ("SIGNIFICANT", "significant"),
        ];
        for (label, segment) in expected {
            let filter = MagnitudeFilter::from_label(label).unwrap();
            assert_eq!(filter.label(), label);
            assert_eq!(filter.segment(), segment);
            // The generic strip/lower-case rule must agree with the table.
            assert_eq!(magnitude_segment(label), segment);
        }
    }

    #[test]
    fn magnitude_labels_are_case_insensitive() {
        assert_eq!(MagnitudeFilter::from_label("m2.5+"), Some(MagnitudeFilter::M2_5));
        assert_eq!(
            MagnitudeFilter::from_label(" significant "),
            Some(MagnitudeFilter::Significant)
        );
        assert_eq!(magnitude_segment("m4.5+"), "4.5");
        assert_eq!(magnitude_segment("all"), "all");
    }

    #[test]
    fn unknown_magnitude_falls_back_to_all() {
        assert_eq!(MagnitudeFilter::from_label("M9.9+"), None);
        assert_eq!(MagnitudeFilter::from_label(""), None);
        assert_eq!(
            MagnitudeFilter::from_label_or_default("HUGE"),
            MagnitudeFilter::All
        );
    }

    #[test]
    fn period_table() {
        let expected = [
            ("LAST HOUR", "hour"),
            ("LAST DAY", "day"),
            ("LAST 7 DAYS", "week"),
            ("LAST 30 DAYS", "month"),
        ];
        for (label, segment) in expected {
            assert_eq!(period_segment(label), segment);
            assert_eq!(TimeWindowFilter::from_label(label).unwrap().segment(), segment);
        }
    }

    #[test]
    fn unknown_period_is_day() {
        for label in ["", "LAST YEAR", "hour", "LAST 7 DAY"] {
            assert_eq!(period_segment(label), "day", "label {:?}", label);
        }
    }

    #[test]
    fn defaults_match_initial_ui_state() {
        assert_eq!(MagnitudeFilter::default(), MagnitudeFilter::All);
        assert_eq!(TimeWindowFilter::default(), TimeWindowFilter::LastDay);
    }

    #[test]
    fn feed_url_end_to_end() {
        assert_eq!(
            feed_url(FEED_BASE_URL, MagnitudeFilter::M2_5, TimeWindowFilter::Last7Days),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/2.5_week.geojson"
        );
        assert_eq!(
            feed_url(FEED_BASE_URL, MagnitudeFilter::All, TimeWindowFilter::LastHour),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_hour.geojson"
        );
    }

    #[test]
    fn feed_url_tolerates_missing_trailing_slash() {
        assert_eq!(
            feed_url(
                "http://localhost:9000/summary",
                MagnitudeFilter::Significant,
                TimeWindowFilter::Last30Days
            ),
            "http://localhost:9000/summary/significant_month.geojson"
        );
    }

    #[test]
    fn every_pair_maps_to_a_distinct_path() {
        let mut seen = std::collections::HashSet::new();
        for m in MagnitudeFilter::OPTIONS {
            for w in TimeWindowFilter::OPTIONS {
                assert!(seen.insert(feed_path(m, w)));
            }
        }
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn labels_serialize_as_button_text() {
        let json = serde_json::to_string(&MagnitudeFilter::M4_5).unwrap();
        assert_eq!(json, "\"M4.5+\"");
        let window: TimeWindowFilter = serde_json::from_str("\"LAST 7 DAYS\"").unwrap();
        assert_eq!(window, TimeWindowFilter::Last7Days);
    }
}
