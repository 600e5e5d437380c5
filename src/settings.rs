use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_PORT, FEED_BASE_URL};
use crate::filters::{MagnitudeFilter, TimeWindowFilter};

const CONFIG_FILE_NAME: &str = "quakemap.ini";
const CONFIG_ENV_VAR: &str = "QUAKEMAP_CONFIG";

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub feed_base_url: String,
    pub magnitude: MagnitudeFilter,
    pub time_window: TimeWindowFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            feed_base_url: FEED_BASE_URL.to_string(),
            magnitude: MagnitudeFilter::default(),
            time_window: TimeWindowFilter::default(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Reads `key = value` lines. A missing file yields defaults; unknown keys
    /// and unparsable values are skipped with a warning.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut settings = Settings::default();
        if !config_path.exists() {
            tracing::info!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(settings);
        }

        let file = File::open(config_path).context("Failed to open config file")?;
        let reader = BufReader::new(file);
        let mut config_map = HashMap::new();

        for line in reader.lines() {
            let line = line.context("Failed to read line from config")?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(
                    key.trim().to_string(),
                    value.trim().trim_matches('"').to_string(),
                );
            }
        }

        for (key, value) in &config_map {
            match key.as_str() {
                "port" => match value.parse::<u16>() {
                    Ok(port) => settings.port = port,
                    Err(_) => tracing::warn!("Ignoring invalid port {:?}", value),
                },
                "feed_base_url" if !value.is_empty() => {
                    settings.feed_base_url = value.clone();
                }
                "magnitude" => match MagnitudeFilter::from_label(value) {
                    Some(magnitude) => settings.magnitude = magnitude,
                    None => tracing::warn!("Ignoring unknown magnitude filter {:?}", value),
                },
                "time_window" => match TimeWindowFilter::from_label(value) {
                    Some(window) => settings.time_window = window,
                    None => tracing::warn!("Ignoring unknown time window {:?}", value),
                },
                _ => tracing::warn!("Unknown config key {:?}", key),
            }
        }

        Ok(settings)
    }

    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }

        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push(CONFIG_FILE_NAME);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.ini")).unwrap();
        assert_eq!(settings.port, 3001);
        assert_eq!(settings.feed_base_url, FEED_BASE_URL);
        assert_eq!(settings.magnitude, MagnitudeFilter::All);
        assert_eq!(settings.time_window, TimeWindowFilter::LastDay);
    }

    #[test]
    fn reads_all_keys() {
        let file = write_config(
            "# QuakeMap Configuration File\n\
             port = 8088\n\
             feed_base_url = \"http://localhost:9000/summary/\"\n\
             magnitude = M4.5+\n\
             time_window = LAST 7 DAYS\n",
        );
        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.port, 8088);
        assert_eq!(settings.feed_base_url, "http://localhost:9000/summary/");
        assert_eq!(settings.magnitude, MagnitudeFilter::M4_5);
        assert_eq!(settings.time_window, TimeWindowFilter::Last7Days);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let file = write_config("port = lots\nmagnitude = M9+\ntime_window = forever\ncolour = red\n");
        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.port, 3001);
        assert_eq!(settings.magnitude, MagnitudeFilter::All);
        assert_eq!(settings.time_window, TimeWindowFilter::LastDay);
    }
}
