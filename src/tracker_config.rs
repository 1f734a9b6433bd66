use std::fs;

use anyhow::{Result, anyhow};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

const ICON_BASE_URL: &str = "https://github.com/tomseimandi/flightradar/blob/main/img";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Where the pre-rotated `plane_<angle>.png` icons are hosted
    pub icon_base_url: String,

    /// Appended after `plane_<angle>.png`, e.g. a query string required by the host
    pub icon_url_suffix: String,

    /// Display size of every icon, in pixels
    pub icon_size: [u32; 2],

    /// How often (ms) the feed is polled. Only used when pacing a replay.
    pub poll_interval_ms: u64,

    /// Zone assumed for feed ticks that do not name one
    pub default_zone: String,

    /// Passenger attributes to show in marker popups, in this order
    pub popup_attributes: Vec<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            icon_base_url: String::from(ICON_BASE_URL),
            icon_url_suffix: String::from("?raw=true"),
            icon_size: [38, 38],
            poll_interval_ms: 2000,
            default_zone: String::from("europe"),
            popup_attributes: ["number", "origin_airport_iata", "destination_airport_iata", "ground_speed"]
                .iter()
                .map(|s| String::from(*s))
                .collect(),
        }
    }
}

impl TrackerConfig {
    pub fn write_config_to_file(&self, config_file_path: &str) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        match fs::write(config_file_path, text) {
            Ok(()) => {
                info!("Wrote config to file: {:?}", config_file_path);
                Ok(())
            }
            Err(e) => {
                error!("Error writing config to file: {:?}", e);
                Err(anyhow!("Failed to write config to {}: {}", config_file_path, e))
            }
        }
    }
}

pub fn load_config_from_file(config_file_path: &str) -> Result<TrackerConfig> {
    match fs::read_to_string(config_file_path) {
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                warn!(
                    "Tracker config file not found at {}, using defaults",
                    &config_file_path
                );
                Ok(TrackerConfig::default())
            } else {
                Err(anyhow!(
                    "Failed to load tracker config from {}: {}",
                    config_file_path,
                    e
                ))
            }
        }
        Ok(s) => {
            info!("Loaded tracker config OK from \"{}\"", config_file_path);
            match serde_json::from_str::<TrackerConfig>(&s) {
                Ok(loaded_config) => {
                    debug!("Config parsed data from file: {:?}", &loaded_config);
                    Ok(loaded_config)
                }
                Err(e) => Err(anyhow!("Failed to parse config data: {}", e)),
            }
        }
    }
}
