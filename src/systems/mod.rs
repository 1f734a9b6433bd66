pub mod heading;
pub mod icons;
pub mod zones;

use icons::IconSet;
use log::info;
use zones::ZoneSnapshots;

use crate::{
    error::Result,
    render::{RenderFrame, build_markers},
    tracker_config::TrackerConfig,
    tracking::Observation,
};

pub struct Systems {
    pub zone_snapshots: ZoneSnapshots,
    pub icon_set: IconSet,
    pub popup_attributes: Vec<String>,
    ticks: u64,
}

impl Systems {
    pub fn new(config: &TrackerConfig) -> Systems {
        Systems::with_snapshots(config, ZoneSnapshots::new())
    }

    pub fn with_snapshots(config: &TrackerConfig, zone_snapshots: ZoneSnapshots) -> Systems {
        let icon_set = IconSet::new(
            &config.icon_base_url,
            &config.icon_url_suffix,
            config.icon_size,
        );
        Systems {
            zone_snapshots,
            icon_set,
            popup_attributes: config.popup_attributes.clone(),
            ticks: 0,
        }
    }

    /// One poll tick for one zone: track headings, then resolve markers
    pub fn process_tick(&mut self, zone: &str, observations: Vec<Observation>) -> Result<RenderFrame> {
        let enriched = self.zone_snapshots.tick(zone, observations)?;
        self.ticks += 1;
        info!(
            "Tick {} for zone {}: {} flight(s)",
            self.ticks,
            zone,
            enriched.len()
        );
        Ok(RenderFrame {
            zone: String::from(zone),
            tick: self.ticks,
            markers: build_markers(&enriched, &self.icon_set, &self.popup_attributes),
        })
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
