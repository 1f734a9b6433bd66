use std::fs;

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::{
    error::Result,
    systems::heading::update_headings,
    tracking::{Observation, Snapshot},
};

/// The previous enriched snapshot for each polled zone. Ids are only unique
/// within one zone's feed, so zones never see each other's history.
#[derive(Debug, Default)]
pub struct ZoneSnapshots {
    previous: IndexMap<String, Snapshot>,
}

impl ZoneSnapshots {
    pub fn new() -> Self {
        ZoneSnapshots {
            previous: IndexMap::new(),
        }
    }

    /// Run one tick for a zone: enrich the fresh observations against that
    /// zone's previous snapshot, then keep the result as the next previous.
    ///
    /// On error the stored snapshot is left as it was.
    pub fn tick(&mut self, zone: &str, observations: Vec<Observation>) -> Result<Snapshot> {
        let enriched = update_headings(observations, self.previous.get(zone))?;
        if enriched.is_empty() {
            debug!("Zone {} produced no flights this tick", zone);
        }
        self.previous.insert(String::from(zone), enriched.clone());
        Ok(enriched)
    }

    pub fn previous(&self, zone: &str) -> Option<&Snapshot> {
        self.previous.get(zone)
    }

    pub fn zones(&self) -> impl Iterator<Item = &str> {
        self.previous.keys().map(|k| k.as_str())
    }

    /// Forget a zone; its next tick is treated as the first one
    pub fn clear(&mut self, zone: &str) -> Option<Snapshot> {
        self.previous.shift_remove(zone)
    }

    pub fn clear_all(&mut self) {
        self.previous.clear();
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let payload = rmp_serde::to_vec_named(&self.previous)?;
        fs::write(path, payload)?;
        info!(
            "Saved previous snapshots for {} zone(s) to {}",
            self.previous.len(),
            path
        );
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        match fs::read(path) {
            Ok(bytes) => {
                let previous: IndexMap<String, Snapshot> = rmp_serde::from_slice(&bytes)?;
                info!(
                    "Loaded previous snapshots for {} zone(s) from {}",
                    previous.len(),
                    path
                );
                Ok(ZoneSnapshots { previous })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("No snapshot store at {}; starting empty", path);
                Ok(ZoneSnapshots::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}
