use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TrackerError},
    geometry_utils::{bearing, same_position},
    tracking::{Observation, Snapshot, TrackedObject},
};

/// Candidate orientations, scanned in ascending order. 360 is kept as a
/// candidate so that angles just below north snap to north.
const ROUND_ANGLES: [u16; 25] = [
    0, 15, 30, 45, 60, 75, 90, 105, 120, 135, 150, 165, 180, 195, 210, 225, 240, 255, 270, 285,
    300, 315, 330, 345, 360,
];

pub const HEADING_STEP: u16 = 15;

/// One of the 24 icon orientations: 0, 15, ..., 345
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u16", into = "u16")]
pub struct DisplayHeading(u16);

impl DisplayHeading {
    pub const NORTH: DisplayHeading = DisplayHeading(0);

    pub fn degrees(self) -> u16 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = DisplayHeading> {
        (0..360).step_by(HEADING_STEP as usize).map(DisplayHeading)
    }
}

impl TryFrom<u16> for DisplayHeading {
    type Error = TrackerError;

    fn try_from(value: u16) -> Result<Self> {
        if value < 360 && value % HEADING_STEP == 0 {
            Ok(DisplayHeading(value))
        } else {
            Err(TrackerError::InvalidQuantizedAngle(i64::from(value)))
        }
    }
}

impl From<DisplayHeading> for u16 {
    fn from(heading: DisplayHeading) -> u16 {
        heading.0
    }
}

impl fmt::Display for DisplayHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snap a bearing (already normalised to [0, 360)) to the closest display heading.
///
/// Ties go to the smaller candidate: the scan is ascending and only a strictly
/// smaller difference replaces the current best. Rounding via division would
/// break ties differently at exact midpoints, so keep the scan.
pub fn quantize(angle_deg: f64) -> DisplayHeading {
    let mut closest = ROUND_ANGLES[0];
    let mut smallest_difference = f64::INFINITY;
    for &candidate in ROUND_ANGLES.iter() {
        let difference = (angle_deg - f64::from(candidate)).abs();
        if difference < smallest_difference {
            smallest_difference = difference;
            closest = candidate;
        }
    }
    if closest == 360 {
        DisplayHeading::NORTH
    } else {
        DisplayHeading(closest)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub new: usize,
    pub moved: usize,
    pub stationary: usize,
}

/// Validate a raw feed tick and attach headings to every flight in it,
/// matching against the previous tick's enriched snapshot (if any).
///
/// A malformed entry rejects the whole tick; nothing is returned partially.
pub fn update_headings(current: Vec<Observation>, previous: Option<&Snapshot>) -> Result<Snapshot> {
    let current = Snapshot::from_observations(current)?;
    enrich(current, previous)
}

/// Attach headings to an already validated snapshot. Fails if a flight has
/// not moved but its previous entry carries no heading to keep.
pub fn enrich(current: Snapshot, previous: Option<&Snapshot>) -> Result<Snapshot> {
    let (snapshot, summary) = enrich_with(current, previous, bearing)?;
    debug!(
        "Headings updated: {} new, {} moved, {} stationary",
        summary.new, summary.moved, summary.stationary
    );
    Ok(snapshot)
}

pub(crate) fn enrich_with<F>(
    current: Snapshot,
    previous: Option<&Snapshot>,
    mut bearing_fn: F,
) -> Result<(Snapshot, TickSummary)>
where
    F: FnMut(f64, f64, f64, f64) -> f64,
{
    let mut summary = TickSummary::default();
    let previous_by_id = previous.map(|p| p.index_by_id());

    let mut objects: Vec<TrackedObject> = Vec::with_capacity(current.len());
    for mut o in current.into_objects() {
        let matched = previous_by_id
            .as_ref()
            .and_then(|by_id| by_id.get(o.id.as_str()).copied());

        let heading_deg = match matched {
            None => {
                summary.new += 1;
                0.
            }
            Some(p) if same_position(o.position(), p.position()) => {
                summary.stationary += 1;
                p.heading_deg
                    .ok_or_else(|| TrackerError::MissingPreviousHeading(o.id.to_string()))?
            }
            Some(p) => {
                summary.moved += 1;
                bearing_fn(o.latitude, o.longitude, p.latitude, p.longitude)
            }
        };
        debug!("Flight {} heading {:.1}", o.id, heading_deg);

        o.heading_deg = Some(heading_deg);
        o.display_heading = Some(quantize(heading_deg));
        objects.push(o);
    }

    Ok((Snapshot::from_unique(objects), summary))
}
