use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    systems::{
        heading::{DisplayHeading, quantize},
        icons::{IconResource, IconSet},
    },
    tracking::{Attributes, Snapshot, TrackedObject},
};

/// Everything the map needs to draw one flight
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: String,
    pub position: [f64; 2],
    pub display_heading: DisplayHeading,
    pub icon: IconResource,
    /// Passenger attributes shown in the marker popup
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub popup: Attributes,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub zone: String,
    pub tick: u64,
    pub markers: Vec<Marker>,
}

impl Marker {
    /// The icon follows the object's continuous heading. An object without
    /// one has no history yet, which the tracker also renders as north.
    pub fn from_tracked(o: &TrackedObject, icons: &IconSet, popup_keys: &[String]) -> Self {
        let display_heading = quantize(o.heading_deg.unwrap_or(0.));
        let popup = popup_keys
            .iter()
            .filter_map(|k| o.attributes.get(k).map(|v| (k.clone(), v.clone())))
            .collect();
        Marker {
            id: o.id.to_string(),
            position: [o.latitude, o.longitude],
            display_heading,
            icon: icons.icon_for_heading(display_heading),
            popup,
        }
    }
}

pub fn build_markers(snapshot: &Snapshot, icons: &IconSet, popup_keys: &[String]) -> Vec<Marker> {
    snapshot
        .iter()
        .map(|o| Marker::from_tracked(o, icons, popup_keys))
        .collect()
}
