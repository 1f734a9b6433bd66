use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TrackerError},
    systems::heading::DisplayHeading,
};

/// Opaque descriptive attributes (flight number, airports, ground speed...)
/// carried along untouched, in feed order
pub type Attributes = IndexMap<String, serde_json::Value>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct FlightId(String);

impl FlightId {
    pub fn new(id: &str) -> Self {
        FlightId(String::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry as delivered by the flight feed. Nothing is guaranteed to be
/// present until the entry has been validated into a [`TrackedObject`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Observation {
    #[serde(default)]
    pub id: Option<FlightId>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Observation {
    pub fn new(id: &str, position: (f64, f64)) -> Self {
        Observation {
            id: Some(FlightId::new(id)),
            latitude: Some(position.0),
            longitude: Some(position.1),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: serde_json::Value) -> Self {
        self.attributes.insert(String::from(key), value);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackedObject {
    pub id: FlightId,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_heading: Option<DisplayHeading>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl TrackedObject {
    pub fn new(id: &str, position: (f64, f64)) -> Self {
        TrackedObject {
            id: FlightId::new(id),
            latitude: position.0,
            longitude: position.1,
            heading_deg: None,
            display_heading: None,
            attributes: Attributes::new(),
        }
    }

    pub fn id(&self) -> &FlightId {
        &self.id
    }

    pub fn position(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    fn try_from_observation(index: usize, observation: Observation) -> Result<Self> {
        let Observation {
            id,
            latitude,
            longitude,
            attributes,
        } = observation;

        let malformed = |reason: &str| TrackerError::MalformedObject {
            index,
            reason: String::from(reason),
        };

        let id = match id {
            Some(id) if !id.as_str().is_empty() => id,
            Some(_) => return Err(malformed("empty id")),
            None => return Err(malformed("missing id")),
        };
        let latitude = latitude.ok_or_else(|| malformed("missing latitude"))?;
        let longitude = longitude.ok_or_else(|| malformed("missing longitude"))?;

        Ok(TrackedObject {
            id,
            latitude,
            longitude,
            heading_deg: None,
            display_heading: None,
            attributes,
        })
    }
}

/// All flights observed at a single poll tick, in feed order.
/// Identifiers are unique within a snapshot.
///
/// Deserializing is only done for stored snapshots, so it also requires every
/// entry to carry the heading the tracker attached to it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(try_from = "Vec<TrackedObject>", into = "Vec<TrackedObject>")]
pub struct Snapshot {
    objects: Vec<TrackedObject>,
}

impl TryFrom<Vec<TrackedObject>> for Snapshot {
    type Error = TrackerError;

    fn try_from(objects: Vec<TrackedObject>) -> Result<Self> {
        if let Some(o) = objects.iter().find(|o| o.heading_deg.is_none()) {
            return Err(TrackerError::MissingPreviousHeading(o.id.to_string()));
        }
        Snapshot::new(objects)
    }
}

impl From<Snapshot> for Vec<TrackedObject> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.objects
    }
}

impl Snapshot {
    pub fn new(objects: Vec<TrackedObject>) -> Result<Self> {
        let mut seen: IndexSet<&str> = IndexSet::with_capacity(objects.len());
        for o in objects.iter() {
            if !seen.insert(o.id.as_str()) {
                return Err(TrackerError::DuplicateId(o.id.to_string()));
            }
        }
        Ok(Snapshot { objects })
    }

    /// For objects derived one-to-one from an existing snapshot
    pub(crate) fn from_unique(objects: Vec<TrackedObject>) -> Self {
        Snapshot { objects }
    }

    /// Validate a raw feed tick. Any malformed entry rejects the whole tick.
    pub fn from_observations(observations: Vec<Observation>) -> Result<Self> {
        let objects = observations
            .into_iter()
            .enumerate()
            .map(|(i, o)| TrackedObject::try_from_observation(i, o))
            .collect::<Result<Vec<TrackedObject>>>()?;
        Snapshot::new(objects)
    }

    pub fn objects(&self) -> &[TrackedObject] {
        &self.objects
    }

    pub fn into_objects(self) -> Vec<TrackedObject> {
        self.objects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackedObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TrackedObject> {
        self.objects.iter().find(|o| o.id.as_str() == id)
    }

    /// Lookup table by id, built once per tick
    pub fn index_by_id(&self) -> IndexMap<&str, &TrackedObject> {
        self.objects.iter().map(|o| (o.id.as_str(), o)).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_observation_passengers_kept_in_order() {
        let o: Observation = serde_json::from_str(
            r#"{
                "latitude": 48.1,
                "longitude": 2.5,
                "id": "2f9a10c1",
                "origin_airport_iata": "CDG",
                "destination_airport_iata": "CPH",
                "ground_speed": 431
            }"#,
        )
        .unwrap();
        assert_eq!(o.id, Some(FlightId::new("2f9a10c1")));
        let keys: Vec<&str> = o.attributes.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            ["origin_airport_iata", "destination_airport_iata", "ground_speed"]
        );
    }

    #[test]
    fn test_missing_id_rejects_whole_tick() {
        let observations = vec![
            Observation::new("A", (50., 10.)),
            Observation {
                id: None,
                latitude: Some(51.),
                longitude: Some(11.),
                ..Default::default()
            },
        ];
        match Snapshot::from_observations(observations) {
            Err(TrackerError::MalformedObject { index, reason }) => {
                assert_eq!(index, 1);
                assert_eq!(reason, "missing id");
            }
            other => panic!("expected MalformedObject, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_position_is_malformed() {
        let o = Observation {
            id: Some(FlightId::new("A")),
            latitude: Some(50.),
            longitude: None,
            ..Default::default()
        };
        assert!(matches!(
            Snapshot::from_observations(vec![o]),
            Err(TrackerError::MalformedObject { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_id_is_malformed() {
        let o = Observation::new("", (50., 10.));
        assert!(matches!(
            Snapshot::from_observations(vec![o]),
            Err(TrackerError::MalformedObject { .. })
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let observations = vec![
            Observation::new("A", (50., 10.)),
            Observation::new("A", (50.2, 10.)),
        ];
        assert!(matches!(
            Snapshot::from_observations(observations),
            Err(TrackerError::DuplicateId(id)) if id == "A"
        ));
    }

    #[test]
    fn test_empty_tick_is_a_valid_snapshot() {
        let snapshot = Snapshot::from_observations(Vec::new()).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_stored_snapshot_rejects_duplicate_ids() {
        let stored = r#"[
            {"id": "X", "latitude": 50.0, "longitude": 10.0, "heading_deg": 90.0, "display_heading": 90},
            {"id": "X", "latitude": 51.0, "longitude": 10.0, "heading_deg": 0.0, "display_heading": 0}
        ]"#;
        assert!(serde_json::from_str::<Snapshot>(stored).is_err());
    }

    #[test]
    fn test_stored_snapshot_requires_headings() {
        let stored = r#"[{"id": "X", "latitude": 50.0, "longitude": 10.0}]"#;
        assert!(serde_json::from_str::<Snapshot>(stored).is_err());

        let enriched = r#"[{"id": "X", "latitude": 50.0, "longitude": 10.0, "heading_deg": 120.0, "display_heading": 120}]"#;
        let snapshot = serde_json::from_str::<Snapshot>(enriched).unwrap();
        assert_eq!(snapshot.get("X").unwrap().heading_deg, Some(120.));
    }

    #[test]
    fn test_tracked_object_json_shape() {
        let mut o = TrackedObject::new("A", (50., 10.));
        o.attributes.insert(String::from("number"), json!("AF1234"));
        let value = serde_json::to_value(&o).unwrap();
        assert_eq!(
            value,
            json!({"id": "A", "latitude": 50.0, "longitude": 10.0, "number": "AF1234"})
        );
    }
}
