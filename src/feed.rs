use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::tracking::Observation;

/// One recorded poll of the flight feed, as a single NDJSON line.
/// `zone` is optional; the configured default zone applies when absent.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FeedTick {
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub flights: Vec<Observation>,
}

/// Parse a feed line. Blank lines yield `None`; a bare JSON array is
/// accepted as the flights of the default zone.
pub fn parse_feed_line(line: &str) -> Result<Option<FeedTick>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.starts_with('[') {
        let flights: Vec<Observation> = serde_json::from_str(trimmed)
            .map_err(|e| anyhow!("Failed to parse feed tick: {}", e))?;
        return Ok(Some(FeedTick {
            zone: None,
            flights,
        }));
    }
    serde_json::from_str::<FeedTick>(trimmed)
        .map(Some)
        .map_err(|e| anyhow!("Failed to parse feed tick: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tick_with_zone() {
        let tick = parse_feed_line(
            r#"{"zone": "europe", "flights": [{"id": "A", "latitude": 50.0, "longitude": 10.0, "number": "AF1"}]}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(tick.zone.as_deref(), Some("europe"));
        assert_eq!(tick.flights.len(), 1);
        assert_eq!(tick.flights[0].attributes["number"], "AF1");
    }

    #[test]
    fn test_parse_bare_array() {
        let tick = parse_feed_line(r#"[{"id": "A", "latitude": 50.0, "longitude": 10.0}]"#)
            .unwrap()
            .unwrap();
        assert!(tick.zone.is_none());
        assert_eq!(tick.flights.len(), 1);
    }

    #[test]
    fn test_blank_and_garbage_lines() {
        assert!(parse_feed_line("   ").unwrap().is_none());
        assert!(parse_feed_line("{oops").is_err());
    }

    #[test]
    fn test_entry_without_id_still_parses() {
        // Rejection happens in the tracker, where the whole tick fails
        let tick = parse_feed_line(r#"[{"latitude": 50.0, "longitude": 10.0}]"#)
            .unwrap()
            .unwrap();
        assert!(tick.flights[0].id.is_none());
    }
}
