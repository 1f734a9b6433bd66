use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TrackerError},
    systems::heading::DisplayHeading,
};

/// Marker icon as consumed by the map widget
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IconResource {
    pub icon_url: String,
    pub icon_size: [u32; 2],
}

/// Pre-rotated plane icons, one per display heading, hosted under a common
/// base as `<base>/plane_<angle>.png`
#[derive(Debug, Clone)]
pub struct IconSet {
    base_url: String,
    url_suffix: String,
    size: [u32; 2],
}

impl IconSet {
    pub fn new(base_url: &str, url_suffix: &str, size: [u32; 2]) -> Self {
        IconSet {
            base_url: String::from(base_url.trim_end_matches('/')),
            url_suffix: String::from(url_suffix),
            size,
        }
    }

    /// Resolve the icon for a quantized angle. Anything other than
    /// 0, 15, ..., 345 is an `InvalidQuantizedAngle` error.
    pub fn icon_for(&self, angle: i64) -> Result<IconResource> {
        let heading = u16::try_from(angle)
            .map_err(|_| TrackerError::InvalidQuantizedAngle(angle))
            .and_then(DisplayHeading::try_from)?;
        Ok(self.icon_for_heading(heading))
    }

    pub fn icon_for_heading(&self, heading: DisplayHeading) -> IconResource {
        IconResource {
            icon_url: format!(
                "{}/plane_{}.png{}",
                self.base_url,
                heading.degrees(),
                self.url_suffix
            ),
            icon_size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icons() -> IconSet {
        IconSet::new("https://example.org/img/", "", [38, 38])
    }

    #[test]
    fn test_icon_for_valid_angle() {
        let icon = icons().icon_for(15).unwrap();
        assert_eq!(icon.icon_url, "https://example.org/img/plane_15.png");
        assert_eq!(icon.icon_size, [38, 38]);
    }

    #[test]
    fn test_icon_for_invalid_angles() {
        for angle in [17, 360, -15, 7, 1000] {
            assert!(matches!(
                icons().icon_for(angle),
                Err(TrackerError::InvalidQuantizedAngle(a)) if a == angle
            ));
        }
    }

    #[test]
    fn test_every_heading_has_its_own_icon() {
        let set = IconSet::new("https://example.org/img", "?raw=true", [38, 38]);
        let urls: Vec<String> = DisplayHeading::all()
            .map(|h| set.icon_for_heading(h).icon_url)
            .collect();
        assert_eq!(urls.len(), 24);
        assert_eq!(urls[0], "https://example.org/img/plane_0.png?raw=true");
        assert_eq!(urls[23], "https://example.org/img/plane_345.png?raw=true");
    }

    #[test]
    fn test_icon_wire_shape() {
        let icon = icons().icon_for(90).unwrap();
        assert_eq!(
            serde_json::to_value(&icon).unwrap(),
            serde_json::json!({"iconUrl": "https://example.org/img/plane_90.png", "iconSize": [38, 38]})
        );
    }
}
