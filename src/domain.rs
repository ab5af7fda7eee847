use std::fmt;

use serde::Serialize;

use crate::error::HolocronError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Films,
    People,
    Planets,
    Species,
    Starships,
    Vehicles,
}

impl EntityKind {
    // fetch order is fixed; partial runs resume from the first uncached kind
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Films,
        EntityKind::People,
        EntityKind::Planets,
        EntityKind::Species,
        EntityKind::Starships,
        EntityKind::Vehicles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Films => "films",
            EntityKind::People => "people",
            EntityKind::Planets => "planets",
            EntityKind::Species => "species",
            EntityKind::Starships => "starships",
            EntityKind::Vehicles => "vehicles",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derives the short identifier from a resource URL: the last non-empty path
/// segment before the mandatory trailing slash. A URL without a trailing slash
/// is rejected rather than silently truncated.
pub fn resource_id(url: &str) -> Result<String, HolocronError> {
    let trimmed = url
        .strip_suffix('/')
        .ok_or_else(|| HolocronError::InvalidResourceUrl(url.to_string()))?;
    let segment = trimmed.rsplit('/').next().unwrap_or_default();
    if segment.is_empty() {
        return Err(HolocronError::InvalidResourceUrl(url.to_string()));
    }
    Ok(segment.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn resource_id_extracts_last_segment() {
        assert_eq!(
            resource_id("https://swapi.co/api/people/1/").unwrap(),
            "1"
        );
        assert_eq!(
            resource_id("https://swapi.co/api/starships/12/").unwrap(),
            "12"
        );
    }

    #[test]
    fn resource_id_rejects_missing_trailing_slash() {
        let err = resource_id("https://swapi.co/api/people/1").unwrap_err();
        assert_matches!(err, HolocronError::InvalidResourceUrl(_));
    }

    #[test]
    fn resource_id_rejects_empty_segment() {
        assert_matches!(
            resource_id("/").unwrap_err(),
            HolocronError::InvalidResourceUrl(_)
        );
        assert_matches!(
            resource_id("https://swapi.co//").unwrap_err(),
            HolocronError::InvalidResourceUrl(_)
        );
        assert_matches!(
            resource_id("").unwrap_err(),
            HolocronError::InvalidResourceUrl(_)
        );
    }

    #[test]
    fn kind_names_match_api_collections() {
        let names: Vec<&str> = EntityKind::ALL.iter().map(|kind| kind.as_str()).collect();
        assert_eq!(
            names,
            ["films", "people", "planets", "species", "starships", "vehicles"]
        );
    }
}
