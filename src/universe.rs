use std::collections::BTreeMap;

use camino::Utf8Path;
use serde::Serialize;

use crate::domain::resource_id;
use crate::error::HolocronError;
use crate::model::{Film, Person, Planet, Record, Species, Starship, Vehicle};
use crate::store::write_bytes_atomic;

/// The six collections as fetched, in page order, with raw source URLs intact.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    pub films: Vec<Film>,
    pub people: Vec<Person>,
    pub planets: Vec<Planet>,
    pub species: Vec<Species>,
    pub starships: Vec<Starship>,
    pub vehicles: Vec<Vehicle>,
}

/// The unified output shape: entity kind to identifier to record.
#[derive(Debug, Default, Serialize)]
pub struct UniverseExport {
    pub films: BTreeMap<String, Film>,
    pub people: BTreeMap<String, Person>,
    pub planets: BTreeMap<String, Planet>,
    pub species: BTreeMap<String, Species>,
    pub starships: BTreeMap<String, Starship>,
    pub vehicles: BTreeMap<String, Vehicle>,
}

impl Universe {
    /// Rewrites every record to its export form: identifier derived from the
    /// source URL, source URL dropped, keyed by identifier. Duplicate
    /// identifiers are not rejected; the later record wins.
    pub fn into_export(self) -> Result<UniverseExport, HolocronError> {
        Ok(UniverseExport {
            films: keyed(self.films)?,
            people: keyed(self.people)?,
            planets: keyed(self.planets)?,
            species: keyed(self.species)?,
            starships: keyed(self.starships)?,
            vehicles: keyed(self.vehicles)?,
        })
    }
}

fn keyed<T: Record>(records: Vec<T>) -> Result<BTreeMap<String, T>, HolocronError> {
    let mut map = BTreeMap::new();
    for mut record in records {
        let meta = record.meta_mut();
        let url = meta.url.take().ok_or(HolocronError::MissingSourceUrl)?;
        let id = resource_id(&url)?;
        meta.id = id.clone();
        map.insert(id, record);
    }
    Ok(map)
}

/// Writes the export as pretty-printed JSON (two-space indent), atomically.
pub fn write_export(path: &Utf8Path, export: &UniverseExport) -> Result<(), HolocronError> {
    let mut content =
        serde_json::to_vec_pretty(export).map_err(|err| HolocronError::Filesystem(err.to_string()))?;
    content.push(b'\n');
    write_bytes_atomic(path, &content).map_err(|err| HolocronError::Filesystem(err.to_string()))
}
