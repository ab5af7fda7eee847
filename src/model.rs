use serde::{Deserialize, Serialize};

use crate::domain::resource_id;
use crate::error::HolocronError;

/// Bookkeeping block shared by every record. After a fetch `url` holds the raw
/// API URL and `id` is empty; the export transform moves the short identifier
/// into `id` and drops `url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub created: String,
    pub edited: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Access to the bookkeeping block and the cross-reference fields of a record,
/// so normalization and the export transform apply generically to all six kinds.
pub trait Record {
    fn meta_mut(&mut self) -> &mut RecordMeta;
    fn cross_refs_mut(&mut self) -> Vec<&mut Vec<String>>;
}

/// Rewrites every cross-reference URL on the record to its short identifier.
pub fn normalize_refs<T: Record>(record: &mut T) -> Result<(), HolocronError> {
    for refs in record.cross_refs_mut() {
        for target in refs.iter_mut() {
            *target = resource_id(target)?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub episode_id: i64,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub planets: Vec<String>,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl Record for Film {
    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn cross_refs_mut(&mut self) -> Vec<&mut Vec<String>> {
        vec![
            &mut self.species,
            &mut self.starships,
            &mut self.vehicles,
            &mut self.characters,
            &mut self.planets,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub homeworld: String,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl Record for Person {
    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn cross_refs_mut(&mut self) -> Vec<&mut Vec<String>> {
        vec![
            &mut self.films,
            &mut self.species,
            &mut self.vehicles,
            &mut self.starships,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub diameter: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub gravity: String,
    pub population: String,
    pub climate: String,
    pub terrain: String,
    pub surface_water: String,
    #[serde(default)]
    pub residents: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl Record for Planet {
    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn cross_refs_mut(&mut self) -> Vec<&mut Vec<String>> {
        vec![&mut self.residents, &mut self.films]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub classification: String,
    pub designation: String,
    pub average_height: String,
    pub average_lifespan: String,
    pub eye_colors: String,
    pub hair_colors: String,
    pub skin_colors: String,
    pub language: String,
    // null on the wire for species without a homeworld
    pub homeworld: Option<String>,
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl Record for Species {
    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn cross_refs_mut(&mut self) -> Vec<&mut Vec<String>> {
        vec![&mut self.people, &mut self.films]
    }
}

/// Field block shared by starships and vehicles, flattened beneath the
/// kind-specific fields on the wire and in the export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    pub cargo_capacity: String,
    pub consumables: String,
    pub cost_in_credits: String,
    pub crew: String,
    #[serde(default)]
    pub films: Vec<String>,
    pub length: String,
    pub manufacturer: String,
    pub max_atmosphering_speed: String,
    pub model: String,
    pub name: String,
    pub passengers: String,
    #[serde(default)]
    pub pilots: Vec<String>,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Starship {
    #[serde(flatten)]
    pub transport: Transport,
    #[serde(rename = "MGLT")]
    pub mglt: String,
    pub hyperdrive_rating: String,
    pub starship_class: String,
}

impl Record for Starship {
    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.transport.meta
    }

    fn cross_refs_mut(&mut self) -> Vec<&mut Vec<String>> {
        vec![&mut self.transport.films, &mut self.transport.pilots]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(flatten)]
    pub transport: Transport,
    pub vehicle_class: String,
}

impl Record for Vehicle {
    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.transport.meta
    }

    fn cross_refs_mut(&mut self) -> Vec<&mut Vec<String>> {
        vec![&mut self.transport.films, &mut self.transport.pilots]
    }
}
