use camino::Utf8Path;
use serde::Serialize;

use crate::domain::EntityKind;
use crate::error::HolocronError;
use crate::fetch::{ApiClient, FetchSource, fetch_collection, fetch_root};
use crate::model::{Film, Person, Planet, Species, Starship, Vehicle};
use crate::store::Store;
use crate::universe::{Universe, write_export};

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub items: Vec<CollectionSummary>,
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionSummary {
    pub kind: EntityKind,
    pub records: usize,
    pub source: FetchSource,
}

pub struct App<C: ApiClient> {
    client: C,
    store: Store,
}

impl<C: ApiClient> App<C> {
    pub fn new(client: C, store: Store) -> Self {
        Self { client, store }
    }

    /// Runs the full pipeline: root map, one cache-or-fetch cycle per entity
    /// kind in fixed order, then the keyed export. The first failure aborts the
    /// run; collections already fetched stay cached, so a rerun resumes where
    /// this one stopped.
    pub fn run(&self, api_root: &str, output: &Utf8Path) -> Result<RunSummary, HolocronError> {
        self.store.ensure_root()?;

        let (root, _) = fetch_root(&self.client, &self.store, api_root)?;

        let mut universe = Universe::default();
        let mut items = Vec::new();
        for kind in EntityKind::ALL {
            let start = root.get(kind.as_str()).map(String::as_str).unwrap_or("");
            let (records, source) = match kind {
                EntityKind::Films => {
                    let (records, source) =
                        fetch_collection::<Film, _>(&self.client, &self.store, kind, start)?;
                    universe.films = records;
                    (universe.films.len(), source)
                }
                EntityKind::People => {
                    let (records, source) =
                        fetch_collection::<Person, _>(&self.client, &self.store, kind, start)?;
                    universe.people = records;
                    (universe.people.len(), source)
                }
                EntityKind::Planets => {
                    let (records, source) =
                        fetch_collection::<Planet, _>(&self.client, &self.store, kind, start)?;
                    universe.planets = records;
                    (universe.planets.len(), source)
                }
                EntityKind::Species => {
                    let (records, source) =
                        fetch_collection::<Species, _>(&self.client, &self.store, kind, start)?;
                    universe.species = records;
                    (universe.species.len(), source)
                }
                EntityKind::Starships => {
                    let (records, source) =
                        fetch_collection::<Starship, _>(&self.client, &self.store, kind, start)?;
                    universe.starships = records;
                    (universe.starships.len(), source)
                }
                EntityKind::Vehicles => {
                    let (records, source) =
                        fetch_collection::<Vehicle, _>(&self.client, &self.store, kind, start)?;
                    universe.vehicles = records;
                    (universe.vehicles.len(), source)
                }
            };
            items.push(CollectionSummary {
                kind,
                records,
                source,
            });
        }

        let export = universe.into_export()?;
        write_export(output, &export)?;
        tracing::info!(path = %output, "wrote export");

        Ok(RunSummary {
            items,
            output_path: output.to_string(),
        })
    }

    pub fn clear(&self) -> Result<(), HolocronError> {
        self.store.clear()
    }
}
