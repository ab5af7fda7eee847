use std::collections::BTreeMap;

use assert_matches::assert_matches;
use camino::Utf8PathBuf;

use holocron::error::HolocronError;
use holocron::model::{Film, RecordMeta};
use holocron::store::Store;

fn temp_store(temp: &tempfile::TempDir) -> Store {
    let root = Utf8PathBuf::from_path_buf(temp.path().join("cache")).unwrap();
    Store::with_root(root)
}

#[test]
fn collection_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp_store(&temp);

    let films = vec![Film {
        title: "A New Hope".to_string(),
        episode_id: 4,
        characters: vec!["1".to_string(), "5".to_string()],
        meta: RecordMeta {
            created: "2014-12-10T14:23:31Z".to_string(),
            edited: "2015-04-11T09:46:52Z".to_string(),
            url: Some("https://swapi.co/api/films/1/".to_string()),
            ..RecordMeta::default()
        },
        ..Film::default()
    }];

    store.save("films", &films).unwrap();
    let loaded: Vec<Film> = store.load("films").unwrap().unwrap();
    assert_eq!(loaded, films);
}

#[test]
fn root_map_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp_store(&temp);

    let mut root = BTreeMap::new();
    root.insert(
        "films".to_string(),
        "https://swapi.co/api/films/".to_string(),
    );
    root.insert(
        "people".to_string(),
        "https://swapi.co/api/people/".to_string(),
    );

    store.save("root", &root).unwrap();
    let loaded: BTreeMap<String, String> = store.load("root").unwrap().unwrap();
    assert_eq!(loaded, root);
}

#[test]
fn missing_file_is_a_miss() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp_store(&temp);

    let loaded: Option<Vec<Film>> = store.load("films").unwrap();
    assert!(loaded.is_none());
}

#[test]
fn zero_byte_file_is_a_miss() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp_store(&temp);
    store.ensure_root().unwrap();
    std::fs::write(store.dataset_path("films").as_std_path(), b"").unwrap();

    let loaded: Option<Vec<Film>> = store.load("films").unwrap();
    assert!(loaded.is_none());
}

#[test]
fn corrupt_file_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp_store(&temp);
    store.ensure_root().unwrap();
    std::fs::write(store.dataset_path("films").as_std_path(), b"not json").unwrap();

    let err = store.load::<Vec<Film>>("films").unwrap_err();
    assert_matches!(err, HolocronError::CacheRead { .. });
}

#[test]
fn clear_removes_cache_root() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp_store(&temp);
    store.save("films", &Vec::<Film>::new()).unwrap();
    assert!(store.root().as_std_path().exists());

    store.clear().unwrap();
    assert!(!store.root().as_std_path().exists());

    // clearing an already absent cache is fine
    store.clear().unwrap();
}
