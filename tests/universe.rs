use assert_matches::assert_matches;
use camino::Utf8PathBuf;
use serde_json::Value;

use holocron::error::HolocronError;
use holocron::model::{Film, RecordMeta};
use holocron::universe::{Universe, write_export};

fn film(url: &str, title: &str) -> Film {
    Film {
        title: title.to_string(),
        episode_id: 4,
        characters: vec!["1".to_string(), "5".to_string()],
        planets: vec!["1".to_string()],
        meta: RecordMeta {
            created: "2014-12-10T14:23:31Z".to_string(),
            edited: "2015-04-11T09:46:52Z".to_string(),
            url: Some(url.to_string()),
            ..RecordMeta::default()
        },
        ..Film::default()
    }
}

#[test]
fn export_keys_records_by_short_identifier() {
    let universe = Universe {
        films: vec![film("https://swapi.co/api/films/1/", "A New Hope")],
        ..Universe::default()
    };

    let export = universe.into_export().unwrap();
    assert_eq!(export.films.len(), 1);
    let exported = export.films.get("1").unwrap();
    assert_eq!(exported.meta.id, "1");
    assert_eq!(exported.meta.url, None);

    let value = serde_json::to_value(&export).unwrap();
    let film_value = &value["films"]["1"];
    assert_eq!(film_value["id"], "1");
    assert!(film_value.get("url").is_none());
    assert_eq!(film_value["characters"], serde_json::json!(["1", "5"]));
}

#[test]
fn later_duplicate_identifier_overwrites_earlier() {
    let universe = Universe {
        films: vec![
            film("https://swapi.co/api/films/1/", "first"),
            film("https://swapi.co/api/films/1/", "second"),
        ],
        ..Universe::default()
    };

    let export = universe.into_export().unwrap();
    assert_eq!(export.films.len(), 1);
    assert_eq!(export.films.get("1").unwrap().title, "second");
}

#[test]
fn record_without_source_url_is_an_error() {
    let mut bad = film("https://swapi.co/api/films/1/", "A New Hope");
    bad.meta.url = None;
    let universe = Universe {
        films: vec![bad],
        ..Universe::default()
    };

    assert_matches!(
        universe.into_export().unwrap_err(),
        HolocronError::MissingSourceUrl
    );
}

#[test]
fn export_file_is_two_space_indented_json() {
    let temp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(temp.path().join("swapi.json")).unwrap();

    let universe = Universe {
        films: vec![film("https://swapi.co/api/films/1/", "A New Hope")],
        ..Universe::default()
    };
    write_export(&path, &universe.into_export().unwrap()).unwrap();

    let content = std::fs::read_to_string(path.as_std_path()).unwrap();
    assert!(content.starts_with("{\n  \"films\""));
    assert!(content.ends_with('\n'));

    let value: Value = serde_json::from_str(&content).unwrap();
    for kind in ["films", "people", "planets", "species", "starships", "vehicles"] {
        assert!(value.get(kind).is_some());
    }
}
