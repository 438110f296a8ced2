//! Owned apps survive restarts through the JSON file store.

use std::fs;

use katphone_config::KatConfig;
use katphone_engine::{OWNED_APPS_KEY, PurchaseOutcome};
use katphone_store::{JsonFileStore, KeyValueStore};
use katphone_types::AppId;
use tempfile::tempdir;

use crate::common::{ascii, at, phone_with};

fn file_store(path: &std::path::Path) -> Box<JsonFileStore> {
    Box::new(JsonFileStore::new(path).without_sync())
}

#[test]
fn purchases_round_trip_through_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("store.json");
    let now = at(2026, 10, 19, 9, 30);

    {
        let mut p = phone_with(file_store(&path), ascii(), now);
        assert_eq!(
            p.app.purchase(AppId::Catflix),
            PurchaseOutcome::Installed { persisted: true }
        );
        p.app.purchase(AppId::Roblox);
    }

    let raw = JsonFileStore::new(&path)
        .get(OWNED_APPS_KEY)
        .expect("read")
        .expect("key present");
    assert_eq!(raw, r#"["Catflix","Roblox"]"#);

    let p = phone_with(file_store(&path), ascii(), now);
    assert!(p.app.is_owned(AppId::Catflix));
    assert!(p.app.is_owned(AppId::Roblox));
    assert!(!p.app.is_owned(AppId::Spotify));
    assert_eq!(p.app.home_apps().len(), 8);
}

#[test]
fn corrupt_store_falls_back_to_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("store.json");
    fs::write(&path, "{ not json").expect("write");

    let mut p = phone_with(file_store(&path), ascii(), at(2026, 1, 2, 8, 0));
    assert_eq!(p.app.home_apps().len(), 6);

    // The next purchase replaces the unreadable file.
    assert_eq!(
        p.app.purchase(AppId::Discord),
        PurchaseOutcome::Installed { persisted: true }
    );
    let p = phone_with(file_store(&path), ascii(), at(2026, 1, 2, 8, 0));
    assert!(p.app.is_owned(AppId::Discord));
}

#[test]
fn legacy_full_list_and_unknown_names_are_tolerated() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("store.json");
    let mut store = JsonFileStore::new(&path).without_sync();
    store
        .set(
            OWNED_APPS_KEY,
            r#"["Messages","KatStore","Cat Catcher","Settings","YouTube","Maps","Spotify","Netflix","Spotify"]"#,
        )
        .expect("seed");

    let p = phone_with(Box::new(store), ascii(), at(2026, 3, 3, 12, 0));
    assert!(p.app.is_owned(AppId::Spotify));
    assert_eq!(p.app.home_apps().len(), 7);
    assert!(!p.app.available_for_purchase().contains(&AppId::Spotify));
}

#[test]
fn configured_data_dir_locates_store() {
    let dir = tempdir().expect("tempdir");
    let config = KatConfig::parse(&format!(
        "[app]\ndata_dir = \"{}\"\n",
        dir.path().display().to_string().replace('\\', "/")
    ))
    .expect("config parses");
    let data_dir = config.data_dir().expect("data dir");
    let path = data_dir.join("store.json");

    let mut p = phone_with(file_store(&path), ascii(), at(2026, 10, 19, 12, 0));
    p.app.purchase(AppId::Instants);
    assert!(path.exists());
}
