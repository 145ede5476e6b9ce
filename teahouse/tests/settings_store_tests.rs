use std::{
    fs,
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use teahouse::settings::{PlayerSettings, SettingsStore};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("teahouse_settings_{tag}_{nanos}"))
}

#[test]
fn saved_settings_load_back() {
    let dir = unique_temp_dir("round_trip");
    let store = SettingsStore::at(dir.join("nested").join("settings.json"));

    let mut settings = PlayerSettings::default();
    settings.audio.music_volume = 0.2;
    settings.drag.drop_success_duration = Duration::from_millis(750);
    settings.music.silent_scenes.push("Credits".into());
    store.save(&settings).expect("settings save");

    assert_eq!(store.load(), settings);
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn missing_or_corrupt_files_fall_back_to_defaults() {
    let dir = unique_temp_dir("fallback");
    let store = SettingsStore::at(dir.join("settings.json"));
    assert_eq!(store.load(), PlayerSettings::default());

    fs::create_dir_all(&dir).expect("temp dir");
    fs::write(store.path(), "{ not json").expect("write corrupt file");
    assert_eq!(store.load(), PlayerSettings::default());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn loaded_settings_are_sanitized() {
    let dir = unique_temp_dir("sanitize");
    let store = SettingsStore::at(dir.join("settings.json"));
    fs::create_dir_all(&dir).expect("temp dir");
    fs::write(
        store.path(),
        r#"{"version":7,"audio":{"music_volume":4.0},"drag":{"drag_alpha":-1.0}}"#,
    )
    .expect("write settings");

    let loaded = store.load();
    assert_eq!(loaded.version, 1);
    assert_eq!(loaded.audio.music_volume, 1.0);
    assert_eq!(loaded.drag.drag_alpha, 0.0);
    assert!(loaded.audio.music_enabled);
    let _ = fs::remove_dir_all(dir);
}
