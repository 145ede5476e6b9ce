use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use engine::HeadlessRunner;
use engine::regression::{
    TraceGolden, assert_or_update_golden_json, record_trace, sanitize_filename, update_goldens_enabled,
};
use glam::Vec2;

use teahouse::commands::Command;
use teahouse::demo::{KETTLE_HOME, LEAVES_HOME, POT_POSITION, tea_making};
use teahouse::services::ServiceLog;
use teahouse::settings::PlayerSettings;
use teahouse::state::{GameInput, GameState};

fn unique_temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("teahouse_session_trace_{nanos}"))
}

fn session_inputs() -> Vec<GameInput> {
    let pot = POT_POSITION.truncate();
    let mut inputs = vec![
        GameInput::SceneLoaded("Tea_making".into()),
        GameInput::PointerDown(LEAVES_HOME.truncate()),
        GameInput::PointerMove(Vec2::new(250.0, 150.0)),
        GameInput::PointerMove(pot),
        GameInput::PointerUp(pot),
    ];
    inputs.extend(std::iter::repeat_n(GameInput::Idle, 70));
    inputs.extend([
        GameInput::PointerDown(KETTLE_HOME.truncate()),
        GameInput::PointerMove(pot),
        GameInput::PointerUp(pot),
    ]);
    inputs.extend(std::iter::repeat_n(GameInput::Idle, 80));
    inputs.push(Command::BecomeDraggable("tea_leaves".into()).into());
    inputs
}

fn record() -> TraceGolden {
    let services = ServiceLog::new();
    let mut runner = HeadlessRunner::new(tea_making(&PlayerSettings::default(), &services));
    record_trace("tea_making_session", &mut runner, session_inputs(), GameState::snapshot)
        .expect("trace should record")
}

#[test]
fn sessions_replay_identically() {
    let a = record();
    let b = record();
    assert_eq!(a, b);
    assert_eq!(a.hashes.len(), session_inputs().len() + 1);
}

#[test]
fn session_golden_round_trip() {
    let out_dir = unique_temp_dir();
    let trace = record();
    let path = out_dir.join(format!("{}.json", sanitize_filename(&trace.name)));

    assert_or_update_golden_json(&path, &trace, update_goldens_enabled()).expect("first run writes golden");
    assert_or_update_golden_json(&path, &record(), false).expect("replay matches golden");

    let _ = fs::remove_dir_all(out_dir);
}

#[test]
fn frames_that_change_nothing_hash_the_same() {
    let trace = record();
    // The kettle is home well before the last idle frames.
    let settled = trace.hashes.len() - 2;
    assert_eq!(trace.hashes[settled], trace.hashes[settled - 1]);
}
