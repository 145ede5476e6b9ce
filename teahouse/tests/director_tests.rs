use std::time::Duration;

use glam::Vec3;

use teahouse::character::CharacterPortrait;
use teahouse::director::{CHARACTER_NODE, SceneDirector};
use teahouse::music::MusicDirector;
use teahouse::services::{ServiceLog, StaticSpriteCatalog};
use teahouse::settings::{AudioSettings, MusicSettings};
use teahouse::stage::Stage;

const FRAME: Duration = Duration::from_nanos(16_666_667);

fn director(log: &ServiceLog) -> SceneDirector {
    SceneDirector::new(
        MusicDirector::new(MusicSettings::default(), &AudioSettings::default()),
        CharacterPortrait::new(
            Box::new(StaticSpriteCatalog::new(["Characters/Aneela"])),
            Duration::from_millis(500),
        ),
        Box::new(log.clone()),
    )
    .with_dialogue_runner(Box::new(log.clone()))
}

fn stage_with_character() -> Stage {
    let mut stage = Stage::new();
    stage.graph.spawn(CHARACTER_NODE, None, Vec3::ZERO);
    stage
}

#[test]
fn minigame_without_queue_starts_prequel_one_frame_after_load() {
    let log = ServiceLog::new();
    let mut director = director(&log);
    let mut stage = Stage::new();

    director.on_scene_loaded(&mut stage, "Minigame");
    assert_eq!(director.queued_dialogue(), Some("Prequel"));
    assert!(director.is_dialogue_pending());

    director.tick(&mut stage, FRAME);
    assert!(log.dialogues().is_empty(), "scene objects get one frame to settle");

    director.tick(&mut stage, FRAME);
    assert_eq!(log.dialogues(), vec!["Prequel".to_string()]);
    assert_eq!(director.queued_dialogue(), None);
    assert!(!director.is_dialogue_pending());
}

#[test]
fn minigame_keeps_an_explicitly_queued_node() {
    let log = ServiceLog::new();
    let mut director = director(&log);
    let mut stage = Stage::new();

    director.queue_dialogue_after_scene("Tutorial");
    director.on_scene_loaded(&mut stage, "Minigame");
    assert_eq!(director.queued_dialogue(), Some("Tutorial"));
}

#[test]
fn story_forces_its_dialogue_only_with_a_character() {
    let log = ServiceLog::new();
    let mut director = director(&log);

    let mut bare = Stage::new();
    director.queue_dialogue_after_scene("Leftover");
    director.on_scene_loaded(&mut bare, "Story");
    assert_eq!(director.queued_dialogue(), Some("Leftover"));
    assert!(director.portrait().node().is_none());

    let mut stage = stage_with_character();
    director.on_scene_loaded(&mut stage, "Story");
    assert_eq!(director.queued_dialogue(), Some("AneelasFriend"));
    assert!(director.portrait().node().is_some());
}

#[test]
fn tea_making_clears_the_queue_and_starts_nothing() {
    let log = ServiceLog::new();
    let mut director = director(&log);
    let mut stage = Stage::new();

    director.queue_dialogue_after_scene("Prequel");
    director.on_scene_loaded(&mut stage, "Tea_making");
    assert_eq!(director.queued_dialogue(), None);

    director.tick(&mut stage, FRAME);
    director.tick(&mut stage, FRAME);
    assert!(log.dialogues().is_empty());
}

#[test]
fn customer_handoff_binds_the_character_and_keeps_the_queue() {
    let log = ServiceLog::new();
    let mut director = director(&log);
    let mut stage = stage_with_character();

    director.queue_dialogue_after_scene("Handoff");
    director.on_scene_loaded(&mut stage, "Customer_Handoff");
    assert!(director.portrait().node().is_some());
    assert_eq!(director.queued_dialogue(), Some("Handoff"));

    director.on_scene_loaded(&mut Stage::new(), "Customer_Handoff");
    assert!(director.portrait().node().is_none());
}

#[test]
fn other_scenes_keep_whatever_is_queued() {
    let log = ServiceLog::new();
    let mut director = director(&log);
    let mut stage = Stage::new();

    director.queue_dialogue_after_scene("Epilogue");
    director.on_scene_loaded(&mut stage, "Credits");
    director.tick(&mut stage, FRAME);
    director.tick(&mut stage, FRAME);
    assert_eq!(log.dialogues(), vec!["Epilogue".to_string()]);
}

#[test]
fn missing_runner_keeps_the_node_queued() {
    let log = ServiceLog::new();
    let mut director = director(&log);
    director.set_dialogue_runner(None);
    let mut stage = Stage::new();

    director.on_scene_loaded(&mut stage, "Minigame");
    director.tick(&mut stage, FRAME);
    director.tick(&mut stage, FRAME);
    assert!(log.dialogues().is_empty());
    assert_eq!(director.queued_dialogue(), Some("Prequel"));
    assert!(!director.is_dialogue_pending());
}

#[test]
fn video_finished_queues_prequel_and_heads_to_the_minigame() {
    let log = ServiceLog::new();
    let mut director = director(&log);

    director.on_video_finished();
    assert_eq!(director.queued_dialogue(), Some("Prequel"));
    assert_eq!(log.scene_requests(), vec!["Minigame".to_string()]);
}

#[test]
fn transitions_and_recipes_are_forwarded_and_recorded() {
    let log = ServiceLog::new();
    let mut director = director(&log);

    director.trans_to_scene("Story");
    director.set_expected_recipe("Jasmine Green");
    assert_eq!(log.scene_requests(), vec!["Story".to_string()]);
    assert_eq!(director.expected_recipe(), Some("Jasmine Green"));
}

#[test]
fn scene_loads_drive_the_music() {
    let log = ServiceLog::new();
    let mut director = director(&log);
    let mut stage = Stage::new();

    director.on_scene_loaded(&mut stage, "Story");
    assert!(director.music().is_playing());
    assert_eq!(director.scene(), Some("Story"));

    director.on_scene_loaded(&mut stage, "Menu");
    for _ in 0..61 {
        director.tick(&mut stage, FRAME);
    }
    assert!(!director.music().is_playing());
}
