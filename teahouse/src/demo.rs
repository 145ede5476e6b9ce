//! The tea-making table used by the headless binary and the session tests.

use glam::{Vec2, Vec3};

use crate::animation::AnimatorLog;
use crate::character::CharacterPortrait;
use crate::director::{CHARACTER_NODE, EVENT_SYSTEM_NODE, SceneDirector};
use crate::draggable::{Draggable, DraggableConfig};
use crate::drop_zone::DropZone;
use crate::music::MusicDirector;
use crate::services::{ServiceLog, StaticSpriteCatalog};
use crate::settings::PlayerSettings;
use crate::spoon_stir::SpoonStir;
use crate::stage::Stage;
use crate::state::GameState;

pub const LEAVES_HOME: Vec3 = Vec3::new(100.0, 100.0, 0.0);
pub const KETTLE_HOME: Vec3 = Vec3::new(100.0, 300.0, 0.0);
pub const HONEY_HOME: Vec3 = Vec3::new(100.0, 500.0, 0.0);
pub const POT_POSITION: Vec3 = Vec3::new(400.0, 200.0, 0.0);
pub const CUP_POSITION: Vec3 = Vec3::new(650.0, 200.0, 0.0);
pub const SPOON_HOME: Vec3 = Vec3::new(400.0, 450.0, 0.0);

/// Leaves into the pot (they stick and become the infuser), hot water onto the infuser, honey
/// somewhere wrong, then a stir.
pub const DEMO_SCRIPT: &str = "\
scene Tea_making
SetExpectedRecipe \"Jasmine Green\"
down 100 100
move 250 150
move 400 200
up 400 200
wait 1.2
down 100 300
move 400 200
up 400 200
wait 1.5
down 100 500
move 300 500
up 300 500
wait 0.5
down 400 450
wait 4
BecomeDraggable tea_leaves
";

/// Builds the tea-making scene, wiring every collaborator to `services`.
pub fn tea_making(settings: &PlayerSettings, services: &ServiceLog) -> GameState {
    let mut stage = Stage::new();
    let graph = &mut stage.graph;

    let canvas = graph.spawn("Canvas", None, Vec3::ZERO);
    graph.spawn(EVENT_SYSTEM_NODE, None, Vec3::ZERO);
    graph.spawn(EVENT_SYSTEM_NODE, None, Vec3::ZERO);
    let character = graph.spawn(CHARACTER_NODE, None, Vec3::new(650.0, 450.0, 0.0));
    graph.set_active(character, false);

    let pot = graph.spawn("Pot (idle)", Some(canvas), POT_POSITION);
    let cup = graph.spawn("Cup", Some(canvas), CUP_POSITION);
    let leaves = graph.spawn("tea_leaves", Some(canvas), LEAVES_HOME);
    let infuser = graph.spawn("infuser", Some(leaves), Vec3::ZERO);
    let kettle = graph.spawn("hot_water", Some(canvas), KETTLE_HOME);
    let honey = graph.spawn("honey", Some(canvas), HONEY_HOME);
    let spoon = graph.spawn("spoon", None, SPOON_HOME);

    stage
        .zones
        .add(DropZone::new("pot", pot, Vec2::new(120.0, 120.0)).with_accepts(["tea_leaves"]));
    stage
        .zones
        .add(DropZone::new("cup", cup, Vec2::new(100.0, 100.0)).with_accepts(["honey"]));
    let infuser_zone = stage
        .zones
        .add(DropZone::new("infuser", infuser, Vec2::new(80.0, 80.0)).with_accepts(["hot_water"]));

    let drag = &settings.drag;
    let leaves_item = Draggable::new(
        DraggableConfig::from_settings("tea_leaves", drag)
            .sticky(true)
            .becomes_drop_zone_on_stick(true),
        leaves,
    )
    .with_companion(infuser_zone)
    .with_animator(Box::new(AnimatorLog::new()));
    let kettle_item = Draggable::new(DraggableConfig::from_settings("hot_water", drag), kettle)
        .with_animator(Box::new(AnimatorLog::new()));
    let honey_item = Draggable::new(DraggableConfig::from_settings("honey", drag).sticky(true), honey);

    let spoon = SpoonStir::new(spoon, settings.stir.clone())
        .with_pot(pot)
        .with_sorting_order(2)
        .with_sfx(Box::new(services.clone()), settings.audio.effective_sfx_gain())
        .with_instructions(Box::new(services.clone()));

    let director = SceneDirector::new(
        MusicDirector::new(settings.music.clone(), &settings.audio),
        CharacterPortrait::new(
            Box::new(StaticSpriteCatalog::new(["Characters/Aneela", "Characters/Customer"])),
            settings.character.fade_duration,
        ),
        Box::new(services.clone()),
    )
    .with_dialogue_runner(Box::new(services.clone()));

    GameState::new(stage, director)
        .with_item(leaves_item)
        .with_item(kettle_item)
        .with_item(honey_item)
        .with_spoon(spoon)
}
