use std::time::Duration;

use engine::{Behaviour, HeadlessRunner};
use glam::Vec2;

use teahouse::commands::Command;
use teahouse::demo::{
    DEMO_SCRIPT, HONEY_HOME, KETTLE_HOME, LEAVES_HOME, POT_POSITION, SPOON_HOME, tea_making,
};
use teahouse::draggable::DragState;
use teahouse::drop_zone::DropVerdict;
use teahouse::script::{ScriptStep, parse_script};
use teahouse::services::ServiceLog;
use teahouse::settings::PlayerSettings;
use teahouse::state::{GameInput, GameState};

fn runner(services: &ServiceLog) -> HeadlessRunner<GameState> {
    HeadlessRunner::new(tea_making(&PlayerSettings::default(), services))
}

fn drag(runner: &mut HeadlessRunner<GameState>, from: Vec2, to: Vec2) {
    runner.step(GameInput::PointerDown(from));
    runner.step(GameInput::PointerMove(to));
    runner.step(GameInput::PointerUp(to));
}

#[test]
fn pointer_input_drags_the_item_under_the_pointer() {
    let services = ServiceLog::new();
    let mut runner = runner(&services);
    let pot = POT_POSITION.truncate();

    runner.step(GameInput::PointerDown(LEAVES_HOME.truncate()));
    assert_eq!(
        runner.behaviour().dragged_item().map(|item| item.name()),
        Some("tea_leaves")
    );
    runner.step(GameInput::PointerMove(pot));
    runner.step(GameInput::PointerUp(pot));

    let leaves = runner.behaviour().item("tea_leaves").expect("leaves");
    assert!(leaves.is_locked());
    assert_eq!(runner.behaviour().stage().graph.world_position(leaves.node()), POT_POSITION);
    assert!(runner.behaviour().dragged_item().is_none());
}

#[test]
fn pointer_up_reports_the_drop_verdict() {
    let services = ServiceLog::new();
    let mut state = tea_making(&PlayerSettings::default(), &services);
    state.init();

    state.pointer_down(HONEY_HOME.truncate());
    state.pointer_move(Vec2::new(650.0, 200.0));
    assert!(matches!(
        state.pointer_up(Vec2::new(650.0, 200.0)),
        Some(DropVerdict::Accepted { .. })
    ));
    assert_eq!(state.pointer_up(Vec2::ZERO), None, "no drag in progress");
}

#[test]
fn a_second_press_ends_the_unreleased_drag() {
    let services = ServiceLog::new();
    let mut runner = runner(&services);

    runner.step(GameInput::PointerDown(LEAVES_HOME.truncate()));
    runner.step(GameInput::PointerMove(Vec2::new(200.0, 100.0)));
    runner.step(GameInput::PointerDown(KETTLE_HOME.truncate()));
    assert_eq!(
        runner.behaviour().dragged_item().map(|item| item.name()),
        Some("hot_water")
    );
    runner.step(GameInput::PointerUp(KETTLE_HOME.truncate()));
    runner.run_for(Duration::from_secs(2));

    let state = runner.behaviour();
    let leaves = state.item("tea_leaves").expect("leaves");
    assert_eq!(*leaves.state(), DragState::Free);
    assert!(leaves.canvas().is_at_rest());
    assert!(leaves.receives_pointer());
    assert_eq!(state.stage().graph.world_position(leaves.node()), LEAVES_HOME);
}

#[test]
fn clicks_off_the_items_reach_the_spoon() {
    let services = ServiceLog::new();
    let mut runner = runner(&services);
    runner.step(GameInput::PointerDown(SPOON_HOME.truncate()));
    assert!(runner.behaviour().spoon().expect("spoon").is_stirring());
    assert!(runner.behaviour().dragged_item().is_none());
}

#[test]
fn hot_water_lands_on_the_infuser_the_leaves_became() {
    let services = ServiceLog::new();
    let mut runner = runner(&services);
    let pot = POT_POSITION.truncate();

    drag(&mut runner, LEAVES_HOME.truncate(), pot);
    runner.run_for(Duration::from_millis(1100));
    let leaves = runner.behaviour().item("tea_leaves").expect("leaves");
    assert!(matches!(leaves.state(), DragState::StuckToTarget { .. }));
    assert!(!leaves.receives_pointer());

    drag(&mut runner, KETTLE_HOME.truncate(), pot);
    let kettle = runner.behaviour().item("hot_water").expect("kettle");
    assert!(kettle.is_locked(), "infuser zone accepted the water");

    runner.run_for(Duration::from_millis(1300));
    let kettle = runner.behaviour().item("hot_water").expect("kettle");
    assert_eq!(*kettle.state(), DragState::Free);
    assert_eq!(
        runner.behaviour().stage().graph.world_position(kettle.node()),
        KETTLE_HOME
    );
}

#[test]
fn become_draggable_command_targets_items_by_name() {
    let services = ServiceLog::new();
    let mut runner = runner(&services);
    drag(&mut runner, LEAVES_HOME.truncate(), POT_POSITION.truncate());
    runner.run_for(Duration::from_millis(1100));

    runner.step(Command::BecomeDraggable("no_such_item".into()).into());
    runner.step(Command::BecomeDraggable("tea_leaves".into()).into());

    let leaves = runner.behaviour().item("tea_leaves").expect("leaves");
    assert_eq!(*leaves.state(), DragState::Free);
    assert_eq!(leaves.anchor(), POT_POSITION);
}

#[test]
fn character_commands_need_a_bound_portrait() {
    let services = ServiceLog::new();
    let mut runner = runner(&services);

    runner.step(Command::SetCharacterVisible(true).into());
    assert!(!runner.behaviour().director().portrait().is_fading());

    runner.step(GameInput::SceneLoaded("Customer_Handoff".into()));
    runner.step(Command::SetCharacter("Aneela".into()).into());
    runner.step(Command::SetCharacterVisible(true).into());
    runner.run_for(Duration::from_millis(600));

    let portrait = runner.behaviour().director().portrait();
    assert_eq!(portrait.sprite(), Some("Characters/Aneela"));
    assert_eq!(portrait.alpha(), 1.0);
    let node = portrait.node().expect("bound");
    assert!(runner.behaviour().stage().graph.is_active(node));
}

#[test]
fn music_commands_use_configured_fades() {
    let services = ServiceLog::new();
    let mut runner = runner(&services);
    runner.step(GameInput::SceneLoaded("Story".into()));
    runner.run_for(Duration::from_secs(1));
    assert_eq!(runner.behaviour().director().music().source().volume(), 0.5);

    runner.step(Command::FadeOutMusic(None).into());
    runner.run_for(Duration::from_millis(900));
    assert!(runner.behaviour().director().music().is_playing(), "two second fade");
    runner.run_for(Duration::from_millis(1200));
    assert!(!runner.behaviour().director().music().is_playing());

    runner.step(Command::StartMusic.into());
    assert!(runner.behaviour().director().music().is_playing());
    runner.step(Command::SetMusicVolume(0.9).into());
    assert_eq!(runner.behaviour().director().music().volume(), 0.9);

    runner.step(Command::StopMusic.into());
    runner.run_for(Duration::from_millis(1100));
    assert!(!runner.behaviour().director().music().is_playing());
}

#[test]
fn demo_script_plays_out_the_whole_table() {
    let services = ServiceLog::new();
    let mut runner = runner(&services);
    for step in parse_script(DEMO_SCRIPT).expect("demo script parses") {
        match step {
            ScriptStep::Input(input) => {
                runner.step(input);
            }
            ScriptStep::Wait(duration) => {
                runner.run_for(duration);
            }
        }
    }

    let state = runner.behaviour();
    let leaves = state.item("tea_leaves").expect("leaves");
    assert_eq!(*leaves.state(), DragState::Free);
    assert_eq!(leaves.anchor(), POT_POSITION);

    let graph = &state.stage().graph;
    let kettle = state.item("hot_water").expect("kettle");
    assert_eq!(graph.world_position(kettle.node()), KETTLE_HOME);
    let honey = state.item("honey").expect("honey");
    assert_eq!(graph.world_position(honey.node()), HONEY_HOME);

    let spoon = state.spoon().expect("spoon");
    assert!(spoon.has_been_used());
    assert!(!spoon.is_stirring());
    assert_eq!(services.instruction_steps(), 1);
    assert_eq!(state.director().expected_recipe(), Some("Jasmine Green"));
    assert!(state.director().music().is_playing());
}

#[test]
fn finishing_disposes_and_freezes_the_table() {
    let services = ServiceLog::new();
    let mut runner = runner(&services);
    drag(&mut runner, LEAVES_HOME.truncate(), POT_POSITION.truncate());
    let mut state = runner.finish();

    assert!(state.is_disposed());
    let leaves = state.item("tea_leaves").expect("leaves");
    assert!(leaves.is_disposed());
    assert_eq!(*leaves.state(), DragState::Free);

    state.handle(GameInput::PointerDown(HONEY_HOME.truncate()));
    assert!(state.dragged_item().is_none());
}
