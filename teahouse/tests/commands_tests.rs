use std::time::Duration;

use teahouse::commands::{Command, CommandError};

#[test]
fn every_command_parses() {
    let cases = [
        ("<<TransToScene Story>>", Command::TransToScene("Story".into())),
        ("<<SetExpectedRecipe Oolong>>", Command::SetExpectedRecipe("Oolong".into())),
        (
            "<<QueueDialogueAfterScene Prequel>>",
            Command::QueueDialogueAfterScene("Prequel".into()),
        ),
        ("<<StopMusic>>", Command::StopMusic),
        ("<<StartMusic>>", Command::StartMusic),
        ("<<SetMusicVolume 0.25>>", Command::SetMusicVolume(0.25)),
        ("<<FadeOutMusic>>", Command::FadeOutMusic(None)),
        (
            "<<FadeOutMusic 1.5>>",
            Command::FadeOutMusic(Some(Duration::from_millis(1500))),
        ),
        ("<<FadeInMusic 3>>", Command::FadeInMusic(Some(Duration::from_secs(3)))),
        ("<<SetCharacterVisible true>>", Command::SetCharacterVisible(true)),
        ("<<SetCharacterVisible False>>", Command::SetCharacterVisible(false)),
        ("<<SetCharacter Aneela>>", Command::SetCharacter("Aneela".into())),
        ("<<BecomeDraggable tea_leaves>>", Command::BecomeDraggable("tea_leaves".into())),
    ];
    for (text, expected) in cases {
        assert_eq!(Command::parse(text), Ok(expected), "{text}");
    }
}

#[test]
fn names_round_trip_through_the_parser() {
    let command = Command::parse("FadeInMusic").expect("parses");
    assert_eq!(command.name(), "FadeInMusic");
    assert_eq!(command, Command::FadeInMusic(None));
}

#[test]
fn malformed_commands_are_typed_errors() {
    assert_eq!(Command::parse("   "), Err(CommandError::Empty));
    assert_eq!(Command::parse("<<>>"), Err(CommandError::Empty));
    assert_eq!(
        Command::parse("<<Jump 3>>"),
        Err(CommandError::Unknown("Jump".into()))
    );
    assert_eq!(
        Command::parse("<<TransToScene>>"),
        Err(CommandError::MissingArgument {
            command: "TransToScene",
            argument: "scene",
        })
    );
    assert_eq!(
        Command::parse("<<StopMusic now>>"),
        Err(CommandError::TooManyArguments {
            command: "StopMusic",
            max: 0,
        })
    );
    assert_eq!(
        Command::parse("<<SetMusicVolume loud>>"),
        Err(CommandError::InvalidNumber {
            command: "SetMusicVolume",
            value: "loud".into(),
        })
    );
    assert_eq!(
        Command::parse("<<FadeOutMusic -1>>"),
        Err(CommandError::InvalidNumber {
            command: "FadeOutMusic",
            value: "-1".into(),
        })
    );
    assert_eq!(
        Command::parse("<<SetCharacterVisible maybe>>"),
        Err(CommandError::InvalidBool {
            command: "SetCharacterVisible",
            value: "maybe".into(),
        })
    );
}

#[test]
fn errors_render_readable_messages() {
    let err = Command::parse("<<SetCharacter>>").expect_err("missing name");
    assert_eq!(err.to_string(), "`SetCharacter` is missing its name argument");
}
