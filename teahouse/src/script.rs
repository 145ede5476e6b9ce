//! Line-based session scripts for headless runs.
//!
//! ```text
//! # comment
//! scene Tea_making
//! down 120 80
//! move 400 200
//! up 400 200
//! wait 1.5
//! <<SetCharacterVisible true>>
//! ```

use std::time::Duration;

use glam::Vec2;
use thiserror::Error;

use crate::commands::{Command, CommandError};
use crate::state::GameInput;

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Input(GameInput),
    Wait(Duration),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Command {
        line: usize,
        #[source]
        source: CommandError,
    },
    #[error("line {line}: `{step}` expects {expected}")]
    BadArguments {
        line: usize,
        step: &'static str,
        expected: &'static str,
    },
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        steps.push(parse_line(line, trimmed)?);
    }
    Ok(steps)
}

fn parse_line(line: usize, text: &str) -> Result<ScriptStep, ScriptError> {
    let mut words = text.split_whitespace();
    let head = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();

    let step = match head {
        "down" => ScriptStep::Input(GameInput::PointerDown(point(line, "down", &rest)?)),
        "move" => ScriptStep::Input(GameInput::PointerMove(point(line, "move", &rest)?)),
        "up" => ScriptStep::Input(GameInput::PointerUp(point(line, "up", &rest)?)),
        "idle" => ScriptStep::Input(GameInput::Idle),
        "video_finished" => ScriptStep::Input(GameInput::VideoFinished),
        "scene" => match rest.as_slice() {
            [scene] => ScriptStep::Input(GameInput::SceneLoaded((*scene).to_string())),
            _ => {
                return Err(ScriptError::BadArguments {
                    line,
                    step: "scene",
                    expected: "a scene name",
                });
            }
        },
        "wait" => {
            let secs = match rest.as_slice() {
                [secs] => secs.parse::<f64>().ok(),
                _ => None,
            };
            match secs.and_then(|s| Duration::try_from_secs_f64(s).ok()) {
                Some(duration) => ScriptStep::Wait(duration),
                None => {
                    return Err(ScriptError::BadArguments {
                        line,
                        step: "wait",
                        expected: "a non-negative number of seconds",
                    });
                }
            }
        }
        _ => {
            let command =
                Command::parse(text).map_err(|source| ScriptError::Command { line, source })?;
            ScriptStep::Input(GameInput::Command(command))
        }
    };
    Ok(step)
}

fn point(line: usize, step: &'static str, args: &[&str]) -> Result<Vec2, ScriptError> {
    let bad = || ScriptError::BadArguments {
        line,
        step,
        expected: "two coordinates",
    };
    match args {
        [x, y] => {
            let x = x.parse::<f32>().map_err(|_| bad())?;
            let y = y.parse::<f32>().map_err(|_| bad())?;
            Ok(Vec2::new(x, y))
        }
        _ => Err(bad()),
    }
}
