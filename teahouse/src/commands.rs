//! Dialogue script commands, e.g. `<<FadeOutMusic 1.5>>`.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// A parsed dialogue command. Fades without an explicit duration use the configured command fade.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    TransToScene(String),
    SetExpectedRecipe(String),
    QueueDialogueAfterScene(String),
    StopMusic,
    StartMusic,
    SetMusicVolume(f32),
    FadeOutMusic(Option<Duration>),
    FadeInMusic(Option<Duration>),
    SetCharacterVisible(bool),
    SetCharacter(String),
    BecomeDraggable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` is missing its {argument} argument")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{command}` takes at most {max} argument(s)")]
    TooManyArguments { command: &'static str, max: usize },
    #[error("`{command}` expected a number, got `{value}`")]
    InvalidNumber { command: &'static str, value: String },
    #[error("`{command}` expected true or false, got `{value}`")]
    InvalidBool { command: &'static str, value: String },
    #[error("unterminated quote in `{0}`")]
    UnterminatedQuote(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TransToScene(_) => "TransToScene",
            Self::SetExpectedRecipe(_) => "SetExpectedRecipe",
            Self::QueueDialogueAfterScene(_) => "QueueDialogueAfterScene",
            Self::StopMusic => "StopMusic",
            Self::StartMusic => "StartMusic",
            Self::SetMusicVolume(_) => "SetMusicVolume",
            Self::FadeOutMusic(_) => "FadeOutMusic",
            Self::FadeInMusic(_) => "FadeInMusic",
            Self::SetCharacterVisible(_) => "SetCharacterVisible",
            Self::SetCharacter(_) => "SetCharacter",
            Self::BecomeDraggable(_) => "BecomeDraggable",
        }
    }

    /// Parses one command, with or without the `<<` `>>` wrapper.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut body = line.trim();
        if let Some(inner) = body.strip_prefix("<<").and_then(|s| s.strip_suffix(">>")) {
            body = inner.trim();
        }

        let words = split_words(body)?;
        let Some((head, args)) = words.split_first() else {
            return Err(CommandError::Empty);
        };

        let command = match head.as_str() {
            "TransToScene" => Self::TransToScene(text("TransToScene", "scene", args)?),
            "SetExpectedRecipe" => Self::SetExpectedRecipe(text("SetExpectedRecipe", "tea", args)?),
            "QueueDialogueAfterScene" => {
                Self::QueueDialogueAfterScene(text("QueueDialogueAfterScene", "node", args)?)
            }
            "StopMusic" => {
                no_args("StopMusic", args)?;
                Self::StopMusic
            }
            "StartMusic" => {
                no_args("StartMusic", args)?;
                Self::StartMusic
            }
            "SetMusicVolume" => {
                let raw = text("SetMusicVolume", "volume", args)?;
                Self::SetMusicVolume(number("SetMusicVolume", &raw)?)
            }
            "FadeOutMusic" => Self::FadeOutMusic(fade("FadeOutMusic", args)?),
            "FadeInMusic" => Self::FadeInMusic(fade("FadeInMusic", args)?),
            "SetCharacterVisible" => {
                let raw = text("SetCharacterVisible", "visibility", args)?;
                Self::SetCharacterVisible(boolean("SetCharacterVisible", &raw)?)
            }
            "SetCharacter" => Self::SetCharacter(text("SetCharacter", "name", args)?),
            "BecomeDraggable" => Self::BecomeDraggable(text("BecomeDraggable", "item", args)?),
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn split_words(body: &str) -> Result<Vec<String>, CommandError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in body.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    words.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }
    if in_quotes {
        return Err(CommandError::UnterminatedQuote(body.to_string()));
    }
    if !current.is_empty() || quoted {
        words.push(current);
    }
    Ok(words)
}

fn no_args(command: &'static str, args: &[String]) -> Result<(), CommandError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandError::TooManyArguments { command, max: 0 })
    }
}

fn text(command: &'static str, argument: &'static str, args: &[String]) -> Result<String, CommandError> {
    match args {
        [] => Err(CommandError::MissingArgument { command, argument }),
        [value] => Ok(value.clone()),
        _ => Err(CommandError::TooManyArguments { command, max: 1 }),
    }
}

fn number(command: &'static str, raw: &str) -> Result<f32, CommandError> {
    raw.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::InvalidNumber {
            command,
            value: raw.to_string(),
        })
}

fn boolean(command: &'static str, raw: &str) -> Result<bool, CommandError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CommandError::InvalidBool {
            command,
            value: raw.to_string(),
        }),
    }
}

fn fade(command: &'static str, args: &[String]) -> Result<Option<Duration>, CommandError> {
    match args {
        [] => Ok(None),
        [raw] => {
            let secs = number(command, raw)?;
            Duration::try_from_secs_f32(secs)
                .map(Some)
                .map_err(|_| CommandError::InvalidNumber {
                    command,
                    value: raw.clone(),
                })
        }
        _ => Err(CommandError::TooManyArguments { command, max: 1 }),
    }
}
