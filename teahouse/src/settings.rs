use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioSettings {
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub mute_all: bool,
    pub music_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            sfx_volume: 1.0,
            mute_all: false,
            music_enabled: true,
        }
    }
}

impl AudioSettings {
    pub fn clamp(mut self) -> Self {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    pub fn effective_music_volume(self) -> f32 {
        if self.mute_all { 0.0 } else { self.music_volume.clamp(0.0, 1.0) }
    }

    pub fn effective_sfx_gain(self) -> f32 {
        if self.mute_all { 0.0 } else { self.sfx_volume }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MusicSettings {
    pub clip: Option<String>,
    /// Scenes where background music should play.
    pub music_scenes: Vec<String>,
    /// Scenes where music fades out.
    pub silent_scenes: Vec<String>,
    #[serde(with = "crate::serde_secs")]
    pub scene_fade: Duration,
    #[serde(with = "crate::serde_secs")]
    pub disable_fade: Duration,
    #[serde(with = "crate::serde_secs")]
    pub command_fade: Duration,
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self {
            clip: Some("teahouse_theme".to_string()),
            music_scenes: vec!["Story".into(), "Tea_making".into(), "Minigame".into()],
            silent_scenes: vec!["Menu".into()],
            scene_fade: Duration::from_secs(1),
            disable_fade: Duration::from_millis(500),
            command_fade: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DragSettings {
    /// Dwell after a successful drop, during which new drags are refused.
    #[serde(with = "crate::serde_secs")]
    pub drop_success_duration: Duration,
    #[serde(with = "crate::serde_secs")]
    pub return_duration: Duration,
    pub drag_alpha: f32,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            drop_success_duration: Duration::from_secs(1),
            return_duration: Duration::from_millis(200),
            drag_alpha: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CharacterSettings {
    #[serde(with = "crate::serde_secs")]
    pub fade_duration: Duration,
}

impl Default for CharacterSettings {
    fn default() -> Self {
        Self {
            fade_duration: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StirSettings {
    #[serde(with = "crate::serde_secs")]
    pub duration: Duration,
    #[serde(with = "crate::serde_secs")]
    pub move_duration: Duration,
    pub radius: f32,
    pub turns: f32,
    /// Height above the pot the spoon stirs at.
    pub lift: f32,
    pub sorting_order: i32,
    pub sound: Option<String>,
}

impl Default for StirSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(2500),
            move_duration: Duration::from_millis(500),
            radius: 0.3,
            turns: 4.0,
            lift: 1.2,
            sorting_order: 10,
            sound: Some("spoon_mixing".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub music: MusicSettings,
    #[serde(default)]
    pub drag: DragSettings,
    #[serde(default)]
    pub character: CharacterSettings,
    #[serde(default)]
    pub stir: StirSettings,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            audio: AudioSettings::default(),
            music: MusicSettings::default(),
            drag: DragSettings::default(),
            character: CharacterSettings::default(),
            stir: StirSettings::default(),
        }
    }
}

impl PlayerSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.audio = self.audio.clamp();
        self.drag.drag_alpha = self.drag.drag_alpha.clamp(0.0, 1.0);
        self.stir.radius = self.stir.radius.max(0.0);
        self.stir.turns = self.stir.turns.max(0.0);
        self
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("TEAHOUSE_SETTINGS_PATH") {
            return Self::at(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("teahouse");
        path.push("settings.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable settings fall back to defaults.
    pub fn load(&self) -> PlayerSettings {
        let Ok(bytes) = fs::read(&self.path) else {
            tracing::debug!(path = %self.path.display(), "no settings file; using defaults");
            return PlayerSettings::default();
        };
        match serde_json::from_slice::<PlayerSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "settings file unreadable; using defaults");
                PlayerSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &PlayerSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
