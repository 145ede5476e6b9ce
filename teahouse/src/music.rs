use std::time::Duration;

use engine::audio::MusicSource;
use serde::{Deserialize, Serialize};

use crate::settings::{AudioSettings, MusicSettings};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicSnapshot {
    pub playing: bool,
    pub volume: f32,
    pub fading: bool,
    pub enabled: bool,
}

/// Background music that follows the loaded scene.
#[derive(Debug, Clone)]
pub struct MusicDirector {
    source: MusicSource,
    settings: MusicSettings,
    volume: f32,
    enabled: bool,
    scene: Option<String>,
}

impl MusicDirector {
    pub fn new(settings: MusicSettings, audio: &AudioSettings) -> Self {
        let volume = audio.effective_music_volume();
        let source = match settings.clip.as_deref() {
            Some(clip) => MusicSource::for_music(clip, volume),
            None => {
                tracing::warn!("background music clip not assigned");
                MusicSource::new()
            }
        };
        Self {
            source,
            settings,
            volume,
            enabled: audio.music_enabled,
            scene: None,
        }
    }

    pub fn settings(&self) -> &MusicSettings {
        &self.settings
    }

    pub fn source(&self) -> &MusicSource {
        &self.source
    }

    pub fn is_playing(&self) -> bool {
        self.source.is_playing()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The configured music volume; the source volume differs from it while a fade runs.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    fn can_play(&self) -> bool {
        self.source.clip().is_some() && self.enabled
    }

    /// Brings playback in line with `scene`.
    pub fn check_and_control(&mut self, scene: &str) {
        self.scene = Some(scene.to_string());
        if !self.can_play() {
            return;
        }

        let fade = self.settings.scene_fade;
        if self.settings.silent_scenes.iter().any(|s| s == scene) {
            if self.source.is_playing() {
                tracing::info!(scene, "fading out music for silent scene");
                self.fade_out(fade);
            }
            return;
        }

        let wants_music = self.settings.music_scenes.iter().any(|s| s == scene);
        if wants_music && !self.source.is_playing() {
            tracing::info!(scene, "starting background music");
            self.fade_in(fade);
        } else if !wants_music && self.source.is_playing() {
            tracing::info!(scene, "stopping background music");
            self.fade_out(fade);
        }
    }

    /// Re-runs the scene check for the last scene seen, if any.
    pub fn recheck(&mut self) {
        if let Some(scene) = self.scene.clone() {
            self.check_and_control(&scene);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            if self.source.is_playing() {
                self.fade_out(self.settings.disable_fade);
            }
        } else {
            self.recheck();
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.source.set_volume(self.volume);
    }

    pub fn fade_out(&mut self, duration: Duration) {
        if !self.source.is_playing() {
            return;
        }
        let from = self.source.volume();
        self.source.start_fade(from, 0.0, duration, true);
    }

    pub fn fade_in(&mut self, duration: Duration) {
        if !self.can_play() {
            return;
        }
        if !self.source.is_playing() {
            self.source.set_volume(0.0);
            self.source.play();
        }
        let from = self.source.volume();
        self.source.start_fade(from, self.volume, duration, false);
    }

    pub fn stop_immediately(&mut self) {
        if self.source.is_playing() {
            self.source.stop();
            tracing::info!("music stopped immediately");
        }
    }

    pub fn play_immediately(&mut self) {
        if !self.can_play() {
            return;
        }
        self.source.stop();
        self.source.set_volume(self.volume);
        self.source.play();
        tracing::info!("music started immediately");
    }

    pub fn tick(&mut self, dt: Duration) {
        self.source.tick(dt);
    }

    pub fn snapshot(&self) -> MusicSnapshot {
        MusicSnapshot {
            playing: self.source.is_playing(),
            volume: self.source.volume(),
            fading: self.source.is_fading(),
            enabled: self.enabled,
        }
    }
}
