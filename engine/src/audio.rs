use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tween::Tween;

/// Lower numbers win when voices compete; music sits below sound effects.
pub const MUSIC_PRIORITY: u8 = 64;
pub const DEFAULT_PRIORITY: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct VolumeFade {
    tween: Tween<f32>,
    stop_at_end: bool,
}

/// Playback state of one looping music voice.
///
/// Decoding and output are the host's job; this type only tracks what should be audible. At most
/// one volume fade is in flight: starting a new one replaces the old.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicSource {
    clip: Option<String>,
    volume: f32,
    playing: bool,
    looping: bool,
    priority: u8,
    fade: Option<VolumeFade>,
}

impl Default for MusicSource {
    fn default() -> Self {
        Self {
            clip: None,
            volume: 1.0,
            playing: false,
            looping: false,
            priority: DEFAULT_PRIORITY,
            fade: None,
        }
    }
}

impl MusicSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the voice for background music: looping, low priority, not auto-playing.
    pub fn for_music(clip: impl Into<String>, volume: f32) -> Self {
        Self {
            clip: Some(clip.into()),
            volume: volume.clamp(0.0, 1.0),
            looping: true,
            priority: MUSIC_PRIORITY,
            ..Self::default()
        }
    }

    pub fn clip(&self) -> Option<&str> {
        self.clip.as_deref()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Starts playback. Returns false when there is no clip to play.
    pub fn play(&mut self) -> bool {
        if self.clip.is_none() {
            tracing::warn!("music source has no clip; ignoring play");
            return false;
        }
        self.playing = true;
        true
    }

    /// Stops playback and drops any in-flight fade.
    pub fn stop(&mut self) {
        self.playing = false;
        self.fade = None;
    }

    /// Sets the volume to `from` and tweens it to `to` over `duration`.
    ///
    /// With `stop_at_end` the voice stops once a fade down to silence completes.
    pub fn start_fade(&mut self, from: f32, to: f32, duration: Duration, stop_at_end: bool) {
        self.set_volume(from);
        self.fade = Some(VolumeFade {
            tween: Tween::new(self.volume, to.clamp(0.0, 1.0), duration),
            stop_at_end,
        });
        if duration.is_zero() {
            self.tick(Duration::ZERO);
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        let Some(mut fade) = self.fade.take() else {
            return;
        };
        self.volume = fade.tween.advance(dt);
        if !fade.tween.is_finished() {
            self.fade = Some(fade);
            return;
        }
        if fade.stop_at_end && fade.tween.to() <= 0.0 {
            self.playing = false;
        }
    }
}
