//! Sound effect triggers
//!
//! The game only ever fires two one-shot effects. Playback is handed to an
//! `AudioSink` backend; the manager decides which clip and how loud.

use crate::assets::{ResourceProvider, SoundId};
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hit by the player
    Launch,
    /// Ball dropped into the hole
    Hole,
}

impl SoundEffect {
    /// Manifest name of the clip
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Launch => "launch",
            SoundEffect::Hole => "hole",
        }
    }

    /// Effect that accompanies a game event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BallLaunched => Some(SoundEffect::Launch),
            GameEvent::BallCaptured => Some(SoundEffect::Hole),
            _ => None,
        }
    }
}

/// Mixer backend. Must not block.
pub trait AudioSink {
    fn play(&mut self, sound: SoundId, volume: f32);
}

/// Remembers what was played (tests, headless runs)
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<(SoundId, f32)>,
}

impl AudioSink for RecordingSink {
    fn play(&mut self, sound: SoundId, volume: f32) {
        self.played.push((sound, volume));
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        Self {
            sink,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect, resources: &dyn ResourceProvider) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        match resources.sound(effect.asset_name()) {
            Some(id) => self.sink.play(id, vol),
            None => log::warn!("Sound not found: {}", effect.asset_name()),
        }
    }

    /// Play whatever effects these events call for
    pub fn handle_events(&mut self, events: &[GameEvent], resources: &dyn ResourceProvider) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect, resources);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
