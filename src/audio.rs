//! Audio cues using the Web Audio API
//!
//! Every cue is a short sequence of oscillator notes, synthesized on the fly;
//! no sound files are shipped. Native builds get a silent manager so the game
//! loop can stay platform agnostic.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player hit by a bug
    Bump,
    /// Gem picked up
    GemPickup,
    /// Reached the water
    LevelUp,
    /// Cleared the final level
    Victory,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
    Square,
}

/// One oscillator voice within a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Start frequency (Hz)
    pub freq: f32,
    /// Exponential glide target, if the pitch bends
    pub glide_to: Option<f32>,
    /// Offset from the cue start (seconds)
    pub delay: f64,
    /// Time for the gain to decay (seconds)
    pub decay: f64,
    /// Peak gain relative to the effective volume
    pub level: f32,
    pub wave: Wave,
}

impl Note {
    const fn tone(freq: f32, delay: f64, decay: f64, level: f32, wave: Wave) -> Self {
        Self {
            freq,
            glide_to: None,
            delay,
            decay,
            level,
            wave,
        }
    }
}

static BUMP: [Note; 2] = [
    Note {
        freq: 180.0,
        glide_to: Some(45.0),
        delay: 0.0,
        decay: 0.35,
        level: 0.6,
        wave: Wave::Square,
    },
    Note {
        freq: 90.0,
        glide_to: Some(30.0),
        delay: 0.0,
        decay: 0.4,
        level: 0.5,
        wave: Wave::Sine,
    },
];

static GEM_PICKUP: [Note; 2] = [
    Note::tone(880.0, 0.0, 0.12, 0.25, Wave::Sine),
    Note::tone(1320.0, 0.06, 0.18, 0.25, Wave::Sine),
];

static LEVEL_UP: [Note; 3] = [
    Note::tone(523.0, 0.0, 0.2, 0.3, Wave::Triangle),
    Note::tone(659.0, 0.1, 0.2, 0.3, Wave::Triangle),
    Note::tone(784.0, 0.2, 0.3, 0.3, Wave::Triangle),
];

static VICTORY: [Note; 5] = [
    Note::tone(523.0, 0.0, 0.25, 0.25, Wave::Triangle),
    Note::tone(659.0, 0.1, 0.25, 0.25, Wave::Triangle),
    Note::tone(784.0, 0.2, 0.25, 0.25, Wave::Triangle),
    Note::tone(1047.0, 0.3, 0.5, 0.3, Wave::Triangle),
    Note::tone(784.0, 0.3, 0.5, 0.15, Wave::Sine),
];

impl SoundEffect {
    /// Cue for a game event, if it has one
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Lost => Some(SoundEffect::Bump),
            GameEvent::GemCollected(_) => Some(SoundEffect::GemPickup),
            GameEvent::LevelComplete { .. } => Some(SoundEffect::LevelUp),
            GameEvent::Won => Some(SoundEffect::Victory),
            GameEvent::Restarted => None,
        }
    }

    /// Voices making up the cue
    pub fn notes(self) -> &'static [Note] {
        match self {
            SoundEffect::Bump => &BUMP,
            SoundEffect::GemPickup => &GEM_PICKUP,
            SoundEffect::LevelUp => &LEVEL_UP,
            SoundEffect::Victory => &VICTORY,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use silent::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{Note, SoundEffect, Wave};

    /// Gain floor for exponential ramps (zero is not allowed)
    const SILENCE: f32 = 0.01;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Resume the context (browsers require a user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        /// Play a cue, fire and forget
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            self.resume();

            let start = ctx.current_time();
            for note in effect.notes() {
                self.play_note(ctx, note, start);
            }
        }

        fn play_note(&self, ctx: &AudioContext, note: &Note, start: f64) {
            let Some((osc, gain)) = create_osc(ctx, note.freq, oscillator_type(note.wave)) else {
                return;
            };
            let t = start + note.delay;

            gain.gain().set_value_at_time(self.volume * note.level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(SILENCE, t + note.decay)
                .ok();
            if let Some(target) = note.glide_to {
                osc.frequency().set_value_at_time(note.freq, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(target, t + note.decay)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + note.decay + 0.05).ok();
        }
    }

    fn oscillator_type(wave: Wave) -> OscillatorType {
        match wave {
            Wave::Sine => OscillatorType::Sine,
            Wave::Triangle => OscillatorType::Triangle,
            Wave::Square => OscillatorType::Square,
        }
    }

    /// Oscillator routed through its own gain node to the speakers
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod silent {
    use super::SoundEffect;

    /// Logs cues instead of playing them
    pub struct AudioManager {
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            Self {
                volume: volume.clamp(0.0, 1.0),
            }
        }

        pub fn resume(&self) {}

        pub fn play(&self, effect: SoundEffect) {
            if self.volume > 0.0 {
                log::trace!("Cue {:?}", effect);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GemKind;

    #[test]
    fn test_event_cues() {
        assert_eq!(SoundEffect::for_event(GameEvent::Lost), Some(SoundEffect::Bump));
        assert_eq!(
            SoundEffect::for_event(GameEvent::GemCollected(GemKind::Orange)),
            Some(SoundEffect::GemPickup)
        );
        assert_eq!(
            SoundEffect::for_event(GameEvent::LevelComplete { level: 4 }),
            Some(SoundEffect::LevelUp)
        );
        assert_eq!(SoundEffect::for_event(GameEvent::Won), Some(SoundEffect::Victory));
        assert_eq!(SoundEffect::for_event(GameEvent::Restarted), None);
    }

    #[test]
    fn test_cue_notes_are_playable() {
        for effect in [
            SoundEffect::Bump,
            SoundEffect::GemPickup,
            SoundEffect::LevelUp,
            SoundEffect::Victory,
        ] {
            let notes = effect.notes();
            assert!(!notes.is_empty());
            for note in notes {
                // Exponential ramps need strictly positive endpoints
                assert!(note.freq > 0.0);
                assert!(note.glide_to.is_none_or(|f| f > 0.0));
                assert!(note.decay > 0.0 && note.delay >= 0.0);
                assert!(note.level > 0.0 && note.level <= 1.0);
            }
        }
    }
}
