//! Audio: looping music tracks and synthesized sound effects
//!
//! Background music cycles through a small track list of `<audio>` elements;
//! sound effects are generated with Web Audio oscillators, so no effect
//! samples need to ship.

use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Background track rotation
pub const MUSIC_TRACKS: [&str; 4] = [
    "audio/track1.mp3",
    "audio/track2.mp3",
    "audio/track3.mp3",
    "audio/track4.mp3",
];
const GAME_OVER_TRACK: &str = "audio/gameover.mp3";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Orb released from the sling
    Launch,
    /// Orb destroyed an enemy
    EnemyHit,
    /// Enemy escaped off the bottom
    HeartLost,
    /// Orb bounced off a wall
    WallBounce,
    /// Run ended
    GameOver,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Launched => SoundEffect::Launch,
            GameEvent::EnemyDestroyed => SoundEffect::EnemyHit,
            GameEvent::HeartLost => SoundEffect::HeartLost,
            GameEvent::WallBounce => SoundEffect::WallBounce,
            GameEvent::GameOver => SoundEffect::GameOver,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music: Option<HtmlAudioElement>,
    track_index: usize,
    master_volume: f32,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(0)
    }
}

impl AudioManager {
    /// Create the manager with the given starting track index
    pub fn new(track_index: usize) -> Self {
        // May fail outside a secure context; the game stays playable silent
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - sound effects disabled");
        }

        let track_index = track_index % MUSIC_TRACKS.len();
        let music = HtmlAudioElement::new_with_src(MUSIC_TRACKS[track_index]).ok();
        if let Some(el) = &music {
            el.set_loop(true);
        } else {
            log::warn!("Failed to create music element - music disabled");
        }

        Self {
            ctx,
            music,
            track_index,
            master_volume: 0.8,
            music_volume: 0.7,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume the audio context (required after the first user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Apply volume preferences (each 0.0 - 1.0)
    pub fn set_volumes(&mut self, master: f32, music: f32, sfx: f32) {
        self.master_volume = master.clamp(0.0, 1.0);
        self.music_volume = music.clamp(0.0, 1.0);
        self.sfx_volume = sfx.clamp(0.0, 1.0);
        self.apply_music_volume();
    }

    /// Mute/unmute everything
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(el) = &self.music {
            el.set_muted(muted);
        }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    fn apply_music_volume(&self) {
        if let Some(el) = &self.music {
            el.set_volume(f64::from(self.master_volume * self.music_volume));
        }
    }

    /// Start (or restart) the current background track from the top
    pub fn play_music(&self) {
        if let Some(el) = &self.music {
            el.set_current_time(0.0);
            self.apply_music_volume();
            let _ = el.play();
        }
    }

    pub fn pause_music(&self) {
        if let Some(el) = &self.music {
            let _ = el.pause();
        }
    }

    pub fn resume_music(&self) {
        if let Some(el) = &self.music {
            let _ = el.play();
        }
    }

    /// Cycle to the next background track, continuing playback if the
    /// current one was playing
    pub fn next_track(&mut self) {
        let was_playing = self.music.as_ref().is_some_and(|el| !el.paused());
        if let Some(el) = &self.music {
            let _ = el.pause();
        }

        self.track_index = (self.track_index + 1) % MUSIC_TRACKS.len();
        log::info!("Switched to track {}", self.track_index + 1);

        self.music = HtmlAudioElement::new_with_src(MUSIC_TRACKS[self.track_index]).ok();
        if let Some(el) = &self.music {
            el.set_loop(true);
            el.set_muted(self.muted);
        }
        self.apply_music_volume();
        if was_playing {
            self.resume_music();
        }
    }

    pub fn current_track(&self) -> usize {
        self.track_index
    }

    /// Stop the looping music and play the one-shot game-over track
    pub fn play_game_over_track(&self) {
        self.pause_music();
        if let Ok(el) = HtmlAudioElement::new_with_src(GAME_OVER_TRACK) {
            el.set_muted(self.muted);
            el.set_volume(f64::from(self.master_volume * self.music_volume));
            let _ = el.play();
        }
    }

    /// Effective SFX volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// React to a simulation event
    pub fn handle_event(&self, event: GameEvent) {
        self.play(SoundEffect::from(event));
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Launch => self.play_launch(ctx, vol),
            SoundEffect::EnemyHit => self.play_enemy_hit(ctx, vol),
            SoundEffect::HeartLost => self.play_heart_lost(ctx, vol),
            SoundEffect::WallBounce => self.play_wall_bounce(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    /// Launch - rising whoosh
    fn play_launch(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(600.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.25).ok();
    }

    /// Enemy destroyed - boom with a high crack
    fn play_enemy_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency().set_value_at_time(100.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.4)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Heart lost - ominous descend
    fn play_heart_lost(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.5)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.6).ok();
    }

    /// Wall bounce - short high ping
    fn play_wall_bounce(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Game over - sad descending sequence
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}
