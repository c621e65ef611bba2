//! Audio system using Web Audio API
//!
//! Procedurally generated cues and a looping background drone, no asset files.
//! Every Web Audio call is fallible; failures are dropped so a broken audio
//! stack never interrupts the game.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::cue::{Cue, CueSink};
use crate::settings::Settings;

// Per-cue mix levels
const SHOOT_GAIN: f32 = 0.25;
const MOVE_GAIN: f32 = 0.15;
const HIT_GAIN: f32 = 0.35;
const GAME_OVER_GAIN: f32 = 0.5;
const MUSIC_GAIN: f32 = 0.6;

/// Running background loop
struct MusicLoop {
    oscillators: Vec<OscillatorNode>,
    /// Tremolo stage the LFO modulates
    tremolo: GainNode,
    /// Final level; pause and resume ramp this one
    output: GainNode,
}

impl MusicLoop {
    fn stop(self) {
        for osc in self.oscillators {
            osc.stop().ok();
        }
        self.tremolo.disconnect().ok();
        self.output.disconnect().ok();
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    settings: Settings,
    music: Option<MusicLoop>,
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings: settings.sanitized(),
            music: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn sfx_volume(&self) -> f32 {
        self.settings.effective_sfx_volume()
    }

    fn music_volume(&self) -> f32 {
        self.settings.effective_music_volume() * MUSIC_GAIN
    }

    /// Create an oscillator routed through its own gain node
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

    // === Sound effects ===

    /// Shoot - short rising zap
    fn play_shoot(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, 880.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * SHOOT_GAIN, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();
        osc.frequency().set_value_at_time(880.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(1760.0, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Move - soft tick
    fn play_move(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, 220.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * MOVE_GAIN, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.06).ok();
    }

    /// Hit - crunchy burst with a low thump
    fn play_hit(ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = Self::create_osc(ctx, 300.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * HIT_GAIN, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency().set_value_at_time(1200.0, t + 0.02).ok();
            osc.frequency().set_value_at_time(200.0, t + 0.04).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        if let Some((osc, gain)) = Self::create_osc(ctx, 70.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * HIT_GAIN * 0.8, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Game over - sad descending
    fn play_game_over(ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * GAME_OVER_GAIN, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    // === Background loop ===

    /// Low pulsing drone: two detuned voices through an LFO tremolo stage,
    /// then an output gain that carries the volume
    fn start_music(&mut self) {
        self.stop_music();
        let vol = self.music_volume();
        let Some(ctx) = &self.ctx else { return };
        let (Some(tremolo), Some(output)) = (ctx.create_gain().ok(), ctx.create_gain().ok())
        else {
            return;
        };
        output.gain().set_value(vol);
        tremolo.gain().set_value(1.0);
        if output.connect_with_audio_node(&ctx.destination()).is_err()
            || tremolo.connect_with_audio_node(&output).is_err()
        {
            return;
        }

        let mut oscillators = Vec::with_capacity(3);
        for (freq, osc_type) in [
            (55.0, OscillatorType::Sawtooth),
            (82.5, OscillatorType::Triangle),
        ] {
            let Some(osc) = ctx.create_oscillator().ok() else {
                continue;
            };
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            if osc.connect_with_audio_node(&tremolo).is_ok() {
                osc.start().ok();
                oscillators.push(osc);
            }
        }

        // Tremolo around the base level
        if let (Some(lfo), Some(depth)) = (ctx.create_oscillator().ok(), ctx.create_gain().ok()) {
            lfo.frequency().set_value(2.0);
            depth.gain().set_value(0.3);
            if lfo.connect_with_audio_node(&depth).is_ok()
                && depth.connect_with_audio_param(&tremolo.gain()).is_ok()
            {
                lfo.start().ok();
                oscillators.push(lfo);
            }
        }

        self.music = Some(MusicLoop {
            oscillators,
            tremolo,
            output,
        });
    }

    fn set_music_level(&self, level: f32) {
        if let (Some(ctx), Some(music)) = (&self.ctx, &self.music) {
            music
                .output
                .gain()
                .set_target_at_time(level, ctx.current_time(), 0.05)
                .ok();
        }
    }

    fn stop_music(&mut self) {
        if let Some(music) = self.music.take() {
            music.stop();
        }
    }
}

impl CueSink for AudioManager {
    fn play(&mut self, cue: Cue) {
        match cue {
            Cue::MusicStart => return self.start_music(),
            Cue::MusicPause => return self.set_music_level(0.0),
            Cue::MusicResume => return self.set_music_level(self.music_volume()),
            Cue::MusicStop => return self.stop_music(),
            Cue::Move | Cue::Shoot | Cue::Hit | Cue::GameOver => {}
        }

        let vol = self.sfx_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            Cue::Move => Self::play_move(ctx, vol),
            Cue::Shoot => Self::play_shoot(ctx, vol),
            Cue::Hit => Self::play_hit(ctx, vol),
            Cue::GameOver => Self::play_game_over(ctx, vol),
            Cue::MusicStart | Cue::MusicPause | Cue::MusicResume | Cue::MusicStop => {}
        }
    }
}
