//! Audio system using Web Audio API
//!
//! Sound effects are synthesised with oscillators; the background track is a
//! looping `<audio>` element. Every browser call is allowed to fail: errors
//! are dropped with `.ok()` and never reach the simulation.

use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::effects::{Effect, EffectSink};
use crate::settings::Settings;

/// Default location of the background track, relative to the page
pub const DEFAULT_BGM_URL: &str = "audio/run.mp3";

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    bgm: Option<HtmlAudioElement>,
    /// Volume and mute preferences
    settings: Settings,
}

impl AudioManager {
    pub fn new(bgm_url: &str, settings: &Settings) -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - sound effects disabled");
        }
        let bgm = HtmlAudioElement::new_with_src(bgm_url).ok();
        match &bgm {
            Some(bgm) => bgm.set_loop(true),
            None => log::warn!("Failed to create background track from {}", bgm_url),
        }

        let manager = Self {
            ctx,
            bgm,
            settings: settings.clone(),
        };
        manager.update_bgm_volume();
        manager
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.update_bgm_volume();
    }

    fn update_bgm_volume(&self) {
        if let Some(bgm) = &self.bgm {
            bgm.set_volume(self.settings.effective_music_volume() as f64);
        }
    }

    /// Restart the track from the top, like a fresh stage
    pub fn play_bgm(&self) {
        let Some(bgm) = &self.bgm else { return };
        self.update_bgm_volume();
        bgm.set_current_time(0.0);
        // Rejected promise (autoplay policy) is ignored
        let _ = bgm.play();
    }

    pub fn pause_bgm(&self) {
        if let Some(bgm) = &self.bgm {
            bgm.pause().ok();
        }
    }

    fn play_sfx(&self, effect: Effect) {
        let vol = self.settings.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            Effect::JumpSound => self.play_jump(ctx, vol),
            Effect::PickupSound => self.play_pickup(ctx, vol),
            Effect::MalwareSound => self.play_malware(ctx, vol),
            _ => {}
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

    /// Jump - quick upward chirp
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.18).ok();
    }

    /// Cyber chip - bright two-note ding
    fn play_pickup(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [880.0, 1320.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Malware - distorted downward buzz
    fn play_malware(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency().set_value_at_time(330.0, t + 0.04).ok();
            osc.frequency().set_value_at_time(160.0, t + 0.08).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.3)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.4).ok();
        }

        // Sub bass thud
        if let Some((osc, gain)) = self.create_osc(ctx, 55.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }
}

impl EffectSink for AudioManager {
    fn trigger(&mut self, effect: Effect) {
        match effect {
            Effect::PlayBgm => self.play_bgm(),
            Effect::PauseBgm => self.pause_bgm(),
            Effect::JumpSound | Effect::PickupSound | Effect::MalwareSound => self.play_sfx(effect),
            // Visual, handled by the page
            Effect::DamageFlash => {}
        }
    }
}
