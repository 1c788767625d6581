//! Browser host adapter
//!
//! JavaScript owns the canvas, the DOM overlays and the
//! `requestAnimationFrame` loop. It forwards input and viewport changes to a
//! `WebRunner`, calls `frame()` once per refresh while it returns true and
//! paints the JSON snapshot.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, DEFAULT_BGM_URL};
use crate::effects::{Effect, EffectSink};
use crate::platform::Viewport;
use crate::settings::Settings;
use crate::sim::{FrameStatus, SimulationClock, StageNumber};

/// Audio plus a latch for the CSS damage flash
struct PageSink {
    audio: AudioManager,
    flash_pending: bool,
}

impl EffectSink for PageSink {
    fn trigger(&mut self, effect: Effect) {
        match effect {
            Effect::DamageFlash => self.flash_pending = true,
            other => self.audio.trigger(other),
        }
    }
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Neon Runner (wasm) loaded");
}

fn stage(n: u8) -> Result<StageNumber, JsValue> {
    StageNumber::new(n).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub struct WebRunner {
    clock: RefCell<SimulationClock<PageSink>>,
    settings: Settings,
}

impl WebRunner {
    /// Run `f` on the clock unless a call is already in progress
    fn with_clock<T>(
        &self,
        fallback: T,
        f: impl FnOnce(&mut SimulationClock<PageSink>) -> T,
    ) -> T {
        match self.clock.try_borrow_mut() {
            Ok(mut clock) => f(&mut clock),
            Err(_) => {
                log::warn!("Re-entrant call ignored");
                fallback
            }
        }
    }
}

#[wasm_bindgen]
impl WebRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebRunner {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let sink = PageSink {
            audio: AudioManager::new(DEFAULT_BGM_URL, &settings),
            flash_pending: false,
        };
        let clock =
            SimulationClock::with_settings(seed, Viewport::new(width, height), sink, &settings);
        WebRunner {
            clock: RefCell::new(clock),
            settings,
        }
    }

    /// One tick; false once the host should stop scheduling frames
    pub fn frame(&self) -> bool {
        self.with_clock(false, |clock| clock.frame() == FrameStatus::Continue)
    }

    /// True while frames would advance the game
    pub fn wants_frames(&self) -> bool {
        self.with_clock(false, |clock| clock.wants_frames())
    }

    pub fn start(&self, stage_number: u8) -> Result<bool, JsValue> {
        let stage = stage(stage_number)?;
        Ok(self.with_clock(false, |clock| {
            clock.sink().audio.resume();
            clock.start(stage)
        }))
    }

    pub fn restart(&self, stage_number: u8) -> Result<bool, JsValue> {
        let stage = stage(stage_number)?;
        Ok(self.with_clock(false, |clock| clock.restart(stage)))
    }

    pub fn new_game(&self) -> bool {
        self.with_clock(false, |clock| clock.new_game())
    }

    pub fn retry(&self) -> bool {
        self.with_clock(false, |clock| clock.retry())
    }

    pub fn advance(&self) -> bool {
        self.with_clock(false, |clock| clock.advance())
    }

    pub fn return_to_menu(&self) -> bool {
        self.with_clock(false, |clock| clock.return_to_menu())
    }

    pub fn jump(&self) -> bool {
        self.with_clock(false, |clock| clock.jump())
    }

    pub fn slide(&self) -> bool {
        self.with_clock(false, |clock| clock.slide())
    }

    pub fn set_move_left(&self, held: bool) {
        self.with_clock((), |clock| clock.set_move_left(held));
    }

    pub fn set_move_right(&self, held: bool) {
        self.with_clock((), |clock| clock.set_move_right(held));
    }

    pub fn resize(&self, width: f32, height: f32) {
        self.with_clock((), |clock| clock.resize(Viewport::new(width, height)));
    }

    pub fn pause(&self) {
        self.with_clock((), |clock| clock.pause());
    }

    pub fn resume(&self) {
        self.with_clock((), |clock| clock.resume());
    }

    /// Mute toggle from the page; the choice is persisted
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.settings.save();
        self.with_clock((), |clock| clock.sink_mut().audio.set_muted(muted));
    }

    /// Window focus changes; pauses on blur and mutes if configured to
    pub fn set_focused(&self, focused: bool) {
        let mute_on_blur = self.settings.mute_on_blur;
        let muted = self.settings.muted;
        self.with_clock((), |clock| {
            if focused {
                clock.resume();
            } else {
                clock.pause();
            }
            if mute_on_blur {
                clock.sink_mut().audio.set_muted(muted || !focused);
            }
        });
    }

    pub fn is_paused(&self) -> bool {
        self.with_clock(false, |clock| clock.is_paused())
    }

    /// True once per damage flash; the page restarts its CSS animation
    pub fn take_damage_flash(&self) -> bool {
        self.with_clock(false, |clock| {
            std::mem::take(&mut clock.sink_mut().flash_pending)
        })
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let snapshot = self
            .clock
            .try_borrow()
            .map_err(|_| JsValue::from_str("simulation busy"))?
            .snapshot();
        snapshot
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn score(&self) -> f64 {
        self.with_clock(0.0, |clock| clock.state().run.score as f64)
    }

    pub fn stage(&self) -> u8 {
        self.with_clock(1, |clock| clock.state().run.stage.get())
    }
}
