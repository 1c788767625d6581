//! Fire-and-forget side effects
//!
//! The simulation never calls audio or visual code directly. Every command and
//! tick leaves `GameEvent`s behind; the clock maps them to `Effect`s and hands
//! each one to an `EffectSink`. Sinks must not block and must not fail loudly.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound and visual triggers the host can act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    JumpSound,
    PickupSound,
    MalwareSound,
    /// Start (or resume) the looping background track
    PlayBgm,
    PauseBgm,
    /// Red flash over the play field
    DamageFlash,
}

/// Receiver of effects; implementations swallow their own failures
pub trait EffectSink {
    fn trigger(&mut self, effect: Effect);
}

impl<S: EffectSink + ?Sized> EffectSink for Box<S> {
    fn trigger(&mut self, effect: Effect) {
        (**self).trigger(effect);
    }
}

/// Effects caused by one event, in trigger order
pub fn effects_for(event: &GameEvent) -> &'static [Effect] {
    match event {
        GameEvent::Jumped => &[Effect::JumpSound],
        GameEvent::PickedUp { .. } => &[Effect::PickupSound],
        GameEvent::MalwareHit { .. } => &[Effect::MalwareSound, Effect::DamageFlash],
        GameEvent::Crashed { .. } => &[Effect::DamageFlash],
        GameEvent::RunStarted { .. } => &[Effect::PlayBgm],
        GameEvent::StageCleared { .. } | GameEvent::RunWon { .. } | GameEvent::RunLost { .. } => {
            &[Effect::PauseBgm]
        }
        GameEvent::Slid | GameEvent::ObstaclePassed { .. } => &[],
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EffectSink for NullSink {
    fn trigger(&mut self, _effect: Effect) {}
}

/// Keeps every effect in order; used by headless runs and tests
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub effects: Vec<Effect>,
}

impl RecordingSink {
    pub fn count(&self, effect: Effect) -> usize {
        self.effects.iter().filter(|e| **e == effect).count()
    }

    pub fn take(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

impl EffectSink for RecordingSink {
    fn trigger(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

/// Writes each effect to the log at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EffectSink for LogSink {
    fn trigger(&mut self, effect: Effect) {
        log::debug!("effect: {:?}", effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntityKind, StageNumber};

    #[test]
    fn test_malware_flashes_and_plays() {
        assert_eq!(
            effects_for(&GameEvent::MalwareHit { value: -200 }),
            &[Effect::MalwareSound, Effect::DamageFlash]
        );
    }

    #[test]
    fn test_run_end_pauses_bgm() {
        for event in [
            GameEvent::RunLost { score: 0 },
            GameEvent::RunWon { score: 2000 },
            GameEvent::StageCleared {
                stage: StageNumber::FIRST,
                score: 200,
            },
        ] {
            assert_eq!(effects_for(&event), &[Effect::PauseBgm]);
        }
    }

    #[test]
    fn test_silent_events() {
        assert!(effects_for(&GameEvent::Slid).is_empty());
        assert!(
            effects_for(&GameEvent::ObstaclePassed {
                kind: EntityKind::Laser
            })
            .is_empty()
        );
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::default();
        sink.trigger(Effect::JumpSound);
        sink.trigger(Effect::JumpSound);
        sink.trigger(Effect::PlayBgm);
        assert_eq!(sink.count(Effect::JumpSound), 2);
        assert_eq!(sink.take().len(), 3);
        assert!(sink.effects.is_empty());
    }

    #[test]
    fn test_boxed_sink() {
        let mut sink: Box<dyn EffectSink> = Box::new(NullSink);
        sink.trigger(Effect::DamageFlash);
    }
}
