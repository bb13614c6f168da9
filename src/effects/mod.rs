//! Effects domain: fire-and-forget signals for camera, particles and audio.

use std::sync::{Arc, Mutex, PoisonError};

use bevy::ecs::message::{Message, MessageWriter};
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Jump,
    AirJump,
    Dash,
    Land,
    Damage,
    Death,
    Respawn,
}

/// Minimal payload: where it happened and how strong it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectSignal {
    pub kind: EffectKind,
    pub position: Vec2,
    pub magnitude: f32,
}

impl EffectSignal {
    pub fn new(kind: EffectKind, position: Vec2, magnitude: f32) -> Self {
        Self {
            kind,
            position,
            magnitude,
        }
    }
}

/// Receiver for effect signals. Emitting never blocks and never fails.
pub trait EffectsSink: Send + Sync {
    fn emit(&self, signal: EffectSignal);
}

/// Drops every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEffects;

impl EffectsSink for NullEffects {
    fn emit(&self, _signal: EffectSignal) {}
}

/// Collects signals until the host drains them. Cloning yields another handle to the
/// same queue.
#[derive(Resource, Debug, Clone, Default)]
pub struct EffectQueue {
    pending: Arc<Mutex<Vec<EffectSignal>>>,
}

impl EffectQueue {
    pub fn drain(&self) -> Vec<EffectSignal> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pending)
    }

    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EffectsSink for EffectQueue {
    fn emit(&self, signal: EffectSignal) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(signal);
    }
}

/// Effect signal re-published on the ECS message bus for presentation systems.
#[derive(Debug)]
pub struct EffectMessage {
    pub signal: EffectSignal,
}

impl Message for EffectMessage {}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EffectQueue>()
            .add_message::<EffectMessage>()
            .add_systems(FixedPostUpdate, forward_effect_signals);
    }
}

pub(crate) fn forward_effect_signals(
    queue: Res<EffectQueue>,
    mut messages: MessageWriter<EffectMessage>,
) {
    for signal in queue.drain() {
        debug!(
            "Effect {:?} at {:?} (magnitude {})",
            signal.kind, signal.position, signal.magnitude
        );
        messages.write(EffectMessage { signal });
    }
}
