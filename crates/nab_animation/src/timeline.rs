//! Timeline orchestration for multiple scalars
//!
//! A timeline groups named [`AnimatedScalar`]s that share one origin. It adds no
//! synchronization between them: any ordering across scalars comes from the
//! delays their own steps declare.

use crate::error::{AnimationError, Result};
use crate::stage::AnimatedScalar;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct ScalarId;
}

/// A set of scalars sampled against a shared playhead
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    scalars: SlotMap<ScalarId, AnimatedScalar>,
    by_name: FxHashMap<&'static str, ScalarId>,
    current_time: f32,
    playing: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar; a scalar with the same name is replaced
    pub fn add(&mut self, scalar: AnimatedScalar) -> ScalarId {
        let name = scalar.name();
        if let Some(old) = self.by_name.remove(name) {
            self.scalars.remove(old);
        }
        let id = self.scalars.insert(scalar);
        self.by_name.insert(name, id);
        id
    }

    pub fn id(&self, name: &str) -> Option<ScalarId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: ScalarId) -> Option<&AnimatedScalar> {
        self.scalars.get(id)
    }

    pub fn get_mut(&mut self, id: ScalarId) -> Option<&mut AnimatedScalar> {
        self.scalars.get_mut(id)
    }

    /// Look up a scalar by name
    pub fn scalar(&self, name: &str) -> Result<&AnimatedScalar> {
        self.id(name)
            .and_then(|id| self.scalars.get(id))
            .ok_or_else(|| AnimationError::UnknownScalar(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScalarId, &AnimatedScalar)> {
        self.scalars.iter()
    }

    /// End of the latest stage across all scalars
    pub fn duration_ms(&self) -> f32 {
        self.scalars
            .values()
            .map(AnimatedScalar::end_ms)
            .fold(0.0, f32::max)
    }

    pub fn start(&mut self) {
        self.seek(0.0);
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Advance the playhead by `dt_ms` while playing
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }
        self.seek(self.current_time + dt_ms.max(0.0));
    }

    /// Move the playhead and update every scalar's current value
    pub fn seek(&mut self, t_ms: f32) {
        self.current_time = t_ms.max(0.0);
        for scalar in self.scalars.values_mut() {
            scalar.advance_to(self.current_time);
        }
    }

    /// Current value of a scalar at the playhead
    pub fn value(&self, id: ScalarId) -> Option<f32> {
        self.scalars.get(id).map(AnimatedScalar::value)
    }

    /// Value of a scalar at an arbitrary time, ignoring the playhead
    pub fn value_at(&self, id: ScalarId, t_ms: f32) -> Option<f32> {
        self.scalars.get(id).map(|s| s.value_at(t_ms))
    }

    /// Value of a named scalar at an arbitrary time
    pub fn sample(&self, name: &str, t_ms: f32) -> Result<f32> {
        self.scalar(name).map(|s| s.value_at(t_ms))
    }

    /// Whether every scalar has finished all of its stages by `t_ms`
    pub fn is_settled_at(&self, t_ms: f32) -> bool {
        self.scalars.values().all(|s| s.is_settled_at(t_ms))
    }
}
