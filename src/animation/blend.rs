use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::animation::state::{AnimationState, StateHandle};

/// Timed cross-fade from a set of states to one state.
///
/// `time` counts down from `duration` to zero. With `cf = time / duration`,
/// fading-out states get `work_weight = cf` and the incoming state
/// `1 - cf`.
#[derive(Debug, Clone)]
pub struct BlendState {
    off_states: SmallVec<[StateHandle; 4]>,
    on_state: StateHandle,
    duration: f32,
    time: f32,
}

impl BlendState {
    pub(crate) fn new(off_states: SmallVec<[StateHandle; 4]>, on_state: StateHandle, duration: f32) -> Self {
        let duration = duration.max(0.0);
        Self {
            off_states,
            on_state,
            duration,
            time: duration,
        }
    }

    #[must_use]
    pub fn on_state(&self) -> StateHandle {
        self.on_state
    }

    #[must_use]
    pub fn off_states(&self) -> &[StateHandle] {
        &self.off_states
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Time left until the incoming state is at full weight.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.time.max(0.0)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.time <= 0.0
    }

    #[must_use]
    pub fn involves(&self, handle: StateHandle) -> bool {
        self.on_state == handle || self.off_states.contains(&handle)
    }

    fn cross_factor(&self) -> f32 {
        if self.duration <= 0.0 {
            0.0
        } else {
            self.time.max(0.0) / self.duration
        }
    }

    /// Writes the current work weights into the involved states.
    pub(crate) fn apply(&self, states: &mut SlotMap<StateHandle, AnimationState>) {
        let cf = self.cross_factor();
        for handle in &self.off_states {
            if let Some(state) = states.get_mut(*handle) {
                state.work_weight = cf;
            }
        }
        if let Some(state) = states.get_mut(self.on_state) {
            state.work_weight = 1.0 - cf;
        }
    }

    /// Counts down by `dt`, applies the weights and reports whether the
    /// transition has settled.
    pub(crate) fn update(&mut self, dt: f32, states: &mut SlotMap<StateHandle, AnimationState>) -> bool {
        self.time -= dt;
        self.apply(states);
        self.is_finished()
    }
}
