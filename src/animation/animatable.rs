//! Concurrent animation states driving one object.
//!
//! [`Animatable`] owns a set of [`AnimationState`]s. Values of different
//! states that target the same path are not written directly; they are routed
//! through one [`ValueAgent`] per path which writes the aggregated result.
//!
//! Per frame, [`Animatable::update`] runs in a fixed order:
//! 1. every state's timeline advances and samples its values (insertion order),
//! 2. the active blend transition recomputes work weights,
//! 3. every agent aggregates and writes its target (creation order).

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::animation::agent::{Contributor, ValueAgent};
use crate::animation::animation::Animation;
use crate::animation::blend::BlendState;
use crate::animation::settings::AnimatableSettings;
use crate::animation::state::{AnimationState, StateHandle};
use crate::errors::{AnimationError, Result};

#[derive(Debug, Default)]
pub struct Animatable {
    states: SlotMap<StateHandle, AnimationState>,
    // Insertion order; also the tie-break order.
    order: Vec<StateHandle>,
    agents: Vec<ValueAgent>,
    agent_lookup: FxHashMap<String, usize>,
    blend: Option<BlendState>,
    settings: AnimatableSettings,
}

impl Animatable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: AnimatableSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn settings(&self) -> &AnimatableSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: AnimatableSettings) {
        self.settings = settings;
    }

    // ------------------------------------------------------------------------
    // Frame update
    // ------------------------------------------------------------------------

    pub fn update(&mut self, dt: f32) {
        for handle in &self.order {
            if let Some(state) = self.states.get_mut(*handle) {
                state.animation.update(dt);
            }
        }

        let settled = self
            .blend
            .as_mut()
            .is_some_and(|blend| blend.update(dt, &mut self.states));
        if settled {
            log::debug!("Blend transition settled");
            self.blend = None;
        }

        for agent in &mut self.agents {
            agent.update(&self.states, &self.settings);
        }
    }

    // ------------------------------------------------------------------------
    // States
    // ------------------------------------------------------------------------

    /// Adds a state and routes its values through the per-path agents.
    pub fn add_state(&mut self, state: AnimationState) -> Result<StateHandle> {
        if self.state_handle(state.name()).is_some() {
            return Err(AnimationError::DuplicateState(state.name().to_owned()));
        }
        Ok(self.insert_state(state))
    }

    /// Removes the named state, releasing its agents. Cancels a blend the
    /// state takes part in.
    pub fn remove_state(&mut self, name: &str) -> bool {
        let Some(handle) = self.state_handle(name) else {
            log::warn!("Can't remove animation state '{name}': not found");
            return false;
        };

        self.unregister_state(handle);
        if self.blend.as_ref().is_some_and(|b| b.involves(handle)) {
            self.cancel_blend();
        }
        self.states.remove(handle);
        self.order.retain(|h| *h != handle);
        true
    }

    pub fn remove_all_states(&mut self) {
        for handle in std::mem::take(&mut self.order) {
            self.unregister_state(handle);
        }
        self.states.clear();
        self.cancel_blend();
    }

    #[must_use]
    pub fn state_handle(&self, name: &str) -> Option<StateHandle> {
        self.order
            .iter()
            .copied()
            .find(|h| self.states.get(*h).is_some_and(|s| s.name() == name))
    }

    /// Looks up a state by name, logging a warning when it does not exist.
    #[must_use]
    pub fn state(&self, name: &str) -> Option<&AnimationState> {
        let state = self.state_handle(name).and_then(|h| self.states.get(h));
        if state.is_none() {
            log::warn!("Animation state '{name}' not found");
        }
        state
    }

    pub fn state_mut(&mut self, name: &str) -> Option<&mut AnimationState> {
        match self.state_handle(name) {
            Some(handle) => self.states.get_mut(handle),
            None => {
                log::warn!("Animation state '{name}' not found");
                None
            }
        }
    }

    #[must_use]
    pub fn state_by_handle(&self, handle: StateHandle) -> Option<&AnimationState> {
        self.states.get(handle)
    }

    /// States in insertion order.
    pub fn states(&self) -> impl Iterator<Item = &AnimationState> {
        self.order.iter().filter_map(|h| self.states.get(*h))
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.order.len()
    }

    // ------------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------------

    /// Plays `animation` under `name`. An existing state of that name gets
    /// its animation replaced.
    pub fn play(&mut self, animation: Animation, name: &str) -> StateHandle {
        let handle = self.upsert_state(animation, name);
        if let Some(state) = self.states.get_mut(handle) {
            state.animation.play();
        }
        handle
    }

    /// Plays the existing state `name`.
    pub fn play_state(&mut self, name: &str) -> Option<StateHandle> {
        let Some(handle) = self.state_handle(name) else {
            log::warn!("Can't play animation state '{name}': not found");
            return None;
        };
        if let Some(state) = self.states.get_mut(handle) {
            state.animation.play();
        }
        Some(handle)
    }

    /// Cross-fades from every currently playing state to the state `name`
    /// over `duration` seconds.
    pub fn blend_to(&mut self, name: &str, duration: f32) -> Option<StateHandle> {
        let Some(handle) = self.state_handle(name) else {
            log::warn!("Can't blend to animation state '{name}': not found");
            return None;
        };
        self.start_blend(handle, duration);
        Some(handle)
    }

    /// Like [`Animatable::blend_to`], adding or replacing the state first.
    pub fn blend_to_animation(&mut self, animation: Animation, name: &str, duration: f32) -> StateHandle {
        let handle = self.upsert_state(animation, name);
        self.start_blend(handle, duration);
        handle
    }

    /// Stops the named state and cancels any blend in progress.
    pub fn stop(&mut self, name: &str) -> bool {
        let Some(handle) = self.state_handle(name) else {
            log::warn!("Can't stop animation state '{name}': not found");
            return false;
        };
        if let Some(state) = self.states.get_mut(handle) {
            state.animation.stop();
        }
        self.cancel_blend();
        true
    }

    pub fn stop_all(&mut self) {
        for handle in &self.order {
            if let Some(state) = self.states.get_mut(*handle) {
                state.animation.stop();
            }
        }
        self.cancel_blend();
    }

    #[must_use]
    pub fn is_blending(&self) -> bool {
        self.blend.is_some()
    }

    #[must_use]
    pub fn blend(&self) -> Option<&BlendState> {
        self.blend.as_ref()
    }

    // ------------------------------------------------------------------------
    // Agents
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn agent(&self, path: &str) -> Option<&ValueAgent> {
        self.agent_lookup.get(path).map(|slot| &self.agents[*slot])
    }

    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn insert_state(&mut self, state: AnimationState) -> StateHandle {
        let handle = self.states.insert(state);
        self.order.push(handle);
        self.register_state(handle);
        handle
    }

    fn upsert_state(&mut self, animation: Animation, name: &str) -> StateHandle {
        match self.state_handle(name) {
            Some(handle) => {
                self.unregister_state(handle);
                if let Some(state) = self.states.get_mut(handle) {
                    state.animation = animation;
                }
                self.register_state(handle);
                handle
            }
            None => self.insert_state(AnimationState::new(name, animation)),
        }
    }

    fn start_blend(&mut self, on_state: StateHandle, duration: f32) {
        let off_states: SmallVec<[StateHandle; 4]> = self
            .order
            .iter()
            .copied()
            .filter(|h| *h != on_state && self.states.get(*h).is_some_and(AnimationState::is_playing))
            .collect();

        let blend = BlendState::new(off_states, on_state, duration);
        blend.apply(&mut self.states);

        if let Some(state) = self.states.get_mut(on_state) {
            state.animation.play();
            log::debug!(
                "Blending {} state(s) into '{}' over {duration}s",
                blend.off_states().len(),
                state.name()
            );
        }

        self.blend = if blend.is_finished() { None } else { Some(blend) };
    }

    fn cancel_blend(&mut self) {
        if self.blend.take().is_some() {
            log::debug!("Blend transition cancelled");
        }
    }

    fn register_state(&mut self, handle: StateHandle) {
        let Some(state) = self.states.get_mut(handle) else {
            return;
        };
        let name = state.name().to_owned();

        for (value_index, value) in state.animation.values_mut().iter_mut().enumerate() {
            let contributor = Contributor {
                state: handle,
                value_index,
            };
            let path = value.target_path();

            let registered = if let Some(&slot) = self.agent_lookup.get(path) {
                self.agents[slot].register(contributor, value)
            } else {
                let mut agent = value.make_agent();
                let registered = agent.register(contributor, value);
                self.agent_lookup.insert(path.to_owned(), self.agents.len());
                self.agents.push(agent);
                registered
            };

            match registered {
                Ok(()) => value.register_under_aggregator(),
                Err(err) => log::warn!("{err}; state '{name}' writes it directly"),
            }
        }

        // Sample the current pose so agents never aggregate stale defaults.
        state.animation.evaluate();
    }

    fn unregister_state(&mut self, handle: StateHandle) {
        let Some(state) = self.states.get_mut(handle) else {
            return;
        };

        for (value_index, value) in state.animation.values_mut().iter_mut().enumerate() {
            if !value.is_registered() {
                continue;
            }
            let Some(&slot) = self.agent_lookup.get(value.target_path()) else {
                continue;
            };

            let contributor = Contributor {
                state: handle,
                value_index,
            };
            if self.agents[slot].unregister(contributor) {
                value.unregister();
            }
            if self.agents[slot].is_empty() {
                remove_agent(&mut self.agents, &mut self.agent_lookup, slot);
            }
        }
    }
}

/// Removes an agent while keeping creation order and lookup slots intact.
fn remove_agent(agents: &mut Vec<ValueAgent>, lookup: &mut FxHashMap<String, usize>, slot: usize) {
    let agent = agents.remove(slot);
    lookup.remove(agent.path());
    for index in lookup.values_mut() {
        if *index > slot {
            *index -= 1;
        }
    }
}
