//! Handle registry
//!
//! Keyed cache of loaded elements, one handle per source identifier.

use crate::types::{Completion, HandleState, SupersedePolicy};
use std::collections::HashMap;
use std::fmt;

/// One loaded playable resource
pub struct PlaybackHandle<E> {
    source_id: String,
    element: E,

    /// Gain to apply on the next "ready" notification
    volume: Option<f32>,

    state: HandleState,

    /// Completions waiting for the end of the current run
    pending: Vec<Completion>,

    /// Runs started on this handle
    runs: u32,
}

impl<E> PlaybackHandle<E> {
    /// Wrap a freshly constructed host element
    pub fn new(source_id: impl Into<String>, element: E, volume: Option<f32>) -> Self {
        Self {
            source_id: source_id.into(),
            element,
            volume,
            state: HandleState::Created,
            pending: Vec::new(),
            runs: 0,
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn into_element(self) -> E {
        self.element
    }

    pub fn volume(&self) -> Option<f32> {
        self.volume
    }

    /// Replace the pending gain when a new one is supplied
    pub fn queue_volume(&mut self, volume: Option<f32>) {
        if volume.is_some() {
            self.volume = volume;
        }
    }

    /// Consume the pending gain
    pub fn take_volume(&mut self) -> Option<f32> {
        self.volume.take()
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn set_state(&mut self, state: HandleState) {
        self.state = state;
    }

    /// Enter `Playing` and count the run
    pub fn start_run(&mut self) {
        self.state = HandleState::Playing;
        self.runs += 1;
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Number of completions waiting for this run
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Attach a completion for the current run
    ///
    /// Returns the completions displaced under [`SupersedePolicy::Notify`];
    /// they are owed a [`Superseded`](crate::PlaybackOutcome::Superseded)
    /// outcome. Under `Replace` the old completion is dropped here.
    pub fn attach(
        &mut self,
        completion: Option<Completion>,
        policy: SupersedePolicy,
    ) -> Vec<Completion> {
        let displaced = match policy {
            SupersedePolicy::Queue => Vec::new(),
            SupersedePolicy::Replace => {
                self.pending.clear();
                Vec::new()
            }
            SupersedePolicy::Notify => std::mem::take(&mut self.pending),
        };
        self.pending.extend(completion);
        displaced
    }

    /// Take every pending completion, leaving none behind
    pub fn take_pending(&mut self) -> Vec<Completion> {
        std::mem::take(&mut self.pending)
    }
}

impl<E: fmt::Debug> fmt::Debug for PlaybackHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackHandle")
            .field("source_id", &self.source_id)
            .field("element", &self.element)
            .field("volume", &self.volume)
            .field("state", &self.state)
            .field("pending", &self.pending.len())
            .field("runs", &self.runs)
            .finish()
    }
}

/// Page-lifetime collection of handles keyed by source identifier
///
/// Holds at most one handle per source.
#[derive(Debug)]
pub struct PlaybackRegistry<E> {
    handles: HashMap<String, PlaybackHandle<E>>,
}

impl<E> PlaybackRegistry<E> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    pub fn get(&self, source_id: &str) -> Option<&PlaybackHandle<E>> {
        self.handles.get(source_id)
    }

    pub fn get_mut(&mut self, source_id: &str) -> Option<&mut PlaybackHandle<E>> {
        self.handles.get_mut(source_id)
    }

    /// Register a handle
    ///
    /// A handle already registered under the same source is returned
    /// instead of being overwritten.
    pub fn insert(&mut self, handle: PlaybackHandle<E>) -> Result<(), PlaybackHandle<E>> {
        if self.handles.contains_key(handle.source_id()) {
            return Err(handle);
        }
        self.handles.insert(handle.source_id.clone(), handle);
        Ok(())
    }

    pub fn remove(&mut self, source_id: &str) -> Option<PlaybackHandle<E>> {
        self.handles.remove(source_id)
    }

    /// Remove every handle
    pub fn drain(&mut self) -> Vec<PlaybackHandle<E>> {
        self.handles.drain().map(|(_, handle)| handle).collect()
    }

    pub fn contains(&self, source_id: &str) -> bool {
        self.handles.contains_key(source_id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Registered source identifiers, in no particular order
    pub fn source_ids(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }
}

impl<E> Default for PlaybackRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
