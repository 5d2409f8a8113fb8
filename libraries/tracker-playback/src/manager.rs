//! Playback manager - core orchestration
//!
//! Owns the registry, drives the host, and turns host notifications into
//! completion deliveries.

use crate::{
    error::{PlaybackError, Result},
    host::{ElementSpec, MediaEvent, MediaHost},
    registry::{PlaybackHandle, PlaybackRegistry},
    types::{
        Completion, EvictionPolicy, HandleState, PlayOptions, PlaybackConfig, PlaybackOutcome,
        ReusePolicy,
    },
};
use std::fmt;
use tracing::{debug, info, warn};

/// Completions released by a state transition
///
/// The manager never calls completions while it is mid-transition. Callers
/// that keep the manager behind a `RefCell` release the borrow first, then
/// call [`Resolved::deliver`], so a completion may safely issue another
/// `play`.
#[must_use = "completions are only delivered by calling `deliver`"]
#[derive(Default)]
pub struct Resolved {
    deliveries: Vec<(Completion, PlaybackOutcome)>,
}

impl Resolved {
    fn push(&mut self, completion: Completion, outcome: PlaybackOutcome) {
        self.deliveries.push((completion, outcome));
    }

    /// Number of completions waiting to be called
    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// Outcomes in delivery order
    pub fn outcomes(&self) -> impl Iterator<Item = PlaybackOutcome> + '_ {
        self.deliveries.iter().map(|(_, outcome)| *outcome)
    }

    /// Call every completion with its outcome
    pub fn deliver(self) {
        for (completion, outcome) in self.deliveries {
            completion(outcome);
        }
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.outcomes()).finish()
    }
}

/// Audio cue playback manager
///
/// Keeps at most one host element per source identifier, reuses it for
/// repeated requests, and reports the end of each run through the request's
/// completion.
///
/// Supersede contract: a request for a source whose run has not finished
/// takes over that run. What happens to the earlier completion is decided by
/// [`SupersedePolicy`](crate::SupersedePolicy); by default it is dropped
/// without being called.
pub struct PlaybackManager<H: MediaHost> {
    config: PlaybackConfig,
    registry: PlaybackRegistry<H::Element>,
    host: H,
}

impl<H: MediaHost> PlaybackManager<H> {
    /// Create a manager from its injected dependencies
    pub fn new(config: PlaybackConfig, registry: PlaybackRegistry<H::Element>, host: H) -> Self {
        info!(
            "Playback manager ready (enabled: {}, reuse: {:?}, supersede: {:?}, eviction: {:?})",
            config.enabled, config.reuse, config.supersede, config.eviction
        );
        Self {
            config,
            registry,
            host,
        }
    }

    /// Create a manager with an empty registry
    pub fn with_host(config: PlaybackConfig, host: H) -> Self {
        Self::new(config, PlaybackRegistry::new(), host)
    }

    // ===== Requests =====

    /// Play `source_id`, reporting the end of the run to `on_complete`
    ///
    /// With playback disabled `on_complete` receives
    /// [`PlaybackOutcome::Disabled`] before this returns. Host failures are
    /// absorbed: the completion is then never called.
    pub fn play(
        &mut self,
        source_id: &str,
        options: PlayOptions,
        on_complete: Option<Completion>,
    ) -> Result<()> {
        self.request(source_id, options, on_complete)
            .map(Resolved::deliver)
    }

    /// Perform a play request without calling any completion
    ///
    /// Returns the completions owed right away (disabled playback, or
    /// callers displaced under the `Notify` policy).
    pub fn request(
        &mut self,
        source_id: &str,
        options: PlayOptions,
        on_complete: Option<Completion>,
    ) -> Result<Resolved> {
        if source_id.is_empty() {
            return Err(PlaybackError::EmptySourceId);
        }

        let mut resolved = Resolved::default();

        if !self.config.enabled {
            debug!("Playback disabled, not playing {}", source_id);
            if let Some(completion) = on_complete {
                resolved.push(completion, PlaybackOutcome::Disabled);
            }
            return Ok(resolved);
        }

        let volume = options.sanitized_volume();

        if let Some(handle) = self.registry.get_mut(source_id) {
            debug!("{} is cached ({:?})", source_id, handle.state());
            for displaced in handle.attach(on_complete, self.config.supersede) {
                resolved.push(displaced, PlaybackOutcome::Superseded);
            }
            Self::reuse(&mut self.host, handle, volume, self.config.reuse);
            return Ok(resolved);
        }

        let spec = ElementSpec {
            source_id: source_id.to_string(),
            preload: self.config.preload,
            attributes: options.element_attributes(),
        };
        let element = match self.host.create(&spec) {
            Ok(element) => element,
            Err(e) => {
                warn!("Could not create element for {}: {}", source_id, e);
                return Ok(resolved);
            }
        };

        let mut handle = PlaybackHandle::new(source_id, element, volume);
        handle.attach(on_complete, self.config.supersede);
        handle.set_state(HandleState::Loading);

        let inserted = self.registry.insert(handle);
        debug_assert!(inserted.is_ok(), "{} registered twice", source_id);

        debug!("Loading {} ({} handles)", source_id, self.registry.len());
        Ok(resolved)
    }

    fn reuse(
        host: &mut H,
        handle: &mut PlaybackHandle<H::Element>,
        volume: Option<f32>,
        policy: ReusePolicy,
    ) {
        match handle.state() {
            HandleState::Created | HandleState::Loading => {
                // The outstanding "ready" notification starts the run
                handle.queue_volume(volume);
            }
            HandleState::Ready | HandleState::Playing | HandleState::Finished => match policy {
                ReusePolicy::Restart => {
                    if let Some(volume) = volume {
                        host.set_volume(handle.element(), volume);
                    }
                    host.rewind(handle.element());
                    host.play(handle.element());
                    handle.start_run();
                }
                ReusePolicy::Reload => {
                    handle.queue_volume(volume);
                    host.reload(handle.element());
                    handle.set_state(HandleState::Loading);
                }
            },
        }
    }

    // ===== Host notifications =====

    /// Apply a host notification and deliver the completions it releases
    pub fn handle_event(&mut self, event: MediaEvent) {
        self.resolve(event).deliver();
    }

    /// Apply a host notification without calling any completion
    pub fn resolve(&mut self, event: MediaEvent) -> Resolved {
        let mut resolved = Resolved::default();

        let Some(handle) = self.registry.get_mut(event.source_id()) else {
            debug!("Ignoring {:?}: source not registered", event);
            return resolved;
        };

        match event {
            MediaEvent::Ready { ref source_id } => {
                if handle.state() != HandleState::Loading {
                    debug!("Ignoring ready for {} in {:?}", source_id, handle.state());
                    return resolved;
                }
                handle.set_state(HandleState::Ready);
                if let Some(volume) = handle.take_volume() {
                    self.host.set_volume(handle.element(), volume);
                }
                self.host.play(handle.element());
                handle.start_run();
                debug!("Playing {} (run {})", source_id, handle.runs());
            }
            MediaEvent::Finished { ref source_id } => {
                if handle.state() != HandleState::Playing {
                    debug!("Ignoring finish for {} in {:?}", source_id, handle.state());
                    return resolved;
                }
                handle.set_state(HandleState::Finished);
                for completion in handle.take_pending() {
                    resolved.push(completion, PlaybackOutcome::Finished);
                }
                debug!("Finished {}", source_id);

                if self.config.eviction == EvictionPolicy::RemoveOnFinish {
                    self.evict(source_id);
                }
            }
        }

        resolved
    }

    // ===== Registry maintenance =====

    /// Forget a source and release its element
    ///
    /// Pending completions are dropped without being called.
    pub fn evict(&mut self, source_id: &str) -> bool {
        let Some(handle) = self.registry.remove(source_id) else {
            return false;
        };
        if handle.pending_len() > 0 {
            debug!(
                "Evicting {} with {} pending completion(s)",
                source_id,
                handle.pending_len()
            );
        }
        self.host.remove(handle.into_element());
        true
    }

    /// Evict every source
    pub fn clear(&mut self) {
        let handles = self.registry.drain();
        info!("Clearing {} playback handle(s)", handles.len());
        for handle in handles {
            self.host.remove(handle.into_element());
        }
    }

    // ===== State queries =====

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Lifecycle state of the handle for `source_id`, if registered
    pub fn state(&self, source_id: &str) -> Option<HandleState> {
        self.registry.get(source_id).map(PlaybackHandle::state)
    }

    pub fn contains(&self, source_id: &str) -> bool {
        self.registry.contains(source_id)
    }

    /// Number of registered handles
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn registry(&self) -> &PlaybackRegistry<H::Element> {
        &self.registry
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H> fmt::Debug for PlaybackManager<H>
where
    H: MediaHost + fmt::Debug,
    H::Element: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackManager")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("host", &self.host)
            .finish()
    }
}
