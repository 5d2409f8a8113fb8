//! Media host abstraction
//!
//! The manager never touches a document directly. Whatever owns real media
//! elements (a browser DOM, a native audio stack, a test double) implements
//! [`MediaHost`] and reports back through [`MediaEvent`].

use crate::error::Result;
use crate::types::Preload;
use std::collections::BTreeMap;

/// Everything the host needs to construct a hidden playable element
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    /// Resource identifier (URL) bound to the element
    pub source_id: String,

    /// Preload hint
    pub preload: Preload,

    /// Extra attributes forwarded from [`PlayOptions`](crate::PlayOptions)
    pub attributes: BTreeMap<String, String>,
}

/// Notifications a host delivers back to the manager
///
/// Hosts must deliver them one at a time; a notification for a handle runs
/// to completion before the next one for the same handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// The element buffered enough data to start
    Ready { source_id: String },

    /// The current run reached its end
    Finished { source_id: String },
}

impl MediaEvent {
    /// Source the notification refers to
    pub fn source_id(&self) -> &str {
        match self {
            MediaEvent::Ready { source_id } | MediaEvent::Finished { source_id } => source_id,
        }
    }
}

/// Environment able to construct and drive playable elements
///
/// `Element` is an opaque handle. The host owns the underlying media object;
/// the manager only keeps the handle to address it later.
pub trait MediaHost {
    /// Handle to one host-owned element
    type Element;

    /// Construct a hidden element for `spec.source_id` and start loading it
    ///
    /// The host must later deliver [`MediaEvent::Ready`] once for it, and
    /// [`MediaEvent::Finished`] once per run after [`MediaHost::play`].
    fn create(&mut self, spec: &ElementSpec) -> Result<Self::Element>;

    /// Set output gain in [0.0, 1.0]
    fn set_volume(&mut self, element: &Self::Element, volume: f32);

    /// Start playback from the current position
    fn play(&mut self, element: &Self::Element);

    /// Move the playback position back to the start
    fn rewind(&mut self, element: &Self::Element);

    /// Drop buffered data and load the source again; a fresh
    /// [`MediaEvent::Ready`] follows
    fn reload(&mut self, element: &Self::Element);

    /// Detach and release an element the manager no longer tracks
    fn remove(&mut self, element: Self::Element);
}

/// Host double that records every call, for unit tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    next_id: usize,
    pub fail_create: bool,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Create(String),
    SetVolume(usize, f32),
    Play(usize),
    Rewind(usize),
    Reload(usize),
    Remove(usize),
}

#[cfg(test)]
impl RecordingHost {
    pub fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

#[cfg(test)]
impl MediaHost for RecordingHost {
    type Element = usize;

    fn create(&mut self, spec: &ElementSpec) -> Result<usize> {
        if self.fail_create {
            return Err(crate::error::PlaybackError::Host("no document".to_string()));
        }
        self.calls.push(HostCall::Create(spec.source_id.clone()));
        self.next_id += 1;
        Ok(self.next_id)
    }

    fn set_volume(&mut self, element: &usize, volume: f32) {
        self.calls.push(HostCall::SetVolume(*element, volume));
    }

    fn play(&mut self, element: &usize) {
        self.calls.push(HostCall::Play(*element));
    }

    fn rewind(&mut self, element: &usize) {
        self.calls.push(HostCall::Rewind(*element));
    }

    fn reload(&mut self, element: &usize) {
        self.calls.push(HostCall::Reload(*element));
    }

    fn remove(&mut self, element: usize) {
        self.calls.push(HostCall::Remove(element));
    }
}
