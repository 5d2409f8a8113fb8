//! Property-based tests for the playback manager
//!
//! Uses proptest to drive random interleavings of requests and host
//! notifications and checks the registry and delivery invariants.

use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracker_playback::{
    Completion, ElementSpec, EvictionPolicy, MediaEvent, MediaHost, PlayOptions, PlaybackConfig,
    PlaybackManager, PlaybackOutcome, ReusePolicy, SupersedePolicy,
};

// ===== Helpers =====

/// Host that only counts constructions per source
#[derive(Default)]
struct CountingHost {
    created: HashMap<String, usize>,
}

impl MediaHost for CountingHost {
    type Element = String;

    fn create(&mut self, spec: &ElementSpec) -> tracker_playback::Result<String> {
        *self.created.entry(spec.source_id.clone()).or_default() += 1;
        Ok(spec.source_id.clone())
    }

    fn set_volume(&mut self, _: &String, _: f32) {}
    fn play(&mut self, _: &String) {}
    fn rewind(&mut self, _: &String) {}
    fn reload(&mut self, _: &String) {}
    fn remove(&mut self, _: String) {}
}

#[derive(Debug, Clone)]
enum Step {
    Play(usize),
    Ready(usize),
    Finished(usize),
}

const SOURCES: [&str; 4] = ["a.mp3", "b.mp3", "c.ogg", "d.wav"];

fn arbitrary_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..SOURCES.len()).prop_map(Step::Play),
        (0..SOURCES.len()).prop_map(Step::Ready),
        (0..SOURCES.len()).prop_map(Step::Finished),
    ]
}

fn arbitrary_config() -> impl Strategy<Value = PlaybackConfig> {
    (
        prop_oneof![Just(ReusePolicy::Restart), Just(ReusePolicy::Reload)],
        prop_oneof![
            Just(SupersedePolicy::Replace),
            Just(SupersedePolicy::Notify),
            Just(SupersedePolicy::Queue)
        ],
    )
        .prop_map(|(reuse, supersede)| PlaybackConfig {
            reuse,
            supersede,
            ..PlaybackConfig::enabled()
        })
}

/// Delivery count per request id
type Deliveries = Rc<RefCell<HashMap<usize, Vec<PlaybackOutcome>>>>;

fn completion(deliveries: &Deliveries, request: usize) -> Completion {
    let sink = Rc::clone(deliveries);
    Box::new(move |outcome: PlaybackOutcome| {
        sink.borrow_mut().entry(request).or_default().push(outcome);
    })
}

// ===== Property Tests =====

proptest! {
    /// Property: a source never has more than one live element
    #[test]
    fn one_element_per_source(
        config in arbitrary_config(),
        steps in prop::collection::vec(arbitrary_step(), 1..80)
    ) {
        let mut manager = PlaybackManager::with_host(config, CountingHost::default());
        let mut requested = HashSet::new();

        for step in steps {
            match step {
                Step::Play(i) => {
                    requested.insert(SOURCES[i]);
                    manager.play(SOURCES[i], PlayOptions::default(), None).unwrap();
                }
                Step::Ready(i) => manager.handle_event(MediaEvent::Ready { source_id: SOURCES[i].into() }),
                Step::Finished(i) => manager.handle_event(MediaEvent::Finished { source_id: SOURCES[i].into() }),
            }
        }

        prop_assert_eq!(manager.len(), requested.len());
        prop_assert!(manager.host().created.values().all(|&n| n == 1));
    }

    /// Property: no completion is ever called twice
    #[test]
    fn completions_delivered_at_most_once(
        config in arbitrary_config(),
        steps in prop::collection::vec(arbitrary_step(), 1..80)
    ) {
        let mut manager = PlaybackManager::with_host(config, CountingHost::default());
        let deliveries: Deliveries = Rc::default();

        for (request, step) in steps.into_iter().enumerate() {
            match step {
                Step::Play(i) => manager
                    .play(SOURCES[i], PlayOptions::default(), Some(completion(&deliveries, request)))
                    .unwrap(),
                Step::Ready(i) => manager.handle_event(MediaEvent::Ready { source_id: SOURCES[i].into() }),
                Step::Finished(i) => manager.handle_event(MediaEvent::Finished { source_id: SOURCES[i].into() }),
            }
        }

        prop_assert!(deliveries.borrow().values().all(|outcomes| outcomes.len() == 1));
    }

    /// Property: under Replace, callers only ever see Finished
    #[test]
    fn replace_never_reports_superseded(
        steps in prop::collection::vec(arbitrary_step(), 1..80)
    ) {
        let mut manager = PlaybackManager::with_host(PlaybackConfig::enabled(), CountingHost::default());
        let deliveries: Deliveries = Rc::default();

        for (request, step) in steps.into_iter().enumerate() {
            match step {
                Step::Play(i) => manager
                    .play(SOURCES[i], PlayOptions::default(), Some(completion(&deliveries, request)))
                    .unwrap(),
                Step::Ready(i) => manager.handle_event(MediaEvent::Ready { source_id: SOURCES[i].into() }),
                Step::Finished(i) => manager.handle_event(MediaEvent::Finished { source_id: SOURCES[i].into() }),
            }
        }

        prop_assert!(deliveries
            .borrow()
            .values()
            .flatten()
            .all(|outcome| *outcome == PlaybackOutcome::Finished));
    }

    /// Property: disabled playback answers every request synchronously
    #[test]
    fn disabled_answers_everything(
        plays in prop::collection::vec(0..SOURCES.len(), 1..30)
    ) {
        let mut manager = PlaybackManager::with_host(PlaybackConfig::default(), CountingHost::default());
        let deliveries: Deliveries = Rc::default();

        for (request, &i) in plays.iter().enumerate() {
            manager
                .play(SOURCES[i], PlayOptions::default(), Some(completion(&deliveries, request)))
                .unwrap();
            prop_assert_eq!(
                deliveries.borrow().get(&request).cloned(),
                Some(vec![PlaybackOutcome::Disabled])
            );
        }

        prop_assert!(manager.is_empty());
        prop_assert!(manager.host().created.is_empty());
    }

    /// Property: with RemoveOnFinish, only unfinished sources stay cached
    #[test]
    fn remove_on_finish_leaves_no_finished_handles(
        steps in prop::collection::vec(arbitrary_step(), 1..80)
    ) {
        let config = PlaybackConfig {
            eviction: EvictionPolicy::RemoveOnFinish,
            ..PlaybackConfig::enabled()
        };
        let mut manager = PlaybackManager::with_host(config, CountingHost::default());

        for step in steps {
            match step {
                Step::Play(i) => manager.play(SOURCES[i], PlayOptions::default(), None).unwrap(),
                Step::Ready(i) => manager.handle_event(MediaEvent::Ready { source_id: SOURCES[i].into() }),
                Step::Finished(i) => manager.handle_event(MediaEvent::Finished { source_id: SOURCES[i].into() }),
            }
        }

        for source in SOURCES {
            prop_assert_ne!(manager.state(source), Some(tracker_playback::HandleState::Finished));
        }
    }

    /// Property: sanitized volume always lies in [0, 1]
    #[test]
    fn sanitized_volume_in_range(volume in proptest::num::f32::ANY) {
        if let Some(v) = PlayOptions::with_volume(volume).sanitized_volume() {
            prop_assert!((0.0..=1.0).contains(&v));
        } else {
            prop_assert!(volume.is_nan());
        }
    }
}
