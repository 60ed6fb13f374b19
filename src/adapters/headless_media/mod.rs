// Headless media adapter - Simulated media element for replays and tests

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::ports::*;

#[derive(Debug, Default)]
struct MediaState {
    source: Option<String>,
    duration: f64,
    current_time: f64,
    volume: f64,
    playing: bool,
    load_pending: bool,
    fail_next: Option<String>,
    events: VecDeque<MediaEvent>,
}

/// Media element that "plays" by advancing a clock.
///
/// Sources are resolved against a table of known durations; an unknown
/// source fails to load the way a browser reports a network error.
pub struct HeadlessMediaElement {
    library: HashMap<String, f64>,
    state: Mutex<MediaState>,
}

impl HeadlessMediaElement {
    pub fn new(library: HashMap<String, f64>) -> Self {
        Self {
            library,
            state: Mutex::new(MediaState {
                volume: 1.0,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MediaState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next load fail with `reason`
    pub fn fail_next_load(&self, reason: &str) {
        self.lock().fail_next = Some(reason.to_string());
    }

    /// Resolve a pending load, queueing metadata or an error
    pub fn finish_load(&self) -> Vec<MediaEvent> {
        let mut state = self.lock();
        if state.load_pending {
            state.load_pending = false;
            let failure = state.fail_next.take();
            let source = state.source.clone();
            let event = match (failure, source) {
                (Some(reason), _) => MediaEvent::Error { reason },
                (None, Some(source)) => match self.library.get(&source) {
                    Some(&duration) => {
                        state.duration = duration;
                        MediaEvent::MetadataLoaded { duration }
                    }
                    None => MediaEvent::Error {
                        reason: format!("Source not supported: {}", source),
                    },
                },
                (None, None) => MediaEvent::Error {
                    reason: "No source".to_string(),
                },
            };
            state.events.push_back(event);
        }
        state.events.drain(..).collect()
    }

    /// Advance the clock by `seconds` and return the resulting events
    pub fn advance(&self, seconds: f64) -> Vec<MediaEvent> {
        let mut state = self.lock();
        if state.playing && seconds > 0.0 {
            state.current_time = (state.current_time + seconds).min(state.duration);
            let current_time = state.current_time;
            trace!(current_time, "Headless media tick");
            state.events.push_back(MediaEvent::TimeUpdate { current_time });
            if current_time >= state.duration {
                state.playing = false;
                state.events.push_back(MediaEvent::PlayStateChanged { playing: false });
            }
        }
        state.events.drain(..).collect()
    }

    /// Events produced by commands since the last drain
    pub fn take_events(&self) -> Vec<MediaEvent> {
        self.lock().events.drain(..).collect()
    }

    pub fn is_playing(&self) -> bool {
        self.lock().playing
    }

    pub fn current_time(&self) -> f64 {
        self.lock().current_time
    }

    pub fn volume(&self) -> f64 {
        self.lock().volume
    }

    pub fn source(&self) -> Option<String> {
        self.lock().source.clone()
    }
}

impl MediaElementPort for HeadlessMediaElement {
    fn load(&self, source_url: &str) {
        let mut state = self.lock();
        debug!(source = source_url, "Headless media load");
        state.source = Some(source_url.to_string());
        state.duration = 0.0;
        state.current_time = 0.0;
        state.playing = false;
        state.load_pending = true;
        state.events.clear();
    }

    fn set_current_time(&self, seconds: f64) {
        let mut state = self.lock();
        state.current_time = seconds.max(0.0).min(state.duration);
        let current_time = state.current_time;
        state.events.push_back(MediaEvent::TimeUpdate { current_time });
    }

    fn set_volume(&self, volume: f64) {
        self.lock().volume = volume;
    }

    fn play(&self) {
        let mut state = self.lock();
        if !state.playing && state.duration > 0.0 {
            state.playing = true;
            state.events.push_back(MediaEvent::PlayStateChanged { playing: true });
        }
    }

    fn pause(&self) {
        let mut state = self.lock();
        if state.playing {
            state.playing = false;
            state.events.push_back(MediaEvent::PlayStateChanged { playing: false });
        }
    }
}
