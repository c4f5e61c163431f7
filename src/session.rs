//! Shared state behind the MCP tools.
//!
//! The search engine is built once and shared read-only. The overlay and
//! scroll tracker belong to the single attached page session and are only
//! touched under its mutex, one tool call at a time.
//!
//! The server owns the debounced blur close. When a timer fires, the effects
//! it produces are queued on the session and delivered ahead of the effects of
//! the next `overlay_event` call.

use crate::bindings::Bindings;
use crate::config::Config;
use crate::overlay::{Effect, EffectSink, Event, Overlay};
use crate::scroll::ScrollTracker;
use crate::search::SearchEngine;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// Overlay and scroll state for one attached host page.
#[derive(Debug)]
pub struct Session {
    pub bindings: Bindings,
    pub overlay: Overlay,
    pub scroll: ScrollTracker,
    /// Distinguishes this session from the ones `attach` replaced
    generation: u64,
    /// Effects produced outside a tool call, not yet seen by the client
    deferred: Vec<Effect>,
}

impl Session {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Takes the effects queued by fired timers, oldest first.
    pub fn take_deferred(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.deferred)
    }
}

/// Process-wide state shared by every tool handler.
#[derive(Debug)]
pub struct GotoState {
    engine: Arc<SearchEngine>,
    config: Config,
    session: Mutex<Option<Session>>,
    generations: AtomicU64,
}

impl GotoState {
    pub fn new(engine: Arc<SearchEngine>, config: Config) -> Self {
        Self {
            engine,
            config,
            session: Mutex::new(None),
            generations: AtomicU64::new(0),
        }
    }

    pub fn engine(&self) -> &Arc<SearchEngine> {
        &self.engine
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces any existing session with a fresh one for `bindings`.
    pub async fn attach(&self, bindings: Bindings) {
        let session = Session {
            bindings,
            overlay: Overlay::new(
                self.engine.clone(),
                self.config.overlay_settings(),
                self.config.keymap(),
            ),
            scroll: self.config.scroll_tracker(),
            generation: self.generations.fetch_add(1, Ordering::Relaxed),
            deferred: Vec::new(),
        };
        let replaced = self.session.lock().await.replace(session).is_some();
        tracing::info!(
            "Attached overlay session{}",
            if replaced { " (replacing previous)" } else { "" }
        );
    }

    pub async fn is_attached(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Runs `f` against the attached session, or returns `None` if nothing is
    /// attached.
    pub async fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut guard = self.session.lock().await;
        guard.as_mut().map(f)
    }
}

/// Effect executor for the MCP host.
///
/// Everything except delayed closes is reported back to the client verbatim;
/// `ScheduleClose` also becomes a timer the server arms itself.
#[derive(Debug, Default)]
pub struct HostSink {
    pub effects: Vec<Effect>,
    pub timers: Vec<(u64, Duration)>,
}

impl EffectSink for HostSink {
    fn apply(&mut self, effect: &Effect) {
        if let Effect::ScheduleClose { token, delay } = effect {
            self.timers.push((*token, *delay));
        }
        self.effects.push(effect.clone());
    }
}

/// Arms the debounced close timers requested by a transition in the session
/// of `generation`.
///
/// Each timer dispatches `CloseTimerElapsed` when due; the state machine
/// ignores it if focus came back or a newer timer replaced it. Timers whose
/// session was replaced in the meantime do nothing.
pub fn spawn_close_timers(state: &Arc<GotoState>, generation: u64, timers: Vec<(u64, Duration)>) {
    for (token, delay) in timers {
        let state = Arc::clone(state);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state
                .with_session(|session| {
                    if session.generation != generation {
                        tracing::debug!(
                            "Dropping close timer {} from replaced session {}",
                            token,
                            generation
                        );
                        return;
                    }
                    let mut sink = HostSink::default();
                    session
                        .overlay
                        .dispatch(Event::CloseTimerElapsed { token }, &mut sink);
                    tracing::debug!("Close timer {} fired: {:?}", token, sink.effects);
                    session.deferred.extend(sink.effects);
                })
                .await;
        });
    }
}
