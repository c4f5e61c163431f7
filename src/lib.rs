//! Fuzzy "go to page" search for documentation sites.
//!
//! [`search`] scores and ranks pages from a pre-built index, [`overlay`] is the
//! keyboard-driven navigation state machine on top of it, and [`scroll`] drives
//! the reading progress bar. [`server`] exposes all of it over MCP.

pub mod bindings;
pub mod config;
pub mod error;
pub mod overlay;
pub mod scroll;
pub mod search;
pub mod server;
pub mod session;
pub mod tools;
pub mod tracing;

pub use bindings::{Bindings, ElementIds, ElementLookup};
pub use config::Config;
pub use error::{BindError, ConfigError, IndexError, Result};
pub use overlay::{Effect, EffectSink, Event, Overlay, Phase, SearchState};
pub use scroll::{ScrollProgress, ScrollState, ScrollTracker};
pub use search::{Document, DocumentIndex, RankedResult, SearchEngine};
pub use server::GotoServer;
pub use session::GotoState;
