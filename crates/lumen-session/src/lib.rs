//! Lumen Session - session layer for the lumen rack
//!
//! This crate owns everything that outlives a single frame: preset
//! persistence, global settings, the sidechain routing graph, and the
//! [`Session`] controller that wires the parameter store, MIDI router,
//! signal generator, and visualizer bridges together.
//!
//! # Core Abstractions
//!
//! - [`Session`] - The frame-driven rack controller
//! - [`Preset`] / [`PresetStore`] - Named wholesale settings snapshots on
//!   disk (TOML)
//! - [`SidechainGraph`] - Directed one-to-one trigger links between
//!   plugins
//! - [`SessionEvent`] / [`EventSink`] - Synchronous observer interface
//!   for every state change
//! - [`SessionError`] - Error taxonomy; everything degrades to "no-op,
//!   previous state retained"
//!
//! # Persistence
//!
//! State lives under the platform config directory (see [`paths`]):
//! `settings.toml` for global settings, `presets/*.toml` for presets.
//! Sessions built with [`SessionOptions::in_memory`] skip persistence
//! entirely.

pub mod error;
pub mod event;
pub mod layout;
pub mod paths;
pub mod preset;
pub mod session;
pub mod settings;
pub mod sidechain;

pub use error::SessionError;
pub use event::{EventSink, NullSink, SessionEvent};
pub use layout::{PanelLayout, RackLayout};
pub use preset::{Overwrite, Preset, PresetStore};
pub use session::{Session, SessionFrame, SessionOptions};
pub use settings::{load_global_settings, save_global_settings};
pub use sidechain::SidechainGraph;
