//! Lumen Core - primitives for the lumen virtual studio rack
//!
//! This crate provides the foundational building blocks shared by every
//! layer of the rack: plugin identity and settings schemas, the parameter
//! store, the simulated audio signal, and the visualizer bridge contract.
//!
//! # Core Abstractions
//!
//! ## Plugin Model
//!
//! - [`PluginKind`] - Fixed set of rack plugin kinds
//! - [`PluginSettings`] - Tagged union of per-kind settings schemas
//! - [`ParamSpec`] - Named-parameter introspection for UI and MIDI mapping
//!
//! ## State
//!
//! - [`ParamStore`] - Clone-on-write settings store; untouched plugins keep
//!   pointer-identical snapshots so observers can detect deltas cheaply
//! - [`GlobalSettings`] - Process-wide animation intensity and complexity tier
//!
//! ## Signal
//!
//! - [`AudioSignal`] - Immutable per-tick signal value
//! - [`SignalGenerator`] - Frame-driven synthetic signal source with
//!   optional clip-envelope playback
//!
//! ## Visualization
//!
//! - [`Visualizer`] - Object-safe per-frame simulation bridge
//! - [`VisualizerSnapshot`] - Render-ready per-frame output
//!
//! # Design Principles
//!
//! - **Single-threaded**: all state advances on one logical thread, once
//!   per display frame; no locks, no background timers
//! - **No-op failure paths**: invalid lookups and rejected operations leave
//!   previous state untouched instead of erroring
//! - **Deterministic**: randomness comes from a seedable [`FrameRng`] so
//!   simulations can be replayed in tests

pub mod global;
pub mod params;
pub mod plugin;
pub mod rng;
pub mod signal;
pub mod store;
pub mod visualizer;

pub use global::{Complexity, GlobalSettings};
pub use params::ParamSpec;
pub use plugin::{
    CompressorSettings, DelaySettings, Mood, PluginKind, PluginSettings, ReverbSettings,
};
pub use rng::FrameRng;
pub use signal::{AudioClip, AudioSignal, Envelope, SignalGenerator, Transport};
pub use store::ParamStore;
pub use visualizer::{Particle, Pulse, Viewport, Visualizer, VisualizerSnapshot};
