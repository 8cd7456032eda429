//! Visualizer bridge contract and render snapshots.
//!
//! A visualizer bridge is a small per-plugin simulation object: it owns
//! private mutable state (particle lists, pending bursts) for the lifetime
//! of one mounted panel and produces a render-ready snapshot once per
//! animation frame. The bridge is created when the panel mounts and
//! dropped when it unmounts; remounting starts a fresh simulation, it does
//! not resume. Nothing here is ever persisted.

use serde::Serialize;

use crate::global::GlobalSettings;
use crate::plugin::{PluginKind, PluginSettings};
use crate::signal::AudioSignal;

/// Panel dimensions for one frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Panel width.
    pub width: f32,
    /// Panel height.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport; non-finite or negative dimensions read as zero.
    pub fn new(width: f32, height: f32) -> Self {
        let clean = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: clean(width),
            height: clean(height),
        }
    }

    /// Center point.
    pub fn center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }
}

/// One live particle in a particle-field snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    /// Horizontal position, pixels.
    pub x: f32,
    /// Vertical position, pixels.
    pub y: f32,
    /// Depth travelled so far; the particle dies when this exceeds its
    /// lifetime.
    pub depth: f32,
    /// Total depth this particle may travel.
    pub lifetime: f32,
    /// Render size, pixels.
    pub size: f32,
    /// Hue in degrees.
    pub hue: f32,
    /// Current opacity in `[0.0, 1.0]`.
    pub opacity: f32,
}

/// One expanding ring in a pulse snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pulse {
    /// Current radius, pixels.
    pub radius: f32,
    /// Render intensity in `[0.0, 1.0]`.
    pub intensity: f32,
    /// Hue in degrees.
    pub hue: f32,
}

/// Render-ready output of one visualizer frame.
///
/// Derived each frame from (settings, signal, global settings) plus the
/// bridge's hidden simulation state. Never serialized into presets; the
/// `Serialize` impl exists for diagnostic output only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VisualizerSnapshot {
    /// Particle field (reverb bloom).
    Particles {
        /// Hue shared by the current mood.
        hue: f32,
        /// Overall activity in `[0.0, 1.0]`, for panel glow.
        activity: f32,
        /// Live particles.
        particles: Vec<Particle>,
    },
    /// Expanding echo rings (delay).
    Pulses {
        /// Overall activity in `[0.0, 1.0]`.
        activity: f32,
        /// Live rings.
        rings: Vec<Pulse>,
    },
    /// Gain-reduction meter (compressor).
    Meter {
        /// Smoothed input level in `[0.0, 1.0]`.
        level: f32,
        /// Gain reduction being displayed, dB (positive numbers mean
        /// more reduction).
        gain_reduction_db: f32,
        /// Sidechain squeeze engaged.
        squeezed: bool,
    },
}

impl VisualizerSnapshot {
    /// Number of discrete visual elements in this snapshot.
    pub fn element_count(&self) -> usize {
        match self {
            VisualizerSnapshot::Particles { particles, .. } => particles.len(),
            VisualizerSnapshot::Pulses { rings, .. } => rings.len(),
            VisualizerSnapshot::Meter { .. } => 1,
        }
    }
}

/// Per-plugin frame simulation bridge.
///
/// One boxed instance per mounted panel. The session keeps the bridge's
/// settings in sync by calling [`sync_settings`](Self::sync_settings)
/// before every [`advance`](Self::advance); bridges must not cache stale
/// settings across frames.
///
/// Implementations treat settings defensively: the store performs no
/// validation, so non-finite or out-of-range values must be clamped or
/// ignored, never panicked on.
pub trait Visualizer {
    /// The plugin kind this bridge visualizes.
    fn kind(&self) -> PluginKind;

    /// Adopt the plugin's current settings for subsequent frames.
    ///
    /// Settings of a different kind are ignored.
    fn sync_settings(&mut self, settings: &PluginSettings);

    /// Advance the simulation by one frame and return the next snapshot.
    fn advance(
        &mut self,
        signal: &AudioSignal,
        viewport: Viewport,
        global: &GlobalSettings,
    ) -> VisualizerSnapshot;

    /// Discard all accumulated simulation state, as if freshly mounted.
    fn reset(&mut self);
}
