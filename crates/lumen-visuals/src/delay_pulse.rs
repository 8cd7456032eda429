//! Echo-pulse visualizer for the delay panel.
//!
//! A transient launches an expanding ring; further rings regenerate at the
//! configured delay time, each dimmed by the feedback amount, until the
//! chain decays below audibility. Rings expand outward and fade as they
//! approach the panel edge.

use lumen_core::{
    AudioSignal, DelaySettings, GlobalSettings, PluginKind, PluginSettings, Pulse, Viewport,
    Visualizer, VisualizerSnapshot,
};

/// Normalized mix below this spawns nothing.
const MIX_THRESHOLD: f32 = 0.01;
/// Echo chains die once their next intensity would fall below this.
const ECHO_FLOOR: f32 = 0.05;
/// Ring radius growth per frame at motion multiplier 1.0, pixels.
const RING_STEP: f32 = 3.0;
/// Rings dimmer than this are culled.
const FADE_FLOOR: f32 = 0.02;
/// Hard cap on live rings; oldest dropped first.
const MAX_RINGS: usize = 24;

/// The next echo of the active chain.
#[derive(Debug, Clone, Copy)]
struct EchoTimer {
    due: f64,
    intensity: f32,
}

/// Bridge-private ring state. Render intensity is derived from the birth
/// intensity and the ring's progress toward the panel edge.
#[derive(Debug, Clone, Copy)]
struct EchoRing {
    radius: f32,
    birth_intensity: f32,
    hue: f32,
}

/// Echo-pulse bridge for the delay panel.
pub struct DelayPulse {
    settings: DelaySettings,
    rings: Vec<EchoRing>,
    next_echo: Option<EchoTimer>,
}

impl DelayPulse {
    /// Create a bridge from the panel's initial settings.
    pub fn new(settings: DelaySettings) -> Self {
        Self {
            settings,
            rings: Vec::new(),
            next_echo: None,
        }
    }

    /// Live ring count.
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Whether an echo chain is still regenerating.
    pub fn has_active_chain(&self) -> bool {
        self.next_echo.is_some()
    }

    fn spawn_ring(&mut self, intensity: f32, hue: f32) {
        self.rings.push(EchoRing {
            radius: 0.0,
            birth_intensity: intensity.clamp(0.0, 1.0),
            hue,
        });
        if self.rings.len() > MAX_RINGS {
            let excess = self.rings.len() - MAX_RINGS;
            self.rings.drain(..excess);
        }
    }

    fn max_radius(viewport: Viewport) -> f32 {
        (viewport.width.hypot(viewport.height) * 0.5).max(1.0)
    }
}

impl Visualizer for DelayPulse {
    fn kind(&self) -> PluginKind {
        PluginKind::Delay
    }

    fn sync_settings(&mut self, settings: &PluginSettings) {
        if let Some(delay) = settings.as_delay() {
            self.settings = delay.clone();
        }
    }

    fn advance(
        &mut self,
        signal: &AudioSignal,
        viewport: Viewport,
        global: &GlobalSettings,
    ) -> VisualizerSnapshot {
        let settings = self.settings.sanitized();
        let mix_norm = settings.mix / 100.0;
        let feedback_norm = settings.feedback / 100.0;
        let interval = f64::from(settings.time_ms) / 1000.0;
        let hue = settings.mood.hue();

        if signal.transient && mix_norm > MIX_THRESHOLD {
            // A new hit restarts the chain; the superseded echo is gone.
            self.spawn_ring(mix_norm, hue);
            self.next_echo = Some(EchoTimer {
                due: signal.time + interval,
                intensity: mix_norm * feedback_norm,
            });
        } else if let Some(echo) = self.next_echo
            && signal.time >= echo.due
        {
            if echo.intensity >= ECHO_FLOOR {
                self.spawn_ring(echo.intensity, hue);
                self.next_echo = Some(EchoTimer {
                    due: echo.due + interval,
                    intensity: echo.intensity * feedback_norm,
                });
            } else {
                self.next_echo = None;
            }
        }

        let step = RING_STEP / global.motion_multiplier();
        let max_radius = Self::max_radius(viewport);
        for ring in &mut self.rings {
            ring.radius += step;
        }
        self.rings.retain(|r| {
            r.radius <= max_radius
                && r.birth_intensity * (1.0 - r.radius / max_radius) >= FADE_FLOOR
        });

        VisualizerSnapshot::Pulses {
            activity: (mix_norm * signal.level).clamp(0.0, 1.0),
            rings: self
                .rings
                .iter()
                .map(|r| Pulse {
                    radius: r.radius,
                    intensity: r.birth_intensity * (1.0 - r.radius / max_radius).clamp(0.0, 1.0),
                    hue: r.hue,
                })
                .collect(),
        }
    }

    fn reset(&mut self) {
        self.rings.clear();
        self.next_echo = None;
    }
}
