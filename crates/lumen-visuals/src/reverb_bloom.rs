//! Particle-bloom visualizer for the reverb panel.
//!
//! On every detected transient, if the reverb is audibly mixed in, a burst
//! of particles is scheduled after the configured pre-delay. Particles
//! drift outward in depth, fade with their remaining life, and are culled
//! once spent. The total population is capped so an arbitrarily dense
//! transient stream cannot grow memory or render cost without bound.

use lumen_core::{
    AudioSignal, FrameRng, GlobalSettings, Particle, PluginKind, PluginSettings, ReverbSettings,
    Viewport, Visualizer, VisualizerSnapshot,
};

/// Normalized mix below this spawns nothing.
const MIX_THRESHOLD: f32 = 0.01;
/// Smallest burst once a burst happens at all.
const MIN_BURST: usize = 10;
/// Hard cap on the live population; oldest particles are dropped first.
const MAX_PARTICLES: usize = 300;
/// Depth travelled per frame at motion multiplier 1.0.
const BASE_DEPTH_STEP: f32 = 0.02;
/// Lateral jitter per frame, pixels.
const DRIFT_STEP: f32 = 1.5;
/// Particles dimmer than this are culled.
const FADE_FLOOR: f32 = 0.02;
/// Lifetime at size 0, in depth units.
const LIFE_BASE: f32 = 1.5;
/// Additional lifetime at size 100, in depth units.
const LIFE_SPAN: f32 = 2.5;

/// A burst scheduled but not yet spawned. Plain data: dropping the bridge
/// or scheduling a newer burst discards it, which is the whole teardown
/// story for pre-delay.
#[derive(Debug, Clone, Copy)]
struct PendingBurst {
    due: f64,
}

/// Bridge-private particle state; the render [`Particle`] is derived from
/// it each frame so fade math never accumulates rounding.
#[derive(Debug, Clone, Copy)]
struct Mote {
    x: f32,
    y: f32,
    depth: f32,
    lifetime: f32,
    size: f32,
    hue: f32,
    base_opacity: f32,
}

impl Mote {
    fn remaining(&self) -> f32 {
        (1.0 - self.depth / self.lifetime).clamp(0.0, 1.0)
    }

    fn to_particle(self) -> Particle {
        Particle {
            x: self.x,
            y: self.y,
            depth: self.depth,
            lifetime: self.lifetime,
            size: self.size,
            hue: self.hue,
            opacity: self.base_opacity * self.remaining(),
        }
    }
}

/// Particle-bloom bridge for the reverb panel.
pub struct ReverbBloom {
    settings: ReverbSettings,
    motes: Vec<Mote>,
    pending: Option<PendingBurst>,
    rng: FrameRng,
}

impl ReverbBloom {
    /// Create a bridge from the panel's initial settings.
    pub fn new(settings: ReverbSettings) -> Self {
        Self::with_seed(settings, 0x5EED_B100)
    }

    /// Create a bridge with a fixed RNG seed, for reproducible runs.
    pub fn with_seed(settings: ReverbSettings, seed: u32) -> Self {
        Self {
            settings,
            motes: Vec::new(),
            pending: None,
            rng: FrameRng::new(seed),
        }
    }

    /// Live particle count.
    pub fn particle_count(&self) -> usize {
        self.motes.len()
    }

    /// Whether a burst is scheduled but not yet spawned.
    pub fn has_pending_burst(&self) -> bool {
        self.pending.is_some()
    }

    fn spawn_burst(
        &mut self,
        settings: &ReverbSettings,
        mix_norm: f32,
        viewport: Viewport,
        global: &GlobalSettings,
    ) {
        let tier_max = global.visualizer_complexity.max_burst();
        let count = ((tier_max as f32) * mix_norm).round() as usize;
        let count = count.clamp(MIN_BURST, tier_max);

        let (cx, cy) = viewport.center();
        let spread_x = viewport.width * 0.12;
        let spread_y = viewport.height * 0.12;
        let size_norm = settings.size / 100.0;
        let hue = settings.mood.hue();

        for _ in 0..count {
            let lifetime = (LIFE_BASE + size_norm * LIFE_SPAN) * self.rng.next_range(0.85, 1.15);
            self.motes.push(Mote {
                x: cx + self.rng.next_signed() * spread_x,
                y: cy + self.rng.next_signed() * spread_y,
                depth: 0.0,
                lifetime: lifetime.max(0.1),
                size: self.rng.next_range(2.0, 10.0),
                hue,
                base_opacity: self.rng.next_range(0.55, 1.0),
            });
        }

        // Bound the population by dropping the oldest excess.
        if self.motes.len() > MAX_PARTICLES {
            let excess = self.motes.len() - MAX_PARTICLES;
            self.motes.drain(..excess);
        }
    }

    fn step_motes(&mut self, global: &GlobalSettings) {
        let step = BASE_DEPTH_STEP / global.motion_multiplier();
        for mote in &mut self.motes {
            mote.depth += step;
            mote.x += self.rng.next_signed() * DRIFT_STEP;
            mote.y += self.rng.next_signed() * DRIFT_STEP * 0.6;
        }
        self.motes
            .retain(|m| m.depth <= m.lifetime && m.base_opacity * m.remaining() >= FADE_FLOOR);
    }
}

impl Visualizer for ReverbBloom {
    fn kind(&self) -> PluginKind {
        PluginKind::Reverb
    }

    fn sync_settings(&mut self, settings: &PluginSettings) {
        if let Some(reverb) = settings.as_reverb() {
            self.settings = reverb.clone();
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

        if signal.transient && mix_norm > MIX_THRESHOLD {
            // A fresh transient supersedes any burst still waiting on its
            // pre-delay.
            self.pending = Some(PendingBurst {
                due: signal.time + f64::from(settings.predelay_ms) / 1000.0,
            });
        }

        if self.pending.is_some_and(|p| signal.time >= p.due) {
            self.pending = None;
            // Re-check the mix at spawn time: it may have been pulled to
            // zero during the pre-delay.
            if mix_norm > MIX_THRESHOLD {
                self.spawn_burst(&settings, mix_norm, viewport, global);
            }
        }

        self.step_motes(global);

        VisualizerSnapshot::Particles {
            hue: settings.mood.hue(),
            activity: (mix_norm * signal.level).clamp(0.0, 1.0),
            particles: self.motes.iter().map(|m| m.to_particle()).collect(),
        }
    }

    fn reset(&mut self) {
        self.motes.clear();
        self.pending = None;
    }
}
