//! Simulated audio signal source.
//!
//! The rack does no PCM processing. What the visualizers consume is a
//! synthetic, frame-rate signal: an oscillating level plus a transient
//! flag, stamped with a monotonic time. By default an idle oscillation
//! drives the signal; when a clip envelope is loaded and playing, the
//! envelope drives it instead. Playback control only swaps the driving
//! source, it never rewinds the time base and never touches any
//! visualizer's accumulated state.

use crate::rng::FrameRng;

/// One tick of the simulated signal. Immutable; plugins only read it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSignal {
    /// Seconds since session start. Monotonic, never reset.
    pub time: f64,
    /// Signal level in `[0.0, 1.0]`.
    pub level: f32,
    /// Sudden-onset event detected this tick.
    pub transient: bool,
}

/// Precomputed energy envelope of an audio clip.
///
/// Stored at a fixed point rate (points per second); levels are
/// normalized to `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    points: Vec<f32>,
    rate_hz: f32,
}

impl Envelope {
    /// Build an envelope from precomputed points at the given rate.
    ///
    /// Points are clamped into `[0.0, 1.0]`; non-finite points read as
    /// silence. Rates below 1 Hz are raised to 1 Hz.
    pub fn new(points: Vec<f32>, rate_hz: f32) -> Self {
        let points = points
            .into_iter()
            .map(|p| if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 })
            .collect();
        Self {
            points,
            rate_hz: if rate_hz.is_finite() { rate_hz.max(1.0) } else { 1.0 },
        }
    }

    /// Extract an envelope from PCM samples by windowed RMS, normalized
    /// so the loudest window reads 1.0.
    pub fn from_pcm(samples: &[f32], sample_rate: f32, window: usize) -> Self {
        let window = window.max(1);
        let mut points: Vec<f32> = samples
            .chunks(window)
            .map(|chunk| {
                let sum: f32 = chunk
                    .iter()
                    .map(|s| if s.is_finite() { s * s } else { 0.0 })
                    .sum();
                (sum / chunk.len() as f32).sqrt()
            })
            .collect();
        let peak = points.iter().fold(0.0f32, |acc, &p| acc.max(p));
        if peak > 0.0 {
            for p in &mut points {
                *p /= peak;
            }
        }
        let rate_hz = if sample_rate.is_finite() && sample_rate > 0.0 {
            sample_rate / window as f32
        } else {
            1.0
        };
        Self { points, rate_hz }
    }

    /// Number of envelope points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the envelope holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.points.len() as f64 / f64::from(self.rate_hz)
    }

    /// Interpolated level at the given position, or `None` past the end.
    pub fn level_at(&self, secs: f64) -> Option<f32> {
        if self.points.is_empty() || secs < 0.0 || secs >= self.duration_secs() {
            return None;
        }
        let pos = secs * f64::from(self.rate_hz);
        let idx = pos as usize;
        let frac = (pos - idx as f64) as f32;
        let a = self.points[idx.min(self.points.len() - 1)];
        let b = self.points[(idx + 1).min(self.points.len() - 1)];
        Some(a + (b - a) * frac)
    }
}

/// A named clip whose envelope can drive the signal.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    /// Display name (prompt or file stem).
    pub name: String,
    /// Energy envelope driving level and transients during playback.
    pub envelope: Envelope,
}

impl AudioClip {
    /// Create a clip.
    pub fn new(name: impl Into<String>, envelope: Envelope) -> Self {
        Self {
            name: name.into(),
            envelope,
        }
    }
}

/// Clip transport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// No clip driving the signal; idle oscillation runs.
    #[default]
    Stopped,
    /// Clip envelope drives the signal.
    Playing,
    /// Clip position held; idle oscillation runs meanwhile.
    Paused,
}

/// Level must exceed the trailing average by this factor to count as an
/// onset.
const ONSET_RATIO: f32 = 1.8;
/// Levels below this never register as onsets.
const ONSET_FLOOR: f32 = 0.15;
/// One-pole coefficient for the trailing average.
const TRAILING_COEFF: f32 = 0.08;
/// Base interval between synthetic idle pulses, seconds.
const IDLE_PULSE_BASE: f64 = 1.4;
/// Random spread added to the idle pulse interval, seconds.
const IDLE_PULSE_JITTER: f64 = 0.6;

/// Frame-driven generator of the simulated signal.
///
/// The stream is continuous, infinite, and non-restartable: one
/// [`tick`](Self::tick) per animation frame, driven by the host's frame
/// callback on a single thread.
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    frame_dt: f64,
    time: f64,
    frame: u64,
    clip: Option<AudioClip>,
    transport: Transport,
    clip_pos: f64,
    trailing: f32,
    onset_latched: bool,
    next_idle_pulse: f64,
    rng: FrameRng,
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FRAME_RATE)
    }
}

impl SignalGenerator {
    /// Nominal host frame rate.
    pub const DEFAULT_FRAME_RATE: f64 = 60.0;

    /// Create a generator ticking at the given frame rate.
    pub fn new(frame_rate: f64) -> Self {
        let frame_rate = if frame_rate.is_finite() && frame_rate >= 1.0 {
            frame_rate
        } else {
            Self::DEFAULT_FRAME_RATE
        };
        Self {
            frame_dt: 1.0 / frame_rate,
            time: 0.0,
            frame: 0,
            clip: None,
            transport: Transport::Stopped,
            clip_pos: 0.0,
            trailing: 0.0,
            onset_latched: false,
            next_idle_pulse: 0.9,
            rng: FrameRng::default(),
        }
    }

    /// Advance one frame and return this tick's signal value.
    pub fn tick(&mut self) -> AudioSignal {
        let t = self.time;
        self.time += self.frame_dt;
        self.frame += 1;

        let clip_level = if self.transport == Transport::Playing {
            self.clip
                .as_ref()
                .and_then(|c| c.envelope.level_at(self.clip_pos))
        } else {
            None
        };

        if self.transport == Transport::Playing && clip_level.is_none() {
            // Clip ran out; revert to the idle source.
            self.stop();
        }

        let (level, transient) = match clip_level {
            Some(level) => {
                // Edge-triggered: a sustained loud section is one onset,
                // not one per frame until the trailing average catches up.
                let above = level >= ONSET_FLOOR && level > self.trailing * ONSET_RATIO;
                let transient = above && !self.onset_latched;
                self.onset_latched = above;
                self.trailing += (level - self.trailing) * TRAILING_COEFF;
                self.clip_pos += self.frame_dt;
                (level, transient)
            }
            None => {
                let level = Self::idle_level(t);
                let transient = t >= self.next_idle_pulse;
                if transient {
                    self.next_idle_pulse =
                        t + IDLE_PULSE_BASE + f64::from(self.rng.next_f32()) * IDLE_PULSE_JITTER;
                }
                (level, transient)
            }
        };

        AudioSignal {
            time: t,
            level,
            transient,
        }
    }

    /// Default oscillation when no clip drives the signal: two slow
    /// incommensurate sines around a calm base level.
    fn idle_level(t: f64) -> f32 {
        let tau = core::f64::consts::TAU;
        let level = 0.28 + 0.12 * (tau * 0.4 * t).sin() + 0.06 * (tau * 1.7 * t + 0.9).sin();
        level.clamp(0.0, 1.0) as f32
    }

    /// Load a clip, replacing any previous one. Playback starts stopped.
    pub fn load_clip(&mut self, clip: AudioClip) {
        self.clip = Some(clip);
        self.transport = Transport::Stopped;
        self.clip_pos = 0.0;
        self.trailing = 0.0;
        self.onset_latched = false;
    }

    /// Drop the loaded clip and revert to the idle source.
    pub fn unload_clip(&mut self) {
        self.clip = None;
        self.transport = Transport::Stopped;
        self.clip_pos = 0.0;
    }

    /// Start or resume clip playback. Returns `false` when no clip is
    /// loaded.
    pub fn play(&mut self) -> bool {
        if self.clip.is_some() {
            self.transport = Transport::Playing;
            true
        } else {
            false
        }
    }

    /// Pause clip playback, holding the position. Returns `false` unless
    /// currently playing.
    pub fn pause(&mut self) -> bool {
        if self.transport == Transport::Playing {
            self.transport = Transport::Paused;
            true
        } else {
            false
        }
    }

    /// Stop playback and rewind the clip; the idle source takes over.
    /// The session time base keeps advancing.
    pub fn stop(&mut self) {
        self.transport = Transport::Stopped;
        self.clip_pos = 0.0;
        self.trailing = 0.0;
        self.onset_latched = false;
    }

    /// Current transport state.
    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// The loaded clip, if any.
    pub fn clip(&self) -> Option<&AudioClip> {
        self.clip.as_ref()
    }

    /// Seconds the next tick will be stamped with.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Frames produced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
