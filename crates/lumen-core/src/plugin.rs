//! Plugin identity and per-kind settings schemas.
//!
//! Every rack unit is identified by a [`PluginKind`] and carries a settings
//! struct specific to that kind. The kinds are a closed set: panels are
//! created at session start and only ever hidden, never destroyed, so there
//! is no open-ended plugin discovery here.

use serde::{Deserialize, Serialize};

use crate::params::{self, ParamSpec};

/// Fixed set of plugin kinds available in the rack.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PluginKind {
    /// Reverb panel with the particle-bloom visualizer.
    Reverb,
    /// Delay panel with the echo-pulse visualizer.
    Delay,
    /// Compressor panel with the gain-reduction meter visualizer.
    Compressor,
}

impl PluginKind {
    /// All plugin kinds, in rack order.
    pub const ALL: [PluginKind; 3] = [PluginKind::Reverb, PluginKind::Delay, PluginKind::Compressor];

    /// Stable string identifier (lowercase, no spaces).
    pub const fn id(self) -> &'static str {
        match self {
            PluginKind::Reverb => "reverb",
            PluginKind::Delay => "delay",
            PluginKind::Compressor => "compressor",
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            PluginKind::Reverb => "Reverb",
            PluginKind::Delay => "Delay",
            PluginKind::Compressor => "Compressor",
        }
    }

    /// Brief description for listings.
    pub const fn description(self) -> &'static str {
        match self {
            PluginKind::Reverb => "Hall simulation with transient-driven particle bloom",
            PluginKind::Delay => "Feedback delay with expanding echo pulses",
            PluginKind::Compressor => "Dynamics meter with sidechain squeeze",
        }
    }

    /// Whether this kind can be the target of a sidechain link.
    ///
    /// Only sidechain-capable kinds carry a `sidechain_active` flag in
    /// their settings.
    pub const fn supports_sidechain(self) -> bool {
        matches!(self, PluginKind::Compressor)
    }

    /// Look up a kind by its string identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Parameter specs for this kind, in display order.
    pub const fn param_specs(self) -> &'static [ParamSpec] {
        match self {
            PluginKind::Reverb => &params::REVERB_PARAMS,
            PluginKind::Delay => &params::DELAY_PARAMS,
            PluginKind::Compressor => &params::COMPRESSOR_PARAMS,
        }
    }
}

impl core::fmt::Display for PluginKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.id())
    }
}

/// Color mood selectable per visual panel.
///
/// Each mood maps to a fixed hue used for spawned visual elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    /// Amber tones (hue 40).
    Warm,
    /// Cyan tones (hue 190).
    Bright,
    /// Violet tones (hue 270).
    Dark,
    /// Magenta tones (hue 320).
    Energetic,
    /// Teal tones (hue 195). This is the fallback mood.
    #[default]
    Neutral,
}

impl Mood {
    /// Hue in degrees for elements spawned under this mood.
    pub const fn hue(self) -> f32 {
        match self {
            Mood::Warm => 40.0,
            Mood::Bright => 190.0,
            Mood::Dark => 270.0,
            Mood::Energetic => 320.0,
            Mood::Neutral => 195.0,
        }
    }
}

/// Settings for the reverb panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverbSettings {
    /// Wet/dry mix, 0-100.
    pub mix: f32,
    /// Room size, 0-100. Scales particle lifetimes.
    pub size: f32,
    /// Gap between a transient and its particle burst, 0-250 ms.
    pub predelay_ms: f32,
    /// Color mood for spawned particles.
    pub mood: Mood,
}

impl Default for ReverbSettings {
    fn default() -> Self {
        Self {
            mix: 35.0,
            size: 50.0,
            predelay_ms: 40.0,
            mood: Mood::Warm,
        }
    }
}

impl ReverbSettings {
    /// Copy with every numeric field clamped to its spec range.
    ///
    /// The store performs no validation, so consumers clamp on read.
    /// Non-finite values collapse to the parameter default.
    pub fn sanitized(&self) -> Self {
        Self {
            mix: params::REVERB_MIX.sanitize(self.mix),
            size: params::REVERB_SIZE.sanitize(self.size),
            predelay_ms: params::REVERB_PREDELAY.sanitize(self.predelay_ms),
            mood: self.mood,
        }
    }
}

/// Settings for the delay panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelaySettings {
    /// Wet/dry mix, 0-100.
    pub mix: f32,
    /// Echo interval, 20-2000 ms.
    pub time_ms: f32,
    /// Echo regeneration, 0-95. Scales how many pulses survive.
    pub feedback: f32,
    /// Color mood for spawned pulses.
    pub mood: Mood,
}

impl Default for DelaySettings {
    fn default() -> Self {
        Self {
            mix: 30.0,
            time_ms: 420.0,
            feedback: 45.0,
            mood: Mood::Bright,
        }
    }
}

impl DelaySettings {
    /// Copy with every numeric field clamped to its spec range.
    pub fn sanitized(&self) -> Self {
        Self {
            mix: params::DELAY_MIX.sanitize(self.mix),
            time_ms: params::DELAY_TIME.sanitize(self.time_ms),
            feedback: params::DELAY_FEEDBACK.sanitize(self.feedback),
            mood: self.mood,
        }
    }
}

/// Settings for the compressor panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorSettings {
    /// Threshold, -60 to 0 dB.
    pub threshold_db: f32,
    /// Ratio, 1-20.
    pub ratio: f32,
    /// Raised while an incoming sidechain link detects source activity.
    /// Owned by the session's sidechain pass, not by the UI.
    pub sidechain_active: bool,
}

impl Default for CompressorSettings {
    fn default() -> Self {
        Self {
            threshold_db: -24.0,
            ratio: 4.0,
            sidechain_active: false,
        }
    }
}

impl CompressorSettings {
    /// Copy with every numeric field clamped to its spec range.
    pub fn sanitized(&self) -> Self {
        Self {
            threshold_db: params::COMPRESSOR_THRESHOLD.sanitize(self.threshold_db),
            ratio: params::COMPRESSOR_RATIO.sanitize(self.ratio),
            sidechain_active: self.sidechain_active,
        }
    }
}

/// Per-kind settings, tagged by plugin kind.
///
/// This is the value stored in the [`ParamStore`](crate::ParamStore) and
/// snapshotted wholesale into presets. Visualizer-private simulation state
/// (particle lists, pending bursts) never lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PluginSettings {
    /// Reverb panel settings.
    Reverb(ReverbSettings),
    /// Delay panel settings.
    Delay(DelaySettings),
    /// Compressor panel settings.
    Compressor(CompressorSettings),
}

impl PluginSettings {
    /// The kind this settings value belongs to.
    pub const fn kind(&self) -> PluginKind {
        match self {
            PluginSettings::Reverb(_) => PluginKind::Reverb,
            PluginSettings::Delay(_) => PluginKind::Delay,
            PluginSettings::Compressor(_) => PluginKind::Compressor,
        }
    }

    /// Default settings for the given kind.
    pub fn defaults_for(kind: PluginKind) -> Self {
        match kind {
            PluginKind::Reverb => PluginSettings::Reverb(ReverbSettings::default()),
            PluginKind::Delay => PluginSettings::Delay(DelaySettings::default()),
            PluginKind::Compressor => PluginSettings::Compressor(CompressorSettings::default()),
        }
    }

    /// Reverb settings, if this is a reverb value.
    pub const fn as_reverb(&self) -> Option<&ReverbSettings> {
        match self {
            PluginSettings::Reverb(s) => Some(s),
            _ => None,
        }
    }

    /// Delay settings, if this is a delay value.
    pub const fn as_delay(&self) -> Option<&DelaySettings> {
        match self {
            PluginSettings::Delay(s) => Some(s),
            _ => None,
        }
    }

    /// Compressor settings, if this is a compressor value.
    pub const fn as_compressor(&self) -> Option<&CompressorSettings> {
        match self {
            PluginSettings::Compressor(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this plugin currently produces enough signal to drive a
    /// sidechain link it is the source of.
    pub fn drives_sidechain(&self) -> bool {
        match self {
            PluginSettings::Reverb(s) => s.mix > 0.5,
            PluginSettings::Delay(s) => s.mix > 0.5,
            PluginSettings::Compressor(_) => true,
        }
    }

    /// Current sidechain-target flag; `false` for kinds without one.
    pub fn sidechain_active(&self) -> bool {
        match self {
            PluginSettings::Compressor(s) => s.sidechain_active,
            _ => false,
        }
    }

    /// Set the sidechain-target flag. Returns `false` for kinds that do
    /// not support being a sidechain target; the value is unchanged.
    pub fn set_sidechain_active(&mut self, active: bool) -> bool {
        match self {
            PluginSettings::Compressor(s) => {
                s.sidechain_active = active;
                true
            }
            _ => false,
        }
    }
}
