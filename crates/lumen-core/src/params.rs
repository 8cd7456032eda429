//! Named-parameter introspection over plugin settings.
//!
//! UI widgets, MIDI mapping, and the CLI all address numeric parameters by
//! name. Each plugin kind publishes a static table of [`ParamSpec`]s; the
//! accessors on [`PluginSettings`] read and write fields by those names.
//!
//! Range metadata here is advisory: the store applies **no clamping** on
//! write. Callers that need legal values clamp on their side (UI widgets,
//! the MIDI layer via its mapping range) or on read
//! (`*Settings::sanitized`).

use crate::plugin::PluginSettings;

/// Metadata for one named numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Field name, as used by UI, MIDI bindings, and the CLI.
    pub name: &'static str,
    /// Lower bound of the legal range.
    pub min: f32,
    /// Upper bound of the legal range.
    pub max: f32,
    /// Default value.
    pub default: f32,
}

impl ParamSpec {
    /// Create a new spec.
    pub const fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    /// Clamp a value into the legal range; non-finite input collapses to
    /// the default.
    pub fn sanitize(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.default
        }
    }
}

/// Reverb wet/dry mix.
pub const REVERB_MIX: ParamSpec = ParamSpec::new("mix", 0.0, 100.0, 35.0);
/// Reverb room size.
pub const REVERB_SIZE: ParamSpec = ParamSpec::new("size", 0.0, 100.0, 50.0);
/// Reverb pre-delay before a particle burst.
pub const REVERB_PREDELAY: ParamSpec = ParamSpec::new("predelay_ms", 0.0, 250.0, 40.0);

/// Delay wet/dry mix.
pub const DELAY_MIX: ParamSpec = ParamSpec::new("mix", 0.0, 100.0, 30.0);
/// Delay echo interval.
pub const DELAY_TIME: ParamSpec = ParamSpec::new("time_ms", 20.0, 2000.0, 420.0);
/// Delay regeneration amount.
pub const DELAY_FEEDBACK: ParamSpec = ParamSpec::new("feedback", 0.0, 95.0, 45.0);

/// Compressor threshold.
pub const COMPRESSOR_THRESHOLD: ParamSpec = ParamSpec::new("threshold_db", -60.0, 0.0, -24.0);
/// Compressor ratio.
pub const COMPRESSOR_RATIO: ParamSpec = ParamSpec::new("ratio", 1.0, 20.0, 4.0);

/// Reverb parameter table, in display order.
pub const REVERB_PARAMS: [ParamSpec; 3] = [REVERB_MIX, REVERB_SIZE, REVERB_PREDELAY];
/// Delay parameter table, in display order.
pub const DELAY_PARAMS: [ParamSpec; 3] = [DELAY_MIX, DELAY_TIME, DELAY_FEEDBACK];
/// Compressor parameter table, in display order.
pub const COMPRESSOR_PARAMS: [ParamSpec; 2] = [COMPRESSOR_THRESHOLD, COMPRESSOR_RATIO];

impl PluginSettings {
    /// Read a numeric parameter by name.
    ///
    /// Returns `None` for names the kind does not expose. Non-numeric
    /// settings (mood, sidechain flag) are not addressable here.
    pub fn param(&self, name: &str) -> Option<f32> {
        match self {
            PluginSettings::Reverb(s) => match name {
                "mix" => Some(s.mix),
                "size" => Some(s.size),
                "predelay_ms" => Some(s.predelay_ms),
                _ => None,
            },
            PluginSettings::Delay(s) => match name {
                "mix" => Some(s.mix),
                "time_ms" => Some(s.time_ms),
                "feedback" => Some(s.feedback),
                _ => None,
            },
            PluginSettings::Compressor(s) => match name {
                "threshold_db" => Some(s.threshold_db),
                "ratio" => Some(s.ratio),
                _ => None,
            },
        }
    }

    /// Write a numeric parameter by name, without clamping.
    ///
    /// Returns `false` (leaving the value unchanged) for unknown names.
    pub fn set_param(&mut self, name: &str, value: f32) -> bool {
        match self {
            PluginSettings::Reverb(s) => match name {
                "mix" => {
                    s.mix = value;
                    true
                }
                "size" => {
                    s.size = value;
                    true
                }
                "predelay_ms" => {
                    s.predelay_ms = value;
                    true
                }
                _ => false,
            },
            PluginSettings::Delay(s) => match name {
                "mix" => {
                    s.mix = value;
                    true
                }
                "time_ms" => {
                    s.time_ms = value;
                    true
                }
                "feedback" => {
                    s.feedback = value;
                    true
                }
                _ => false,
            },
            PluginSettings::Compressor(s) => match name {
                "threshold_db" => {
                    s.threshold_db = value;
                    true
                }
                "ratio" => {
                    s.ratio = value;
                    true
                }
                _ => false,
            },
        }
    }
}
