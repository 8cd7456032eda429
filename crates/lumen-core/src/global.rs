//! Process-wide visual configuration.

use serde::{Deserialize, Serialize};

/// Visualizer complexity tier.
///
/// Bounds how many elements a visualizer may spawn per burst, trading
/// render cost against density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Complexity {
    /// Sparse visuals for constrained hosts.
    Low,
    /// Balanced default.
    #[default]
    Medium,
    /// Dense visuals.
    High,
}

impl Complexity {
    /// Maximum elements a single burst may spawn at this tier.
    pub const fn max_burst(self) -> usize {
        match self {
            Complexity::Low => 40,
            Complexity::Medium => 90,
            Complexity::High => 150,
        }
    }

    /// Human-readable tier name.
    pub const fn name(self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

/// Global settings injected into every plugin and the shell.
///
/// Loaded once at session start from persisted storage, mutated only via
/// the session's explicit setter, persisted on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Animation intensity, 0-100. Scales transition durations and
    /// visualizer motion speed.
    pub animation_intensity: u8,
    /// Visualizer complexity tier.
    pub visualizer_complexity: Complexity,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            animation_intensity: 50,
            visualizer_complexity: Complexity::Medium,
        }
    }
}

impl GlobalSettings {
    /// Duration multiplier derived from the animation intensity.
    ///
    /// Maps 0-100 onto 1.0-0.25: a higher intensity yields a *smaller*
    /// multiplier, so anything dividing by it moves faster. Visualizers
    /// divide their per-frame motion step by this value.
    pub fn motion_multiplier(&self) -> f32 {
        let intensity = f32::from(self.animation_intensity.min(100));
        1.0 - (intensity / 100.0) * 0.75
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_multiplier_range_mapping() {
        let slow = GlobalSettings {
            animation_intensity: 0,
            ..GlobalSettings::default()
        };
        let mid = GlobalSettings::default();
        let fast = GlobalSettings {
            animation_intensity: 100,
            ..GlobalSettings::default()
        };
        assert_eq!(slow.motion_multiplier(), 1.0);
        assert_eq!(mid.motion_multiplier(), 0.625);
        assert_eq!(fast.motion_multiplier(), 0.25);
    }

    #[test]
    fn out_of_range_intensity_is_treated_as_full() {
        let wild = GlobalSettings {
            animation_intensity: 200,
            ..GlobalSettings::default()
        };
        assert_eq!(wild.motion_multiplier(), 0.25);
    }

    #[test]
    fn burst_caps_grow_with_tier() {
        assert!(Complexity::Low.max_burst() < Complexity::Medium.max_burst());
        assert!(Complexity::Medium.max_burst() < Complexity::High.max_burst());
        assert_eq!(Complexity::Low.max_burst(), 40);
    }
}
