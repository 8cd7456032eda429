//! Gain-reduction meter visualizer for the compressor panel.
//!
//! Follows the signal level with separate attack and release smoothing,
//! computes the reduction implied by the threshold/ratio settings, and
//! reports the sidechain squeeze state.

use lumen_core::{
    AudioSignal, CompressorSettings, GlobalSettings, PluginKind, PluginSettings, Viewport,
    Visualizer, VisualizerSnapshot,
};

/// Per-frame smoothing toward a rising level.
const ATTACK: f32 = 0.4;
/// Per-frame smoothing toward a falling level.
const RELEASE: f32 = 0.06;
/// Extra reduction displayed while the sidechain squeeze is engaged, dB.
const SIDECHAIN_DUCK_DB: f32 = 6.0;
/// Floor for the dB conversion, keeping silence finite.
const LEVEL_FLOOR: f32 = 1e-3;

/// Meter bridge for the compressor panel.
pub struct CompressorMeter {
    settings: CompressorSettings,
    envelope: f32,
}

impl CompressorMeter {
    /// Create a bridge from the panel's initial settings.
    pub fn new(settings: CompressorSettings) -> Self {
        Self {
            settings,
            envelope: 0.0,
        }
    }

    /// Current smoothed level.
    pub fn envelope(&self) -> f32 {
        self.envelope
    }
}

impl Visualizer for CompressorMeter {
    fn kind(&self) -> PluginKind {
        PluginKind::Compressor
    }

    fn sync_settings(&mut self, settings: &PluginSettings) {
        if let Some(compressor) = settings.as_compressor() {
            self.settings = compressor.clone();
        }
    }

    fn advance(
        &mut self,
        signal: &AudioSignal,
        _viewport: Viewport,
        _global: &GlobalSettings,
    ) -> VisualizerSnapshot {
        let settings = self.settings.sanitized();
        let target = if signal.level.is_finite() {
            signal.level.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let coeff = if target > self.envelope { ATTACK } else { RELEASE };
        self.envelope += (target - self.envelope) * coeff;

        let level_db = 20.0 * self.envelope.max(LEVEL_FLOOR).log10();
        let over_db = (level_db - settings.threshold_db).max(0.0);
        let mut gain_reduction_db = over_db * (1.0 - 1.0 / settings.ratio);
        if settings.sidechain_active {
            gain_reduction_db += SIDECHAIN_DUCK_DB;
        }

        VisualizerSnapshot::Meter {
            level: self.envelope,
            gain_reduction_db,
            squeezed: settings.sidechain_active,
        }
    }

    fn reset(&mut self) {
        self.envelope = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(level: f32) -> AudioSignal {
        AudioSignal {
            time: 0.0,
            level,
            transient: false,
        }
    }

    fn advance_level(meter: &mut CompressorMeter, level: f32) -> VisualizerSnapshot {
        meter.advance(
            &signal(level),
            Viewport::new(400.0, 200.0),
            &GlobalSettings::default(),
        )
    }

    #[test]
    fn envelope_attacks_faster_than_it_releases() {
        let mut meter = CompressorMeter::new(CompressorSettings::default());
        let _ = advance_level(&mut meter, 1.0);
        let attacked = meter.envelope();
        assert!(attacked > 0.3);

        let _ = advance_level(&mut meter, 0.0);
        let released = meter.envelope();
        assert!(released > attacked * 0.8, "release should be slow");
    }

    #[test]
    fn quiet_signal_shows_no_reduction() {
        let settings = CompressorSettings {
            threshold_db: -12.0,
            ratio: 4.0,
            sidechain_active: false,
        };
        let mut meter = CompressorMeter::new(settings);
        let snapshot = advance_level(&mut meter, 0.05);
        match snapshot {
            VisualizerSnapshot::Meter {
                gain_reduction_db,
                squeezed,
                ..
            } => {
                assert_eq!(gain_reduction_db, 0.0);
                assert!(!squeezed);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn loud_signal_over_threshold_shows_reduction() {
        let settings = CompressorSettings {
            threshold_db: -30.0,
            ratio: 4.0,
            sidechain_active: false,
        };
        let mut meter = CompressorMeter::new(settings);
        // Drive the envelope up near full scale.
        let mut last = None;
        for _ in 0..30 {
            last = Some(advance_level(&mut meter, 1.0));
        }
        match last.unwrap() {
            VisualizerSnapshot::Meter {
                gain_reduction_db, ..
            } => {
                // Envelope near 0 dB, 30 dB over, ratio 4 keeps a quarter.
                assert!(gain_reduction_db > 15.0 && gain_reduction_db < 30.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn sidechain_flag_adds_duck_and_reports_squeezed() {
        let active = CompressorSettings {
            sidechain_active: true,
            ..CompressorSettings::default()
        };
        let mut squeezed_meter = CompressorMeter::new(active.clone());
        let mut plain_meter = CompressorMeter::new(CompressorSettings {
            sidechain_active: false,
            ..active
        });

        let a = advance_level(&mut squeezed_meter, 0.5);
        let b = advance_level(&mut plain_meter, 0.5);
        match (a, b) {
            (
                VisualizerSnapshot::Meter {
                    gain_reduction_db: with,
                    squeezed: s1,
                    ..
                },
                VisualizerSnapshot::Meter {
                    gain_reduction_db: without,
                    squeezed: s2,
                    ..
                },
            ) => {
                assert!(s1);
                assert!(!s2);
                assert!((with - without - SIDECHAIN_DUCK_DB).abs() < 1e-5);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn ratio_one_means_no_reduction() {
        let settings = CompressorSettings {
            threshold_db: -60.0,
            ratio: 1.0,
            sidechain_active: false,
        };
        let mut meter = CompressorMeter::new(settings);
        for _ in 0..20 {
            let _ = advance_level(&mut meter, 1.0);
        }
        let snapshot = advance_level(&mut meter, 1.0);
        match snapshot {
            VisualizerSnapshot::Meter {
                gain_reduction_db, ..
            } => assert!(gain_reduction_db.abs() < 1e-5),
            _ => unreachable!(),
        }
    }

    #[test]
    fn non_finite_level_is_treated_as_silence() {
        let mut meter = CompressorMeter::new(CompressorSettings::default());
        let snapshot = advance_level(&mut meter, f32::NAN);
        match snapshot {
            VisualizerSnapshot::Meter { level, .. } => assert_eq!(level, 0.0),
            _ => unreachable!(),
        }
    }
}
