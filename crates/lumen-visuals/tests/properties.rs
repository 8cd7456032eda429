//! Property-based tests for the visualizer bridges.
//!
//! Uses proptest to verify that every bridge satisfies fundamental
//! invariants under arbitrary settings and signal streams: finite
//! snapshots, bounded populations, and clean decay.

use proptest::prelude::*;

use lumen_core::{
    AudioSignal, Complexity, CompressorSettings, DelaySettings, GlobalSettings, PluginSettings,
    ReverbSettings, Viewport, Visualizer, VisualizerSnapshot,
};
use lumen_visuals::{CompressorMeter, DelayPulse, ReverbBloom};

fn snapshot_is_finite(snapshot: &VisualizerSnapshot) -> bool {
    match snapshot {
        VisualizerSnapshot::Particles {
            hue,
            activity,
            particles,
        } => {
            hue.is_finite()
                && activity.is_finite()
                && particles.iter().all(|p| {
                    p.x.is_finite()
                        && p.y.is_finite()
                        && p.depth.is_finite()
                        && p.lifetime.is_finite()
                        && p.size.is_finite()
                        && p.opacity.is_finite()
                })
        }
        VisualizerSnapshot::Pulses { activity, rings } => {
            activity.is_finite()
                && rings
                    .iter()
                    .all(|r| r.radius.is_finite() && r.intensity.is_finite() && r.hue.is_finite())
        }
        VisualizerSnapshot::Meter {
            level,
            gain_reduction_db,
            ..
        } => level.is_finite() && gain_reduction_db.is_finite(),
    }
}

/// Any f32, including NaN and infinities, to hammer the defensive paths.
fn wild_f32() -> impl Strategy<Value = f32> {
    prop_oneof![
        -1e6f32..1e6f32,
        Just(f32::NAN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
    ]
}

fn any_complexity() -> impl Strategy<Value = Complexity> {
    prop_oneof![
        Just(Complexity::Low),
        Just(Complexity::Medium),
        Just(Complexity::High),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The reverb bloom never emits a non-finite snapshot and never
    /// exceeds its population cap, whatever the settings.
    #[test]
    fn bloom_snapshots_stay_finite_and_bounded(
        mix in wild_f32(),
        size in wild_f32(),
        predelay in wild_f32(),
        intensity in 0u8..=100,
        complexity in any_complexity(),
        transient_period in 1usize..10,
    ) {
        let settings = ReverbSettings {
            mix,
            size,
            predelay_ms: predelay,
            ..ReverbSettings::default()
        };
        let global = GlobalSettings {
            animation_intensity: intensity,
            visualizer_complexity: complexity,
        };
        let mut bloom = ReverbBloom::new(settings);
        let viewport = Viewport::new(640.0, 360.0);

        for i in 0..120 {
            let signal = AudioSignal {
                time: i as f64 / 60.0,
                level: 0.5,
                transient: i % transient_period == 0,
            };
            let snapshot = bloom.advance(&signal, viewport, &global);
            prop_assert!(snapshot_is_finite(&snapshot));
            prop_assert!(snapshot.element_count() <= 300);
        }
    }

    /// The delay pulse stays finite and within its ring cap.
    #[test]
    fn pulse_snapshots_stay_finite_and_bounded(
        mix in wild_f32(),
        time_ms in wild_f32(),
        feedback in wild_f32(),
        intensity in 0u8..=100,
    ) {
        let settings = DelaySettings {
            mix,
            time_ms,
            feedback,
            ..DelaySettings::default()
        };
        let global = GlobalSettings {
            animation_intensity: intensity,
            visualizer_complexity: Complexity::Medium,
        };
        let mut pulse = DelayPulse::new(settings);
        let viewport = Viewport::new(640.0, 360.0);

        for i in 0..120 {
            let signal = AudioSignal {
                time: i as f64 / 60.0,
                level: 0.6,
                transient: i % 4 == 0,
            };
            let snapshot = pulse.advance(&signal, viewport, &global);
            prop_assert!(snapshot_is_finite(&snapshot));
            prop_assert!(snapshot.element_count() <= 24);
        }
    }

    /// The compressor meter stays finite for any settings and any
    /// signal level, including non-finite garbage.
    #[test]
    fn meter_snapshots_stay_finite(
        threshold in wild_f32(),
        ratio in wild_f32(),
        levels in proptest::collection::vec(wild_f32(), 1..60),
    ) {
        let settings = CompressorSettings {
            threshold_db: threshold,
            ratio,
            sidechain_active: false,
        };
        let mut meter = CompressorMeter::new(settings);
        let viewport = Viewport::new(400.0, 200.0);
        let global = GlobalSettings::default();

        for (i, level) in levels.into_iter().enumerate() {
            let signal = AudioSignal {
                time: i as f64 / 60.0,
                level,
                transient: false,
            };
            let snapshot = meter.advance(&signal, viewport, &global);
            prop_assert!(snapshot_is_finite(&snapshot));
        }
    }

    /// Once transients cease, the bloom population is non-increasing and
    /// reaches zero.
    #[test]
    fn bloom_decays_without_transients(
        mix in 10.0f32..100.0,
        size in 0.0f32..100.0,
    ) {
        let settings = ReverbSettings {
            mix,
            size,
            predelay_ms: 0.0,
            ..ReverbSettings::default()
        };
        let mut bloom = ReverbBloom::new(settings);
        let viewport = Viewport::new(640.0, 360.0);
        let global = GlobalSettings::default();

        let _ = bloom.advance(
            &AudioSignal { time: 0.0, level: 0.8, transient: true },
            viewport,
            &global,
        );
        let mut last = bloom.particle_count();
        prop_assert!(last > 0);

        for i in 1..600 {
            let signal = AudioSignal {
                time: i as f64 / 60.0,
                level: 0.3,
                transient: false,
            };
            let _ = bloom.advance(&signal, viewport, &global);
            let now = bloom.particle_count();
            prop_assert!(now <= last);
            last = now;
            if now == 0 {
                break;
            }
        }
        prop_assert_eq!(last, 0);
    }
}

/// Settings synced from the wrong plugin kind are ignored rather than
/// adopted.
#[test]
fn sync_ignores_foreign_settings() {
    let mut bloom = ReverbBloom::new(ReverbSettings::default());
    bloom.sync_settings(&PluginSettings::defaults_for(lumen_core::PluginKind::Delay));

    let snapshot = bloom.advance(
        &AudioSignal {
            time: 0.0,
            level: 0.2,
            transient: false,
        },
        Viewport::new(100.0, 100.0),
        &GlobalSettings::default(),
    );
    // Still a reverb snapshot with the reverb default mood hue.
    match snapshot {
        VisualizerSnapshot::Particles { hue, .. } => assert_eq!(hue, 40.0),
        _ => unreachable!(),
    }
}
