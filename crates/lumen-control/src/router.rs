//! Control-change routing and the learn-mode state machine.

use std::collections::HashMap;

use lumen_core::{ParamStore, PluginKind};

use crate::message::{CcAddress, MidiMessage};

/// What a learned controller drives: a plugin parameter plus the range
/// raw values are scaled into.
#[derive(Debug, Clone, PartialEq)]
pub struct CcBinding {
    /// Target plugin.
    pub plugin: PluginKind,
    /// Target parameter name.
    pub param: String,
    /// Value the controller's 0 maps to.
    pub min: f32,
    /// Value the controller's 127 maps to.
    pub max: f32,
}

impl CcBinding {
    /// Scale a raw 7-bit value into this binding's range.
    pub fn scale(&self, raw: u8) -> f32 {
        let t = f32::from(raw.min(127)) / 127.0;
        self.min + t * (self.max - self.min)
    }
}

/// The parameter awaiting the next controller movement while learn mode
/// is armed.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnTarget {
    /// Target plugin.
    pub plugin: PluginKind,
    /// Target parameter name.
    pub param: String,
    /// Range minimum for the eventual binding.
    pub min: f32,
    /// Range maximum for the eventual binding.
    pub max: f32,
}

/// Learn-mode state after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnState {
    /// No target armed.
    Idle,
    /// A target is armed and will capture the next control change.
    Armed,
}

/// Outcome of handling one incoming message.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterEvent {
    /// Nothing happened: not a control change, or no mapping matched.
    Ignored,
    /// Learn mode captured the message into a new mapping. The message
    /// was consumed by the capture and **not** applied to the store.
    Learned {
        /// Address the binding is now keyed by.
        address: CcAddress,
        /// The captured binding.
        binding: CcBinding,
    },
    /// A mapped controller updated a parameter.
    Applied {
        /// Plugin whose parameter changed.
        plugin: PluginKind,
        /// Parameter name.
        param: String,
        /// Scaled value written to the store.
        value: f32,
    },
}

/// Mapping table plus single-slot learn state.
///
/// At most one mapping exists per `(device, controller)` address;
/// capturing over an existing address replaces it. Mappings are only
/// cleared wholesale, on session reset.
#[derive(Debug, Default)]
pub struct MidiRouter {
    mappings: HashMap<CcAddress, CcBinding>,
    learn: Option<LearnTarget>,
}

impl MidiRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle learn mode for a target.
    ///
    /// Arming while the same `(plugin, param)` is already armed cancels
    /// back to idle without creating anything. Arming a different target
    /// replaces the slot (single slot, not a queue).
    pub fn toggle_learn(&mut self, target: LearnTarget) -> LearnState {
        match &self.learn {
            Some(current) if current.plugin == target.plugin && current.param == target.param => {
                self.learn = None;
                LearnState::Idle
            }
            _ => {
                self.learn = Some(target);
                LearnState::Armed
            }
        }
    }

    /// Cancel learn mode unconditionally.
    pub fn cancel_learn(&mut self) {
        self.learn = None;
    }

    /// The currently armed target, if any.
    pub fn learn_target(&self) -> Option<&LearnTarget> {
        self.learn.as_ref()
    }

    /// Whether learn mode is armed.
    pub fn is_armed(&self) -> bool {
        self.learn.is_some()
    }

    /// Look up the binding for an address.
    pub fn binding(&self, address: &CcAddress) -> Option<&CcBinding> {
        self.mappings.get(address)
    }

    /// Number of stored mappings.
    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }

    /// Drop every mapping and disarm learn mode. Session-reset support.
    pub fn clear(&mut self) {
        self.mappings.clear();
        self.learn = None;
    }

    /// Handle one incoming message against the store.
    ///
    /// Non-control-change messages are ignored regardless of state. While
    /// armed, the first control change is captured into a mapping and the
    /// router disarms; the captured message does not also update the
    /// store. While idle, a mapped control change scales its value into
    /// the binding's range and writes the parameter; unmapped ones are
    /// ignored.
    pub fn handle(&mut self, message: &MidiMessage, store: &mut ParamStore) -> RouterEvent {
        let MidiMessage::ControlChange {
            device,
            controller,
            value,
        } = message
        else {
            return RouterEvent::Ignored;
        };
        let address = CcAddress::new(device.clone(), *controller);

        if let Some(target) = self.learn.take() {
            let binding = CcBinding {
                plugin: target.plugin,
                param: target.param,
                min: target.min,
                max: target.max,
            };
            self.mappings.insert(address.clone(), binding.clone());
            return RouterEvent::Learned { address, binding };
        }

        match self.mappings.get(&address) {
            Some(binding) => {
                let scaled = binding.scale(*value);
                store.set_param(binding.plugin, &binding.param, scaled);
                RouterEvent::Applied {
                    plugin: binding.plugin,
                    param: binding.param.clone(),
                    value: scaled,
                }
            }
            None => RouterEvent::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(plugin: PluginKind, param: &str, min: f32, max: f32) -> LearnTarget {
        LearnTarget {
            plugin,
            param: param.to_string(),
            min,
            max,
        }
    }

    fn learn_mapping(router: &mut MidiRouter, store: &mut ParamStore) {
        let state = router.toggle_learn(target(PluginKind::Reverb, "mix", 0.0, 100.0));
        assert_eq!(state, LearnState::Armed);
        let event = router.handle(&MidiMessage::cc("dev1", 10, 64), store);
        assert!(matches!(event, RouterEvent::Learned { .. }));
    }

    #[test]
    fn mapped_cc_scales_into_range() {
        let mut store = ParamStore::new();
        let mut router = MidiRouter::new();
        learn_mapping(&mut router, &mut store);

        let event = router.handle(&MidiMessage::cc("dev1", 10, 64), &mut store);
        match event {
            RouterEvent::Applied {
                plugin,
                param,
                value,
            } => {
                assert_eq!(plugin, PluginKind::Reverb);
                assert_eq!(param, "mix");
                assert!((value - 50.394).abs() < 1e-2);
            }
            other => panic!("expected Applied, got {other:?}"),
        }
        let mix = store.param(PluginKind::Reverb, "mix").unwrap();
        assert!((mix - 50.394).abs() < 1e-2);
    }

    #[test]
    fn scaling_hits_range_endpoints() {
        let binding = CcBinding {
            plugin: PluginKind::Delay,
            param: "time_ms".to_string(),
            min: 20.0,
            max: 2000.0,
        };
        assert_eq!(binding.scale(0), 20.0);
        assert_eq!(binding.scale(127), 2000.0);
        // Raw values above the 7-bit range clamp to 127.
        assert_eq!(binding.scale(200), 2000.0);
    }

    #[test]
    fn arming_twice_for_the_same_target_cancels() {
        let mut store = ParamStore::new();
        let mut router = MidiRouter::new();

        assert_eq!(
            router.toggle_learn(target(PluginKind::Reverb, "mix", 0.0, 100.0)),
            LearnState::Armed
        );
        assert_eq!(
            router.toggle_learn(target(PluginKind::Reverb, "mix", 0.0, 100.0)),
            LearnState::Idle
        );
        assert!(!router.is_armed());
        assert_eq!(router.mapping_count(), 0);

        // With learn cancelled, an unmapped message does nothing.
        let event = router.handle(&MidiMessage::cc("dev1", 10, 64), &mut store);
        assert_eq!(event, RouterEvent::Ignored);
        assert_eq!(router.mapping_count(), 0);
    }

    #[test]
    fn arming_a_different_target_replaces_the_slot() {
        let mut router = MidiRouter::new();
        router.toggle_learn(target(PluginKind::Reverb, "mix", 0.0, 100.0));
        let state = router.toggle_learn(target(PluginKind::Delay, "feedback", 0.0, 95.0));
        assert_eq!(state, LearnState::Armed);
        assert_eq!(
            router.learn_target().map(|t| t.plugin),
            Some(PluginKind::Delay)
        );
    }

    #[test]
    fn capture_consumes_the_message_without_applying_it() {
        let mut store = ParamStore::new();
        let mut router = MidiRouter::new();
        let mix_before = store.param(PluginKind::Reverb, "mix").unwrap();

        router.toggle_learn(target(PluginKind::Reverb, "mix", 0.0, 100.0));
        let event = router.handle(&MidiMessage::cc("dev1", 10, 127), &mut store);

        match event {
            RouterEvent::Learned { address, binding } => {
                assert_eq!(address, CcAddress::new("dev1", 10));
                assert_eq!(binding.plugin, PluginKind::Reverb);
            }
            other => panic!("expected Learned, got {other:?}"),
        }
        assert_eq!(router.mapping_count(), 1);
        assert!(!router.is_armed());
        // The captured value must not have touched the store.
        assert_eq!(store.param(PluginKind::Reverb, "mix"), Some(mix_before));
    }

    #[test]
    fn non_cc_messages_are_ignored_even_while_armed() {
        let mut store = ParamStore::new();
        let mut router = MidiRouter::new();
        router.toggle_learn(target(PluginKind::Reverb, "mix", 0.0, 100.0));

        let note = MidiMessage::NoteOn {
            device: "dev1".to_string(),
            note: 60,
            velocity: 100,
        };
        assert_eq!(router.handle(&note, &mut store), RouterEvent::Ignored);
        assert_eq!(router.handle(&MidiMessage::Other, &mut store), RouterEvent::Ignored);
        // Still armed: the note did not consume the slot.
        assert!(router.is_armed());
        assert_eq!(router.mapping_count(), 0);
    }

    #[test]
    fn relearning_an_address_replaces_its_binding() {
        let mut store = ParamStore::new();
        let mut router = MidiRouter::new();
        learn_mapping(&mut router, &mut store);

        router.toggle_learn(target(PluginKind::Delay, "feedback", 0.0, 95.0));
        let _ = router.handle(&MidiMessage::cc("dev1", 10, 0), &mut store);

        assert_eq!(router.mapping_count(), 1);
        let binding = router.binding(&CcAddress::new("dev1", 10)).unwrap();
        assert_eq!(binding.plugin, PluginKind::Delay);
    }

    #[test]
    fn unmapped_devices_do_not_alias() {
        let mut store = ParamStore::new();
        let mut router = MidiRouter::new();
        learn_mapping(&mut router, &mut store);

        // Same controller number, different device: no mapping.
        let event = router.handle(&MidiMessage::cc("dev2", 10, 127), &mut store);
        assert_eq!(event, RouterEvent::Ignored);
    }

    #[test]
    fn clear_drops_mappings_and_learn_state() {
        let mut store = ParamStore::new();
        let mut router = MidiRouter::new();
        learn_mapping(&mut router, &mut store);
        router.toggle_learn(target(PluginKind::Delay, "mix", 0.0, 100.0));

        router.clear();
        assert_eq!(router.mapping_count(), 0);
        assert!(!router.is_armed());
    }
}
