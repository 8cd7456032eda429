//! Per-plugin settings store with clone-on-write snapshots.
//!
//! The store maps every [`PluginKind`] to an [`Arc`]-shared settings value.
//! Updates clone the target plugin's settings, mutate the clone, and swap
//! in a fresh `Arc`; every other plugin keeps its pointer-identical value.
//! Observers holding an old `Arc` can therefore detect exactly which
//! plugins changed with [`Arc::ptr_eq`], without diffing field by field.
//!
//! No validation happens here. Range clamping is the responsibility of the
//! caller supplying bounds (UI widget, MIDI mapping) or of readers via
//! `sanitized()`.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::plugin::{PluginKind, PluginSettings};

/// Settings for every plugin in the rack.
///
/// Created once at session start with defaults for every kind; keys are
/// never removed. Plugins are deactivated by hiding their panel, not by
/// dropping their settings.
#[derive(Debug, Clone)]
pub struct ParamStore {
    settings: BTreeMap<PluginKind, Arc<PluginSettings>>,
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamStore {
    /// Create a store holding default settings for every plugin kind.
    pub fn new() -> Self {
        let settings = PluginKind::ALL
            .into_iter()
            .map(|kind| (kind, Arc::new(PluginSettings::defaults_for(kind))))
            .collect();
        Self { settings }
    }

    /// Shared handle to a plugin's current settings.
    ///
    /// The handle stays valid (and pointer-stable) until the next update
    /// of that same plugin.
    pub fn shared(&self, kind: PluginKind) -> Arc<PluginSettings> {
        self.settings
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Arc::new(PluginSettings::defaults_for(kind)))
    }

    /// Read a numeric parameter by name.
    pub fn param(&self, kind: PluginKind, name: &str) -> Option<f32> {
        self.settings.get(&kind).and_then(|s| s.param(name))
    }

    /// Apply a mutation function to one plugin's settings.
    ///
    /// This is the function form of the update contract: the closure sees
    /// the previous settings and mutates a private clone; the store then
    /// swaps in the new value. All other plugins are untouched.
    pub fn update(&mut self, kind: PluginKind, f: impl FnOnce(&mut PluginSettings)) {
        let Some(current) = self.settings.get(&kind) else {
            return;
        };
        let mut next = PluginSettings::clone(current);
        f(&mut next);
        self.settings.insert(kind, Arc::new(next));
    }

    /// Set one named numeric parameter, without clamping.
    ///
    /// This is the partial-object form of the update contract. Returns
    /// `false` (and changes nothing, allocating nothing) when the kind
    /// does not expose a parameter of that name.
    pub fn set_param(&mut self, kind: PluginKind, name: &str, value: f32) -> bool {
        let Some(current) = self.settings.get(&kind) else {
            return false;
        };
        if current.param(name).is_none() {
            return false;
        }
        let mut next = PluginSettings::clone(current);
        next.set_param(name, value);
        self.settings.insert(kind, Arc::new(next));
        true
    }

    /// Owned snapshot of every plugin's settings, for preset capture.
    pub fn export(&self) -> BTreeMap<PluginKind, PluginSettings> {
        self.settings
            .iter()
            .map(|(kind, s)| (*kind, PluginSettings::clone(s)))
            .collect()
    }

    /// Replace the entire settings mapping, as a preset load does.
    ///
    /// Kinds missing from the snapshot fall back to defaults; entries
    /// whose tagged kind disagrees with their key are ignored.
    pub fn import(&mut self, snapshot: BTreeMap<PluginKind, PluginSettings>) {
        let mut next = BTreeMap::new();
        for kind in PluginKind::ALL {
            let value = match snapshot.get(&kind) {
                Some(s) if s.kind() == kind => s.clone(),
                _ => PluginSettings::defaults_for(kind),
            };
            next.insert(kind, Arc::new(value));
        }
        self.settings = next;
    }

    /// Restore defaults for every plugin.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
