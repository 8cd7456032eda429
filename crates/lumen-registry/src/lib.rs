//! Plugin registry and factory for the lumen rack.
//!
//! This crate provides the single mapping from [`PluginKind`] to
//! everything kind-specific: descriptor metadata, default settings, and
//! the concrete visualizer bridge factory. Dispatch happens through this
//! table rather than runtime type inspection.
//!
//! # Example
//!
//! ```rust
//! use lumen_registry::PluginRegistry;
//! use lumen_core::PluginKind;
//!
//! let registry = PluginRegistry::new();
//!
//! // List all plugins
//! for descriptor in registry.all_plugins() {
//!     println!("{}: {}", descriptor.name, descriptor.description);
//! }
//!
//! // Create a visualizer bridge for a freshly mounted panel
//! let defaults = registry.defaults(PluginKind::Reverb);
//! let mut bridge = registry.create(PluginKind::Reverb, &defaults);
//! ```

use lumen_core::{PluginKind, PluginSettings, Visualizer};
use lumen_visuals::{CompressorMeter, DelayPulse, ReverbBloom};

/// Describes one plugin kind in the registry.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    /// The kind this entry describes.
    pub kind: PluginKind,
    /// Stable string identifier (lowercase, no spaces).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Brief description of the panel.
    pub description: &'static str,
    /// Number of named numeric parameters.
    pub param_count: usize,
    /// Whether the plugin can be a sidechain target.
    pub sidechain_target: bool,
}

/// Factory function type for creating visualizer bridges.
type BridgeFactory = fn(&PluginSettings) -> Box<dyn Visualizer + Send>;

/// Internal entry in the registry.
struct RegistryEntry {
    descriptor: PluginDescriptor,
    factory: BridgeFactory,
}

/// Registry of all rack plugins.
///
/// All built-in plugin kinds are registered on construction; the set is
/// closed, matching [`PluginKind::ALL`].
pub struct PluginRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    /// Create a registry with every built-in plugin registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(PluginKind::ALL.len()),
        };
        registry.register_builtin_plugins();
        registry
    }

    fn register_builtin_plugins(&mut self) {
        self.register(PluginKind::Reverb, |settings| {
            Box::new(ReverbBloom::new(
                settings.as_reverb().cloned().unwrap_or_default(),
            ))
        });
        self.register(PluginKind::Delay, |settings| {
            Box::new(DelayPulse::new(
                settings.as_delay().cloned().unwrap_or_default(),
            ))
        });
        self.register(PluginKind::Compressor, |settings| {
            Box::new(CompressorMeter::new(
                settings.as_compressor().cloned().unwrap_or_default(),
            ))
        });
    }

    fn register(&mut self, kind: PluginKind, factory: BridgeFactory) {
        self.entries.push(RegistryEntry {
            descriptor: PluginDescriptor {
                kind,
                id: kind.id(),
                name: kind.name(),
                description: kind.description(),
                param_count: kind.param_specs().len(),
                sidechain_target: kind.supports_sidechain(),
            },
            factory,
        });
    }

    /// Descriptors for all registered plugins, in rack order.
    pub fn all_plugins(&self) -> Vec<&PluginDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Descriptor for one kind.
    pub fn get(&self, kind: PluginKind) -> Option<&PluginDescriptor> {
        self.entries
            .iter()
            .find(|e| e.descriptor.kind == kind)
            .map(|e| &e.descriptor)
    }

    /// Descriptor lookup by string identifier.
    pub fn get_by_id(&self, id: &str) -> Option<&PluginDescriptor> {
        self.entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .map(|e| &e.descriptor)
    }

    /// Default settings for one kind.
    pub fn defaults(&self, kind: PluginKind) -> PluginSettings {
        PluginSettings::defaults_for(kind)
    }

    /// Create a visualizer bridge for a freshly mounted panel.
    ///
    /// Settings of the wrong kind fall back to the kind's defaults, so
    /// a mismatched call cannot produce a bridge of the wrong flavor.
    pub fn create(&self, kind: PluginKind, settings: &PluginSettings) -> Box<dyn Visualizer + Send> {
        match self.entries.iter().find(|e| e.descriptor.kind == kind) {
            Some(entry) => (entry.factory)(settings),
            // The kind set is closed, so every kind is registered; stay
            // total anyway rather than panic.
            None => match kind {
                PluginKind::Reverb => Box::new(ReverbBloom::new(
                    settings.as_reverb().cloned().unwrap_or_default(),
                )),
                PluginKind::Delay => Box::new(DelayPulse::new(
                    settings.as_delay().cloned().unwrap_or_default(),
                )),
                PluginKind::Compressor => Box::new(CompressorMeter::new(
                    settings.as_compressor().cloned().unwrap_or_default(),
                )),
            },
        }
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
