//! Session events and the observer sink.
//!
//! Every session mutation is followed by a synchronous event emission to
//! an injected sink, so telemetry and UI mirrors never have to poll. The
//! sink is a plain trait object handed to the session, not a global
//! reachable from arbitrary depth.

use lumen_core::{GlobalSettings, PluginKind, Transport};

/// A state change that just happened in the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A named numeric parameter changed (UI or MIDI path).
    ParamChanged {
        /// Plugin whose parameter changed.
        plugin: PluginKind,
        /// Parameter name.
        param: String,
        /// New raw value.
        value: f32,
    },
    /// A plugin's settings changed through the closure-update path.
    SettingsUpdated {
        /// Plugin whose settings changed.
        plugin: PluginKind,
    },
    /// Global settings changed and were persisted.
    GlobalSettingsChanged {
        /// The new settings.
        settings: GlobalSettings,
    },
    /// A preset was written.
    PresetSaved {
        /// Preset name.
        name: String,
    },
    /// A preset replaced the whole settings mapping.
    PresetLoaded {
        /// Preset name.
        name: String,
    },
    /// A preset was deleted.
    PresetDeleted {
        /// Preset name.
        name: String,
    },
    /// Learn mode armed for a target.
    LearnArmed {
        /// Target plugin.
        plugin: PluginKind,
        /// Target parameter.
        param: String,
    },
    /// Learn mode cancelled (toggled off or explicitly).
    LearnCancelled,
    /// Learn mode captured a controller into a mapping.
    MappingLearned {
        /// Reporting device id.
        device: String,
        /// Controller number.
        controller: u8,
        /// Bound plugin.
        plugin: PluginKind,
        /// Bound parameter.
        param: String,
    },
    /// A sidechain link was created.
    SidechainLinked {
        /// Source plugin.
        from: PluginKind,
        /// Target plugin.
        to: PluginKind,
    },
    /// A sidechain link was removed.
    SidechainUnlinked {
        /// Source plugin.
        from: PluginKind,
        /// Target plugin.
        to: PluginKind,
    },
    /// A sidechain target's active flag flipped.
    SidechainActive {
        /// Target plugin.
        plugin: PluginKind,
        /// New flag value.
        active: bool,
    },
    /// A panel was mounted and its bridge created.
    PanelMounted {
        /// Mounted plugin.
        plugin: PluginKind,
    },
    /// A panel became the active (focused, top-most) panel.
    PanelActivated {
        /// Activated plugin.
        plugin: PluginKind,
    },
    /// A panel was moved or resized.
    PanelLayoutChanged {
        /// The plugin whose panel moved.
        plugin: PluginKind,
    },
    /// A panel was unmounted and its bridge discarded.
    PanelUnmounted {
        /// Unmounted plugin.
        plugin: PluginKind,
    },
    /// A clip was loaded into the signal generator.
    ClipLoaded {
        /// Clip name.
        name: String,
    },
    /// The playback transport changed.
    PlaybackChanged {
        /// New transport state.
        transport: Transport,
    },
    /// Text-to-audio generation started; a loading flag is up.
    AudioGenerationStarted {
        /// The prompt sent to the external service.
        prompt: String,
    },
    /// Text-to-audio generation failed; no state changed.
    AudioGenerationFailed,
    /// The whole session was reset to defaults.
    SessionReset,
}

/// Observer interface the session calls synchronously after each
/// mutation.
pub trait EventSink {
    /// Receive one event. Called on the session thread; implementations
    /// must not block.
    fn emit(&mut self, event: &SessionEvent);
}

/// Sink that discards everything. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &SessionEvent) {}
}
