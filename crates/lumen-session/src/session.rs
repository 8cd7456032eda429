//! The frame-driven session controller.
//!
//! One [`Session`] owns the whole rack: the parameter store, the MIDI
//! router, the sidechain graph, the signal generator, and one visualizer
//! bridge per mounted panel. Everything advances on a single logical
//! thread, once per display frame; MIDI messages are handled as they
//! arrive and the next tick observes the updated settings.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use lumen_control::{LearnState, LearnTarget, MidiMessage, MidiRouter, RouterEvent};
use lumen_core::{
    AudioClip, AudioSignal, GlobalSettings, ParamStore, PluginKind, PluginSettings,
    SignalGenerator, Transport, Viewport, Visualizer, VisualizerSnapshot,
};
use lumen_registry::PluginRegistry;

use crate::error::SessionError;
use crate::event::{EventSink, NullSink, SessionEvent};
use crate::layout::{PanelLayout, RackLayout};
use crate::paths;
use crate::preset::{Overwrite, Preset, PresetStore};
use crate::settings::{load_global_settings, save_global_settings};
use crate::sidechain::SidechainGraph;

/// How long a sidechain target stays active after the last source
/// transient, seconds.
const SIDECHAIN_HOLD_SECS: f64 = 0.25;

/// Construction options for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Directory for persisted state (settings, presets). `None` keeps
    /// the whole session in memory, with preset operations disabled.
    pub config_dir: Option<PathBuf>,
    /// Host frame rate driving [`Session::tick`].
    pub frame_rate: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            config_dir: Some(paths::user_config_dir()),
            frame_rate: SignalGenerator::DEFAULT_FRAME_RATE,
        }
    }
}

impl SessionOptions {
    /// Options for a session with no persistence at all.
    pub fn in_memory() -> Self {
        Self {
            config_dir: None,
            frame_rate: SignalGenerator::DEFAULT_FRAME_RATE,
        }
    }

    /// Options rooted at a specific config directory.
    pub fn at(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: Some(config_dir.into()),
            frame_rate: SignalGenerator::DEFAULT_FRAME_RATE,
        }
    }
}

/// Output of one session tick: the signal that drove it and one snapshot
/// per mounted panel, in rack order.
#[derive(Debug, Clone)]
pub struct SessionFrame {
    /// The signal value this frame was driven by.
    pub signal: AudioSignal,
    /// Render snapshots for every mounted panel.
    pub panels: Vec<(PluginKind, VisualizerSnapshot)>,
}

/// The rack session: parameter routing, MIDI, sidechain, playback, and
/// per-panel visualizer bridges.
pub struct Session {
    store: ParamStore,
    router: MidiRouter,
    graph: SidechainGraph,
    generator: SignalGenerator,
    bridges: BTreeMap<PluginKind, Box<dyn Visualizer + Send>>,
    registry: PluginRegistry,
    global: GlobalSettings,
    config_dir: Option<PathBuf>,
    frame_rate: f64,
    sink: Box<dyn EventSink>,
    hold_until: BTreeMap<PluginKind, f64>,
    generating_audio: bool,
    layout: RackLayout,
    active: Option<PluginKind>,
}

impl Session {
    /// Create a session.
    ///
    /// Global settings are loaded once from the config directory; a
    /// missing file reads as defaults, a malformed one is logged and
    /// replaced by defaults.
    pub fn new(options: SessionOptions) -> Self {
        let global = match &options.config_dir {
            Some(dir) => match load_global_settings(paths::settings_file(dir)) {
                Ok(settings) => settings,
                Err(error) => {
                    tracing::warn!(%error, "failed to load global settings, using defaults");
                    GlobalSettings::default()
                }
            },
            None => GlobalSettings::default(),
        };

        tracing::info!(
            config_dir = ?options.config_dir,
            frame_rate = options.frame_rate,
            "session started"
        );

        Self {
            store: ParamStore::new(),
            router: MidiRouter::new(),
            graph: SidechainGraph::new(),
            generator: SignalGenerator::new(options.frame_rate),
            bridges: BTreeMap::new(),
            registry: PluginRegistry::new(),
            global,
            config_dir: options.config_dir,
            frame_rate: options.frame_rate,
            sink: Box::new(NullSink),
            hold_until: BTreeMap::new(),
            generating_audio: false,
            layout: RackLayout::new(),
            active: None,
        }
    }

    /// Replace the event sink. Events are delivered synchronously after
    /// each mutation, on the session thread.
    pub fn set_event_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sink = sink;
    }

    fn emit(&mut self, event: SessionEvent) {
        self.sink.emit(&event);
    }

    // ---- plugin settings -------------------------------------------------

    /// Shared handle to a plugin's current settings.
    pub fn settings(&self, kind: PluginKind) -> Arc<PluginSettings> {
        self.store.shared(kind)
    }

    /// Read access to the parameter store.
    pub fn store(&self) -> &ParamStore {
        &self.store
    }

    /// Current global settings.
    pub fn global(&self) -> GlobalSettings {
        self.global
    }

    /// The plugin registry backing this session.
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Set one named parameter (the UI widget path). No clamping happens
    /// here; widgets supply values from their own bounded controls.
    pub fn update_param(&mut self, kind: PluginKind, name: &str, value: f32) -> bool {
        if self.store.set_param(kind, name, value) {
            self.emit(SessionEvent::ParamChanged {
                plugin: kind,
                param: name.to_string(),
                value,
            });
            true
        } else {
            false
        }
    }

    /// Apply a mutation closure to one plugin's settings.
    pub fn update_settings(&mut self, kind: PluginKind, f: impl FnOnce(&mut PluginSettings)) {
        self.store.update(kind, f);
        self.emit(SessionEvent::SettingsUpdated { plugin: kind });
    }

    /// Replace the global settings, persisting them immediately.
    pub fn set_global(&mut self, settings: GlobalSettings) {
        self.global = settings;
        self.persist_global();
        self.emit(SessionEvent::GlobalSettingsChanged { settings });
    }

    fn persist_global(&self) {
        if let Some(dir) = &self.config_dir
            && let Err(error) = save_global_settings(&self.global, paths::settings_file(dir))
        {
            tracing::warn!(%error, "failed to persist global settings");
        }
    }

    // ---- panel lifecycle -------------------------------------------------

    /// Mount a panel, creating a fresh visualizer bridge from the
    /// plugin's current settings. A no-op if already mounted.
    pub fn mount(&mut self, kind: PluginKind) -> bool {
        if self.bridges.contains_key(&kind) {
            return false;
        }
        let settings = self.store.shared(kind);
        let bridge = self.registry.create(kind, &settings);
        self.bridges.insert(kind, bridge);
        self.emit(SessionEvent::PanelMounted { plugin: kind });
        true
    }

    /// Unmount a panel, discarding its bridge and every particle, ring,
    /// and pending burst inside it. No further `advance` calls happen
    /// for it.
    pub fn unmount(&mut self, kind: PluginKind) -> bool {
        if self.bridges.remove(&kind).is_some() {
            self.emit(SessionEvent::PanelUnmounted { plugin: kind });
            true
        } else {
            false
        }
    }

    /// Whether a panel is currently mounted.
    pub fn is_mounted(&self, kind: PluginKind) -> bool {
        self.bridges.contains_key(&kind)
    }

    /// Kinds of all mounted panels, in rack order.
    pub fn mounted(&self) -> Vec<PluginKind> {
        self.bridges.keys().copied().collect()
    }

    /// Make a panel the active one: mount it if needed and raise it to
    /// the top of the stacking order.
    pub fn activate(&mut self, kind: PluginKind) {
        self.mount(kind);
        self.layout.raise(kind);
        if self.active != Some(kind) {
            self.active = Some(kind);
            self.emit(SessionEvent::PanelActivated { plugin: kind });
        }
    }

    /// The currently active panel, if any.
    pub fn active(&self) -> Option<PluginKind> {
        self.active
    }

    /// Layout of one panel.
    pub fn layout(&self, kind: PluginKind) -> PanelLayout {
        self.layout.get(kind)
    }

    /// Record a panel move or resize coming from the window chrome.
    pub fn set_layout(&mut self, kind: PluginKind, layout: PanelLayout) {
        self.layout.set(kind, layout);
        self.emit(SessionEvent::PanelLayoutChanged { plugin: kind });
    }

    // ---- frame advancement -----------------------------------------------

    /// Advance the whole session by one animation frame.
    ///
    /// Order within the frame: the signal advances, sidechain flags are
    /// refreshed from it, then every mounted bridge is synced with the
    /// current settings and advanced.
    pub fn tick(&mut self, viewport: Viewport) -> SessionFrame {
        let signal = self.generator.tick();
        self.update_sidechain(&signal);

        let mut panels = Vec::with_capacity(self.bridges.len());
        for (kind, bridge) in &mut self.bridges {
            let settings = self.store.shared(*kind);
            bridge.sync_settings(&settings);
            panels.push((*kind, bridge.advance(&signal, viewport, &self.global)));
        }

        SessionFrame { signal, panels }
    }

    fn update_sidechain(&mut self, signal: &AudioSignal) {
        for (from, to) in self.graph.links() {
            if !to.supports_sidechain() {
                continue;
            }
            if signal.transient && self.store.shared(from).drives_sidechain() {
                self.hold_until.insert(to, signal.time + SIDECHAIN_HOLD_SECS);
            }
            let active = self
                .hold_until
                .get(&to)
                .is_some_and(|&until| signal.time < until);
            if active != self.store.shared(to).sidechain_active() {
                self.store.update(to, |s| {
                    s.set_sidechain_active(active);
                });
                self.emit(SessionEvent::SidechainActive { plugin: to, active });
            }
        }
    }

    // ---- MIDI ------------------------------------------------------------

    /// Toggle MIDI learn for a target parameter.
    pub fn toggle_learn(
        &mut self,
        plugin: PluginKind,
        param: &str,
        min: f32,
        max: f32,
    ) -> LearnState {
        let state = self.router.toggle_learn(LearnTarget {
            plugin,
            param: param.to_string(),
            min,
            max,
        });
        match state {
            LearnState::Armed => self.emit(SessionEvent::LearnArmed {
                plugin,
                param: param.to_string(),
            }),
            LearnState::Idle => self.emit(SessionEvent::LearnCancelled),
        }
        state
    }

    /// Handle one incoming MIDI message.
    ///
    /// Returns what the router did with it; unmapped and non-CC messages
    /// are silently ignored.
    pub fn handle_midi(&mut self, message: &MidiMessage) -> RouterEvent {
        let outcome = self.router.handle(message, &mut self.store);
        match &outcome {
            RouterEvent::Learned { address, binding } => {
                let event = SessionEvent::MappingLearned {
                    device: address.device.clone(),
                    controller: address.controller,
                    plugin: binding.plugin,
                    param: binding.param.clone(),
                };
                self.emit(event);
            }
            RouterEvent::Applied {
                plugin,
                param,
                value,
            } => {
                let event = SessionEvent::ParamChanged {
                    plugin: *plugin,
                    param: param.clone(),
                    value: *value,
                };
                self.emit(event);
            }
            RouterEvent::Ignored => {}
        }
        outcome
    }

    /// Read access to the MIDI router.
    pub fn router(&self) -> &MidiRouter {
        &self.router
    }

    // ---- sidechain links -------------------------------------------------

    /// Create a sidechain link. First writer wins: returns `false` (and
    /// emits nothing) when the target already has an incoming link.
    pub fn link_sidechain(&mut self, from: PluginKind, to: PluginKind) -> bool {
        if self.graph.add_link(from, to) {
            self.emit(SessionEvent::SidechainLinked { from, to });
            true
        } else {
            false
        }
    }

    /// Remove the exact sidechain link, clearing the target's active
    /// flag so it returns to its untriggered visual state.
    pub fn unlink_sidechain(&mut self, from: PluginKind, to: PluginKind) -> bool {
        if !self.graph.remove_link(from, to) {
            return false;
        }
        self.hold_until.remove(&to);
        if to.supports_sidechain() && self.store.shared(to).sidechain_active() {
            self.store.update(to, |s| {
                s.set_sidechain_active(false);
            });
            self.emit(SessionEvent::SidechainActive {
                plugin: to,
                active: false,
            });
        }
        self.emit(SessionEvent::SidechainUnlinked { from, to });
        true
    }

    /// Read access to the sidechain graph.
    pub fn sidechain(&self) -> &SidechainGraph {
        &self.graph
    }

    // ---- playback --------------------------------------------------------

    /// Load a clip into the signal generator.
    pub fn load_clip(&mut self, clip: AudioClip) {
        let name = clip.name.clone();
        self.generator.load_clip(clip);
        self.emit(SessionEvent::ClipLoaded { name });
    }

    /// Start or resume clip playback.
    pub fn play(&mut self) -> bool {
        if self.generator.play() {
            let transport = self.generator.transport();
            self.emit(SessionEvent::PlaybackChanged { transport });
            true
        } else {
            false
        }
    }

    /// Pause clip playback.
    pub fn pause(&mut self) -> bool {
        if self.generator.pause() {
            let transport = self.generator.transport();
            self.emit(SessionEvent::PlaybackChanged { transport });
            true
        } else {
            false
        }
    }

    /// Stop playback and revert to the idle signal.
    pub fn stop(&mut self) {
        self.generator.stop();
        let transport = self.generator.transport();
        self.emit(SessionEvent::PlaybackChanged { transport });
    }

    /// Current transport state.
    pub fn transport(&self) -> Transport {
        self.generator.transport()
    }

    // ---- external audio generation ---------------------------------------

    /// Mark the start of an external text-to-audio request.
    ///
    /// The actual call runs on the host's own time; the session only
    /// tracks the loading flag. Returns `false` when a request is
    /// already in flight.
    pub fn begin_audio_generation(&mut self, prompt: &str) -> bool {
        if self.generating_audio {
            return false;
        }
        self.generating_audio = true;
        self.emit(SessionEvent::AudioGenerationStarted {
            prompt: prompt.to_string(),
        });
        true
    }

    /// Deliver the result of an external text-to-audio request.
    ///
    /// Success loads the clip and starts playback. Failure is logged and
    /// the loading flag cleared; playback state and every setting stay
    /// exactly as they were.
    pub fn finish_audio_generation(&mut self, result: Result<AudioClip, SessionError>) {
        self.generating_audio = false;
        match result {
            Ok(clip) => {
                self.load_clip(clip);
                let _ = self.play();
            }
            Err(error) => {
                tracing::warn!(%error, "audio generation failed, no audio produced");
                self.emit(SessionEvent::AudioGenerationFailed);
            }
        }
    }

    /// Whether a text-to-audio request is in flight.
    pub fn is_generating_audio(&self) -> bool {
        self.generating_audio
    }

    // ---- presets ---------------------------------------------------------

    fn preset_store(&self) -> Result<PresetStore, SessionError> {
        match &self.config_dir {
            Some(dir) => Ok(PresetStore::new(paths::presets_dir(dir))),
            None => Err(SessionError::StorageDisabled),
        }
    }

    /// Names of all stored presets.
    pub fn list_presets(&self) -> Result<Vec<String>, SessionError> {
        self.preset_store()?.list()
    }

    /// Save the current settings of every plugin as a named preset.
    pub fn save_preset(&mut self, name: &str, overwrite: Overwrite) -> Result<(), SessionError> {
        let preset = Preset::capture(name, &self.store);
        self.preset_store()?.save(&preset, overwrite)?;
        self.emit(SessionEvent::PresetSaved {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Load a preset, replacing the entire settings mapping.
    ///
    /// A missing preset is silently ignored (returns `Ok(false)`); only
    /// real I/O or parse failures surface as errors.
    pub fn load_preset(&mut self, name: &str) -> Result<bool, SessionError> {
        let preset = match self.preset_store()?.load(name) {
            Ok(preset) => preset,
            Err(SessionError::PresetNotFound(_)) => {
                tracing::debug!(name, "preset not found, ignoring load");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };
        self.store.import(preset.plugins);
        self.emit(SessionEvent::PresetLoaded {
            name: name.to_string(),
        });
        Ok(true)
    }

    /// Delete a preset by name. A missing preset is silently ignored.
    pub fn delete_preset(&mut self, name: &str) -> Result<bool, SessionError> {
        match self.preset_store()?.delete(name) {
            Ok(()) => {
                self.emit(SessionEvent::PresetDeleted {
                    name: name.to_string(),
                });
                Ok(true)
            }
            Err(SessionError::PresetNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    // ---- reset -----------------------------------------------------------

    /// Reset the whole session to defaults: settings, MIDI mappings,
    /// sidechain links, playback, and global settings (which are
    /// persisted as defaults). Mounted panels stay mounted but their
    /// simulations restart from scratch. Preset files are left on disk.
    pub fn reset(&mut self) {
        self.store.reset();
        self.router.clear();
        self.graph.clear();
        self.hold_until.clear();
        self.generator = SignalGenerator::new(self.frame_rate);
        self.generating_audio = false;
        for bridge in self.bridges.values_mut() {
            bridge.reset();
        }
        self.layout = RackLayout::new();
        self.active = None;
        self.global = GlobalSettings::default();
        self.persist_global();
        self.emit(SessionEvent::SessionReset);
    }
}
