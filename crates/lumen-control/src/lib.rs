//! Lumen Control - MIDI control layer for the rack
//!
//! This crate maps incoming MIDI control-change messages to plugin
//! parameters and implements the learn-mode capture workflow.
//!
//! # Core Abstractions
//!
//! - [`MidiMessage`] - Incoming message model; only control-change
//!   messages are ever acted on
//! - [`CcAddress`] - `(device id, controller number)` compound key
//! - [`CcBinding`] - `(plugin, parameter, range)` a controller drives
//! - [`MidiRouter`] - Mapping table plus the single-slot learn state
//!   machine
//!
//! # Learn workflow
//!
//! Arming a target puts the router in learn mode; the next control-change
//! message is *captured* into a binding instead of being applied, and the
//! router disarms. Arming the same `(plugin, parameter)` twice cancels.
//! Only one target can be armed at a time.
//!
//! This crate performs no logging and no I/O; outcomes are reported as
//! [`RouterEvent`] values for the session layer to act on.

pub mod message;
pub mod router;

pub use message::{CcAddress, MidiMessage};
pub use router::{CcBinding, LearnState, LearnTarget, MidiRouter, RouterEvent};
