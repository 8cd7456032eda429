//! Incoming MIDI message model.

/// Compound key identifying one physical controller: the reporting
/// device's stable id plus the controller number.
///
/// Device ids are opaque strings supplied by the host's device layer.
/// Two distinct inputs reporting the same id share mappings; the router
/// does not attempt to disambiguate them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CcAddress {
    /// Stable id of the input device.
    pub device: String,
    /// Controller number, 0-127.
    pub controller: u8,
}

impl CcAddress {
    /// Create an address.
    pub fn new(device: impl Into<String>, controller: u8) -> Self {
        Self {
            device: device.into(),
            controller,
        }
    }
}

/// An incoming MIDI message from a selected input device.
///
/// Only [`ControlChange`](Self::ControlChange) carries routing meaning;
/// every other variant exists so callers can forward a full stream and
/// let the router ignore what it does not handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MidiMessage {
    /// Control change: `(device, controller 0-127, value 0-127)`.
    ControlChange {
        /// Reporting device id.
        device: String,
        /// Controller number.
        controller: u8,
        /// Raw 7-bit value.
        value: u8,
    },
    /// Note on; ignored by the router.
    NoteOn {
        /// Reporting device id.
        device: String,
        /// Note number.
        note: u8,
        /// Velocity.
        velocity: u8,
    },
    /// Note off; ignored by the router.
    NoteOff {
        /// Reporting device id.
        device: String,
        /// Note number.
        note: u8,
    },
    /// Anything else (clock, sysex, pitch bend); ignored by the router.
    Other,
}

impl MidiMessage {
    /// Convenience constructor for a control-change message.
    pub fn cc(device: impl Into<String>, controller: u8, value: u8) -> Self {
        MidiMessage::ControlChange {
            device: device.into(),
            controller,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cc_addresses_hash_by_device_and_controller() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(CcAddress::new("dev1", 10), "a");
        map.insert(CcAddress::new("dev1", 11), "b");
        map.insert(CcAddress::new("dev2", 10), "c");
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&CcAddress::new("dev1", 10)), Some(&"a"));
    }
}
