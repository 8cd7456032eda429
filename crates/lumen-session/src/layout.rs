//! Panel layout state: size, position, and stacking order.
//!
//! Layout is shell state, not plugin settings: it never enters presets
//! and the visualizers never see it. The drag/resize chrome itself is an
//! external collaborator; this module only records where panels ended up.

use std::collections::BTreeMap;

use lumen_core::PluginKind;

/// Size, position, and stacking order of one rack panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    /// Left edge, pixels.
    pub x: f32,
    /// Top edge, pixels.
    pub y: f32,
    /// Panel width, pixels.
    pub width: f32,
    /// Panel height, pixels.
    pub height: f32,
    /// Stacking order; higher draws on top.
    pub z_order: u32,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 420.0,
            height: 260.0,
            z_order: 0,
        }
    }
}

/// Layout records for every panel, cascaded on creation so fresh racks
/// do not stack panels on one point.
#[derive(Debug, Clone)]
pub struct RackLayout {
    panels: BTreeMap<PluginKind, PanelLayout>,
    top_z: u32,
}

impl Default for RackLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl RackLayout {
    /// Horizontal and vertical offset between freshly created panels.
    const CASCADE_STEP: f32 = 48.0;

    /// Create a layout with a cascaded default placement per kind.
    pub fn new() -> Self {
        let mut panels = BTreeMap::new();
        for (i, kind) in PluginKind::ALL.into_iter().enumerate() {
            let offset = i as f32 * Self::CASCADE_STEP;
            panels.insert(
                kind,
                PanelLayout {
                    x: offset,
                    y: offset,
                    z_order: i as u32,
                    ..PanelLayout::default()
                },
            );
        }
        Self {
            panels,
            top_z: PluginKind::ALL.len() as u32,
        }
    }

    /// Layout of one panel.
    pub fn get(&self, kind: PluginKind) -> PanelLayout {
        self.panels.get(&kind).copied().unwrap_or_default()
    }

    /// Replace one panel's layout. The z order is preserved; use
    /// [`raise`](Self::raise) to change stacking.
    pub fn set(&mut self, kind: PluginKind, layout: PanelLayout) {
        let z_order = self.get(kind).z_order;
        self.panels.insert(kind, PanelLayout { z_order, ..layout });
    }

    /// Bring one panel above everything else.
    pub fn raise(&mut self, kind: PluginKind) {
        let layout = self.get(kind);
        self.top_z += 1;
        self.panels.insert(
            kind,
            PanelLayout {
                z_order: self.top_z,
                ..layout
            },
        );
    }

    /// Whether this panel is currently on top.
    pub fn is_on_top(&self, kind: PluginKind) -> bool {
        let z = self.get(kind).z_order;
        self.panels.values().all(|p| p.z_order <= z)
    }
}
