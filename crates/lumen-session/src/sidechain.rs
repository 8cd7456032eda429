//! Sidechain routing graph.
//!
//! Directed edges between plugins: the source's detected signal activity
//! raises a flag on the target. Fan-in is capped at one structurally by
//! keying links on the target, and there is no propagation past one hop,
//! so cycles cannot arise as a problem.

use std::collections::BTreeMap;

use lumen_core::PluginKind;

/// Directed sidechain links, at most one incoming per target.
#[derive(Debug, Clone, Default)]
pub struct SidechainGraph {
    /// target -> source
    links: BTreeMap<PluginKind, PluginKind>,
}

impl SidechainGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link from `from` to `to`.
    ///
    /// First writer wins: if `to` already has any incoming link the call
    /// is a no-op and returns `false`. Self-links are rejected.
    pub fn add_link(&mut self, from: PluginKind, to: PluginKind) -> bool {
        if from == to || self.links.contains_key(&to) {
            return false;
        }
        self.links.insert(to, from);
        true
    }

    /// Remove the exact `from -> to` edge. Returns `false` when that
    /// precise edge does not exist.
    pub fn remove_link(&mut self, from: PluginKind, to: PluginKind) -> bool {
        if self.links.get(&to) == Some(&from) {
            self.links.remove(&to);
            true
        } else {
            false
        }
    }

    /// The source currently linked into `to`, if any.
    pub fn incoming(&self, to: PluginKind) -> Option<PluginKind> {
        self.links.get(&to).copied()
    }

    /// All `(from, to)` edges, ordered by target.
    pub fn links(&self) -> Vec<(PluginKind, PluginKind)> {
        self.links.iter().map(|(to, from)| (*from, *to)).collect()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether there are no edges.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Drop every edge.
    pub fn clear(&mut self) {
        self.links.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_writer_wins_on_a_target() {
        let mut graph = SidechainGraph::new();
        assert!(graph.add_link(PluginKind::Reverb, PluginKind::Compressor));
        assert!(!graph.add_link(PluginKind::Delay, PluginKind::Compressor));
        assert_eq!(
            graph.incoming(PluginKind::Compressor),
            Some(PluginKind::Reverb)
        );
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn remove_requires_the_exact_edge() {
        let mut graph = SidechainGraph::new();
        graph.add_link(PluginKind::Reverb, PluginKind::Compressor);

        // Wrong source: no-op.
        assert!(!graph.remove_link(PluginKind::Delay, PluginKind::Compressor));
        assert_eq!(graph.len(), 1);

        assert!(graph.remove_link(PluginKind::Reverb, PluginKind::Compressor));
        assert!(graph.is_empty());
        assert!(!graph.remove_link(PluginKind::Reverb, PluginKind::Compressor));
    }

    #[test]
    fn removing_frees_the_target_for_a_new_source() {
        let mut graph = SidechainGraph::new();
        graph.add_link(PluginKind::Reverb, PluginKind::Compressor);
        graph.remove_link(PluginKind::Reverb, PluginKind::Compressor);
        assert!(graph.add_link(PluginKind::Delay, PluginKind::Compressor));
    }

    #[test]
    fn self_links_are_rejected() {
        let mut graph = SidechainGraph::new();
        assert!(!graph.add_link(PluginKind::Delay, PluginKind::Delay));
        assert!(graph.is_empty());
    }

    #[test]
    fn links_lists_edges_as_from_to() {
        let mut graph = SidechainGraph::new();
        graph.add_link(PluginKind::Reverb, PluginKind::Compressor);
        graph.add_link(PluginKind::Compressor, PluginKind::Delay);
        let links = graph.links();
        assert!(links.contains(&(PluginKind::Reverb, PluginKind::Compressor)));
        assert!(links.contains(&(PluginKind::Compressor, PluginKind::Delay)));
    }
}
