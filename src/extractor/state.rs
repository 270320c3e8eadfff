//! Extraction state tracking.
//!
//! `ExtractionState` records which elements of a candidate region were already
//! consumed by a handler (a list swallows its items, a paragraph its inline
//! children) and which tags the region walk considers at all.

use std::collections::HashSet;

use crate::etree::NodeId;

use super::tags::TAG_CATALOG;

/// Consumed elements and the working tag set of one region walk.
#[derive(Debug, Clone)]
pub struct ExtractionState {
    consumed: HashSet<NodeId>,
    working_set: HashSet<&'static str>,
}

impl ExtractionState {
    /// Create state with the default working set from `TAG_CATALOG`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            consumed: HashSet::new(),
            working_set: TAG_CATALOG.into_iter().collect(),
        }
    }

    /// Mark a node as consumed so the walk skips it.
    pub fn mark_done(&mut self, node_id: NodeId) {
        self.consumed.insert(node_id);
    }

    #[must_use]
    pub fn is_done(&self, node_id: NodeId) -> bool {
        self.consumed.contains(&node_id)
    }

    #[must_use]
    pub fn is_potential_tag(&self, tag: &str) -> bool {
        self.working_set.contains(tag)
    }

    pub fn add_potential_tag(&mut self, tag: &'static str) {
        self.working_set.insert(tag);
    }
}

impl Default for ExtractionState {
    fn default() -> Self {
        Self::new()
    }
}
