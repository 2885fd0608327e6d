//! Selection state for one select region
//!
//! Interactive UIs apply the exclusivity rules as the user clicks;
//! everything rendering outside a UI (tests, the CLI) goes through
//! [`Choices`] so `render` can trust its input.

use std::collections::{BTreeSet, HashSet};

use crate::parser::{OptionKind, SelectRegion};

/// Toggled options of a single select region, addressed by
/// `(group index, option index)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choices {
    selected: BTreeSet<(usize, usize)>,
}

impl Choices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle one option, applying the exclusivity rules:
    ///
    /// - toggling a selected option deselects it;
    /// - a sovereign option clears everything else in its group;
    /// - selecting anything clears a selected sovereign in its group;
    /// - an id option clears selected same-id peers in its group;
    /// - multi options clear nothing further.
    ///
    /// Indices that do not name an option are ignored.
    pub fn toggle(&mut self, region: &SelectRegion, group: usize, option: usize) {
        let Some(picked) = region.option(group, option) else {
            return;
        };
        if self.selected.remove(&(group, option)) {
            return;
        }

        self.selected.retain(|&(g, o)| {
            if g != group {
                return true;
            }
            let peer = match region.option(g, o) {
                Some(peer) => peer,
                None => return false,
            };
            match &picked.kind {
                OptionKind::Sovereign => false,
                OptionKind::Id(id) => match &peer.kind {
                    OptionKind::Sovereign => false,
                    OptionKind::Id(peer_id) => peer_id != id,
                    OptionKind::Multi => true,
                },
                OptionKind::Multi => !matches!(peer.kind, OptionKind::Sovereign),
            }
        });
        self.selected.insert((group, option));
    }

    /// Toggle the first option whose value (or, failing that, label)
    /// matches `name`. Returns false when nothing matches.
    pub fn toggle_value(&mut self, region: &SelectRegion, name: &str) -> bool {
        let found = region
            .iter_options()
            .find(|(_, _, opt)| opt.value == name)
            .or_else(|| region.iter_options().find(|(_, _, opt)| opt.label == name));
        match found {
            Some((g, o, _)) => {
                self.toggle(region, g, o);
                true
            }
            None => false,
        }
    }

    pub fn is_selected(&self, group: usize, option: usize) -> bool {
        self.selected.contains(&(group, option))
    }

    /// Chosen option values, ready for [`Selections`](crate::Selections).
    pub fn values(&self, region: &SelectRegion) -> HashSet<String> {
        self.selected
            .iter()
            .filter_map(|&(g, o)| region.option(g, o))
            .map(|opt| opt.value.clone())
            .collect()
    }
}
