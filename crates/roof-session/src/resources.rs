use std::collections::BTreeSet;

use roof_core::resources::{self, ResourceGuide};

/// Expand/collapse state of the resource guides. All guides start collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceBrowser {
    expanded: BTreeSet<&'static str>,
}

impl ResourceBrowser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Guides in display order.
    #[must_use]
    pub const fn guides(&self) -> &'static [ResourceGuide] {
        resources::catalog()
    }

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip one guide. Returns its new expanded state, or `None` for an
    /// unknown id.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let guide = resources::find(id)?;
        if self.expanded.remove(guide.id) {
            Some(false)
        } else {
            self.expanded.insert(guide.id);
            Some(true)
        }
    }

    /// Ids of the expanded guides.
    pub fn expanded(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.expanded.iter().copied()
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}
