//! Selection state: at most one highlighted point id.
//!
//! Selection exists purely to drive a visual distinction (a larger marker)
//! at render time. It is independent of filtering, ordering, and layout — it
//! never feeds back into the pipeline, and a re-fetch never clears it. A
//! selected id that no longer appears among the positioned points simply has
//! no visual effect until it reappears.

use serde::{Deserialize, Serialize};

/// The currently selected point id, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    /// Start with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, replacing any prior selection. Always succeeds — the id
    /// does not have to be present in the current batch.
    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    /// Drop the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let sel = Selection::new();
        assert!(sel.selected_id().is_none());
        assert!(!sel.is_selected("anything"));
    }

    #[test]
    fn select_replaces_prior() {
        let mut sel = Selection::new();
        sel.select("m-1");
        assert!(sel.is_selected("m-1"));
        sel.select("m-2");
        assert!(!sel.is_selected("m-1"));
        assert!(sel.is_selected("m-2"));
    }

    #[test]
    fn clear_removes_selection() {
        let mut sel = Selection::new();
        sel.select("m-1");
        sel.clear();
        assert!(sel.selected_id().is_none());
    }

    #[test]
    fn selecting_an_absent_id_is_fine() {
        // The id need not exist anywhere; it just carries no visual effect.
        let mut sel = Selection::new();
        sel.select("never-fetched");
        assert!(sel.is_selected("never-fetched"));
    }
}
