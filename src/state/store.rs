//! Local copy of the activities fetched from the backend.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::toggle::{FailurePolicy, OptimisticToggle};
use crate::api::types::Activity;

/// A paid-flag change that must be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidChange {
    /// The activity id.
    pub id: String,
    /// The requested paid value.
    pub paid: bool,
    /// Generation tag of the optimistic flip.
    pub generation: u64,
}

/// The transient, possibly stale copy of the remote activities, plus the
/// optimistic paid toggle of each one.
#[derive(Debug, Default)]
pub struct ActivityStore {
    activities: Vec<Activity>,
    toggles: HashMap<String, OptimisticToggle>,
}

impl ActivityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the local copy with freshly fetched data.
    ///
    /// Existing toggles re-derive from the new `paid` values; toggles of
    /// activities that disappeared are dropped.
    pub fn replace_all(&mut self, activities: Vec<Activity>) {
        let mut toggles = HashMap::with_capacity(activities.len());
        for activity in &activities {
            let toggle = match self.toggles.remove(&activity.id) {
                Some(mut existing) => {
                    existing.sync(activity.paid);
                    existing
                }
                None => OptimisticToggle::new(activity.paid),
            };
            toggles.insert(activity.id.clone(), toggle);
        }
        debug!(count = activities.len(), "Activity store replaced");
        self.activities = activities;
        self.toggles = toggles;
    }

    /// All activities in backend order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Look up an activity by id.
    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// List index of an activity.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.activities.iter().position(|a| a.id == id)
    }

    /// Activity at a list index.
    pub fn get_index(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    /// Number of activities.
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// The toggle for an activity.
    pub fn toggle(&self, id: &str) -> Option<&OptimisticToggle> {
        self.toggles.get(id)
    }

    /// The paid value to render for an activity.
    pub fn displayed_paid(&self, id: &str) -> Option<bool> {
        self.toggles.get(id).map(|t| t.displayed())
    }

    /// Flip the displayed paid value of an activity.
    ///
    /// Returns the change to persist, or `None` if the id is unknown.
    pub fn begin_toggle(&mut self, id: &str) -> Option<PaidChange> {
        let toggle = self.toggles.get_mut(id)?;
        let (paid, generation) = toggle.flip();
        trace!(activity_id = %id, paid, generation, "Optimistic paid flip");
        Some(PaidChange {
            id: id.to_string(),
            paid,
            generation,
        })
    }

    /// Apply a successful paid update.
    pub fn settle_toggle(&mut self, id: &str, generation: u64) {
        if let Some(toggle) = self.toggles.get_mut(id) {
            toggle.settle(generation);
        }
    }

    /// Apply a failed paid update. Returns true if the display changed.
    pub fn fail_toggle(&mut self, id: &str, generation: u64, policy: FailurePolicy) -> bool {
        self.toggles
            .get_mut(id)
            .map(|t| t.fail(generation, policy))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(activities: &[(&str, bool)]) -> ActivityStore {
        let mut store = ActivityStore::new();
        store.replace_all(
            activities
                .iter()
                .map(|(id, paid)| Activity::new(*id, *paid))
                .collect(),
        );
        store
    }

    #[test]
    fn test_replace_all_builds_toggles() {
        let store = store_with(&[("a", true), ("b", false)]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.displayed_paid("a"), Some(true));
        assert_eq!(store.displayed_paid("b"), Some(false));
        assert_eq!(store.displayed_paid("c"), None);
    }

    #[test]
    fn test_begin_toggle_flips_display() {
        let mut store = store_with(&[("a", false)]);
        let change = store.begin_toggle("a").unwrap();

        assert!(change.paid);
        assert_eq!(change.id, "a");
        assert_eq!(store.displayed_paid("a"), Some(true));
        // Remote copy is untouched until a refresh.
        assert!(!store.get("a").unwrap().paid);
    }

    #[test]
    fn test_begin_toggle_unknown_id() {
        let mut store = store_with(&[("a", false)]);
        assert!(store.begin_toggle("zzz").is_none());
    }

    #[test]
    fn test_refresh_rederives_changed_value() {
        let mut store = store_with(&[("a", false)]);
        store.begin_toggle("a");
        store.replace_all(vec![Activity::new("a", true)]);

        let toggle = store.toggle("a").unwrap();
        assert!(toggle.displayed());
        assert!(!toggle.is_pending());
    }

    #[test]
    fn test_refresh_after_settled_toggle_follows_backend() {
        let mut store = store_with(&[("a", false)]);
        let change = store.begin_toggle("a").unwrap();
        store.settle_toggle("a", change.generation);

        // Someone else flipped it back before our refresh landed.
        store.replace_all(vec![Activity::new("a", false)]);
        assert_eq!(store.displayed_paid("a"), Some(false));
    }

    #[test]
    fn test_refresh_external_change() {
        let mut store = store_with(&[("a", true)]);
        store.replace_all(vec![Activity::new("a", false)]);
        assert_eq!(store.displayed_paid("a"), Some(false));
    }

    #[test]
    fn test_refresh_drops_removed_activities() {
        let mut store = store_with(&[("a", true), ("b", true)]);
        store.replace_all(vec![Activity::new("b", true)]);
        assert!(store.toggle("a").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_fail_toggle_respects_policy() {
        let mut store = store_with(&[("a", false)]);
        let change = store.begin_toggle("a").unwrap();

        assert!(!store.fail_toggle("a", change.generation, FailurePolicy::KeepOptimistic));
        assert_eq!(store.displayed_paid("a"), Some(true));

        assert!(store.fail_toggle("a", change.generation, FailurePolicy::Rollback));
        assert_eq!(store.displayed_paid("a"), Some(false));
    }
}
