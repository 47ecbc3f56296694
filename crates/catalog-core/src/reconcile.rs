//! # Author Set Reconciliation
//!
//! Pure diff between the authors a book currently has and the authors a
//! request asks for.
//!
//! ## Plan
//! ```text
//! current   = {10, 11}
//! requested = [10, 12]
//!
//!            current \ requested   → to_delete = [11]
//!            requested \ current   → to_insert = [12]
//!            current ∩ requested   → retained  = [10]
//! ```
//!
//! Comparison is by id only. Duplicates in `requested` collapse to their
//! first occurrence.

use std::collections::HashSet;

use crate::types::AuthorId;

/// The association changes implied by a requested author set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Linked now, not requested. Order of `current`.
    pub to_delete: Vec<AuthorId>,
    /// Requested, not linked yet. Request order.
    pub to_insert: Vec<AuthorId>,
    /// Linked and requested. Request order.
    pub retained: Vec<AuthorId>,
}

impl SyncPlan {
    /// True when applying the plan would not change the association set.
    pub fn is_noop(&self) -> bool {
        self.to_delete.is_empty() && self.to_insert.is_empty()
    }
}

/// Computes the association diff for one book.
pub fn plan(current: &[AuthorId], requested: &[AuthorId]) -> SyncPlan {
    let current_set: HashSet<AuthorId> = current.iter().copied().collect();
    let requested_set: HashSet<AuthorId> = requested.iter().copied().collect();

    let mut deleted = HashSet::new();
    let to_delete = current
        .iter()
        .copied()
        .filter(|id| !requested_set.contains(id) && deleted.insert(*id))
        .collect();

    let mut seen = HashSet::new();
    let mut to_insert = Vec::new();
    let mut retained = Vec::new();
    for id in requested.iter().copied() {
        if !seen.insert(id) {
            continue;
        }
        if current_set.contains(&id) {
            retained.push(id);
        } else {
            to_insert.push(id);
        }
    }

    SyncPlan {
        to_delete,
        to_insert,
        retained,
    }
}

/// Ids in `current` that are absent from `requested`, in `current` order.
pub fn stale_ids(current: &[AuthorId], requested: &[AuthorId]) -> Vec<AuthorId> {
    plan(current, requested).to_delete
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_mixed_change() {
        let plan = plan(&[10, 11], &[10, 12]);
        assert_eq!(plan.to_delete, vec![11]);
        assert_eq!(plan.to_insert, vec![12]);
        assert_eq!(plan.retained, vec![10]);
        assert!(!plan.is_noop());
    }

    #[test]
    fn test_plan_identical_sets_is_noop() {
        let plan = plan(&[1, 2, 3], &[3, 2, 1]);
        assert!(plan.is_noop());
        assert_eq!(plan.retained, vec![3, 2, 1]);
    }

    #[test]
    fn test_plan_duplicates_collapse() {
        let plan = plan(&[5], &[7, 7, 5, 7]);
        assert_eq!(plan.to_insert, vec![7]);
        assert_eq!(plan.retained, vec![5]);
        assert!(plan.to_delete.is_empty());
    }

    #[test]
    fn test_plan_from_empty_current() {
        let plan = plan(&[], &[4, 2]);
        assert!(plan.to_delete.is_empty());
        assert_eq!(plan.to_insert, vec![4, 2]);
    }

    #[test]
    fn test_plan_to_empty_request() {
        let plan = plan(&[4, 2], &[]);
        assert_eq!(plan.to_delete, vec![4, 2]);
        assert!(plan.to_insert.is_empty());
    }

    #[test]
    fn test_plan_partitions_every_id() {
        let current = [1, 2, 3, 4, 5];
        let requested = [4, 5, 6, 7];
        let plan = plan(&current, &requested);

        // C \ R, R \ C and C ∩ R are disjoint and cover C ∪ R.
        let mut all: Vec<AuthorId> = plan
            .to_delete
            .iter()
            .chain(&plan.to_insert)
            .chain(&plan.retained)
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_stale_ids() {
        assert_eq!(stale_ids(&[10, 11, 12], &[12]), vec![10, 11]);
    }
}
