//! In-memory collection of leave requests with server-is-truth merging and
//! presentation ordering.

use std::cmp::Ordering;

use crate::model::{LeaveRequest, RequestStatus};
use crate::utils::time::parse_iso_date;

/// Which column drives the ordering of the request list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Newest submission first (by `created_at`).
    Recent,
    /// By leave start date.
    StartDate,
    /// Pending (submitted) requests first, recency as tie-break.
    PendingFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Owned list of the requests currently known to the client.
#[derive(Debug, Default, Clone)]
pub struct RequestStore {
    items: Vec<LeaveRequest>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<LeaveRequest>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[LeaveRequest] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LeaveRequest> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Replaces the whole collection with a fresh server snapshot.
    pub fn replace_all(&mut self, items: Vec<LeaveRequest>) {
        self.items = items;
    }

    /// Replaces the record with the same id, or appends when unknown.
    pub fn upsert(&mut self, updated: LeaveRequest) {
        match self.items.iter_mut().find(|item| item.id == updated.id) {
            Some(slot) => *slot = updated,
            None => self.items.push(updated),
        }
    }

    /// Replaces the record with the same id. Unknown ids are ignored, so a
    /// stale confirmation cannot resurrect a request removed by a refresh.
    /// Applying the same update twice leaves the store unchanged.
    pub fn merge_server_update(&mut self, updated: LeaveRequest) -> bool {
        match self.items.iter_mut().find(|item| item.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Flips `decision_seen` locally before the acknowledgement round-trip.
    pub fn apply_optimistic_seen(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.decision_seen = true;
                true
            }
            None => false,
        }
    }

    /// Edits a known record in place. Used when a mutating endpoint confirms
    /// without returning the updated record.
    pub fn synthesize<F>(&mut self, id: &str, apply: F) -> bool
    where
        F: FnOnce(&mut LeaveRequest),
    {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                apply(item);
                true
            }
            None => false,
        }
    }

    /// Returns the requests ordered for display.
    ///
    /// With `prioritize_unseen` set, every request the user has not yet
    /// acknowledged (`decision_seen == false`) is pinned ahead of the rest;
    /// both partitions keep the selected ordering internally. The direction
    /// never flips a partition: `PendingFirst` keeps submitted requests ahead
    /// and applies the direction to the recency tie-break only. The sort is
    /// stable, so equal keys keep their stored order.
    pub fn sorted(
        &self,
        key: SortKey,
        order: SortOrder,
        prioritize_unseen: bool,
    ) -> Vec<LeaveRequest> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| {
            if prioritize_unseen && a.decision_seen != b.decision_seen {
                return if a.decision_seen {
                    Ordering::Greater
                } else {
                    Ordering::Less
                };
            }
            if key == SortKey::PendingFirst {
                let partition = by_pending(a, b);
                if partition != Ordering::Equal {
                    return partition;
                }
            }
            let ordering = match key {
                SortKey::Recent | SortKey::PendingFirst => by_recent(a, b),
                SortKey::StartDate => by_start_date(a, b),
            };
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        items
    }
}

/// Newest first; records without a timestamp sink to the end.
fn by_recent(a: &LeaveRequest, b: &LeaveRequest) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

fn by_start_date(a: &LeaveRequest, b: &LeaveRequest) -> Ordering {
    let a = parse_iso_date(&a.start_date);
    let b = parse_iso_date(&b.start_date);
    a.cmp(&b)
}

fn by_pending(a: &LeaveRequest, b: &LeaveRequest) -> Ordering {
    let a_pending = a.status == RequestStatus::Submitted;
    let b_pending = b.status == RequestStatus::Submitted;
    b_pending.cmp(&a_pending)
}
