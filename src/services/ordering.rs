// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity ordering service.
//!
//! Keeps the `order` field of a trip's activities equal to their position:
//! after every successful append, reorder or remove the orders are exactly
//! `0..n`. Local state is updated before the writes are confirmed, so a
//! [`TripOrdering`] tracks both the proposed sequence and the last one known
//! to be persisted. After a failed write the caller runs
//! [`ActivityOrderingService::reconcile`] to refetch.

use crate::db::ActivityStore;
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityDetails};
use crate::time_utils::now_rfc3339;
use futures_util::{stream, StreamExt};
use std::collections::HashSet;

const MAX_CONCURRENT_WRITES: usize = 16;

/// Ordered activities of one trip, as proposed locally and as last persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TripOrdering {
    trip_id: String,
    proposed: Vec<Activity>,
    confirmed: Vec<Activity>,
}

impl TripOrdering {
    fn from_rows(trip_id: &str, rows: Vec<Activity>) -> Self {
        Self {
            trip_id: trip_id.to_string(),
            proposed: rows.clone(),
            confirmed: rows,
        }
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    /// The optimistic sequence, in render order.
    pub fn proposed(&self) -> &[Activity] {
        &self.proposed
    }

    /// Last state known to be persisted, sorted by `order`.
    pub fn confirmed(&self) -> &[Activity] {
        &self.confirmed
    }

    pub fn into_proposed(self) -> Vec<Activity> {
        self.proposed
    }

    /// Whether every proposed change has been confirmed by the store.
    pub fn is_synced(&self) -> bool {
        self.proposed == self.confirmed
    }

    pub fn len(&self) -> usize {
        self.proposed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposed.is_empty()
    }

    fn next_order(&self) -> u32 {
        self.proposed
            .iter()
            .map(|a| a.order)
            .max()
            .map_or(0, |max| max + 1)
    }

    fn ids(&self) -> Vec<String> {
        self.proposed.iter().map(|a| a.id.clone()).collect()
    }

    fn confirm_order(&mut self, activity_id: &str, order: u32) {
        if let Some(row) = self.confirmed.iter_mut().find(|a| a.id == activity_id) {
            row.order = order;
        }
    }
}

/// Outcome of one row write in a batch.
struct OrderWrite {
    activity_id: String,
    order: u32,
    result: Result<()>,
}

/// Maintains contiguous activity order on top of an injected store.
#[derive(Clone)]
pub struct ActivityOrderingService<S> {
    store: S,
}

impl<S: ActivityStore> ActivityOrderingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read every activity of a trip, sorted by `order`.
    pub async fn load(&self, trip_id: &str) -> Result<TripOrdering> {
        let rows = self.store.list_activities_for_trip(trip_id).await?;
        tracing::debug!(trip_id, count = rows.len(), "Loaded trip ordering");
        Ok(TripOrdering::from_rows(trip_id, rows))
    }

    /// Add an activity after the current last one.
    ///
    /// It gets `max(order) + 1`, or 0 for an empty trip.
    pub async fn append(
        &self,
        ordering: &mut TripOrdering,
        details: ActivityDetails,
    ) -> Result<Activity> {
        details.check()?;

        let order = ordering.next_order();
        let activity = Activity::new(&ordering.trip_id, details, order, &now_rfc3339());

        self.store.insert_activity(&activity).await?;

        ordering.proposed.push(activity.clone());
        ordering.confirmed.push(activity.clone());

        tracing::info!(
            trip_id = %ordering.trip_id,
            activity_id = %activity.id,
            order,
            "Activity appended"
        );

        Ok(activity)
    }

    /// Apply a complete new sequence: `order := index` for each ID.
    ///
    /// `ordered_ids` must name every activity of the trip exactly once;
    /// anything else is rejected before state changes or writes. The proposed
    /// sequence is updated first, then one write is issued per changed row.
    /// Writes run concurrently and are not rolled back if some fail.
    pub async fn reorder(&self, ordering: &mut TripOrdering, ordered_ids: &[String]) -> Result<()> {
        check_permutation(ordering, ordered_ids)?;

        let mut proposed = Vec::with_capacity(ordered_ids.len());
        let mut changes = Vec::new();
        for (index, id) in ordered_ids.iter().enumerate() {
            let order = index as u32;
            // Presence is guaranteed by check_permutation.
            if let Some(row) = ordering.proposed.iter().find(|a| &a.id == id) {
                let mut row = row.clone();
                if row.order != order {
                    row.order = order;
                    changes.push((row.id.clone(), order));
                }
                proposed.push(row);
            }
        }
        ordering.proposed = proposed;

        tracing::debug!(
            trip_id = %ordering.trip_id,
            changed = changes.len(),
            "Reordering activities"
        );

        self.persist_orders(ordering, changes).await
    }

    /// Drag-and-drop move: take the activity at `from` and insert it at `to`.
    pub async fn move_activity(
        &self,
        ordering: &mut TripOrdering,
        from: usize,
        to: usize,
    ) -> Result<()> {
        let len = ordering.len();
        if from >= len || to >= len {
            return Err(AppError::Validation(format!(
                "move {} -> {} is out of range for {} activities",
                from, to, len
            )));
        }
        if from == to {
            return Ok(());
        }

        let mut ids = ordering.ids();
        let moved = ids.remove(from);
        ids.insert(to, moved);

        self.reorder(ordering, &ids).await
    }

    /// Delete an activity and close the gap it leaves.
    ///
    /// Every activity after the removed one moves up by one, which for a
    /// contiguous trip is the same as renumbering by position.
    pub async fn remove(&self, ordering: &mut TripOrdering, activity_id: &str) -> Result<()> {
        let position = ordering
            .proposed
            .iter()
            .position(|a| a.id == activity_id)
            .ok_or_else(|| AppError::NotFound(format!("Activity {}", activity_id)))?;

        self.store.delete_activity(activity_id).await?;

        let removed = ordering.proposed.remove(position);
        ordering.confirmed.retain(|a| a.id != activity_id);

        let mut changes = Vec::new();
        for (index, row) in ordering.proposed.iter_mut().enumerate() {
            let order = index as u32;
            if row.order != order {
                row.order = order;
                changes.push((row.id.clone(), order));
            }
        }

        tracing::info!(
            trip_id = %ordering.trip_id,
            activity_id,
            removed_order = removed.order,
            shifted = changes.len(),
            "Activity removed"
        );

        self.persist_orders(ordering, changes).await
    }

    /// Discard local state and refetch the persisted order.
    pub async fn reconcile(&self, ordering: &mut TripOrdering) -> Result<()> {
        let rows = self.store.list_activities_for_trip(&ordering.trip_id).await?;
        tracing::info!(
            trip_id = %ordering.trip_id,
            was_synced = ordering.is_synced(),
            count = rows.len(),
            "Reconciled trip ordering"
        );
        *ordering = TripOrdering::from_rows(&ordering.trip_id, rows);
        Ok(())
    }

    /// Write `(activity_id, order)` pairs concurrently and fold the results
    /// into `ordering.confirmed`.
    async fn persist_orders(
        &self,
        ordering: &mut TripOrdering,
        changes: Vec<(String, u32)>,
    ) -> Result<()> {
        let attempted = changes.len();
        if attempted == 0 {
            return Ok(());
        }

        let store = &self.store;
        let writes: Vec<OrderWrite> = stream::iter(changes)
            .map(|(activity_id, order)| async move {
                let result = store.update_activity_order(&activity_id, order).await;
                OrderWrite {
                    activity_id,
                    order,
                    result,
                }
            })
            .buffer_unordered(MAX_CONCURRENT_WRITES)
            .collect()
            .await;

        let mut failed = 0;
        for write in writes {
            match write.result {
                Ok(()) => ordering.confirm_order(&write.activity_id, write.order),
                Err(e) => {
                    failed += 1;
                    tracing::warn!(
                        trip_id = %ordering.trip_id,
                        activity_id = %write.activity_id,
                        order = write.order,
                        error = %e,
                        "Order write failed"
                    );
                }
            }
        }
        ordering.confirmed.sort_by_key(|a| a.order);

        if failed > 0 {
            return Err(AppError::PartialWrite { failed, attempted });
        }

        Ok(())
    }
}

fn check_permutation(ordering: &TripOrdering, ordered_ids: &[String]) -> Result<()> {
    let known: HashSet<&str> = ordering.proposed.iter().map(|a| a.id.as_str()).collect();
    let mut seen = HashSet::with_capacity(ordered_ids.len());

    for id in ordered_ids {
        if !known.contains(id.as_str()) {
            return Err(AppError::Validation(format!(
                "activity {} does not belong to trip {}",
                id, ordering.trip_id
            )));
        }
        if !seen.insert(id.as_str()) {
            return Err(AppError::Validation(format!("activity {} listed twice", id)));
        }
    }

    if seen.len() != known.len() {
        return Err(AppError::Validation(format!(
            "expected all {} activities of the trip, got {}",
            known.len(),
            seen.len()
        )));
    }

    Ok(())
}
