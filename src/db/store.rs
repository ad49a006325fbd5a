// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence interfaces.
//!
//! Services take a store as a constructor argument so tests can substitute
//! an in-memory or failing implementation. Writes are last-write-wins per
//! row; there is no version check.

use crate::error::Result;
use crate::models::{Activity, Expense, Trip};
use std::future::Future;

/// Row-level access to the `activities` collection.
pub trait ActivityStore: Clone + Send + Sync + 'static {
    /// Insert a new activity (or overwrite one with the same ID).
    fn insert_activity(&self, activity: &Activity) -> impl Future<Output = Result<()>> + Send;

    fn get_activity(
        &self,
        activity_id: &str,
    ) -> impl Future<Output = Result<Option<Activity>>> + Send;

    /// Overwrite every field of an existing activity.
    ///
    /// Fails with `NotFound` if the activity no longer exists.
    fn update_activity(&self, activity: &Activity) -> impl Future<Output = Result<()>> + Send;

    /// Update only the `order` field of one activity.
    ///
    /// Fails if the activity no longer exists.
    fn update_activity_order(
        &self,
        activity_id: &str,
        order: u32,
    ) -> impl Future<Output = Result<()>> + Send;

    fn delete_activity(&self, activity_id: &str) -> impl Future<Output = Result<()>> + Send;

    /// All activities of a trip, ascending by `order`.
    fn list_activities_for_trip(
        &self,
        trip_id: &str,
    ) -> impl Future<Output = Result<Vec<Activity>>> + Send;
}

/// Row-level access to the `trips` collection.
pub trait TripStore: Clone + Send + Sync + 'static {
    fn insert_trip(&self, trip: &Trip) -> impl Future<Output = Result<()>> + Send;

    fn get_trip(&self, trip_id: &str) -> impl Future<Output = Result<Option<Trip>>> + Send;

    /// Overwrite an existing trip. Fails with `NotFound` if it is gone.
    fn update_trip(&self, trip: &Trip) -> impl Future<Output = Result<()>> + Send;

    /// All trips, most recent start date first.
    fn list_trips(&self) -> impl Future<Output = Result<Vec<Trip>>> + Send;

    /// Delete a trip and every activity and expense it owns.
    fn delete_trip(&self, trip_id: &str) -> impl Future<Output = Result<TripDeletion>> + Send;
}

/// Rows removed along with a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripDeletion {
    pub activities: usize,
    pub expenses: usize,
}

/// Row-level access to the `expenses` collection.
pub trait ExpenseStore: Clone + Send + Sync + 'static {
    fn insert_expense(&self, expense: &Expense) -> impl Future<Output = Result<()>> + Send;

    fn get_expense(&self, expense_id: &str)
        -> impl Future<Output = Result<Option<Expense>>> + Send;

    fn delete_expense(&self, expense_id: &str) -> impl Future<Output = Result<()>> + Send;

    /// All expenses of a trip, newest date first.
    fn list_expenses_for_trip(
        &self,
        trip_id: &str,
    ) -> impl Future<Output = Result<Vec<Expense>>> + Send;
}
