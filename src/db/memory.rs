// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local store backed by `DashMap`, for local development and tests.

use crate::db::{ActivityStore, ExpenseStore, TripDeletion, TripStore};
use crate::error::{AppError, Result};
use crate::models::{Activity, Expense, Trip};
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory store. Clones share the same maps.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    trips: Arc<DashMap<String, Trip>>,
    activities: Arc<DashMap<String, Activity>>,
    expenses: Arc<DashMap<String, Expense>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }
}

impl ActivityStore for InMemoryStore {
    async fn insert_activity(&self, activity: &Activity) -> Result<()> {
        self.activities
            .insert(activity.id.clone(), activity.clone());
        Ok(())
    }

    async fn get_activity(&self, activity_id: &str) -> Result<Option<Activity>> {
        Ok(self.activities.get(activity_id).map(|a| a.value().clone()))
    }

    async fn update_activity(&self, activity: &Activity) -> Result<()> {
        match self.activities.get_mut(&activity.id) {
            Some(mut existing) => {
                *existing = activity.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Activity {}", activity.id))),
        }
    }

    async fn update_activity_order(&self, activity_id: &str, order: u32) -> Result<()> {
        match self.activities.get_mut(activity_id) {
            Some(mut existing) => {
                existing.order = order;
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Activity {}", activity_id))),
        }
    }

    async fn delete_activity(&self, activity_id: &str) -> Result<()> {
        self.activities.remove(activity_id);
        Ok(())
    }

    async fn list_activities_for_trip(&self, trip_id: &str) -> Result<Vec<Activity>> {
        let mut activities: Vec<Activity> = self
            .activities
            .iter()
            .filter(|entry| entry.trip_id == trip_id)
            .map(|entry| entry.value().clone())
            .collect();
        activities.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        Ok(activities)
    }
}

impl TripStore for InMemoryStore {
    async fn insert_trip(&self, trip: &Trip) -> Result<()> {
        self.trips.insert(trip.id.clone(), trip.clone());
        Ok(())
    }

    async fn get_trip(&self, trip_id: &str) -> Result<Option<Trip>> {
        Ok(self.trips.get(trip_id).map(|t| t.value().clone()))
    }

    async fn update_trip(&self, trip: &Trip) -> Result<()> {
        match self.trips.get_mut(&trip.id) {
            Some(mut existing) => {
                *existing = trip.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Trip {}", trip.id))),
        }
    }

    async fn list_trips(&self) -> Result<Vec<Trip>> {
        let mut trips: Vec<Trip> = self.trips.iter().map(|t| t.value().clone()).collect();
        trips.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(trips)
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<TripDeletion> {
        let mut deleted = TripDeletion::default();
        self.activities.retain(|_, activity| {
            let owned = activity.trip_id == trip_id;
            deleted.activities += usize::from(owned);
            !owned
        });
        self.expenses.retain(|_, expense| {
            let owned = expense.trip_id == trip_id;
            deleted.expenses += usize::from(owned);
            !owned
        });

        self.trips.remove(trip_id);
        tracing::debug!(
            trip_id,
            activities = deleted.activities,
            expenses = deleted.expenses,
            "Deleted trip and its rows"
        );
        Ok(deleted)
    }
}

impl ExpenseStore for InMemoryStore {
    async fn insert_expense(&self, expense: &Expense) -> Result<()> {
        self.expenses.insert(expense.id.clone(), expense.clone());
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>> {
        Ok(self.expenses.get(expense_id).map(|e| e.value().clone()))
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<()> {
        self.expenses.remove(expense_id);
        Ok(())
    }

    async fn list_expenses_for_trip(&self, trip_id: &str) -> Result<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|entry| entry.trip_id == trip_id)
            .map(|entry| entry.value().clone())
            .collect();
        expenses.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(expenses)
    }
}
