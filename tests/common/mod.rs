// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use dashmap::DashSet;
use std::sync::Arc;
use trip_planner::config::Config;
use trip_planner::db::{ActivityStore, FirestoreDb, InMemoryStore, TripStore};
use trip_planner::error::{AppError, Result};
use trip_planner::models::{Activity, ActivityDetails, ExpenseDetails, Trip, TripDetails};
use trip_planner::routes::create_router;
use trip_planner::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState<InMemoryStore>>) {
    let state = Arc::new(AppState::new(Config::test_default(), InMemoryStore::new()));
    (create_router(state.clone()), state)
}

/// Create a test app whose store is the offline Firestore mock.
#[allow(dead_code)]
pub fn create_offline_app() -> axum::Router {
    let state = Arc::new(AppState::new(Config::test_default(), test_db_offline()));
    create_router(state)
}

#[allow(dead_code)]
pub fn trip_details(name: &str) -> TripDetails {
    TripDetails {
        name: name.to_string(),
        destination: "Hanoi".to_string(),
        start_date: "2024-05-01".to_string(),
        end_date: "2024-05-05".to_string(),
        currency: "USD".to_string(),
        total_budget: 1000.0,
        is_public: false,
    }
}

#[allow(dead_code)]
pub fn activity_details(title: &str, date: Option<&str>, start_time: Option<&str>) -> ActivityDetails {
    ActivityDetails {
        title: title.to_string(),
        date: date.map(str::to_string),
        start_time: start_time.map(str::to_string),
        location: "Old Quarter".to_string(),
        price: 10.0,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn expense_details(category: &str, amount: f64, date: &str) -> ExpenseDetails {
    ExpenseDetails {
        amount,
        currency: None,
        category: category.to_string(),
        description: None,
        date: date.to_string(),
    }
}

/// Insert a trip directly into a store.
#[allow(dead_code)]
pub async fn seed_trip<S: TripStore>(store: &S, name: &str) -> Trip {
    let trip = Trip::new(trip_details(name), "2024-01-01T00:00:00Z");
    store.insert_trip(&trip).await.unwrap();
    trip
}

/// Sorted `order` values of a trip as persisted.
#[allow(dead_code)]
pub async fn persisted_orders<S: ActivityStore>(store: &S, trip_id: &str) -> Vec<u32> {
    let mut orders: Vec<u32> = store
        .list_activities_for_trip(trip_id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.order)
        .collect();
    orders.sort_unstable();
    orders
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// In-memory store whose order writes fail for selected activities.
#[derive(Clone, Default)]
pub struct FlakyStore {
    pub inner: InMemoryStore,
    failing: Arc<DashSet<String>>,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn fail_order_writes_for(&self, activity_id: &str) {
        self.failing.insert(activity_id.to_string());
    }

    pub fn heal(&self) {
        self.failing.clear();
    }
}

impl ActivityStore for FlakyStore {
    async fn insert_activity(&self, activity: &Activity) -> Result<()> {
        self.inner.insert_activity(activity).await
    }

    async fn get_activity(&self, activity_id: &str) -> Result<Option<Activity>> {
        self.inner.get_activity(activity_id).await
    }

    async fn update_activity(&self, activity: &Activity) -> Result<()> {
        self.inner.update_activity(activity).await
    }

    async fn update_activity_order(&self, activity_id: &str, order: u32) -> Result<()> {
        if self.failing.contains(activity_id) {
            return Err(AppError::Database(format!(
                "injected failure for {}",
                activity_id
            )));
        }
        self.inner.update_activity_order(activity_id, order).await
    }

    async fn delete_activity(&self, activity_id: &str) -> Result<()> {
        self.inner.delete_activity(activity_id).await
    }

    async fn list_activities_for_trip(&self, trip_id: &str) -> Result<Vec<Activity>> {
        self.inner.list_activities_for_trip(trip_id).await
    }
}
