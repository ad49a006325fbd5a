// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: store traits plus Firestore and in-memory backends.

pub mod firestore;
pub mod memory;
pub mod store;

pub use firestore::FirestoreDb;
pub use memory::InMemoryStore;
pub use store::{ActivityStore, ExpenseStore, TripDeletion, TripStore};

/// Collection names as constants.
pub mod collections {
    pub const TRIPS: &str = "trips";
    pub const ACTIVITIES: &str = "activities";
    pub const EXPENSES: &str = "expenses";
}
