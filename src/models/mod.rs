// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod budget;
pub mod expense;
pub mod itinerary;
pub mod trip;

pub use activity::{Activity, ActivityDetails};
pub use budget::{BudgetSummary, CategoryTotal};
pub use expense::{Expense, ExpenseDetails};
pub use itinerary::{Itinerary, ItineraryDay};
pub use trip::{Trip, TripDetails};
