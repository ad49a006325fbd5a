// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod itinerary;
pub mod ordering;

pub use itinerary::{chronological, group_by_date};
pub use ordering::{ActivityOrderingService, TripOrdering};
