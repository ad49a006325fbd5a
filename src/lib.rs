// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip planner: trips, ordered activities, itineraries and budgets.
//!
//! This crate provides the backend API behind the trip-planning frontend.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{ActivityStore, FirestoreDb, TripStore};
use services::ActivityOrderingService;

/// Shared application state.
pub struct AppState<S = FirestoreDb> {
    pub config: Config,
    pub db: S,
    pub ordering: ActivityOrderingService<S>,
}

impl<S: ActivityStore + TripStore> AppState<S> {
    pub fn new(config: Config, db: S) -> Self {
        Self {
            config,
            ordering: ActivityOrderingService::new(db.clone()),
            db,
        }
    }
}
