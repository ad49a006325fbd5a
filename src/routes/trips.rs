// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip routes: CRUD, visibility and budget.

use crate::db::{ActivityStore, ExpenseStore, TripStore};
use crate::error::{AppError, Result};
use crate::models::{BudgetSummary, Trip, TripDetails};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes<S: ActivityStore + ExpenseStore + TripStore>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/api/trips", get(list_trips::<S>).post(create_trip::<S>))
        .route(
            "/api/trips/{trip_id}",
            get(get_trip::<S>)
                .put(update_trip::<S>)
                .delete(delete_trip::<S>),
        )
        .route("/api/trips/{trip_id}/visibility", post(toggle_visibility::<S>))
        .route("/api/trips/{trip_id}/budget", get(get_budget::<S>))
}

/// Fetch a trip or fail with 404.
pub(crate) async fn require_trip<S: TripStore>(db: &S, trip_id: &str) -> Result<Trip> {
    db.get_trip(trip_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip {} not found", trip_id)))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TripsResponse {
    pub trips: Vec<Trip>,
}

async fn list_trips<S: TripStore>(State(state): State<Arc<AppState<S>>>) -> Result<Json<TripsResponse>> {
    let trips = state.db.list_trips().await?;
    Ok(Json(TripsResponse { trips }))
}

async fn create_trip<S: TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(details): Json<TripDetails>,
) -> Result<(StatusCode, Json<Trip>)> {
    details.check()?;

    let trip = Trip::new(details, &now_rfc3339());
    state.db.insert_trip(&trip).await?;

    tracing::info!(trip_id = %trip.id, destination = %trip.destination, "Trip created");
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn get_trip<S: TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>> {
    Ok(Json(require_trip(&state.db, &trip_id).await?))
}

async fn update_trip<S: TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
    Json(details): Json<TripDetails>,
) -> Result<Json<Trip>> {
    details.check()?;

    let mut trip = require_trip(&state.db, &trip_id).await?;
    trip.apply(details, &now_rfc3339());
    state.db.update_trip(&trip).await?;

    tracing::info!(trip_id = %trip.id, "Trip updated");
    Ok(Json(trip))
}

/// Flip a trip between public and private.
async fn toggle_visibility<S: TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>> {
    let mut trip = require_trip(&state.db, &trip_id).await?;
    trip.is_public = !trip.is_public;
    trip.updated_at = now_rfc3339();
    state.db.update_trip(&trip).await?;

    tracing::info!(trip_id = %trip.id, is_public = trip.is_public, "Trip visibility changed");
    Ok(Json(trip))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteTripResponse {
    pub success: bool,
    pub deleted_activities: usize,
    pub deleted_expenses: usize,
}

/// Delete a trip together with its activities and expenses.
async fn delete_trip<S: TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<DeleteTripResponse>> {
    require_trip(&state.db, &trip_id).await?;

    let deleted = state.db.delete_trip(&trip_id).await?;

    Ok(Json(DeleteTripResponse {
        success: true,
        deleted_activities: deleted.activities,
        deleted_expenses: deleted.expenses,
    }))
}

async fn get_budget<S: ActivityStore + ExpenseStore + TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<BudgetSummary>> {
    let trip = require_trip(&state.db, &trip_id).await?;
    let activities = state.db.list_activities_for_trip(&trip_id).await?;
    let expenses = state.db.list_expenses_for_trip(&trip_id).await?;

    Ok(Json(BudgetSummary::for_trip(&trip, &activities, &expenses)))
}
