// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity routes: ordered list, drag-and-drop reordering and itinerary.
//!
//! Every request loads the trip's ordering fresh from the store. A
//! `partial_write` error means some order writes failed; the client should
//! refetch the list to see what was persisted.

use crate::db::{ActivityStore, TripStore};
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityDetails, Itinerary};
use crate::routes::trips::require_trip;
use crate::services::{chronological, group_by_date};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes<S: ActivityStore + TripStore>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route(
            "/api/trips/{trip_id}/activities",
            get(list_activities::<S>).post(append_activity::<S>),
        )
        .route(
            "/api/trips/{trip_id}/activities/order",
            put(reorder_activities::<S>),
        )
        .route(
            "/api/trips/{trip_id}/activities/move",
            post(move_activity::<S>),
        )
        .route(
            "/api/trips/{trip_id}/activities/{activity_id}",
            put(update_activity::<S>).delete(remove_activity::<S>),
        )
        .route("/api/trips/{trip_id}/itinerary", get(get_itinerary::<S>))
}

// ─── Ordered List ────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub trip_id: String,
    pub activities: Vec<Activity>,
}

async fn list_activities<S: ActivityStore + TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<ActivitiesResponse>> {
    require_trip(&state.db, &trip_id).await?;
    let ordering = state.ordering.load(&trip_id).await?;

    Ok(Json(ActivitiesResponse {
        trip_id,
        activities: ordering.into_proposed(),
    }))
}

/// Concurrent appends to one trip can both read the same maximum and get
/// the same order; a later reorder or remove compacts them again.
async fn append_activity<S: ActivityStore + TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
    Json(details): Json<ActivityDetails>,
) -> Result<(StatusCode, Json<Activity>)> {
    // Reject bad input before any store round trip.
    details.check()?;
    require_trip(&state.db, &trip_id).await?;

    let mut ordering = state.ordering.load(&trip_id).await?;
    let activity = state.ordering.append(&mut ordering, details).await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

// ─── Reordering ──────────────────────────────────────────────

#[derive(Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReorderRequest {
    /// Every activity ID of the trip, in the new order
    pub activity_ids: Vec<String>,
}

async fn reorder_activities<S: ActivityStore + TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<ActivitiesResponse>> {
    require_trip(&state.db, &trip_id).await?;

    let mut ordering = state.ordering.load(&trip_id).await?;
    state
        .ordering
        .reorder(&mut ordering, &request.activity_ids)
        .await?;

    Ok(Json(ActivitiesResponse {
        trip_id,
        activities: ordering.into_proposed(),
    }))
}

#[derive(Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MoveRequest {
    /// Current index
    pub from: usize,
    /// Index after the move
    pub to: usize,
}

async fn move_activity<S: ActivityStore + TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<ActivitiesResponse>> {
    require_trip(&state.db, &trip_id).await?;

    let mut ordering = state.ordering.load(&trip_id).await?;
    state
        .ordering
        .move_activity(&mut ordering, request.from, request.to)
        .await?;

    Ok(Json(ActivitiesResponse {
        trip_id,
        activities: ordering.into_proposed(),
    }))
}

// ─── Single Activity ─────────────────────────────────────────

/// Edit an activity's details. Its position is unchanged.
async fn update_activity<S: ActivityStore + TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((trip_id, activity_id)): Path<(String, String)>,
    Json(details): Json<ActivityDetails>,
) -> Result<Json<Activity>> {
    details.check()?;

    let mut activity = state
        .db
        .get_activity(&activity_id)
        .await?
        .filter(|a| a.trip_id == trip_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Activity {} not found in trip {}", activity_id, trip_id))
        })?;

    activity.apply(details, &now_rfc3339());
    state.db.update_activity(&activity).await?;

    tracing::info!(trip_id = %trip_id, activity_id = %activity_id, "Activity updated");
    Ok(Json(activity))
}

async fn remove_activity<S: ActivityStore + TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((trip_id, activity_id)): Path<(String, String)>,
) -> Result<Json<ActivitiesResponse>> {
    require_trip(&state.db, &trip_id).await?;

    let mut ordering = state.ordering.load(&trip_id).await?;
    state.ordering.remove(&mut ordering, &activity_id).await?;

    Ok(Json(ActivitiesResponse {
        trip_id,
        activities: ordering.into_proposed(),
    }))
}

// ─── Itinerary ───────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ItineraryResponse {
    pub trip_id: String,
    #[serde(flatten)]
    pub itinerary: Itinerary,
}

/// Activities grouped by day, days in date order and each day by start time.
async fn get_itinerary<S: ActivityStore + TripStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(trip_id): Path<String>,
) -> Result<Json<ItineraryResponse>> {
    require_trip(&state.db, &trip_id).await?;

    let activities = state.db.list_activities_for_trip(&trip_id).await?;
    let itinerary = group_by_date(&chronological(activities));

    tracing::debug!(trip_id = %trip_id, days = itinerary.days.len(), "Built itinerary");

    Ok(Json(ItineraryResponse {
        trip_id,
        itinerary,
    }))
}
